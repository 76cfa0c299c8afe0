//! # Data Models
//!
//! Typed schemas for the payloads exchanged with the MyMDB backend.
//! Field names follow the backend's JSON (`_id`, `Title`, `FavoriteMovies`, ...).

use serde::{Deserialize, Serialize};

/// Director record embedded in a movie or returned by the director lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
    #[serde(rename = "Bio", alias = "bio", default)]
    pub bio: String,
    #[serde(
        rename = "BirthPlace",
        alias = "birthPlace",
        alias = "Birthplace",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_place: Option<String>,
    #[serde(
        rename = "MoviesCount",
        alias = "moviesCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub movies_count: Option<u32>,
}

/// Genre record embedded in a movie or returned by the genre lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name", alias = "name", alias = "genre", default)]
    pub name: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Actors", default)]
    pub actors: Vec<String>,
    #[serde(rename = "ImagePath", default)]
    pub image_path: String,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
    #[serde(rename = "Director", default)]
    pub director: Director,
    #[serde(rename = "Genres", default)]
    pub genres: Vec<Genre>,
}

impl Movie {
    pub fn synopsis(&self) -> Synopsis {
        Synopsis {
            title: self.title.clone(),
            description: self.description.clone(),
            actors: self.actors.clone(),
        }
    }
}

/// Title, description and cast of a movie, shown in the synopsis dialog
#[derive(Debug, Clone, PartialEq)]
pub struct Synopsis {
    pub title: String,
    pub description: String,
    pub actors: Vec<String>,
}

/// A user record as returned by the backend. The password never comes back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Birthday", default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movies: Vec<String>,
}

/// Outgoing payload for registration and profile updates.
///
/// Empty fields are left out of the JSON body so a profile update
/// only touches what the user actually filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDetails {
    #[serde(rename = "Username", skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(rename = "Password", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(rename = "Email", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "String::is_empty")]
    pub birthday: String,
}

impl UserDetails {
    /// Pre-fill an edit form from the stored user. The password stays blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            email: user.email.clone(),
            birthday: user.birthday.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Body of a successful `POST /login`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}
