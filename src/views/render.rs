//! Plain-text rendering of view state for the terminal.

use super::events::{DialogState, ViewEvent};
use super::navigation::LOGIN_PROMPT_MESSAGE;
use crate::models::{Movie, User};

/// One catalogue line: favorite marker, title, director and genres
pub fn movie_line(movie: &Movie, favorite: bool) -> String {
    let marker = if favorite { '★' } else { '☆' };
    let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
    let mut line = format!("{marker} {} [{}]", movie.title, movie.id);
    if !movie.director.name.is_empty() {
        line.push_str(&format!(" by {}", movie.director.name));
    }
    if !genres.is_empty() {
        line.push_str(&format!(" ({})", genres.join(", ")));
    }
    line
}

pub fn user_summary(user: &User) -> String {
    let mut text = format!("Username: {}\nEmail:    {}\n", user.username, user.email);
    if let Some(birthday) = &user.birthday {
        text.push_str(&format!("Birthday: {birthday}\n"));
    }
    text.push_str(&format!("Favorites: {}", user.favorite_movies.len()));
    text
}

/// Dialog contents, or `None` when no dialog is open
pub fn dialog(state: &DialogState) -> Option<String> {
    match state {
        DialogState::None => None,
        DialogState::Login => Some("Log in with your username and password".to_string()),
        DialogState::Registration => {
            Some("Sign up with a username, password, email and birthday".to_string())
        }
        DialogState::LoginPrompt => Some(format!("Access Required\n{LOGIN_PROMPT_MESSAGE}")),
        DialogState::ShowGenre(genre) => Some(format!("{}\n\n{}", genre.name, genre.description)),
        DialogState::ShowDirector(director) => {
            let mut text = director.name.clone();
            if let Some(place) = &director.birth_place {
                text.push_str(&format!("\nBirth Place: {place}"));
            }
            if let Some(count) = director.movies_count {
                text.push_str(&format!("\nMovies Directed: {count}"));
            }
            if !director.bio.is_empty() {
                text.push_str(&format!("\n\n{}", director.bio));
            }
            Some(text)
        }
        DialogState::ShowSynopsis(synopsis) => Some(format!(
            "{}\n\n{}\n\nStarring: {}",
            synopsis.title,
            synopsis.description,
            synopsis.actors.join(", ")
        )),
    }
}

pub fn event(event: &ViewEvent) -> String {
    match event {
        ViewEvent::Notify(message) => message.clone(),
        ViewEvent::Navigate(route) => format!("→ {route}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Director, Genre, Synopsis};
    use crate::views::Route;

    fn movie() -> Movie {
        Movie {
            id: "m1".to_string(),
            title: "Alien".to_string(),
            description: String::new(),
            actors: vec![],
            image_path: String::new(),
            featured: false,
            director: Director {
                name: "Ridley Scott".to_string(),
                ..Default::default()
            },
            genres: vec![
                Genre {
                    name: "Horror".to_string(),
                    description: String::new(),
                },
                Genre {
                    name: "Sci-Fi".to_string(),
                    description: String::new(),
                },
            ],
        }
    }

    #[test]
    fn movie_line_should_mark_favorites() {
        assert_eq!(
            movie_line(&movie(), true),
            "★ Alien [m1] by Ridley Scott (Horror, Sci-Fi)"
        );
        assert!(movie_line(&movie(), false).starts_with('☆'));
    }

    #[test]
    fn closed_dialog_should_render_nothing() {
        assert_eq!(dialog(&DialogState::None), None);
    }

    #[test]
    fn synopsis_dialog_should_list_actors() {
        let state = DialogState::ShowSynopsis(Synopsis {
            title: "Alien".to_string(),
            description: "A crew meets a creature.".to_string(),
            actors: vec!["Sigourney Weaver".to_string(), "Tom Skerritt".to_string()],
        });
        let text = dialog(&state).unwrap();
        assert!(text.ends_with("Starring: Sigourney Weaver, Tom Skerritt"));
    }

    #[test]
    fn director_dialog_should_skip_missing_fields() {
        let state = DialogState::ShowDirector(Director {
            name: "Ridley Scott".to_string(),
            bio: String::new(),
            birth_place: Some("South Shields".to_string()),
            movies_count: None,
        });
        assert_eq!(
            dialog(&state).unwrap(),
            "Ridley Scott\nBirth Place: South Shields"
        );
    }

    #[test]
    fn navigate_event_should_render_route() {
        assert_eq!(event(&ViewEvent::Navigate(Route::Welcome)), "→ /welcome");
    }
}
