//! # Movie List
//!
//! The movie catalogue with the signed-in user's favorites.

use super::events::{DialogState, EventQueue, Route, ViewEvent};
use crate::api::{ApiClient, ApiResult};
use crate::models::{Director, Genre, Movie};
use crate::session::Session;

/// Favorite movie ids in the order they were added.
///
/// Adding is a set union and removing a set difference, whatever the
/// backend does with repeated calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new(ids: Vec<String>) -> Self {
        let mut favorites = Self::default();
        for id in ids {
            favorites.insert(&id);
        }
        favorites
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.ids.iter().any(|id| id == movie_id)
    }

    pub fn insert(&mut self, movie_id: &str) {
        if !self.contains(movie_id) {
            self.ids.push(movie_id.to_string());
        }
    }

    pub fn remove(&mut self, movie_id: &str) {
        self.ids.retain(|id| id != movie_id);
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub struct MovieListView {
    api: ApiClient,
    session: Session,
    movies: Vec<Movie>,
    favorites: Favorites,
    dialog: DialogState,
    events: EventQueue,
}

impl MovieListView {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            movies: Vec::new(),
            favorites: Favorites::default(),
            dialog: DialogState::None,
            events: EventQueue::new(),
        }
    }

    /// Load the catalogue and, with a stored user, the favorites.
    /// Both requests run concurrently.
    pub async fn init(&mut self) {
        match self.session.user_id() {
            Some(user_id) => {
                let (movies, favorites) =
                    tokio::join!(self.api.list_movies(), self.api.get_favorites(&user_id));
                self.apply_movies(movies);
                match favorites {
                    Ok(ids) => self.favorites = Favorites::new(ids),
                    Err(e) => self.events.notify(e.message()),
                }
            }
            None => {
                let movies = self.api.list_movies().await;
                self.apply_movies(movies);
            }
        }
    }

    fn apply_movies(&mut self, movies: ApiResult<Vec<Movie>>) {
        match movies {
            Ok(movies) => {
                tracing::debug!("Loaded {} movies", movies.len());
                self.movies = movies;
            }
            Err(e) => self.events.notify(e.message()),
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.favorites.contains(movie_id)
    }

    /// Add if not a favorite yet, remove otherwise
    pub async fn toggle_favorite(&mut self, movie_id: &str) {
        if self.is_favorite(movie_id) {
            self.remove_favorite(movie_id).await;
        } else {
            self.add_favorite(movie_id).await;
        }
    }

    /// The local list only changes once the backend acknowledged the call.
    pub async fn add_favorite(&mut self, movie_id: &str) {
        let Some(user_id) = self.require_user() else {
            return;
        };
        match self.api.add_favorite(&user_id, movie_id).await {
            Ok(_) => {
                self.favorites.insert(movie_id);
                self.events.notify("Added to favorites");
            }
            Err(e) => self.events.notify(e.message()),
        }
    }

    pub async fn remove_favorite(&mut self, movie_id: &str) {
        let Some(user_id) = self.require_user() else {
            return;
        };
        match self.api.remove_favorite(&user_id, movie_id).await {
            Ok(_) => {
                self.favorites.remove(movie_id);
                self.events.notify("Removed from favorites");
            }
            Err(e) => self.events.notify(e.message()),
        }
    }

    /// User id for a favorite change. Without both a user and a token the
    /// view goes back to the welcome page instead.
    fn require_user(&mut self) -> Option<String> {
        match self.session.credentials() {
            Some((user_id, _)) => Some(user_id),
            None => {
                self.events.navigate(Route::Welcome);
                None
            }
        }
    }

    pub fn open_genre_dialog(&mut self, genre: &Genre) {
        self.dialog = DialogState::ShowGenre(genre.clone());
    }

    pub fn open_director_dialog(&mut self, director: &Director) {
        self.dialog = DialogState::ShowDirector(director.clone());
    }

    pub fn open_synopsis_dialog(&mut self, movie: &Movie) {
        self.dialog = DialogState::ShowSynopsis(movie.synopsis());
    }

    /// Fetch a director by name and show it
    pub async fn show_director(&mut self, name: &str) {
        match self.api.get_director(name).await {
            Ok(director) => self.open_director_dialog(&director),
            Err(e) => self.events.notify(e.message()),
        }
    }

    /// Fetch a genre by name and show it
    pub async fn show_genre(&mut self, name: &str) {
        match self.api.get_genre(name).await {
            Ok(genre) => self.open_genre_dialog(&genre),
            Err(e) => self.events.notify(e.message()),
        }
    }

    /// Fetch one movie, by id or by title, and show its synopsis
    pub async fn show_movie(&mut self, lookup: MovieLookup<'_>) -> Option<Movie> {
        let result = match lookup {
            MovieLookup::Id(id) => self.api.get_movie(id).await,
            MovieLookup::Title(title) => self.api.get_movie_by_title(title).await,
        };
        match result {
            Ok(movie) => {
                self.open_synopsis_dialog(&movie);
                Some(movie)
            }
            Err(e) => {
                self.events.notify(e.message());
                None
            }
        }
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::None;
    }

    pub fn collect_pending_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain()
    }
}

/// How to find a single movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieLookup<'a> {
    Id(&'a str),
    Title(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorites_insert_should_be_set_union() {
        let mut favorites = Favorites::default();
        favorites.insert("m1");
        favorites.insert("m1");
        favorites.insert("m2");
        assert_eq!(favorites.ids(), &["m1".to_string(), "m2".to_string()]);
    }

    #[test]
    fn favorites_add_then_remove_should_leave_id_absent() {
        let mut favorites = Favorites::default();
        favorites.insert("m1");
        favorites.remove("m1");
        assert!(!favorites.contains("m1"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn favorites_new_should_drop_duplicates_from_backend() {
        let favorites = Favorites::new(vec!["m1".into(), "m2".into(), "m1".into()]);
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn removing_unknown_favorite_should_be_noop() {
        let mut favorites = Favorites::new(vec!["m1".into()]);
        favorites.remove("m9");
        assert_eq!(favorites.len(), 1);
    }
}
