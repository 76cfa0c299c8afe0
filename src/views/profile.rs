//! # Profile
//!
//! Shows the signed-in user, their favorite movies, and handles profile
//! edits and account deletion.
//!
//! Every operation needs a stored user id and token. Without them the view
//! asks the user to log in again and navigates to the welcome page, and no
//! request is made.

use anyhow::Result;

use super::events::{DialogState, EventQueue, Route, ViewEvent};
use crate::api::ApiClient;
use crate::models::{Director, Genre, Movie, User, UserDetails};
use crate::session::Session;

pub const MISSING_USER_MESSAGE: &str = "User ID not found. Please login again.";

pub struct ProfileView {
    api: ApiClient,
    session: Session,
    user: Option<User>,
    edit_mode: bool,
    favorite_movies: Vec<Movie>,
    updated_user: UserDetails,
    dialog: DialogState,
    events: EventQueue,
}

impl ProfileView {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            user: None,
            edit_mode: false,
            favorite_movies: Vec::new(),
            updated_user: UserDetails::default(),
            dialog: DialogState::None,
            events: EventQueue::new(),
        }
    }

    /// Load the user and their favorite movies
    pub async fn init(&mut self) {
        let Some(user_id) = self.require_user_id() else {
            return;
        };
        let (user, favorites) = tokio::join!(
            self.api.get_user(&user_id),
            Self::fetch_favorite_movies(&self.api, &user_id)
        );

        match user {
            Ok(user) => {
                self.updated_user = UserDetails::from_user(&user);
                self.user = Some(user);
            }
            Err(e) => self.events.notify(e.message()),
        }
        match favorites {
            Ok(movies) => self.favorite_movies = movies,
            Err(e) => self.events.notify(e.message()),
        }
    }

    /// Favorite ids matched against the full catalogue, in catalogue order
    async fn fetch_favorite_movies(
        api: &ApiClient,
        user_id: &str,
    ) -> crate::api::ApiResult<Vec<Movie>> {
        let (ids, movies) = tokio::join!(api.get_favorites(user_id), api.list_movies());
        let ids = ids?;
        Ok(movies?
            .into_iter()
            .filter(|movie| ids.contains(&movie.id))
            .collect())
    }

    /// Reload the favorite movies. Quietly does nothing without a stored user.
    pub async fn load_favorite_movies(&mut self) {
        let Some(user_id) = self.session.user_id() else {
            return;
        };
        match Self::fetch_favorite_movies(&self.api, &user_id).await {
            Ok(movies) => self.favorite_movies = movies,
            Err(e) => self.events.notify(e.message()),
        }
    }

    fn require_user_id(&mut self) -> Option<String> {
        match self.session.credentials() {
            Some((user_id, _)) => Some(user_id),
            None => {
                self.events.notify(MISSING_USER_MESSAGE);
                self.events.navigate(Route::Welcome);
                None
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn favorite_movies(&self) -> &[Movie] {
        &self.favorite_movies
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
    }

    /// Enter edit mode with the form filled from the stored user, without
    /// fetching anything. Returns `false` when there is no session.
    pub fn edit_stored_user(&mut self) -> bool {
        if self.require_user_id().is_none() {
            return false;
        }
        let Some(user) = self.session.user() else {
            return false;
        };
        self.updated_user = UserDetails::from_user(&user);
        self.user = Some(user);
        self.edit_mode = true;
        true
    }

    /// The edit form
    pub fn updated_user(&self) -> &UserDetails {
        &self.updated_user
    }

    pub fn updated_user_mut(&mut self) -> &mut UserDetails {
        &mut self.updated_user
    }

    /// Send the edit form. The returned user replaces the cached session copy.
    pub async fn update_user(&mut self) -> Result<()> {
        let Some(user_id) = self.require_user_id() else {
            return Ok(());
        };
        match self.api.update_user(&user_id, &self.updated_user).await {
            Ok(user) => {
                self.session.store_user(&user)?;
                self.updated_user = UserDetails::from_user(&user);
                self.user = Some(user);
                self.edit_mode = false;
                self.events.notify("Profile updated successfully!");
            }
            Err(e) => self.events.notify(e.message()),
        }
        Ok(())
    }

    /// Delete the account once the user confirmed it
    pub async fn delete_account(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Ok(());
        }
        let Some(user_id) = self.require_user_id() else {
            return Ok(());
        };
        match self.api.delete_user(&user_id).await {
            Ok(()) => {
                self.session.clear()?;
                self.user = None;
                self.favorite_movies.clear();
                self.events.navigate(Route::Welcome);
                self.events.notify("Account deleted successfully!");
            }
            Err(e) => self.events.notify(e.message()),
        }
        Ok(())
    }

    pub async fn remove_favorite(&mut self, movie_id: &str) {
        let Some(user_id) = self.require_user_id() else {
            return;
        };
        match self.api.remove_favorite(&user_id, movie_id).await {
            Ok(_) => {
                self.events.notify("Movie removed from favorites");
                self.load_favorite_movies().await;
            }
            Err(e) => self.events.notify(e.message()),
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
