//! # Navigation and Welcome Page

use anyhow::Result;

use super::events::{DialogState, EventQueue, Route, ViewEvent};
use crate::session::Session;

pub const LOGIN_PROMPT_MESSAGE: &str = "Please log in or sign up in order to view the movies";

/// Top bar: login state, current screen and logout
pub struct NavigationView {
    session: Session,
    current: Route,
    events: EventQueue,
}

impl NavigationView {
    pub fn new(session: Session, current: Route) -> Self {
        Self {
            session,
            current,
            events: EventQueue::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn is_welcome_page(&self) -> bool {
        self.current == Route::Welcome
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Clear the user and token and go back to the welcome page
    pub fn logout(&mut self) -> Result<()> {
        self.session.clear()?;
        self.current = Route::Welcome;
        self.events.navigate(Route::Welcome);
        Ok(())
    }

    pub fn collect_pending_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain()
    }
}

/// Landing page offering login, registration, and the movie list prompt
#[derive(Debug, Default)]
pub struct WelcomePage {
    dialog: DialogState,
}

impl WelcomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_login_dialog(&mut self) {
        self.dialog = DialogState::Login;
    }

    pub fn open_registration_dialog(&mut self) {
        self.dialog = DialogState::Registration;
    }

    /// Anonymous visitors asking for the movies are told to log in first
    pub fn open_movies_dialog(&mut self) {
        self.dialog = DialogState::LoginPrompt;
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::None;
    }
}
