//! # View Events
//!
//! Routes, dialog state and the events views queue for the front end:
//! transient notifications and navigation requests.

use crate::models::{Director, Genre, Synopsis};

/// Top-level screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Welcome,
    Movies,
    Profile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Welcome => "/welcome",
            Route::Movies => "/movies",
            Route::Profile => "/profile",
        }
    }

    /// Only reachable with a stored user and token
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Movies | Route::Profile)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Which dialog, if any, is showing
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState {
    #[default]
    None,
    Login,
    Registration,
    /// "Please log in or sign up" shown to anonymous visitors
    LoginPrompt,
    ShowGenre(Genre),
    ShowDirector(Director),
    ShowSynopsis(Synopsis),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::None)
    }
}

/// Events emitted by views for the front end to act on
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Short-lived message for the user
    Notify(String),

    /// Switch to another screen
    Navigate(Route),
}

/// Pending events of one view, drained by the front end
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Vec<ViewEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("Notification: {}", message);
        self.pending.push(ViewEvent::Notify(message));
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigate to {}", route);
        self.pending.push(ViewEvent::Navigate(route));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending)
    }
}
