//! # Login and Registration Forms

use anyhow::Result;

use super::events::{EventQueue, Route, ViewEvent};
use crate::api::ApiClient;
use crate::models::{Credentials, UserDetails};
use crate::session::Session;

pub struct LoginForm {
    api: ApiClient,
    session: Session,
    pub user_data: Credentials,
    open: bool,
    events: EventQueue,
}

impl LoginForm {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            user_data: Credentials::default(),
            open: true,
            events: EventQueue::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Log in and store the user and token. Any failure reads as a generic
    /// "Login failed!" so the form does not reveal which field was wrong.
    pub async fn login(&mut self) -> Result<()> {
        match self.api.login(&self.user_data).await {
            Ok(response) => {
                self.session.store_login(&response.user, &response.token)?;
                self.open = false;
                self.events.notify("User logged in successfully!");
                self.events.navigate(Route::Movies);
            }
            Err(e) => {
                tracing::debug!("Login rejected: {}", e);
                self.events.notify("Login failed!");
            }
        }
        Ok(())
    }

    pub fn collect_pending_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain()
    }
}

pub struct RegistrationForm {
    api: ApiClient,
    pub user_data: UserDetails,
    open: bool,
    events: EventQueue,
}

impl RegistrationForm {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            user_data: UserDetails::default(),
            open: true,
            events: EventQueue::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Username, password and email must be filled in
    pub fn is_complete(&self) -> bool {
        [
            &self.user_data.username,
            &self.user_data.password,
            &self.user_data.email,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    pub async fn register(&mut self) {
        if !self.is_complete() {
            self.events.notify("Please fill in all required fields");
            return;
        }

        match self.api.register(&self.user_data).await {
            Ok(user) => {
                tracing::info!("Registered '{}'", user.username);
                self.open = false;
                self.events.notify("Registration successful!");
            }
            Err(e) => self.events.notify(e.message()),
        }
    }

    pub fn collect_pending_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain()
    }
}
