//! # Views
//!
//! View models for each screen of the client. A view owns its display
//! state, talks to the backend through the shared `ApiClient`, reads and
//! writes the shared `Session`, and queues `ViewEvent`s for the front end
//! to drain with `collect_pending_events`.
//!
//! ```text
//! ┌─────────────┐   events   ┌──────────────┐   requests   ┌───────────┐
//! │  Front end  │◄───────────│     View     │─────────────►│ ApiClient │
//! │  (CLI)      │            │              │              │           │
//! └─────────────┘            └──────────────┘              └───────────┘
//!                                   │                            │
//!                                   ▼                            ▼
//!                            ┌──────────────────────────────────────┐
//!                            │               Session                │
//!                            └──────────────────────────────────────┘
//! ```

pub mod events;
pub mod forms;
pub mod movie_list;
pub mod navigation;
pub mod profile;
pub mod render;
pub mod route;

pub use events::{DialogState, EventQueue, Route, ViewEvent};
pub use forms::{LoginForm, RegistrationForm};
pub use movie_list::{Favorites, MovieListView, MovieLookup};
pub use navigation::{NavigationView, WelcomePage, LOGIN_PROMPT_MESSAGE};
pub use profile::{ProfileView, MISSING_USER_MESSAGE};
pub use route::Router;
