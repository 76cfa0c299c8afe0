//! # mymdb - MyMDB Movie Database Client
//!
//! Browse the MyMDB catalogue, keep a favorites list and manage a profile
//! against the MyMDB REST backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   commands   ┌──────────────┐   HTTP    ┌─────────────┐
//! │     CLI     │─────────────►│    Views     │──────────►│  ApiClient  │
//! │             │◄─────────────│              │           │             │
//! │ - cmd_args  │    events    │ - MovieList  │           │ - reqwest   │
//! │ - config    │              │ - Profile    │           │ - bearer    │
//! └─────────────┘              │ - Forms      │           │   token     │
//!                              └──────────────┘           └─────────────┘
//!                                      │                         │
//!                                      ▼                         ▼
//!                              ┌──────────────────────────────────────┐
//!                              │      Session (user + token)          │
//!                              └──────────────────────────────────────┘
//! ```

pub mod api;
pub mod cmd_args;
pub mod config;
pub mod models;
pub mod session;
pub mod views;

// Re-export main types for easy access
pub use api::{ApiClient, ApiError, ApiResult};
pub use models::{Credentials, Director, Genre, LoginResponse, Movie, Synopsis, User, UserDetails};
pub use session::Session;
