//! # API Layer
//!
//! Typed access to the MyMDB REST backend and the error type every call
//! is normalized into.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiResult};
pub use error::{ApiError, FALLBACK_MESSAGE};
