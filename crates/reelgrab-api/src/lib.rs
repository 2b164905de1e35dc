//! Reelgrab API Library
//!
//! This crate provides the HTTP API handlers, middleware wiring, and application setup.

mod api_doc;
mod handlers;

pub mod constants;
pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
