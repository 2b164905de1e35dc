//! Data models for the application
//!
//! Wire types for the HTTP API and the download identifier shared by storage,
//! services, and handlers.

mod download;
mod status;

pub use download::*;
pub use status::*;
