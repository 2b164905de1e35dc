//! Retention: periodic removal of every finished download under the storage root.

pub mod schedule;
pub mod service;
