//! Helpdesk Core - content inheritance and account health scoring.
//!
//! This crate contains the domain logic of the support portal. It is
//! database-agnostic and defines the repository traits implemented by the
//! `storage-sqlite` crate.

pub mod analytics;
pub mod constants;
pub mod content;
pub mod errors;
pub mod health;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
