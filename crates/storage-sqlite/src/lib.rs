//! SQLite storage implementation for the support portal.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `helpdesk-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for content and analytics events
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool; every write is funnelled through a single
//! writer task (`WriteHandle`) so SQLite never sees concurrent writers.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod analytics;
pub mod content;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from helpdesk-core for convenience
pub use helpdesk_core::errors::{DatabaseError, Error, Result};
