//! # Folio - Portfolio Content API
//!
//! Serves a personal portfolio (profile, skills, projects, experience,
//! education) as JSON and accepts contact-form messages.
//!
//! Folio provides:
//! - A `ContentStore` with SQLite-backed and in-memory implementations
//! - A first-run seed of the portfolio reference data
//! - An axum gateway with validated message submission

pub mod model;
pub mod storage;
pub mod validation;
pub mod seed;
pub mod server;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{Education, Experience, Message, Profile, Project, Skill};
pub use storage::{ContentStore, MemoryStore, SqliteStore};

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Folio operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported connection string: {0}")]
    UnsupportedDatabase(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
