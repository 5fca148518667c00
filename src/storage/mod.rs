//! Storage Layer - portfolio content store
//!
//! Two interchangeable backends implement [`ContentStore`]:
//! - [`SqliteStore`]: tables profile, skills, projects, experience,
//!   education, messages (ids assigned per table)
//! - [`MemoryStore`]: in-process collections sharing one id counter
//!
//! The backend is chosen once by [`open_store`] and held for the process
//! lifetime.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;
use std::sync::Arc;

use crate::model::{
    Education, Experience, Message, NewEducation, NewExperience, NewMessage, NewProfile,
    NewProject, NewSkill, Profile, Project, Skill,
};
use crate::{Error, Result};

/// Capability set shared by every store backend.
///
/// List reads return records in insertion order. Identities are always
/// assigned by the store.
pub trait ContentStore: Send + Sync {
    /// Short backend name for logs ("sqlite", "memory")
    fn backend(&self) -> &'static str;

    /// The first stored profile, if any
    fn profile(&self) -> Result<Option<Profile>>;
    fn skills(&self) -> Result<Vec<Skill>>;
    fn projects(&self) -> Result<Vec<Project>>;
    fn experience(&self) -> Result<Vec<Experience>>;
    fn education(&self) -> Result<Vec<Education>>;

    /// Received contact messages. Operator-side only, never routed.
    fn messages(&self) -> Result<Vec<Message>>;

    fn create_message(&self, message: NewMessage) -> Result<Message>;
    fn create_profile(&self, profile: NewProfile) -> Result<Profile>;
    fn create_skill(&self, skill: NewSkill) -> Result<Skill>;
    fn create_project(&self, project: NewProject) -> Result<Project>;
    fn create_experience(&self, experience: NewExperience) -> Result<Experience>;
    fn create_education(&self, education: NewEducation) -> Result<Education>;

    /// Row counts per collection
    fn stats(&self) -> Result<StoreStats>;

    /// Release backend resources at shutdown
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Store statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub profiles: usize,
    pub skills: usize,
    pub projects: usize,
    pub experience: usize,
    pub education: usize,
    pub messages: usize,
}

impl StoreStats {
    /// Label/count pairs in collection order
    pub fn rows(&self) -> [(&'static str, usize); 6] {
        [
            ("Profiles", self.profiles),
            ("Skills", self.skills),
            ("Projects", self.projects),
            ("Experience", self.experience),
            ("Education", self.education),
            ("Messages", self.messages),
        ]
    }
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        for (label, count) in self.rows() {
            writeln!(f, "  {}: {}", label, count)?;
        }
        Ok(())
    }
}

/// Where a SQLite connection string points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    InMemory,
    File(PathBuf),
}

/// Parse a connection string into a SQLite target.
///
/// Accepts `sqlite://PATH`, `sqlite:PATH`, a bare path, and `:memory:`
/// (optionally `sqlite:`-prefixed). Other URL schemes are rejected.
pub fn parse_connection_string(url: &str) -> Result<SqliteTarget> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedDatabase("empty connection string".to_string()));
    }

    let rest = if let Some(rest) = trimmed.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("sqlite:") {
        rest
    } else if let Some((scheme, _)) = trimmed.split_once("://") {
        return Err(Error::UnsupportedDatabase(format!(
            "scheme '{}' is not supported (expected sqlite)",
            scheme
        )));
    } else {
        trimmed
    };

    match rest {
        "" => Err(Error::UnsupportedDatabase(format!("missing database path in '{}'", url))),
        ":memory:" => Ok(SqliteTarget::InMemory),
        path => Ok(SqliteTarget::File(PathBuf::from(path))),
    }
}

/// Select the store backend for this process.
///
/// No connection string means the in-memory store.
pub fn open_store(database_url: Option<&str>) -> Result<Arc<dyn ContentStore>> {
    let Some(url) = database_url else {
        tracing::info!("No database configured, using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let store = match parse_connection_string(url)? {
        SqliteTarget::InMemory => SqliteStore::open_in_memory()?,
        SqliteTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            tracing::info!("Opening SQLite store at {}", path.display());
            SqliteStore::open(&path)?
        }
    };
    Ok(Arc::new(store))
}
