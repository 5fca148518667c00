//! SQLite storage implementation

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::{ContentStore, StoreStats, schema};
use crate::model::{
    Education, Experience, Message, NewEducation, NewExperience, NewMessage, NewProfile,
    NewProject, NewSkill, Profile, Project, Skill,
};
use crate::{Error, Result};

/// SQLite-backed portfolio store
///
/// The connection lives behind a mutex so the store can be shared across
/// request handlers. Once [`ContentStore::close`] has run, every accessor
/// fails with [`Error::StoreUnavailable`].
pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Whether a connection is currently held
    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock().map_err(|_| poisoned())?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| Error::StoreUnavailable("database connection is not established".to_string()))?;
        f(conn)
    }

    fn count(conn: &Connection, table: &str) -> Result<usize> {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Row helpers ==========

    fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
        Ok(Profile {
            id: row.get(0)?,
            name: row.get(1)?,
            title: row.get(2)?,
            bio: row.get(3)?,
            location: row.get(4)?,
            email: row.get(5)?,
            github_url: row.get(6)?,
            linkedin_url: row.get(7)?,
            resume_url: row.get(8)?,
        })
    }

    fn row_to_skill(row: &rusqlite::Row) -> rusqlite::Result<Skill> {
        Ok(Skill {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
        })
    }

    fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        let technologies_json: String = row.get(6)?;
        let technologies: Vec<String> = serde_json::from_str(&technologies_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Project {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            image_url: row.get(3)?,
            project_url: row.get(4)?,
            repo_url: row.get(5)?,
            technologies,
        })
    }

    fn row_to_experience(row: &rusqlite::Row) -> rusqlite::Result<Experience> {
        Ok(Experience {
            id: row.get(0)?,
            company: row.get(1)?,
            position: row.get(2)?,
            period: row.get(3)?,
            description: row.get(4)?,
        })
    }

    fn row_to_education(row: &rusqlite::Row) -> rusqlite::Result<Education> {
        Ok(Education {
            id: row.get(0)?,
            school: row.get(1)?,
            degree: row.get(2)?,
            field: row.get(3)?,
            year: row.get(4)?,
        })
    }

    fn row_to_message(row: &rusqlite::Row) -> rusqlite::Result<Message> {
        Ok(Message {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            message: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn select_all<T>(
        conn: &Connection,
        sql: &str,
        map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }
}

fn poisoned() -> Error {
    Error::StoreUnavailable("database connection lock poisoned".to_string())
}

impl ContentStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    // ========== Reads ==========

    fn profile(&self) -> Result<Option<Profile>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, title, bio, location, email, github_url, linkedin_url, resume_url
                 FROM profile ORDER BY id LIMIT 1",
                [],
                Self::row_to_profile,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    fn skills(&self) -> Result<Vec<Skill>> {
        self.with_conn(|conn| {
            Self::select_all(conn, "SELECT id, name, category FROM skills ORDER BY id", Self::row_to_skill)
        })
    }

    fn projects(&self) -> Result<Vec<Project>> {
        self.with_conn(|conn| {
            Self::select_all(
                conn,
                "SELECT id, title, description, image_url, project_url, repo_url, technologies
                 FROM projects ORDER BY id",
                Self::row_to_project,
            )
        })
    }

    fn experience(&self) -> Result<Vec<Experience>> {
        self.with_conn(|conn| {
            Self::select_all(
                conn,
                "SELECT id, company, position, period, description FROM experience ORDER BY id",
                Self::row_to_experience,
            )
        })
    }

    fn education(&self) -> Result<Vec<Education>> {
        self.with_conn(|conn| {
            Self::select_all(
                conn,
                "SELECT id, school, degree, field, year FROM education ORDER BY id",
                Self::row_to_education,
            )
        })
    }

    fn messages(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            Self::select_all(
                conn,
                "SELECT id, name, email, message, created_at FROM messages ORDER BY id",
                Self::row_to_message,
            )
        })
    }

    // ========== Writes ==========

    fn create_message(&self, message: NewMessage) -> Result<Message> {
        self.with_conn(|conn| {
            // Taken under the lock so timestamps follow id order
            let submitted = Utc::now();
            let (id, created_at): (i64, DateTime<Utc>) = conn.query_row(
                "INSERT INTO messages (name, email, message, created_at) VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, created_at",
                params![message.name, message.email, message.message, submitted],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(message.into_record(id, created_at))
        })
    }

    fn create_profile(&self, profile: NewProfile) -> Result<Profile> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO profile (name, title, bio, location, email, github_url, linkedin_url, resume_url)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    profile.name,
                    profile.title,
                    profile.bio,
                    profile.location,
                    profile.email,
                    profile.github_url,
                    profile.linkedin_url,
                    profile.resume_url,
                ],
            )?;
            Ok(profile.into_record(conn.last_insert_rowid()))
        })
    }

    fn create_skill(&self, skill: NewSkill) -> Result<Skill> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO skills (name, category) VALUES (?1, ?2)",
                params![skill.name, skill.category],
            )?;
            Ok(skill.into_record(conn.last_insert_rowid()))
        })
    }

    fn create_project(&self, project: NewProject) -> Result<Project> {
        project.check()?;
        let technologies = serde_json::to_string(&project.technologies)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO projects (title, description, image_url, project_url, repo_url, technologies)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    project.title,
                    project.description,
                    project.image_url,
                    project.project_url,
                    project.repo_url,
                    technologies,
                ],
            )?;
            Ok(project.into_record(conn.last_insert_rowid()))
        })
    }

    fn create_experience(&self, experience: NewExperience) -> Result<Experience> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO experience (company, position, period, description) VALUES (?1, ?2, ?3, ?4)",
                params![
                    experience.company,
                    experience.position,
                    experience.period,
                    experience.description,
                ],
            )?;
            Ok(experience.into_record(conn.last_insert_rowid()))
        })
    }

    fn create_education(&self, education: NewEducation) -> Result<Education> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO education (school, degree, field, year) VALUES (?1, ?2, ?3, ?4)",
                params![education.school, education.degree, education.field, education.year],
            )?;
            Ok(education.into_record(conn.last_insert_rowid()))
        })
    }

    /// Close the underlying connection. Later calls fail with `StoreUnavailable`.
    fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock().map_err(|_| poisoned())?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| Error::Storage(e))?;
        }
        Ok(())
    }

    fn stats(&self) -> Result<StoreStats> {
        self.with_conn(|conn| {
            Ok(StoreStats {
                profiles: Self::count(conn, "profile")?,
                skills: Self::count(conn, "skills")?,
                projects: Self::count(conn, "projects")?,
                experience: Self::count(conn, "experience")?,
                education: Self::count(conn, "education")?,
                messages: Self::count(conn, "messages")?,
            })
        })
    }
}
