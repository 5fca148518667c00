//! Database schema definitions

/// SQL to create the profile table
pub const CREATE_PROFILE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    title TEXT NOT NULL,
    bio TEXT NOT NULL,
    location TEXT NOT NULL,
    email TEXT NOT NULL,
    github_url TEXT,
    linkedin_url TEXT,
    resume_url TEXT
)
"#;

/// SQL to create the skills table
pub const CREATE_SKILLS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS skills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL
)
"#;

/// SQL to create the projects table
/// `technologies` holds a JSON array of strings
pub const CREATE_PROJECTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    image_url TEXT NOT NULL,
    project_url TEXT,
    repo_url TEXT,
    technologies TEXT NOT NULL
)
"#;

/// SQL to create the experience table
pub const CREATE_EXPERIENCE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS experience (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company TEXT NOT NULL,
    position TEXT NOT NULL,
    period TEXT NOT NULL,
    description TEXT NOT NULL
)
"#;

/// SQL to create the education table
pub const CREATE_EDUCATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS education (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    school TEXT NOT NULL,
    degree TEXT NOT NULL,
    field TEXT NOT NULL,
    year TEXT NOT NULL
)
"#;

/// SQL to create the messages table
/// `created_at` is written by the store at insertion time (UTC, full
/// precision); the column default only covers rows inserted without one
pub const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_PROFILE_TABLE,
        CREATE_SKILLS_TABLE,
        CREATE_PROJECTS_TABLE,
        CREATE_EXPERIENCE_TABLE,
        CREATE_EDUCATION_TABLE,
        CREATE_MESSAGES_TABLE,
    ]
}
