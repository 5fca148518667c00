//! Portfolio record types
//!
//! Each collection has a stored record (carrying the store-assigned `id`)
//! and a `New*` insert shape without it. Records are never mutated after
//! creation.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The portfolio owner. At most one is expected per store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
}

impl NewProfile {
    pub(crate) fn into_record(self, id: i64) -> Profile {
        Profile {
            id,
            name: self.name,
            title: self.title,
            bio: self.bio,
            location: self.location,
            email: self.email,
            github_url: self.github_url,
            linkedin_url: self.linkedin_url,
            resume_url: self.resume_url,
        }
    }
}

/// A named skill. `category` is a free-text grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub name: String,
    pub category: String,
}

impl NewSkill {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    pub(crate) fn into_record(self, id: i64) -> Skill {
        Skill {
            id,
            name: self.name,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: Option<String>,
    pub repo_url: Option<String>,
    /// Technologies in display order (never empty)
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: Option<String>,
    pub repo_url: Option<String>,
    pub technologies: Vec<String>,
}

impl NewProject {
    /// Reject a project without any technologies
    pub fn check(&self) -> Result<()> {
        if self.technologies.is_empty() {
            return Err(Error::InvalidRecord(format!(
                "project '{}' must list at least one technology",
                self.title
            )));
        }
        Ok(())
    }

    pub(crate) fn into_record(self, id: i64) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            project_url: self.project_url,
            repo_url: self.repo_url,
            technologies: self.technologies,
        }
    }
}

/// A work history entry. `period` is a free-text date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: String,
}

impl NewExperience {
    pub(crate) fn into_record(self, id: i64) -> Experience {
        Experience {
            id,
            company: self.company,
            position: self.position,
            period: self.period,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: i64,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub year: String,
}

impl NewEducation {
    pub(crate) fn into_record(self, id: i64) -> Education {
        Education {
            id,
            school: self.school,
            degree: self.degree,
            field: self.field,
            year: self.year,
        }
    }
}

/// A contact-form submission.
///
/// `created_at` is always set by the store at insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Validated contact-form input (see [`crate::validation`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewMessage {
    pub(crate) fn into_record(self, id: i64, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            name: self.name,
            email: self.email,
            message: self.message,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_serializes_camel_case_with_nulls() {
        let project = NewProject {
            title: "TabSaver".to_string(),
            description: "Task manager".to_string(),
            image_url: "/tabsaver.png".to_string(),
            project_url: None,
            repo_url: Some("#".to_string()),
            technologies: vec!["Next.js".to_string()],
        }
        .into_record(3);

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["imageUrl"], "/tabsaver.png");
        assert!(json["projectUrl"].is_null());
        assert_eq!(json["repoUrl"], "#");
        assert_eq!(json["technologies"][0], "Next.js");
    }

    #[test]
    fn test_project_without_technologies_is_rejected() {
        let project = NewProject {
            title: "Empty".to_string(),
            description: "d".to_string(),
            image_url: "/x.png".to_string(),
            project_url: None,
            repo_url: None,
            technologies: vec![],
        };
        assert!(matches!(project.check(), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_message_created_at_field_name() {
        let message = NewMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        }
        .into_record(1, Utc::now());

        let json = serde_json::to_value(&message).unwrap();
        assert!(json["createdAt"].is_string());
        assert!(json.get("created_at").is_none());
    }
}
