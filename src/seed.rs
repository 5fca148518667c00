//! First-run population of the portfolio reference data
//!
//! Seeding only happens when the store has no profile, so re-running it
//! against a persistent store that was seeded before is a no-op.

use crate::Result;
use crate::model::{NewEducation, NewExperience, NewProfile, NewProject, NewSkill};
use crate::storage::ContentStore;

/// Name of the seeded profile
pub const SEED_PROFILE_NAME: &str = "Felix Xu";

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReport {
    /// A profile already existed; nothing was written
    Skipped,
    Seeded {
        skills: usize,
        projects: usize,
        experience: usize,
        education: usize,
    },
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedReport::Skipped => write!(f, "profile already present, seed skipped"),
            SeedReport::Seeded { skills, projects, experience, education } => write!(
                f,
                "seeded profile, {} skills, {} projects, {} experience, {} education",
                skills, projects, experience, education
            ),
        }
    }
}

pub fn seed_profile() -> NewProfile {
    NewProfile {
        name: SEED_PROFILE_NAME.to_string(),
        title: "Software Engineer Graduate".to_string(),
        bio: "Aspiring software engineer with strong software engineering fundamentals in \
              Artificial Intelligence and problem solving. Passionate about creating immersive \
              experiences with cutting edge technology and user focused design."
            .to_string(),
        location: "Melbourne, Australia".to_string(),
        email: "felixxu8@gmail.com".to_string(),
        github_url: Some("https://github.com/XUBOI2806".to_string()),
        linkedin_url: Some("https://www.linkedin.com/in/felix-xu-eng/".to_string()),
        resume_url: Some(
            "https://drive.google.com/file/d/1LF798q2MsP5mEbUYdB211Ycu2qzXegXd/view?usp=drive_link"
                .to_string(),
        ),
    }
}

pub fn seed_skills() -> Vec<NewSkill> {
    [
        ("JavaScript", "Frontend"),
        ("TypeScript", "Frontend"),
        ("React", "Frontend"),
        ("Node.js", "Backend"),
        ("Express", "Backend"),
        ("PostgreSQL", "Backend"),
        ("Python", "Languages"),
        ("C++", "Languages"),
        ("C#", "Languages"),
        ("Git", "Tools"),
        ("Docker", "Tools"),
    ]
    .into_iter()
    .map(|(name, category)| NewSkill::new(name, category))
    .collect()
}

fn project(title: &str, description: &str, image_url: &str, technologies: &[&str]) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        project_url: Some("#".to_string()),
        repo_url: Some("#".to_string()),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn seed_projects() -> Vec<NewProject> {
    vec![
        project(
            "Valorant Chatbot",
            "A full-featured online store with product listings, cart functionality, and payment processing integration.",
            "/valorant_coach.png",
            &["LangChain", "Next.js", "PostgreSQL"],
        ),
        project(
            "TabSaver",
            "Collaborative task manager with real-time updates and team features.",
            "/tabsaver.png",
            &["Next.js", "PostgreSQL", "Stripe"],
        ),
        project(
            "NorthStar Website",
            "Developed a chatbot feature for QEERIAI's NorthStar, an AI-powered platform redefining career planning and workforce development.",
            "/northstar.png",
            &["Azure", "API", "Chart.js"],
        ),
        project(
            "Kitsunetic",
            "A roguelike game built using Unity where the player is a shape-shifting Kitsune who operates a cyber repair store by day and gathers materials at night.",
            "/kitsunetic.png",
            &["Unity", "Maya"],
        ),
        project(
            "VR Soccer Simulation",
            "Supported a PhD research study on VR sports training by creating a realistic soccer simulation environment.",
            "/vr.jpg",
            &["Unity", "VR", "Python"],
        ),
        project(
            "AR Shopping List",
            "An AR application prototype that identifies shopping items in real time and checks them off a virtual shopping list.",
            "/ar.jpg",
            &["YOLO", "Unity"],
        ),
    ]
}

pub fn seed_experience() -> Vec<NewExperience> {
    vec![NewExperience {
        company: "Creative Plastering Group".to_string(),
        position: "Technical Data Engineer".to_string(),
        period: "06/2023 - 04/2025".to_string(),
        description: "Entrusted with the responsibility of organizing and managing data to ensure \
                      streamlined operations and informed decision-making."
            .to_string(),
    }]
}

pub fn seed_education() -> Vec<NewEducation> {
    vec![NewEducation {
        school: "Monash University".to_string(),
        degree: "Bachelor of Software Engineering (Honours)".to_string(),
        field: "Engineering".to_string(),
        year: "2021-2025".to_string(),
    }]
}

/// Seed the store if it has no profile yet.
///
/// Inserts the profile, skills, projects, experience and education, in
/// that order.
pub fn seed_store(store: &dyn ContentStore) -> Result<SeedReport> {
    if store.profile()?.is_some() {
        tracing::debug!("Profile present, skipping seed");
        return Ok(SeedReport::Skipped);
    }

    store.create_profile(seed_profile())?;

    let skills = seed_skills();
    let skill_count = skills.len();
    for skill in skills {
        store.create_skill(skill)?;
    }

    let projects = seed_projects();
    let project_count = projects.len();
    for project in projects {
        store.create_project(project)?;
    }

    let experience = seed_experience();
    let experience_count = experience.len();
    for entry in experience {
        store.create_experience(entry)?;
    }

    let education = seed_education();
    let education_count = education.len();
    for entry in education {
        store.create_education(entry)?;
    }

    let report = SeedReport::Seeded {
        skills: skill_count,
        projects: project_count,
        experience: experience_count,
        education: education_count,
    };
    tracing::info!("Seeded {} store: {}", store.backend(), report);
    Ok(report)
}
