//! In-process storage used when no database is configured

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{ContentStore, StoreStats};
use crate::model::{
    Education, Experience, Message, NewEducation, NewExperience, NewMessage, NewProfile,
    NewProject, NewSkill, Profile, Project, Skill,
};
use crate::{Error, Result};

#[derive(Default)]
struct Collections {
    profiles: Vec<Profile>,
    skills: Vec<Skill>,
    projects: Vec<Project>,
    experience: Vec<Experience>,
    education: Vec<Education>,
    messages: Vec<Message>,
}

/// Memory-backed portfolio store.
///
/// One id counter is shared by every collection, so ids are unique across
/// the whole store rather than per collection.
pub struct MemoryStore {
    data: RwLock<Collections>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Collections::default()),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.data.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.data.write().map_err(|_| poisoned())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> Error {
    Error::StoreUnavailable("in-memory store lock poisoned".to_string())
}

impl ContentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn profile(&self) -> Result<Option<Profile>> {
        Ok(self.read()?.profiles.first().cloned())
    }

    fn skills(&self) -> Result<Vec<Skill>> {
        Ok(self.read()?.skills.clone())
    }

    fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.read()?.projects.clone())
    }

    fn experience(&self) -> Result<Vec<Experience>> {
        Ok(self.read()?.experience.clone())
    }

    fn education(&self) -> Result<Vec<Education>> {
        Ok(self.read()?.education.clone())
    }

    fn messages(&self) -> Result<Vec<Message>> {
        Ok(self.read()?.messages.clone())
    }

    fn create_message(&self, message: NewMessage) -> Result<Message> {
        let mut data = self.write()?;
        // Allocated under the write lock so ids and timestamps follow push order
        let record = message.into_record(self.allocate_id(), Utc::now());
        data.messages.push(record.clone());
        Ok(record)
    }

    fn create_profile(&self, profile: NewProfile) -> Result<Profile> {
        let mut data = self.write()?;
        let record = profile.into_record(self.allocate_id());
        data.profiles.push(record.clone());
        Ok(record)
    }

    fn create_skill(&self, skill: NewSkill) -> Result<Skill> {
        let mut data = self.write()?;
        let record = skill.into_record(self.allocate_id());
        data.skills.push(record.clone());
        Ok(record)
    }

    fn create_project(&self, project: NewProject) -> Result<Project> {
        project.check()?;
        let mut data = self.write()?;
        let record = project.into_record(self.allocate_id());
        data.projects.push(record.clone());
        Ok(record)
    }

    fn create_experience(&self, experience: NewExperience) -> Result<Experience> {
        let mut data = self.write()?;
        let record = experience.into_record(self.allocate_id());
        data.experience.push(record.clone());
        Ok(record)
    }

    fn create_education(&self, education: NewEducation) -> Result<Education> {
        let mut data = self.write()?;
        let record = education.into_record(self.allocate_id());
        data.education.push(record.clone());
        Ok(record)
    }

    fn stats(&self) -> Result<StoreStats> {
        let data = self.read()?;
        Ok(StoreStats {
            profiles: data.profiles.len(),
            skills: data.skills.len(),
            projects: data.projects.len(),
            experience: data.experience.len(),
            education: data.education.len(),
            messages: data.messages.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_message(i: usize) -> NewMessage {
        NewMessage {
            name: format!("Sender {}", i),
            email: format!("sender{}@example.com", i),
            message: "Hi".to_string(),
        }
    }

    #[test]
    fn test_empty_store_reads() {
        let store = MemoryStore::new();
        assert!(store.profile().unwrap().is_none());
        assert!(store.skills().unwrap().is_empty());
        assert!(store.projects().unwrap().is_empty());
        assert!(store.experience().unwrap().is_empty());
        assert!(store.education().unwrap().is_empty());
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_counter_is_shared_across_collections() {
        let store = MemoryStore::new();
        let skill = store.create_skill(NewSkill::new("Rust", "Languages")).unwrap();
        let message = store.create_message(sample_message(0)).unwrap();
        let other = store.create_skill(NewSkill::new("Go", "Languages")).unwrap();

        assert_eq!(skill.id, 1);
        assert_eq!(message.id, 2);
        assert_eq!(other.id, 3);
        assert_eq!(store.skills().unwrap(), vec![skill, other]);
    }

    #[test]
    fn test_message_timestamp_is_insertion_time() {
        let store = MemoryStore::new();
        let before = Utc::now();
        let message = store.create_message(sample_message(1)).unwrap();
        assert!(message.created_at >= before);
        assert!(message.created_at <= Utc::now());
    }

    #[test]
    fn test_concurrent_message_ids_are_unique() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|i| store.create_message(sample_message(t * 100 + i)).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);

        // Stored order matches id order
        let stored = store.messages().unwrap();
        assert!(stored.windows(2).all(|w| w[0].id < w[1].id));
    }
}
