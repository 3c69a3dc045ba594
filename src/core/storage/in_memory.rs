//! In-memory repository for tests and scratch sessions

use super::repository::{upsert, RecordRepository};
use super::{SemesterRecord, UserId};
use crate::core::error::StorageError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Keeps every user's records in a map behind a mutex
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: Mutex<HashMap<UserId, Vec<SemesterRecord>>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with one user's records
    #[must_use]
    pub fn with_records(user: UserId, semesters: Vec<SemesterRecord>) -> Self {
        let mut map = HashMap::new();
        map.insert(user, semesters);
        Self {
            records: Mutex::new(map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Vec<SemesterRecord>>>, StorageError> {
        self.records
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl RecordRepository for InMemoryRepository {
    fn load(&self, user: &UserId) -> Result<Vec<SemesterRecord>, StorageError> {
        Ok(self.lock()?.get(user).cloned().unwrap_or_default())
    }

    fn save_semester(&self, user: &UserId, semester: &SemesterRecord) -> Result<(), StorageError> {
        upsert(self.lock()?.entry(user.clone()).or_default(), semester);
        Ok(())
    }

    fn save_all(&self, user: &UserId, semesters: &[SemesterRecord]) -> Result<(), StorageError> {
        self.lock()?.insert(user.clone(), semesters.to_vec());
        Ok(())
    }

    fn delete(&self, user: &UserId, semester_name: &str) -> Result<(), StorageError> {
        if let Some(records) = self.lock()?.get_mut(user) {
            records.retain(|s| s.name != semester_name);
        }
        Ok(())
    }
}
