//! The load/save contract between the record engine and a storage backend

use super::{SemesterRecord, UserId};
use crate::core::error::StorageError;

/// A backend that persists one ordered record set per user.
///
/// Implementations must make saves idempotent: writing the same value twice
/// leaves the same stored state.
pub trait RecordRepository {
    /// Fetch the full current record set for `user`, in stored order.
    /// A user with no records yields an empty list.
    ///
    /// # Errors
    /// Backend failures
    fn load(&self, user: &UserId) -> Result<Vec<SemesterRecord>, StorageError>;

    /// Insert or replace one semester, keyed by its name.
    /// A replaced semester keeps its position; a new one is appended.
    ///
    /// # Errors
    /// Backend failures
    fn save_semester(&self, user: &UserId, semester: &SemesterRecord) -> Result<(), StorageError>;

    /// Replace the user's entire record set
    ///
    /// # Errors
    /// Backend failures
    fn save_all(&self, user: &UserId, semesters: &[SemesterRecord]) -> Result<(), StorageError>;

    /// Remove one semester's record. Removing a missing semester is not an error.
    ///
    /// # Errors
    /// Backend failures
    fn delete(&self, user: &UserId, semester_name: &str) -> Result<(), StorageError>;
}

/// Upsert `record` into `records` by name, keeping position on replace
pub(crate) fn upsert(records: &mut Vec<SemesterRecord>, record: &SemesterRecord) {
    match records.iter_mut().find(|r| r.name == record.name) {
        Some(existing) => existing.clone_from(record),
        None => records.push(record.clone()),
    }
}
