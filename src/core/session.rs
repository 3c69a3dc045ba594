//! Write-through pairing of a record store with its repository
//!
//! A session is opened for one explicit [`UserId`]. Each mutation is applied
//! to the in-memory store and, when accepted, immediately persisted.
//! Nothing is buffered between calls.

use crate::core::error::SessionError;
use crate::core::models::{Semester, SubjectDraft};
use crate::core::record_store::{AcademicRecordStore, LoadReport, SubjectUpdate};
use crate::core::storage::{RecordRepository, SemesterRecord, UserId};
use crate::info;

/// One user's records, backed by a repository
pub struct RecordSession<R: RecordRepository> {
    user: UserId,
    repository: R,
    store: AcademicRecordStore,
}

impl<R: RecordRepository> RecordSession<R> {
    /// Load `user`'s snapshot and fold it into a fresh store
    ///
    /// # Errors
    /// `Storage` if the backend fails. Stored entries that violate an
    /// invariant are skipped and listed in the returned [`LoadReport`].
    pub fn open(repository: R, user: UserId) -> Result<(Self, LoadReport), SessionError> {
        let (store, report) = Self::load_store(&repository, &user)?;
        Ok((
            Self {
                user,
                repository,
                store,
            },
            report,
        ))
    }

    /// Discard the in-memory store and reload it from the repository
    ///
    /// # Errors
    /// As for [`open`](Self::open); on error the current store is kept
    pub fn reload(&mut self) -> Result<LoadReport, SessionError> {
        let (store, report) = Self::load_store(&self.repository, &self.user)?;
        self.store = store;
        Ok(report)
    }

    fn load_store(
        repository: &R,
        user: &UserId,
    ) -> Result<(AcademicRecordStore, LoadReport), SessionError> {
        let records = repository.load(user)?;
        let (store, report) = AcademicRecordStore::from_records(&records);
        info!(
            "Loaded {} semester(s) for {user}, skipped {} entr(ies)",
            report.semesters,
            report.skipped.len()
        );
        Ok((store, report))
    }

    /// The session's user
    #[must_use]
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Read access to the current records
    #[must_use]
    pub fn store(&self) -> &AcademicRecordStore {
        &self.store
    }

    /// The backing repository
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Add a semester and persist it
    ///
    /// # Errors
    /// `Record` on validation failure, `Storage` if the write fails
    pub fn add_semester(&mut self, name: &str) -> Result<Semester, SessionError> {
        let semester = self.store.add_semester(name)?;
        self.persist(&semester)?;
        Ok(semester)
    }

    /// Delete a semester and its stored record
    ///
    /// # Errors
    /// `Record` if it does not exist, `Storage` if the delete fails
    pub fn delete_semester(&mut self, name: &str) -> Result<Semester, SessionError> {
        let removed = self.store.delete_semester(name)?;
        self.repository.delete(&self.user, name)?;
        Ok(removed)
    }

    /// Rename a semester. The stored set is rewritten because the name is the storage key.
    ///
    /// # Errors
    /// `Record` on validation failure, `Storage` if the write fails
    pub fn rename_semester(&mut self, name: &str, new_name: &str) -> Result<Semester, SessionError> {
        let semester = self.store.rename_semester(name, new_name)?;
        self.save_all()?;
        Ok(semester)
    }

    /// Add a subject and persist its semester
    ///
    /// # Errors
    /// `Record` on validation failure, `Storage` if the write fails
    pub fn add_subject(
        &mut self,
        semester_name: &str,
        draft: &SubjectDraft,
    ) -> Result<Semester, SessionError> {
        let semester = self.store.add_subject(semester_name, draft)?;
        self.persist(&semester)?;
        Ok(semester)
    }

    /// Update a subject and persist its semester
    ///
    /// # Errors
    /// `Record` on validation failure, `Storage` if the write fails
    pub fn update_subject(
        &mut self,
        semester_name: &str,
        subject_name: &str,
        update: &SubjectUpdate,
    ) -> Result<Semester, SessionError> {
        let semester = self
            .store
            .update_subject(semester_name, subject_name, update)?;
        self.persist(&semester)?;
        Ok(semester)
    }

    /// Remove a subject and persist its semester
    ///
    /// # Errors
    /// `Record` if missing, `Storage` if the write fails
    pub fn remove_subject(
        &mut self,
        semester_name: &str,
        subject_name: &str,
    ) -> Result<Semester, SessionError> {
        let semester = self.store.remove_subject(semester_name, subject_name)?;
        self.persist(&semester)?;
        Ok(semester)
    }

    /// Swap in a whole new store (e.g. after an import) and persist it
    ///
    /// # Errors
    /// `Storage` if the write fails
    pub fn replace_store(&mut self, store: AcademicRecordStore) -> Result<(), SessionError> {
        self.store = store;
        self.save_all()
    }

    fn persist(&self, semester: &Semester) -> Result<(), SessionError> {
        self.repository
            .save_semester(&self.user, &SemesterRecord::from(semester))?;
        Ok(())
    }

    fn save_all(&self) -> Result<(), SessionError> {
        self.repository
            .save_all(&self.user, &self.store.to_records())?;
        Ok(())
    }
}
