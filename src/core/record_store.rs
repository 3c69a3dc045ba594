//! In-memory academic record store for one student
//!
//! Owns the ordered semester list and enforces its invariants:
//! - semester names are unique (exact match)
//! - subject names are unique within a semester (exact match)
//! - every subject has positive credits and a grade from the table
//! - each semester's GPA equals the weighted average of its subjects
//!
//! Every operation validates first and only then replaces the affected
//! semester. A call that returns `Err` has changed nothing.

use crate::core::error::RecordError;
use crate::core::gpa;
use crate::core::models::semester::ensure_named;
use crate::core::models::{Semester, Subject, SubjectDraft};
use crate::core::storage::{SemesterRecord, SkippedRecord};
use crate::{debug, warn};

/// Ordered, name-unique collection of semesters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcademicRecordStore {
    semesters: Vec<Semester>,
}

/// Partial changes to an existing subject. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectUpdate {
    /// New subject name
    pub name: Option<String>,
    /// New credits
    pub credits: Option<i64>,
    /// New grade label
    pub grade: Option<String>,
}

/// What [`AcademicRecordStore::from_records`] noticed while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of semesters loaded
    pub semesters: usize,
    /// Names of semesters whose stored GPA disagreed with their subjects
    pub stale_gpa: Vec<String>,
    /// Stored semesters and subjects that failed validation and were left out
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    /// Whether every stored record loaded as written
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.stale_gpa.is_empty() && self.skipped.is_empty()
    }

    fn skip(&mut self, entry: SkippedRecord) {
        warn!("Skipped stored record {entry}");
        self.skipped.push(entry);
    }
}

impl AcademicRecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded snapshot.
    ///
    /// Every record is validated as if it had been entered by hand. A subject
    /// that fails is left out of its semester; a semester with a blank or
    /// repeated name is left out entirely. Each is logged at warn and listed
    /// in the report, and the rest of the snapshot still loads. Cached GPAs
    /// are recomputed from what was kept; any that disagree are listed too.
    #[must_use]
    pub fn from_records(records: &[SemesterRecord]) -> (Self, LoadReport) {
        let mut store = Self::new();
        let mut report = LoadReport::default();

        for record in records {
            let loaded = store
                .ensure_semester_free(&record.name)
                .and_then(|()| record.to_semester());
            let (semester, skipped) = match loaded {
                Ok(loaded) => loaded,
                Err(reason) => {
                    report.skip(SkippedRecord {
                        semester: record.name.clone(),
                        subject: None,
                        reason,
                    });
                    continue;
                }
            };
            skipped.into_iter().for_each(|entry| report.skip(entry));

            if !record.cached_gpa_matches(semester.gpa()) {
                warn!(
                    "Stored GPA {} for '{}' does not match its subjects; using {}",
                    record.gpa,
                    record.name,
                    semester.gpa()
                );
                report.stale_gpa.push(record.name.clone());
            }
            store.semesters.push(semester);
        }

        report.semesters = store.semesters.len();
        (store, report)
    }

    /// Persisted form of every semester, in order
    #[must_use]
    pub fn to_records(&self) -> Vec<SemesterRecord> {
        self.semesters.iter().map(SemesterRecord::from).collect()
    }

    /// All semesters in insertion order
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Look up a semester by exact name
    #[must_use]
    pub fn semester(&self, name: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.name() == name)
    }

    /// Number of semesters
    #[must_use]
    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    /// Whether the store holds no semesters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Total credits across every semester
    #[must_use]
    pub fn total_credits(&self) -> u64 {
        self.semesters.iter().map(Semester::total_credits).sum()
    }

    /// Append a new, empty semester
    ///
    /// # Errors
    /// `BlankName` or `DuplicateSemester`
    pub fn add_semester(&mut self, name: &str) -> Result<Semester, RecordError> {
        self.ensure_semester_free(name)?;
        let semester = Semester::empty(name)?;
        debug!("Added semester '{name}'");
        self.semesters.push(semester.clone());
        Ok(semester)
    }

    /// Remove a semester and all of its subjects
    ///
    /// Returns the removed value. Callers holding a selection that pointed at
    /// it must drop that selection.
    ///
    /// # Errors
    /// `SemesterNotFound`
    pub fn delete_semester(&mut self, name: &str) -> Result<Semester, RecordError> {
        let index = self.semester_index(name)?;
        debug!("Deleted semester '{name}'");
        Ok(self.semesters.remove(index))
    }

    /// Rename a semester, keeping its position and subjects
    ///
    /// # Errors
    /// `SemesterNotFound`, `BlankName` or `DuplicateSemester`
    pub fn rename_semester(&mut self, name: &str, new_name: &str) -> Result<Semester, RecordError> {
        let index = self.semester_index(name)?;
        if new_name != name {
            self.ensure_semester_free(new_name)?;
        }
        let renamed = self.semesters[index].renamed(new_name)?;
        debug!("Renamed semester '{name}' to '{new_name}'");
        Ok(self.replace(index, renamed))
    }

    /// Append a subject to a semester and recompute its GPA
    ///
    /// # Errors
    /// `SemesterNotFound`, `BlankName`, `DuplicateSubject`, `InvalidCredits`
    /// or `InvalidGrade`, checked in that order
    pub fn add_subject(
        &mut self,
        semester_name: &str,
        draft: &SubjectDraft,
    ) -> Result<Semester, RecordError> {
        let index = self.ensure_subject_slot(semester_name, &draft.name)?;
        let updated = self.semesters[index].with_subject(draft.validate()?)?;

        debug!(
            "Added subject '{}' to '{semester_name}' (GPA now {:.4})",
            draft.name,
            updated.gpa()
        );
        Ok(self.replace(index, updated))
    }

    /// Check that `subject_name` could be added to `semester_name`.
    ///
    /// These are the checks [`add_subject`](Self::add_subject) runs before it
    /// looks at credits or grade. Callers holding raw credits text run this
    /// first so a missing semester or a duplicate is reported ahead of a
    /// parse failure. Returns the semester's position.
    ///
    /// # Errors
    /// `SemesterNotFound`, `BlankName` or `DuplicateSubject`
    pub fn ensure_subject_slot(
        &self,
        semester_name: &str,
        subject_name: &str,
    ) -> Result<usize, RecordError> {
        let index = self.semester_index(semester_name)?;
        ensure_named(subject_name, "subject")?;
        if self.semesters[index].subject(subject_name).is_some() {
            return Err(RecordError::DuplicateSubject {
                semester: semester_name.to_string(),
                subject: subject_name.to_string(),
            });
        }
        Ok(index)
    }

    /// Look up a subject, reporting which part of the path is missing
    ///
    /// # Errors
    /// `SemesterNotFound` or `SubjectNotFound`
    pub fn find_subject(
        &self,
        semester_name: &str,
        subject_name: &str,
    ) -> Result<&Subject, RecordError> {
        let index = self.semester_index(semester_name)?;
        self.semesters[index]
            .subject(subject_name)
            .ok_or_else(|| RecordError::SubjectNotFound {
                semester: semester_name.to_string(),
                subject: subject_name.to_string(),
            })
    }

    /// Change an existing subject's name, credits or grade
    ///
    /// # Errors
    /// `SemesterNotFound`, `SubjectNotFound`, or any validation failure of
    /// the resulting subject, including `DuplicateSubject` on rename
    pub fn update_subject(
        &mut self,
        semester_name: &str,
        subject_name: &str,
        update: &SubjectUpdate,
    ) -> Result<Semester, RecordError> {
        let index = self.semester_index(semester_name)?;
        let existing = self.find_subject(semester_name, subject_name)?;

        let draft = SubjectDraft::new(
            update
                .name
                .clone()
                .unwrap_or_else(|| existing.name().to_string()),
            update
                .credits
                .unwrap_or_else(|| i64::from(existing.credits())),
            update
                .grade
                .clone()
                .unwrap_or_else(|| existing.grade().label().to_string()),
        );
        let updated =
            self.semesters[index].with_replaced_subject(subject_name, draft.validate()?)?;

        debug!("Updated subject '{subject_name}' in '{semester_name}'");
        Ok(self.replace(index, updated))
    }

    /// Remove a subject from a semester and recompute its GPA
    ///
    /// # Errors
    /// `SemesterNotFound` or `SubjectNotFound`
    pub fn remove_subject(
        &mut self,
        semester_name: &str,
        subject_name: &str,
    ) -> Result<Semester, RecordError> {
        let index = self.semester_index(semester_name)?;
        let updated = self.semesters[index].without_subject(subject_name)?;
        debug!("Removed subject '{subject_name}' from '{semester_name}'");
        Ok(self.replace(index, updated))
    }

    /// GPA of one stored semester
    ///
    /// # Errors
    /// `SemesterNotFound`
    pub fn semester_gpa(&self, name: &str) -> Result<f64, RecordError> {
        self.semester(name)
            .map(gpa::semester_gpa)
            .ok_or_else(|| RecordError::SemesterNotFound(name.to_string()))
    }

    /// Cumulative GPA across every semester in the store
    #[must_use]
    pub fn cumulative_gpa(&self) -> f64 {
        gpa::cumulative_gpa(&self.semesters)
    }

    /// Cumulative GPA across the named semesters only
    ///
    /// A name given more than once counts once.
    ///
    /// # Errors
    /// `SemesterNotFound` for the first unknown name
    pub fn cumulative_gpa_of<S: AsRef<str>>(&self, names: &[S]) -> Result<f64, RecordError> {
        let mut selected: Vec<&Semester> = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            let semester = self
                .semester(name)
                .ok_or_else(|| RecordError::SemesterNotFound(name.to_string()))?;
            if !selected.iter().any(|s| s.name() == name) {
                selected.push(semester);
            }
        }
        Ok(gpa::cumulative_gpa(selected))
    }

    fn replace(&mut self, index: usize, semester: Semester) -> Semester {
        self.semesters[index] = semester.clone();
        semester
    }

    fn semester_index(&self, name: &str) -> Result<usize, RecordError> {
        self.semesters
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| RecordError::SemesterNotFound(name.to_string()))
    }

    fn ensure_semester_free(&self, name: &str) -> Result<(), RecordError> {
        if self.semester(name).is_some() {
            return Err(RecordError::DuplicateSemester(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::SubjectRecord;

    fn draft(name: &str, credits: i64, grade: &str) -> SubjectDraft {
        SubjectDraft::new(name, credits, grade)
    }

    fn store_with_fall() -> AcademicRecordStore {
        let mut store = AcademicRecordStore::new();
        store.add_semester("Fall").unwrap();
        store.add_subject("Fall", &draft("Math", 3, "A")).unwrap();
        store.add_subject("Fall", &draft("Physics", 4, "B+")).unwrap();
        store
    }

    #[test]
    fn test_add_semester_starts_empty() {
        let mut store = AcademicRecordStore::new();
        let semester = store.add_semester("Semester 1").unwrap();
        assert_eq!(semester.name(), "Semester 1");
        assert!(semester.subjects().is_empty());
        assert!(semester.gpa().abs() < f64::EPSILON);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_semester_is_rejected() {
        let mut store = store_with_fall();
        assert_eq!(
            store.add_semester("Fall"),
            Err(RecordError::DuplicateSemester("Fall".to_string()))
        );
        assert_eq!(store.len(), 1);
        // Exact match only: no trimming, no case folding
        assert!(store.add_semester("fall").is_ok());
        assert!(store.add_semester("Fall ").is_ok());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_blank_semester_is_rejected() {
        let mut store = AcademicRecordStore::new();
        assert_eq!(
            store.add_semester("   "),
            Err(RecordError::BlankName { kind: "semester" })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_subject_scenario() {
        let store = store_with_fall();
        let gpa = store.semester_gpa("Fall").unwrap();
        assert!((gpa - 52.0 / 7.0).abs() < 1e-12);
        assert!((store.semester("Fall").unwrap().gpa() - gpa).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_subject_errors_leave_store_untouched() {
        let mut store = store_with_fall();
        let before = store.clone();

        assert_eq!(
            store.add_subject("Winter", &draft("Art", 2, "A")),
            Err(RecordError::SemesterNotFound("Winter".to_string()))
        );
        assert_eq!(
            store.add_subject("Fall", &draft("Math", 2, "O")),
            Err(RecordError::DuplicateSubject {
                semester: "Fall".to_string(),
                subject: "Math".to_string(),
            })
        );
        assert_eq!(
            store.add_subject("Fall", &draft("Art", 0, "A")),
            Err(RecordError::InvalidCredits("0".to_string()))
        );
        assert_eq!(
            store.add_subject("Fall", &draft("Art", -3, "A")),
            Err(RecordError::InvalidCredits("-3".to_string()))
        );
        assert_eq!(
            store.add_subject("Fall", &draft("Art", 2, "A-")),
            Err(RecordError::InvalidGrade("A-".to_string()))
        );
        assert_eq!(
            store.add_subject("Fall", &draft("", 2, "A")),
            Err(RecordError::BlankName { kind: "subject" })
        );

        assert_eq!(store, before);
    }

    #[test]
    fn test_duplicate_reported_before_bad_credits() {
        let mut store = store_with_fall();
        assert!(matches!(
            store.add_subject("Fall", &draft("Math", 0, "Z")),
            Err(RecordError::DuplicateSubject { .. })
        ));
    }

    #[test]
    fn test_delete_semester_removes_only_that_one() {
        let mut store = store_with_fall();
        store.add_semester("Spring").unwrap();
        store.add_subject("Spring", &draft("Chemistry", 5, "O")).unwrap();

        let removed = store.delete_semester("Fall").unwrap();
        assert_eq!(removed.name(), "Fall");
        assert_eq!(store.len(), 1);
        assert!(store.semester("Spring").is_some());
        assert!((store.cumulative_gpa() - 10.0).abs() < 1e-12);

        assert_eq!(
            store.delete_semester("Fall"),
            Err(RecordError::SemesterNotFound("Fall".to_string()))
        );
    }

    #[test]
    fn test_rename_semester() {
        let mut store = store_with_fall();
        store.add_semester("Spring").unwrap();

        assert_eq!(
            store.rename_semester("Fall", "Spring"),
            Err(RecordError::DuplicateSemester("Spring".to_string()))
        );
        let renamed = store.rename_semester("Fall", "Autumn").unwrap();
        assert_eq!(renamed.subjects().len(), 2);
        assert_eq!(store.semesters()[0].name(), "Autumn");
        // Renaming to itself is a no-op, not a duplicate
        assert!(store.rename_semester("Autumn", "Autumn").is_ok());
    }

    #[test]
    fn test_update_subject() {
        let mut store = store_with_fall();
        let updated = store
            .update_subject(
                "Fall",
                "Physics",
                &SubjectUpdate {
                    grade: Some("O".to_string()),
                    ..SubjectUpdate::default()
                },
            )
            .unwrap();
        // (3*8 + 4*10) / 7
        assert!((updated.gpa() - 64.0 / 7.0).abs() < 1e-12);
        assert_eq!(updated.subject("Physics").unwrap().credits(), 4);
    }

    #[test]
    fn test_update_subject_rename_collision() {
        let mut store = store_with_fall();
        let before = store.clone();
        let err = store
            .update_subject(
                "Fall",
                "Physics",
                &SubjectUpdate {
                    name: Some("Math".to_string()),
                    ..SubjectUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RecordError::DuplicateSubject { .. }));
        assert!(store
            .update_subject(
                "Fall",
                "Physics",
                &SubjectUpdate {
                    credits: Some(0),
                    ..SubjectUpdate::default()
                },
            )
            .is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_last_subject_resets_gpa() {
        let mut store = AcademicRecordStore::new();
        store.add_semester("Fall").unwrap();
        store.add_subject("Fall", &draft("Math", 3, "A")).unwrap();
        let semester = store.remove_subject("Fall", "Math").unwrap();
        assert!(semester.gpa().abs() < f64::EPSILON);
        assert!(matches!(
            store.remove_subject("Fall", "Math"),
            Err(RecordError::SubjectNotFound { .. })
        ));
    }

    #[test]
    fn test_cumulative_gpa_of_subset() {
        let mut store = store_with_fall();
        store.add_semester("Spring").unwrap();
        store.add_subject("Spring", &draft("Chemistry", 5, "O")).unwrap();

        let spring_only = store.cumulative_gpa_of(&["Spring"]).unwrap();
        assert!((spring_only - 10.0).abs() < 1e-12);
        assert!(store.cumulative_gpa_of::<&str>(&[]).unwrap().abs() < f64::EPSILON);
        assert_eq!(
            store.cumulative_gpa_of(&["Spring", "Summer"]),
            Err(RecordError::SemesterNotFound("Summer".to_string()))
        );
    }

    #[test]
    fn test_cumulative_gpa_of_counts_repeated_names_once() {
        let mut store = AcademicRecordStore::new();
        store.add_semester("Fall").unwrap();
        store.add_subject("Fall", &draft("Math", 3, "A")).unwrap();
        store.add_semester("Spring").unwrap();
        store.add_subject("Spring", &draft("Chemistry", 5, "O")).unwrap();

        // (3*8 + 5*10) / 8
        let gpa = store.cumulative_gpa_of(&["Fall", "Fall", "Spring"]).unwrap();
        assert!((gpa - 9.25).abs() < 1e-12);
        assert!((gpa - store.cumulative_gpa()).abs() < 1e-12);
    }

    #[test]
    fn test_ensure_subject_slot_order() {
        let store = store_with_fall();
        assert_eq!(
            store.ensure_subject_slot("Winter", ""),
            Err(RecordError::SemesterNotFound("Winter".to_string()))
        );
        assert_eq!(
            store.ensure_subject_slot("Fall", " "),
            Err(RecordError::BlankName { kind: "subject" })
        );
        assert!(matches!(
            store.ensure_subject_slot("Fall", "Math"),
            Err(RecordError::DuplicateSubject { .. })
        ));
        assert_eq!(store.ensure_subject_slot("Fall", "Art"), Ok(0));
    }

    #[test]
    fn test_find_subject() {
        let store = store_with_fall();
        assert_eq!(store.find_subject("Fall", "Math").unwrap().credits(), 3);
        assert_eq!(
            store.find_subject("Winter", "Math").map(|_| ()),
            Err(RecordError::SemesterNotFound("Winter".to_string()))
        );
        assert!(matches!(
            store.find_subject("Fall", "Art"),
            Err(RecordError::SubjectNotFound { .. })
        ));
    }

    #[test]
    fn test_from_records_recomputes_stale_gpa() {
        let records = vec![SemesterRecord {
            name: "Fall".to_string(),
            gpa: 3.5,
            subjects: vec![SubjectRecord {
                name: "Math".to_string(),
                credits: 3,
                grade: "A".to_string(),
            }],
        }];
        let (store, report) = AcademicRecordStore::from_records(&records);
        assert_eq!(report.semesters, 1);
        assert_eq!(report.stale_gpa, vec!["Fall".to_string()]);
        assert!((store.semesters()[0].gpa() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_records_skips_duplicate_and_blank_semesters() {
        let empty = |name: &str| SemesterRecord {
            name: name.to_string(),
            gpa: 0.0,
            subjects: Vec::new(),
        };
        let (store, report) = AcademicRecordStore::from_records(&[
            empty("Fall"),
            empty("Fall"),
            empty(""),
            empty("Spring"),
        ]);
        let names: Vec<_> = store.semesters().iter().map(Semester::name).collect();
        assert_eq!(names, vec!["Fall", "Spring"]);
        assert_eq!(report.semesters, 2);
        assert_eq!(
            report.skipped,
            vec![
                SkippedRecord {
                    semester: "Fall".to_string(),
                    subject: None,
                    reason: RecordError::DuplicateSemester("Fall".to_string()),
                },
                SkippedRecord {
                    semester: String::new(),
                    subject: None,
                    reason: RecordError::BlankName { kind: "semester" },
                },
            ]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_from_records_keeps_valid_subjects_of_a_damaged_semester() {
        let records = vec![SemesterRecord {
            name: "Fall".to_string(),
            gpa: 8.0,
            subjects: vec![
                SubjectRecord {
                    name: "Math".to_string(),
                    credits: 3,
                    grade: "A".to_string(),
                },
                SubjectRecord {
                    name: "Math".to_string(),
                    credits: 4,
                    grade: "O".to_string(),
                },
            ],
        }];
        let (store, report) = AcademicRecordStore::from_records(&records);
        assert_eq!(store.semester("Fall").unwrap().subjects().len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].subject.as_deref(), Some("Math"));
        // The cached 8.0 matches what was kept
        assert!(report.stale_gpa.is_empty());
    }

    #[test]
    fn test_records_round_trip() {
        let store = store_with_fall();
        let (reloaded, report) = AcademicRecordStore::from_records(&store.to_records());
        assert!(report.is_clean());
        assert_eq!(reloaded, store);
    }
}
