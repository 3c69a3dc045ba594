//! Semester model

use super::Subject;
use crate::core::error::RecordError;
use crate::core::gpa;

/// A named group of subjects with one aggregate GPA.
///
/// Semesters are values: every change produces a new `Semester` with its
/// GPA recomputed, so `gpa` never drifts from `subjects`.
#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    name: String,
    subjects: Vec<Subject>,
    gpa: f64,
}

impl Semester {
    /// Create an empty semester (no subjects, GPA 0)
    ///
    /// # Errors
    /// `BlankName` if `name` is empty or whitespace only
    pub fn empty(name: impl Into<String>) -> Result<Self, RecordError> {
        let name = name.into();
        ensure_named(&name, "semester")?;
        Ok(Self {
            name,
            subjects: Vec::new(),
            gpa: 0.0,
        })
    }

    /// Build a semester from a list of subjects, rejecting duplicate subject names
    ///
    /// # Errors
    /// `BlankName` or `DuplicateSubject`
    pub fn with_subjects(
        name: impl Into<String>,
        subjects: impl IntoIterator<Item = Subject>,
    ) -> Result<Self, RecordError> {
        subjects
            .into_iter()
            .try_fold(Self::empty(name)?, |semester, subject| {
                semester.with_subject(subject)
            })
    }

    /// Semester name (its identity within a store)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subjects in insertion order
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Look up a subject by exact name
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name() == name)
    }

    /// Credit-weighted GPA over this semester's subjects
    #[must_use]
    pub const fn gpa(&self) -> f64 {
        self.gpa
    }

    /// Sum of credits across all subjects
    #[must_use]
    pub fn total_credits(&self) -> u64 {
        self.subjects.iter().map(|s| u64::from(s.credits())).sum()
    }

    /// Return a copy with `subject` appended
    ///
    /// # Errors
    /// `DuplicateSubject` if a subject with the same name exists
    pub fn with_subject(&self, subject: Subject) -> Result<Self, RecordError> {
        self.ensure_subject_free(subject.name())?;
        let mut subjects = self.subjects.clone();
        subjects.push(subject);
        Ok(self.replace_subjects(subjects))
    }

    /// Return a copy with the subject `name` swapped for `subject`, keeping its position.
    ///
    /// `subject` may carry a new name as long as it does not collide with another subject.
    ///
    /// # Errors
    /// `SubjectNotFound` or `DuplicateSubject`
    pub fn with_replaced_subject(&self, name: &str, subject: Subject) -> Result<Self, RecordError> {
        let index = self.subject_index(name)?;
        if subject.name() != name {
            self.ensure_subject_free(subject.name())?;
        }
        let mut subjects = self.subjects.clone();
        subjects[index] = subject;
        Ok(self.replace_subjects(subjects))
    }

    /// Return a copy without the subject `name`
    ///
    /// # Errors
    /// `SubjectNotFound`
    pub fn without_subject(&self, name: &str) -> Result<Self, RecordError> {
        let index = self.subject_index(name)?;
        let mut subjects = self.subjects.clone();
        subjects.remove(index);
        Ok(self.replace_subjects(subjects))
    }

    /// Return a copy carrying a different name
    ///
    /// # Errors
    /// `BlankName`
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, RecordError> {
        let name = name.into();
        ensure_named(&name, "semester")?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }

    fn replace_subjects(&self, subjects: Vec<Subject>) -> Self {
        let gpa = gpa::subjects_gpa(&subjects);
        Self {
            name: self.name.clone(),
            subjects,
            gpa,
        }
    }

    fn subject_index(&self, name: &str) -> Result<usize, RecordError> {
        self.subjects
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| RecordError::SubjectNotFound {
                semester: self.name.clone(),
                subject: name.to_string(),
            })
    }

    fn ensure_subject_free(&self, name: &str) -> Result<(), RecordError> {
        if self.subject(name).is_some() {
            return Err(RecordError::DuplicateSubject {
                semester: self.name.clone(),
                subject: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Reject empty or whitespace-only names
pub(crate) fn ensure_named(name: &str, kind: &'static str) -> Result<(), RecordError> {
    if name.trim().is_empty() {
        Err(RecordError::BlankName { kind })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, credits: i64, grade: &str) -> Subject {
        Subject::try_new(name, credits, grade).unwrap()
    }

    #[test]
    fn test_empty_semester() {
        let semester = Semester::empty("Fall").unwrap();
        assert_eq!(semester.name(), "Fall");
        assert!(semester.subjects().is_empty());
        assert!(semester.gpa().abs() < f64::EPSILON);
        assert_eq!(semester.total_credits(), 0);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            Semester::empty(""),
            Err(RecordError::BlankName { kind: "semester" })
        );
        assert!(Semester::empty(" \t").is_err());
    }

    #[test]
    fn test_gpa_follows_subjects() {
        let semester = Semester::empty("Fall")
            .unwrap()
            .with_subject(subject("Math", 3, "A"))
            .unwrap()
            .with_subject(subject("Physics", 4, "B+"))
            .unwrap();

        assert!((semester.gpa() - 52.0 / 7.0).abs() < 1e-12);
        assert_eq!(semester.total_credits(), 7);

        let trimmed = semester.without_subject("Physics").unwrap();
        assert!((trimmed.gpa() - 8.0).abs() < 1e-12);
        // The original value is untouched
        assert_eq!(semester.subjects().len(), 2);
    }

    #[test]
    fn test_duplicate_subject_rejected() {
        let semester = Semester::empty("Fall")
            .unwrap()
            .with_subject(subject("Math", 3, "A"))
            .unwrap();

        let err = semester.with_subject(subject("Math", 4, "O")).unwrap_err();
        assert_eq!(
            err,
            RecordError::DuplicateSubject {
                semester: "Fall".to_string(),
                subject: "Math".to_string(),
            }
        );
        // Names are case-sensitive
        assert!(semester.with_subject(subject("math", 4, "O")).is_ok());
    }

    #[test]
    fn test_replace_keeps_position() {
        let semester = Semester::with_subjects(
            "Spring",
            vec![subject("A1", 2, "C"), subject("B1", 2, "C"), subject("C1", 2, "C")],
        )
        .unwrap();

        let updated = semester
            .with_replaced_subject("B1", subject("B2", 2, "O"))
            .unwrap();
        let names: Vec<&str> = updated.subjects().iter().map(Subject::name).collect();
        assert_eq!(names, vec!["A1", "B2", "C1"]);
        assert!((updated.gpa() - 20.0 / 3.0).abs() < 1e-12);

        assert!(semester
            .with_replaced_subject("B1", subject("C1", 2, "O"))
            .is_err());
        assert!(semester
            .with_replaced_subject("Z9", subject("Z9", 2, "O"))
            .is_err());
    }

    #[test]
    fn test_renamed_keeps_subjects() {
        let semester = Semester::with_subjects("Fall", vec![subject("Math", 3, "A")]).unwrap();
        let renamed = semester.renamed("Fall 2024").unwrap();
        assert_eq!(renamed.name(), "Fall 2024");
        assert_eq!(renamed.subjects(), semester.subjects());
        assert!((renamed.gpa() - semester.gpa()).abs() < f64::EPSILON);
    }
}
