//! Persisted record shapes and the user identity key

use crate::core::error::RecordError;
use crate::core::models::{grade_points, Semester, Subject};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write;

/// Opaque identity of the student who owns a record set (an email address in practice)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user key
    ///
    /// # Errors
    /// `InvalidUser` if the key is blank
    pub fn new(id: impl Into<String>) -> Result<Self, RecordError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RecordError::InvalidUser);
        }
        Ok(Self(id))
    }

    /// The raw key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File-system-safe, reversible encoding of the key.
    ///
    /// ASCII alphanumerics and `@ . _ -` pass through; every other byte becomes `%XX`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.0.len());
        for byte in self.0.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'@' | b'.' | b'_' | b'-') {
                stem.push(char::from(byte));
            } else {
                let _ = write!(stem, "%{byte:02X}");
            }
        }
        stem
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A subject as held by a storage backend. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Subject name
    pub name: String,
    /// Credits
    pub credits: i64,
    /// Grade label
    pub grade: String,
}

/// A semester as held by a storage backend. Not validated.
///
/// `gpa` is the cached value written alongside the subjects. It is
/// recomputed and compared when a snapshot is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// Semester name; the storage key within one user's records
    pub name: String,
    /// Cached GPA at the time of writing
    #[serde(default)]
    pub gpa: f64,
    /// Subjects in insertion order
    #[serde(default)]
    pub subjects: Vec<SubjectRecord>,
}

impl SemesterRecord {
    /// GPA recomputed from the raw subjects.
    ///
    /// Unknown grade labels score 0 and non-positive credits are ignored.
    /// This works on records that would fail validation.
    #[must_use]
    pub fn recomputed_gpa(&self) -> f64 {
        let (points, credits) = self
            .subjects
            .iter()
            .filter(|s| s.credits > 0)
            .fold((0.0_f64, 0.0_f64), |(points, credits), s| {
                #[allow(clippy::cast_precision_loss)]
                let c = s.credits as f64;
                (grade_points(&s.grade).mul_add(c, points), credits + c)
            });
        if credits > 0.0 {
            points / credits
        } else {
            0.0
        }
    }

    /// Whether the cached `gpa` agrees with `gpa` within [`GPA_TOLERANCE`]
    #[must_use]
    pub fn cached_gpa_matches(&self, gpa: f64) -> bool {
        (self.gpa - gpa).abs() <= GPA_TOLERANCE
    }

    /// Validate this record into a [`Semester`], recomputing its GPA
    ///
    /// Subjects that fail validation, or repeat an earlier subject's name,
    /// are left out and returned alongside the semester.
    ///
    /// # Errors
    /// `BlankName` if the semester itself has no name
    pub fn to_semester(&self) -> Result<(Semester, Vec<SkippedRecord>), RecordError> {
        let mut semester = Semester::empty(self.name.clone())?;
        let mut skipped = Vec::new();
        for subject in &self.subjects {
            let added = Subject::try_new(subject.name.clone(), subject.credits, &subject.grade)
                .and_then(|valid| semester.with_subject(valid));
            match added {
                Ok(next) => semester = next,
                Err(reason) => skipped.push(SkippedRecord {
                    semester: self.name.clone(),
                    subject: Some(subject.name.clone()),
                    reason,
                }),
            }
        }
        Ok((semester, skipped))
    }
}

/// A stored semester or subject left out of a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Semester the entry was stored under
    pub semester: String,
    /// Subject name, or `None` when the whole semester was skipped
    pub subject: Option<String>,
    /// Why it failed validation
    pub reason: RecordError,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "'{}' / '{subject}': {}", self.semester, self.reason),
            None => write!(f, "'{}': {}", self.semester, self.reason),
        }
    }
}

/// Largest difference between a stored and recomputed GPA still treated as equal.
/// Older writers stored the GPA as a single-precision float.
pub const GPA_TOLERANCE: f64 = 1e-4;

impl From<&Subject> for SubjectRecord {
    fn from(subject: &Subject) -> Self {
        Self {
            name: subject.name().to_string(),
            credits: i64::from(subject.credits()),
            grade: subject.grade().label().to_string(),
        }
    }
}

impl From<&Semester> for SemesterRecord {
    fn from(semester: &Semester) -> Self {
        Self {
            name: semester.name().to_string(),
            gpa: semester.gpa(),
            subjects: semester.subjects().iter().map(SubjectRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subjects: &[(&str, i64, &str)], gpa: f64) -> SemesterRecord {
        SemesterRecord {
            name: "Fall".to_string(),
            gpa,
            subjects: subjects
                .iter()
                .map(|(n, c, g)| SubjectRecord {
                    name: (*n).to_string(),
                    credits: *c,
                    grade: (*g).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_user_id_rejects_blank() {
        assert_eq!(UserId::new("  "), Err(RecordError::InvalidUser));
        assert_eq!(UserId::new("a@b.edu").unwrap().as_str(), "a@b.edu");
    }

    #[test]
    fn test_file_stem_encoding() {
        let user = UserId::new("jo.doe+grades@uni.edu").unwrap();
        assert_eq!(user.file_stem(), "jo.doe%2Bgrades@uni.edu");
        let slashy = UserId::new("../etc/passwd").unwrap();
        assert_eq!(slashy.file_stem(), "..%2Fetc%2Fpasswd");
    }

    #[test]
    fn test_recomputed_gpa_defaults_unknown_grades() {
        let rec = record(&[("Math", 3, "A"), ("Mystery", 3, "Z")], 0.0);
        assert!((rec.recomputed_gpa() - 4.0).abs() < 1e-12);
        assert!(!rec.cached_gpa_matches(rec.recomputed_gpa()));
    }

    #[test]
    fn test_consistency_tolerates_float_storage() {
        #[allow(clippy::cast_possible_truncation)]
        let stored = f64::from((52.0_f64 / 7.0) as f32);
        let rec = record(&[("Math", 3, "A"), ("Physics", 4, "B+")], stored);
        assert!(rec.cached_gpa_matches(rec.recomputed_gpa()));
    }

    #[test]
    fn test_round_trip_through_semester() {
        let rec = record(&[("Math", 3, "A"), ("Physics", 4, "B+")], 0.0);
        let (semester, skipped) = rec.to_semester().unwrap();
        assert!(skipped.is_empty());
        let back = SemesterRecord::from(&semester);
        assert_eq!(back.subjects, rec.subjects);
        assert!(back.cached_gpa_matches(semester.gpa()));
    }

    #[test]
    fn test_to_semester_skips_invalid_subjects() {
        let rec = record(
            &[("Math", 3, "A"), ("Mystery", 3, "Z"), ("Math", 2, "B"), ("Lab", 0, "O")],
            0.0,
        );
        let (semester, skipped) = rec.to_semester().unwrap();
        assert_eq!(semester.subjects().len(), 1);
        assert!((semester.gpa() - 8.0).abs() < 1e-12);

        let reasons: Vec<_> = skipped.iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                RecordError::InvalidGrade("Z".to_string()),
                RecordError::DuplicateSubject {
                    semester: "Fall".to_string(),
                    subject: "Math".to_string(),
                },
                RecordError::InvalidCredits("0".to_string()),
            ]
        );
        assert_eq!(skipped[0].subject.as_deref(), Some("Mystery"));
        assert!(skipped[0].to_string().contains("'Fall' / 'Mystery'"));
    }

    #[test]
    fn test_to_semester_rejects_blank_semester_name() {
        let mut rec = record(&[("Math", 3, "A")], 0.0);
        rec.name = " ".to_string();
        assert_eq!(
            rec.to_semester().map(|_| ()),
            Err(RecordError::BlankName { kind: "semester" })
        );
    }
}
