//! Error types for record mutations and persistence.

use std::path::PathBuf;

/// Validation failures raised by [`AcademicRecordStore`](crate::core::AcademicRecordStore).
///
/// Every variant is recoverable. A store that returns one of these has not
/// been modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A semester or subject name was empty or whitespace only.
    #[error("{kind} name must not be blank")]
    BlankName {
        /// What was being named (`"semester"` or `"subject"`).
        kind: &'static str,
    },

    /// A semester with this exact name already exists.
    #[error("semester '{0}' already exists")]
    DuplicateSemester(String),

    /// No semester has this name.
    #[error("semester '{0}' not found")]
    SemesterNotFound(String),

    /// The semester already holds a subject with this exact name.
    #[error("subject '{subject}' already exists in semester '{semester}'")]
    DuplicateSubject {
        /// Owning semester.
        semester: String,
        /// Conflicting subject name.
        subject: String,
    },

    /// The semester holds no subject with this name.
    #[error("subject '{subject}' not found in semester '{semester}'")]
    SubjectNotFound {
        /// Owning semester.
        semester: String,
        /// Missing subject name.
        subject: String,
    },

    /// Credits were zero, negative, out of range, or not a number.
    #[error("invalid credits '{0}': expected a positive whole number")]
    InvalidCredits(String),

    /// The grade is not one of O, A+, A, B+, B, C, F.
    #[error("invalid grade '{0}': expected one of O, A+, A, B+, B, C, F")]
    InvalidGrade(String),

    /// The user identity was blank.
    #[error("user identity must not be blank")]
    InvalidUser,
}

/// Failures from a [`RecordRepository`](crate::core::storage::RecordRepository) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not valid TOML for the record schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// Records could not be serialized.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The backend's internal state is unusable (e.g. a poisoned lock).
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors from a write-through [`RecordSession`](crate::core::RecordSession).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The mutation was rejected; nothing changed in memory or in storage.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Storage failed. The in-memory store may be ahead of the backend.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
