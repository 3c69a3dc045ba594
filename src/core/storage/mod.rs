//! Persistence boundary for record sets
//!
//! The engine never performs I/O itself. Callers load a snapshot through a
//! [`RecordRepository`], fold it into an
//! [`AcademicRecordStore`](crate::core::AcademicRecordStore), and push every
//! successful mutation back.

pub mod in_memory;
pub mod record;
pub mod repository;
pub mod toml_file;

pub use in_memory::InMemoryRepository;
pub use record::{SemesterRecord, SkippedRecord, SubjectRecord, UserId, GPA_TOLERANCE};
pub use repository::RecordRepository;
pub use toml_file::TomlFileRepository;
