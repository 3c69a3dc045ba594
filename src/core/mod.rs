//! Core module: the record model, GPA aggregation, and everything the CLI drives

pub mod config;
pub mod error;
pub mod gpa;
pub mod import;
pub mod models;
pub mod record_store;
pub mod report;
pub mod session;
pub mod storage;

pub use error::{RecordError, SessionError, StorageError};
pub use record_store::{AcademicRecordStore, LoadReport};
pub use session::RecordSession;

/// Returns the current version of the `gradebook` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
