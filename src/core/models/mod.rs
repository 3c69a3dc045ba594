//! Data models for `gradebook`

pub mod grade;
pub mod semester;
pub mod subject;

pub use grade::{grade_points, Grade};
pub use semester::Semester;
pub use subject::{parse_credits, Subject, SubjectDraft};
