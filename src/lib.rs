//! Library for `gradebook`
//! Semester grade sheets, credit-weighted GPA aggregation, and the storage,
//! import and reporting layers the CLI builds on.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
