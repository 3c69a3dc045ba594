//! Transcript report generation
//!
//! Renders a student's semesters, per-semester GPA and cumulative GPA as
//! Markdown or as a self-contained HTML page.

pub mod formats;

use crate::core::gpa::format_gpa;
use crate::core::record_store::AcademicRecordStore;
use crate::core::storage::UserId;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for transcript generation
///
/// Every number is formatted here with the configured precision so the
/// two report formats cannot disagree.
#[derive(Debug, Clone)]
pub struct TranscriptContext<'a> {
    /// Student the transcript belongs to
    pub user: &'a UserId,
    /// Records being reported
    pub store: &'a AcademicRecordStore,
    /// Decimal places for GPA values
    pub precision: usize,
}

/// One subject line, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    /// Subject name
    pub name: String,
    /// Credits
    pub credits: u32,
    /// Grade label
    pub grade: &'static str,
    /// Grade points awarded
    pub points: String,
}

/// One semester block, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterRow {
    /// Semester name
    pub name: String,
    /// Formatted semester GPA
    pub gpa: String,
    /// Credits in this semester
    pub credits: u64,
    /// Subjects in insertion order
    pub subjects: Vec<SubjectRow>,
}

impl<'a> TranscriptContext<'a> {
    /// Create a new transcript context
    #[must_use]
    pub const fn new(user: &'a UserId, store: &'a AcademicRecordStore, precision: usize) -> Self {
        Self {
            user,
            store,
            precision,
        }
    }

    /// Formatted cumulative GPA across every semester
    #[must_use]
    pub fn cumulative_gpa(&self) -> String {
        format_gpa(self.store.cumulative_gpa(), self.precision)
    }

    /// Total credits across every semester
    #[must_use]
    pub fn total_credits(&self) -> u64 {
        self.store.total_credits()
    }

    /// Number of semesters
    #[must_use]
    pub fn semester_count(&self) -> usize {
        self.store.len()
    }

    /// Display rows for every semester, in order
    #[must_use]
    pub fn semester_rows(&self) -> Vec<SemesterRow> {
        self.store
            .semesters()
            .iter()
            .map(|semester| SemesterRow {
                name: semester.name().to_string(),
                gpa: format_gpa(semester.gpa(), self.precision),
                credits: semester.total_credits(),
                subjects: semester
                    .subjects()
                    .iter()
                    .map(|s| SubjectRow {
                        name: s.name().to_string(),
                        credits: s.credits(),
                        grade: s.grade().label(),
                        points: format!("{:.0}", s.grade().points()),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &TranscriptContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SubjectDraft;

    #[test]
    fn test_rows_carry_formatted_values() {
        let mut store = AcademicRecordStore::new();
        store.add_semester("Fall").unwrap();
        store
            .add_subject("Fall", &SubjectDraft::new("Math", 3, "A"))
            .unwrap();
        store
            .add_subject("Fall", &SubjectDraft::new("Physics", 4, "B+"))
            .unwrap();
        let user = UserId::new("s@uni.edu").unwrap();

        let ctx = TranscriptContext::new(&user, &store, 3);
        let rows = ctx.semester_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].gpa, "7.429");
        assert_eq!(rows[0].credits, 7);
        assert_eq!(rows[0].subjects[1].grade, "B+");
        assert_eq!(rows[0].subjects[1].points, "7");
        assert_eq!(ctx.cumulative_gpa(), "7.429");
        assert_eq!(ctx.total_credits(), 7);
    }
}
