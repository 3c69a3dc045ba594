//! CSV parser for grade sheets
//!
//! Expected layout: one header row naming the `Semester`, `Subject`,
//! `Credits` and `Grade` columns (any order, case-insensitive), then one
//! row per subject. A row with a semester but an empty subject creates an
//! empty semester.
//!
//! ```text
//! Semester,Subject,Credits,Grade
//! Fall,Math,3,A
//! Fall,Physics,4,B+
//! Spring,Chemistry,5,O
//! ```

use crate::core::error::RecordError;
use crate::core::models::SubjectDraft;
use crate::core::record_store::AcademicRecordStore;
use crate::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Failures while importing a grade sheet
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Input path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file has no header row
    #[error("grade sheet is empty")]
    Empty,

    /// A required column is missing from the header
    #[error("missing '{0}' column in header")]
    MissingColumn(&'static str),

    /// A data row was rejected by validation
    #[error("line {line}: {source}")]
    Row {
        /// 1-based line number in the input
        line: usize,
        /// Validation failure
        #[source]
        source: RecordError,
    },
}

/// One data row of a grade sheet, fields trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSheetRow {
    /// 1-based line number in the input
    pub line: usize,
    /// Semester name
    pub semester: String,
    /// Subject name; empty for a semester-only row
    pub subject: String,
    /// Credits as written
    pub credits: String,
    /// Grade label as written
    pub grade: String,
}

/// Counts of what an import added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Semesters created
    pub semesters_added: usize,
    /// Subjects added
    pub subjects_added: usize,
}

/// Column positions resolved from the header row
struct Columns {
    semester: usize,
    subject: usize,
    credits: usize,
    grade: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or(ImportError::MissingColumn(name))
        };
        Ok(Self {
            semester: find("Semester")?,
            subject: find("Subject")?,
            credits: find("Credits")?,
            grade: find("Grade")?,
        })
    }
}

/// Read and parse a grade-sheet CSV file
///
/// # Errors
/// `Io` if the file cannot be read, otherwise see [`parse_grade_sheet`]
pub fn parse_grade_sheet_csv<P: AsRef<Path>>(path: P) -> Result<Vec<GradeSheetRow>, ImportError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grade_sheet(&content)
}

/// Parse grade-sheet CSV text into rows. Blank lines are skipped.
///
/// # Errors
/// `Empty` without a header, `MissingColumn` if the header lacks a column
pub fn parse_grade_sheet(content: &str) -> Result<Vec<GradeSheetRow>, ImportError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(ImportError::Empty)?;
    let columns = Columns::from_header(&parse_csv_line(header_line))?;

    let rows = lines
        .map(|(idx, line)| {
            let fields = parse_csv_line(line);
            let field = |i: usize| fields.get(i).cloned().unwrap_or_default();
            GradeSheetRow {
                line: idx + 1,
                semester: field(columns.semester),
                subject: field(columns.subject),
                credits: field(columns.credits),
                grade: field(columns.grade),
            }
        })
        .collect();
    Ok(rows)
}

/// Apply parsed rows on top of `store`.
///
/// Works on a copy; the returned store is only produced when every row is
/// accepted, so a bad row leaves the caller's store as it was.
///
/// # Errors
/// `Row` with the line number of the first rejected row
pub fn apply_rows(
    store: &AcademicRecordStore,
    rows: &[GradeSheetRow],
) -> Result<(AcademicRecordStore, ImportSummary), ImportError> {
    let mut working = store.clone();
    let mut summary = ImportSummary::default();

    for row in rows {
        let at_line = |source: RecordError| ImportError::Row {
            line: row.line,
            source,
        };

        if working.semester(&row.semester).is_none() {
            working.add_semester(&row.semester).map_err(at_line)?;
            summary.semesters_added += 1;
        }
        if row.subject.is_empty() {
            continue;
        }

        working
            .ensure_subject_slot(&row.semester, &row.subject)
            .map_err(at_line)?;
        let draft = SubjectDraft::from_text(row.subject.clone(), &row.credits, row.grade.clone())
            .map_err(at_line)?;
        working.add_subject(&row.semester, &draft).map_err(at_line)?;
        summary.subjects_added += 1;
    }

    debug!(
        "Import applied: {} semester(s), {} subject(s)",
        summary.semesters_added, summary.subjects_added
    );
    Ok((working, summary))
}

/// Split a CSV line on commas, trimming each field
fn parse_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .map(std::string::ToString::to_string)
        .collect()
}
