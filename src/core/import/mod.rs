//! Bulk import of grade sheets

pub mod csv_parser;

pub use csv_parser::{
    apply_rows, parse_grade_sheet, parse_grade_sheet_csv, GradeSheetRow, ImportError,
    ImportSummary,
};
