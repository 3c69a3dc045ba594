//! Import command handler
//!
//! Applies a grade-sheet CSV on top of the user's records. Every row is
//! validated before anything is written.

use super::{fail, open_session};
use gradebook::config::Config;
use gradebook::core::import::{apply_rows, parse_grade_sheet_csv};
use gradebook::info;
use std::path::Path;

/// Run the import command
pub fn run(input_file: &Path, config: &Config) {
    if let Err(err) = execute(input_file, config) {
        fail(&format!("Import of {} failed", input_file.display()), &err);
    }
}

fn execute(input_file: &Path, config: &Config) -> Result<(), String> {
    let mut session = open_session(config)?;

    let rows = parse_grade_sheet_csv(input_file).map_err(|e| e.to_string())?;
    info!("Parsed {} row(s) from {}", rows.len(), input_file.display());

    let (store, summary) = apply_rows(session.store(), &rows).map_err(|e| e.to_string())?;
    session.replace_store(store).map_err(|e| e.to_string())?;

    println!(
        "✓ Imported {} semester(s) and {} subject(s) from {}",
        summary.semesters_added,
        summary.subjects_added,
        input_file.display()
    );
    Ok(())
}
