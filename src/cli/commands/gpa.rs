//! GPA command handler

use super::{fail, open_session};
use gradebook::config::Config;
use gradebook::core::gpa::format_gpa;

/// Print the cumulative GPA over all semesters, or over the named ones
pub fn run(semesters: &[String], config: &Config) {
    if let Err(err) = execute(semesters, config) {
        fail("GPA calculation failed", &err);
    }
}

fn execute(semesters: &[String], config: &Config) -> Result<(), String> {
    let session = open_session(config)?;
    let store = session.store();
    let precision = config.display.precision;

    if semesters.is_empty() {
        println!(
            "Cumulative GPA: {} ({} semester(s), {} credits)",
            format_gpa(store.cumulative_gpa(), precision),
            store.len(),
            store.total_credits()
        );
        return Ok(());
    }

    for name in semesters {
        let gpa = store.semester_gpa(name).map_err(|e| e.to_string())?;
        println!("  {name}: {}", format_gpa(gpa, precision));
    }
    let pooled = store
        .cumulative_gpa_of(semesters)
        .map_err(|e| e.to_string())?;
    println!("Cumulative GPA: {}", format_gpa(pooled, precision));
    Ok(())
}
