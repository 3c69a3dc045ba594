//! Semester command handler

use super::{fail, open_session};
use crate::args::SemesterSubcommand;
use gradebook::config::Config;
use gradebook::core::gpa::format_gpa;
use gradebook::core::models::Semester;
use gradebook::info;

/// Dispatch semester subcommands
pub fn run(subcommand: SemesterSubcommand, config: &Config) {
    if let Err(err) = execute(subcommand, config) {
        fail("Semester command failed", &err);
    }
}

fn execute(subcommand: SemesterSubcommand, config: &Config) -> Result<(), String> {
    let mut session = open_session(config)?;
    let precision = config.display.precision;

    match subcommand {
        SemesterSubcommand::Add { name } => {
            let semester = session.add_semester(&name).map_err(|e| e.to_string())?;
            info!("Semester '{}' added for {}", semester.name(), session.user());
            println!("✓ Added semester '{}'", semester.name());
        }
        SemesterSubcommand::Delete { name } => {
            let removed = session.delete_semester(&name).map_err(|e| e.to_string())?;
            println!(
                "✓ Deleted semester '{}' ({} subject(s))",
                removed.name(),
                removed.subjects().len()
            );
        }
        SemesterSubcommand::Rename { name, new_name } => {
            let semester = session
                .rename_semester(&name, &new_name)
                .map_err(|e| e.to_string())?;
            println!("✓ Renamed '{name}' to '{}'", semester.name());
        }
        SemesterSubcommand::List => {
            let store = session.store();
            if store.is_empty() {
                println!("No semesters recorded for {}", session.user());
                return Ok(());
            }
            println!("\n=== Semesters for {} ===\n", session.user());
            for semester in store.semesters() {
                println!(
                    "  {:<24} GPA {:>w$}  {:>3} credits  {} subject(s)",
                    semester.name(),
                    format_gpa(semester.gpa(), precision),
                    semester.total_credits(),
                    semester.subjects().len(),
                    w = precision + 3,
                );
            }
            println!(
                "\n  Cumulative GPA: {}",
                format_gpa(store.cumulative_gpa(), precision)
            );
        }
        SemesterSubcommand::Show { name } => {
            let semester = session
                .store()
                .semester(&name)
                .ok_or_else(|| format!("Semester '{name}' not found"))?;
            print_semester(semester, precision);
        }
    }
    Ok(())
}

/// Print one semester as a small table
pub fn print_semester(semester: &Semester, precision: usize) {
    println!("\n=== {} ===\n", semester.name());
    if semester.subjects().is_empty() {
        println!("  (no subjects)");
    } else {
        println!("  {:<28} {:>7}  {:<5}", "Subject", "Credits", "Grade");
        for subject in semester.subjects() {
            println!(
                "  {:<28} {:>7}  {:<5}",
                subject.name(),
                subject.credits(),
                subject.grade().label()
            );
        }
    }
    println!(
        "\n  GPA: {} over {} credits",
        format_gpa(semester.gpa(), precision),
        semester.total_credits()
    );
}
