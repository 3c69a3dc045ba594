//! Subject command handler

use super::semester::print_semester;
use super::{fail, open_session};
use crate::args::SubjectSubcommand;
use gradebook::config::Config;
use gradebook::core::gpa::format_gpa;
use gradebook::core::models::{parse_credits, SubjectDraft};
use gradebook::core::record_store::SubjectUpdate;
use gradebook::verbose;

/// Dispatch subject subcommands
pub fn run(subcommand: SubjectSubcommand, config: &Config) {
    if let Err(err) = execute(subcommand, config) {
        fail("Subject command failed", &err);
    }
}

fn execute(subcommand: SubjectSubcommand, config: &Config) -> Result<(), String> {
    let mut session = open_session(config)?;
    let precision = config.display.precision;

    let semester = match subcommand {
        SubjectSubcommand::Add {
            semester,
            name,
            credits,
            grade,
        } => {
            session
                .store()
                .ensure_subject_slot(&semester, &name)
                .map_err(|e| e.to_string())?;
            let draft = SubjectDraft::from_text(name, &credits, grade).map_err(|e| e.to_string())?;
            let updated = session
                .add_subject(&semester, &draft)
                .map_err(|e| e.to_string())?;
            println!(
                "✓ Added '{}' to '{}' (GPA now {})",
                draft.name,
                updated.name(),
                format_gpa(updated.gpa(), precision)
            );
            updated
        }
        SubjectSubcommand::Update {
            semester,
            name,
            new_name,
            credits,
            grade,
        } => {
            session
                .store()
                .find_subject(&semester, &name)
                .map_err(|e| e.to_string())?;
            let update = SubjectUpdate {
                name: new_name,
                credits: credits
                    .as_deref()
                    .map(parse_credits)
                    .transpose()
                    .map_err(|e| e.to_string())?,
                grade,
            };
            let updated = session
                .update_subject(&semester, &name, &update)
                .map_err(|e| e.to_string())?;
            println!(
                "✓ Updated '{name}' in '{}' (GPA now {})",
                updated.name(),
                format_gpa(updated.gpa(), precision)
            );
            updated
        }
        SubjectSubcommand::Remove { semester, name } => {
            let updated = session
                .remove_subject(&semester, &name)
                .map_err(|e| e.to_string())?;
            println!(
                "✓ Removed '{name}' from '{}' (GPA now {})",
                updated.name(),
                format_gpa(updated.gpa(), precision)
            );
            updated
        }
    };

    verbose!("{} subject(s) in '{}'", semester.subjects().len(), semester.name());
    if gradebook::logger::is_verbose_enabled() {
        print_semester(&semester, precision);
    }
    Ok(())
}
