//! CLI command handlers for `gradebook`.
//!
//! Each command is implemented in its own submodule. Handlers that touch
//! records open a [`RecordSession`] over the configured data directory.

pub mod config;
pub mod gpa;
pub mod import;
pub mod report;
pub mod semester;
pub mod subject;

use gradebook::config::Config;
use gradebook::core::storage::{TomlFileRepository, UserId};
use gradebook::core::RecordSession;
use gradebook::{error, verbose};

/// Session type used by every record command
pub type FileSession = RecordSession<TomlFileRepository>;

/// Open the configured user's records
///
/// The user comes from `--user` or config `storage.user`.
pub fn open_session(config: &Config) -> Result<FileSession, String> {
    if config.storage.user.trim().is_empty() {
        return Err(
            "No user selected. Pass --user <ID> or run `gradebook config set user <ID>`"
                .to_string(),
        );
    }
    let user = UserId::new(config.storage.user.as_str()).map_err(|e| e.to_string())?;
    let repository = TomlFileRepository::new(&config.storage.data_dir);
    verbose!(
        "Using records at {}",
        repository.document_path(&user).display()
    );

    let (session, report) = RecordSession::open(repository, user).map_err(|e| e.to_string())?;
    for name in &report.stale_gpa {
        verbose!("Stored GPA for '{name}' was out of date and has been recomputed");
    }
    if !report.skipped.is_empty() {
        eprintln!(
            "! {} stored entr(ies) failed validation and were not loaded:",
            report.skipped.len()
        );
        for entry in &report.skipped {
            eprintln!("  - {entry}");
        }
    }
    Ok(session)
}

/// Report a failed command and exit with status 1
pub fn fail(context: &str, err: &str) -> ! {
    error!("{context}: {err}");
    eprintln!("✗ {err}");
    std::process::exit(1);
}
