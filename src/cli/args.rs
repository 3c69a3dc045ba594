//! CLI argument definitions for `gradebook`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gradebook::config::ConfigOverrides;
use gradebook::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `precision`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SemesterSubcommand {
    /// Create an empty semester.
    Add {
        /// Semester name, unique per user
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Delete a semester and all of its subjects.
    Delete {
        /// Semester name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Rename a semester, keeping its subjects.
    Rename {
        /// Current name
        #[arg(value_name = "OLD")]
        name: String,
        /// New name
        #[arg(value_name = "NEW")]
        new_name: String,
    },
    /// List semesters with their GPA.
    List,
    /// Show the subjects of one semester.
    Show {
        /// Semester name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubjectSubcommand {
    /// Add a graded subject to a semester.
    Add {
        /// Semester the subject belongs to
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Subject name, unique within the semester
        #[arg(value_name = "NAME")]
        name: String,
        /// Credits (a positive whole number)
        #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
        credits: String,
        /// Letter grade: O, A+, A, B+, B, C or F
        #[arg(short, long, value_name = "GRADE")]
        grade: String,
    },
    /// Change the name, credits or grade of a subject.
    Update {
        /// Semester the subject belongs to
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Current subject name
        #[arg(value_name = "NAME")]
        name: String,
        /// New subject name
        #[arg(long = "name", value_name = "NEW")]
        new_name: Option<String>,
        /// New credits
        #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
        credits: Option<String>,
        /// New letter grade
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<String>,
    },
    /// Remove a subject from a semester.
    Remove {
        /// Semester the subject belongs to
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Subject name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage semesters.
    Semester {
        #[command(subcommand)]
        subcommand: SemesterSubcommand,
    },
    /// Manage subjects within a semester.
    Subject {
        #[command(subcommand)]
        subcommand: SubjectSubcommand,
    },
    /// Print the cumulative GPA.
    ///
    /// With no arguments every semester is pooled. Naming semesters restricts
    /// the calculation to those.
    Gpa {
        /// Semesters to include
        #[arg(value_name = "SEMESTER")]
        semesters: Vec<String>,
    },
    /// Import semesters and subjects from a grade-sheet CSV.
    ///
    /// Columns: Semester, Subject, Credits, Grade. Nothing is saved if any
    /// row is rejected.
    Import {
        /// Path to the CSV file
        #[arg(value_name = "CSV")]
        input_file: PathBuf,
    },
    /// Generate a transcript report.
    Report {
        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Output file path (optional; defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    about = "Track semesters, subjects and GPA from the command line",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Student whose records to use. Falls back to config `storage.user`.
    #[arg(short, long, value_name = "ID", global = true)]
    pub user: Option<String>,

    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config records directory
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR", global = true)]
    pub reports_dir: Option<PathBuf>,

    /// Override config GPA display precision
    #[arg(long, value_name = "DIGITS", global = true)]
    pub precision: Option<usize>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. Runtime logging flags are not included;
    /// `main` applies them directly.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            user: self.user.clone(),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            precision: self.precision,
            ..ConfigOverrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::try_parse_from(["gradebook", "config"]).unwrap();

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.user.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.precision.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "gpa",
            "--user",
            "s@uni.edu",
            "--data-dir",
            "/tmp/records",
            "--reports-dir",
            "/tmp/reports",
            "--precision",
            "3",
        ])
        .unwrap();

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.user, Some("s@uni.edu".to_string()));
        assert_eq!(overrides.data_dir, Some("/tmp/records".to_string()));
        assert_eq!(overrides.reports_dir, Some("/tmp/reports".to_string()));
        assert_eq!(overrides.precision, Some(3));
    }

    #[test]
    fn test_subject_add_parses() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "subject",
            "add",
            "Fall",
            "Math",
            "--credits",
            "-2",
            "--grade",
            "A+",
        ])
        .unwrap();

        match cli.command {
            Command::Subject {
                subcommand:
                    SubjectSubcommand::Add {
                        semester,
                        name,
                        credits,
                        grade,
                    },
            } => {
                assert_eq!(semester, "Fall");
                assert_eq!(name, "Math");
                assert_eq!(credits, "-2");
                assert_eq!(grade, "A+");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subject_update_optional_fields() {
        let cli = Cli::try_parse_from([
            "gradebook", "subject", "update", "Fall", "Math", "--name", "Calculus",
        ])
        .unwrap();

        match cli.command {
            Command::Subject {
                subcommand:
                    SubjectSubcommand::Update {
                        new_name,
                        credits,
                        grade,
                        ..
                    },
            } => {
                assert_eq!(new_name.as_deref(), Some("Calculus"));
                assert!(credits.is_none());
                assert!(grade.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_gpa_collects_semesters() {
        let cli = Cli::try_parse_from(["gradebook", "gpa", "Fall", "Spring"]).unwrap();
        match cli.command {
            Command::Gpa { semesters } => assert_eq!(semesters, vec!["Fall", "Spring"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_report_defaults_to_html() {
        let cli = Cli::try_parse_from(["gradebook", "report"]).unwrap();
        match cli.command {
            Command::Report { format, output } => {
                assert_eq!(format, "html");
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subject_add_requires_grade() {
        assert!(
            Cli::try_parse_from(["gradebook", "subject", "add", "Fall", "Math", "-c", "3"])
                .is_err()
        );
    }
}
