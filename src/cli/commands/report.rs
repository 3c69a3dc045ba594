//! Report command handler
//!
//! Writes a Markdown or HTML transcript for the selected user.

use super::{fail, open_session};
use gradebook::config::Config;
use gradebook::core::report::{ReportFormat, TranscriptContext};
use gradebook::info;
use std::path::{Path, PathBuf};

/// Run the report command
pub fn run(format_str: &str, output_file: Option<&Path>, config: &Config) {
    match generate_report(format_str, output_file, config) {
        Ok(path) => println!("✓ Report generated: {}", path.display()),
        Err(err) => fail("Report generation failed", &err),
    }
}

fn generate_report(
    format_str: &str,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, String> {
    let format: ReportFormat = format_str.parse()?;
    let session = open_session(config)?;

    let output_path = match output_file {
        Some(path) => path.to_path_buf(),
        None => default_output_path(config, session.user().file_stem().as_str(), format),
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }

    let ctx = TranscriptContext::new(session.user(), session.store(), config.display.precision);
    format
        .generator()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to write {}: {e}", output_path.display()))?;

    info!("{format} transcript written to {}", output_path.display());
    Ok(output_path)
}

/// `<reports_dir>/<user>_transcript.<ext>`
fn default_output_path(config: &Config, stem: &str, format: ReportFormat) -> PathBuf {
    PathBuf::from(&config.paths.reports_dir).join(format!(
        "{stem}_transcript.{}",
        format.extension()
    ))
}
