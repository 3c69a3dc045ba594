//! Markdown transcript generator
//!
//! Plain pipe tables, one per semester, so the output renders on GitHub,
//! GitLab and in most editors.

use crate::core::report::{ReportGenerator, SemesterRow, TranscriptContext};
use crate::get_version;
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/transcript.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    ///
    /// Placeholders are filled in a single pass, so values containing
    /// `{{...}}` are written out as-is.
    fn render_template(ctx: &TranscriptContext) -> String {
        let values = [
            ("user", escape_cell(ctx.user.as_str())),
            ("version", get_version().to_string()),
            ("cumulative_gpa", ctx.cumulative_gpa()),
            ("total_credits", ctx.total_credits().to_string()),
            ("semester_count", ctx.semester_count().to_string()),
            ("semesters", Self::generate_semesters(&ctx.semester_rows())),
        ];
        fill_placeholders(MARKDOWN_TEMPLATE, &values)
    }

    /// One heading and table per semester
    fn generate_semesters(rows: &[SemesterRow]) -> String {
        if rows.is_empty() {
            return "_No semesters recorded._\n".to_string();
        }

        let mut md = String::new();
        for row in rows {
            let _ = writeln!(md, "## {}\n", escape_cell(&row.name));
            let _ = writeln!(md, "GPA **{}** over {} credits\n", row.gpa, row.credits);

            if row.subjects.is_empty() {
                let _ = writeln!(md, "_No subjects recorded._\n");
                continue;
            }

            let _ = writeln!(md, "| Subject | Credits | Grade | Points |");
            let _ = writeln!(md, "|---------|--------:|:-----:|-------:|");
            for subject in &row.subjects {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} |",
                    escape_cell(&subject.name),
                    subject.credits,
                    subject.grade,
                    subject.points
                );
            }
            md.push('\n');
        }
        md
    }
}

/// Replace each `{{key}}` in `template` with its value.
///
/// Unknown keys and unterminated braces are copied through unchanged.
fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find("}}") else {
            rest = tail;
            break;
        };
        let key = &tail[2..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&tail[..end + 2]),
        }
        rest = &tail[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Keep user text from breaking table cells
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}
