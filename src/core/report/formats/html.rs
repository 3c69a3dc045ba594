//! HTML transcript generator
//!
//! Renders `templates/transcript.html` through askama. The page is
//! self-contained with embedded CSS. All user text is HTML-escaped by the
//! template engine.

use crate::core::report::{ReportGenerator, SemesterRow, TranscriptContext};
use crate::get_version;
use askama::Template;
use std::error::Error;

/// Template data for the transcript page
#[derive(Template)]
#[template(path = "transcript.html")]
struct TranscriptPage<'a> {
    user: &'a str,
    version: &'a str,
    cumulative_gpa: String,
    total_credits: u64,
    semester_count: usize,
    semesters: Vec<SemesterRow>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        let page = TranscriptPage {
            user: ctx.user.as_str(),
            version: get_version(),
            cumulative_gpa: ctx.cumulative_gpa(),
            total_credits: ctx.total_credits(),
            semester_count: ctx.semester_count(),
            semesters: ctx.semester_rows(),
        };
        Ok(page.render()?)
    }
}
