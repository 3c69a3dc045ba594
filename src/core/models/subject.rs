//! Subject model

use super::Grade;
use crate::core::error::RecordError;

/// A graded subject inside a semester.
///
/// Only constructible through [`Subject::try_new`], so a `Subject` value
/// always has a non-blank name, positive credits and a known grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    name: String,
    credits: u32,
    grade: Grade,
}

impl Subject {
    /// Validate raw inputs and build a subject
    ///
    /// # Arguments
    /// * `name` - Subject name; must not be blank
    /// * `credits` - Credit count; must be positive and fit in `u32`
    /// * `grade` - Grade label, matched exactly against the grade table
    ///
    /// # Errors
    /// `BlankName`, `InvalidCredits` or `InvalidGrade`, checked in that order
    pub fn try_new(name: impl Into<String>, credits: i64, grade: &str) -> Result<Self, RecordError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RecordError::BlankName { kind: "subject" });
        }
        let credits = u32::try_from(credits)
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| RecordError::InvalidCredits(credits.to_string()))?;
        let grade = grade.parse::<Grade>()?;
        Ok(Self {
            name,
            credits,
            grade,
        })
    }

    /// Subject name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credit count (always positive)
    #[must_use]
    pub const fn credits(&self) -> u32 {
        self.credits
    }

    /// Letter grade
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// Grade points times credits
    #[must_use]
    pub fn weighted_points(&self) -> f64 {
        self.grade.points() * f64::from(self.credits)
    }
}

/// Unvalidated subject input, as typed into a form or read from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    /// Subject name
    pub name: String,
    /// Credits as entered; may be zero or negative until validated
    pub credits: i64,
    /// Grade label as entered
    pub grade: String,
}

impl SubjectDraft {
    /// Create a draft from already-numeric credits
    #[must_use]
    pub fn new(name: impl Into<String>, credits: i64, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credits,
            grade: grade.into(),
        }
    }

    /// Create a draft from text fields, parsing the credits
    ///
    /// # Errors
    /// `InvalidCredits` if `credits` is not a whole number
    pub fn from_text(
        name: impl Into<String>,
        credits: &str,
        grade: impl Into<String>,
    ) -> Result<Self, RecordError> {
        Ok(Self::new(name, parse_credits(credits)?, grade))
    }

    /// Validate the draft into a [`Subject`]
    ///
    /// # Errors
    /// See [`Subject::try_new`]
    pub fn validate(&self) -> Result<Subject, RecordError> {
        Subject::try_new(self.name.clone(), self.credits, &self.grade)
    }
}

/// Parse a credits text field. Surrounding whitespace is ignored.
///
/// # Errors
/// `InvalidCredits` if the text is not a whole number
pub fn parse_credits(text: &str) -> Result<i64, RecordError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| RecordError::InvalidCredits(text.to_string()))
}
