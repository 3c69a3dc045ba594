//! Letter grades and the grade-point table

use crate::core::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A letter grade from the fixed ten-point scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Outstanding (10 points)
    #[serde(rename = "O")]
    O,
    /// A+ (9 points)
    #[serde(rename = "A+")]
    APlus,
    /// A (8 points)
    #[serde(rename = "A")]
    A,
    /// B+ (7 points)
    #[serde(rename = "B+")]
    BPlus,
    /// B (6 points)
    #[serde(rename = "B")]
    B,
    /// C (5 points)
    #[serde(rename = "C")]
    C,
    /// Fail (0 points)
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Every grade, best first. This is also the order offered to users.
    pub const ALL: [Self; 7] = [
        Self::O,
        Self::APlus,
        Self::A,
        Self::BPlus,
        Self::B,
        Self::C,
        Self::F,
    ];

    /// Grade points awarded for this grade
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::O => 10.0,
            Self::APlus => 9.0,
            Self::A => 8.0,
            Self::BPlus => 7.0,
            Self::B => 6.0,
            Self::C => 5.0,
            Self::F => 0.0,
        }
    }

    /// The letter label as written on a grade sheet (e.g. `"B+"`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        }
    }
}

/// Grade points for a raw label, `0` for anything outside the table.
///
/// Used on records that have not been through validation, such as a
/// snapshot straight out of storage.
#[must_use]
pub fn grade_points(label: &str) -> f64 {
    label.parse::<Grade>().map_or(0.0, Grade::points)
}

impl FromStr for Grade {
    type Err = RecordError;

    /// Exact, case-sensitive match against the grade labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| RecordError::InvalidGrade(s.to_string()))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
