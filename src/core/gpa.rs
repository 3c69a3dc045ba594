//! Credit-weighted GPA computations
//!
//! Every function here is pure. Sums accumulate in `f64` on every path;
//! rounding only happens in [`format_gpa`] at display time.

use crate::core::models::{Semester, Subject};

/// Weighted average of `(grade_points, credits)` pairs.
///
/// Returns `0` when the total credit count is zero, including for an empty input.
#[must_use]
pub fn weighted_average<I>(items: I) -> f64
where
    I: IntoIterator<Item = (f64, u32)>,
{
    let (points, credits) = items
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(points, credits), (grade_points, c)| {
            let c = f64::from(c);
            (grade_points.mul_add(c, points), credits + c)
        });

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

/// GPA over a slice of subjects
#[must_use]
pub fn subjects_gpa(subjects: &[Subject]) -> f64 {
    weighted_average(subjects.iter().map(|s| (s.grade().points(), s.credits())))
}

/// GPA of one semester, computed fresh from its subjects
///
/// Returns `0` for a semester without subjects.
#[must_use]
pub fn semester_gpa(semester: &Semester) -> f64 {
    subjects_gpa(semester.subjects())
}

/// GPA across all subjects of the given semesters.
///
/// Subjects are pooled before averaging, so a semester with more credits
/// weighs more. Averaging per-semester GPAs would not give this result.
/// Returns `0` when the semesters carry no credits.
#[must_use]
pub fn cumulative_gpa<'a, I>(semesters: I) -> f64
where
    I: IntoIterator<Item = &'a Semester>,
{
    weighted_average(
        semesters
            .into_iter()
            .flat_map(Semester::subjects)
            .map(|s| (s.grade().points(), s.credits())),
    )
}

/// Format a GPA for display with `precision` decimal places
#[must_use]
pub fn format_gpa(gpa: f64, precision: usize) -> String {
    format!("{gpa:.precision$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semester(name: &str, subjects: &[(&str, i64, &str)]) -> Semester {
        Semester::with_subjects(
            name,
            subjects
                .iter()
                .map(|(n, c, g)| Subject::try_new(*n, *c, g).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_inputs_yield_zero() {
        assert!(weighted_average(std::iter::empty()).abs() < f64::EPSILON);
        assert!(semester_gpa(&Semester::empty("Fall").unwrap()).abs() < f64::EPSILON);
        assert!(cumulative_gpa(std::iter::empty::<&Semester>()).abs() < f64::EPSILON);

        let all_empty = [
            Semester::empty("Fall").unwrap(),
            Semester::empty("Spring").unwrap(),
        ];
        let gpa = cumulative_gpa(&all_empty);
        assert!(gpa.abs() < f64::EPSILON);
        assert!(!gpa.is_nan());
    }

    #[test]
    fn test_semester_scenario() {
        let fall = semester("Fall", &[("Math", 3, "A"), ("Physics", 4, "B+")]);
        assert!((semester_gpa(&fall) - 52.0 / 7.0).abs() < 1e-12);
        assert_eq!(format_gpa(semester_gpa(&fall), 4), "7.4286");
    }

    #[test]
    fn test_cumulative_scenario() {
        let semesters = [
            semester("Fall", &[("Math", 3, "A")]),
            semester("Spring", &[("Chemistry", 5, "O")]),
        ];
        assert!((cumulative_gpa(&semesters) - 9.25).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_pools_credits_instead_of_averaging_gpas() {
        let semesters = [
            semester("Fall", &[("Seminar", 1, "F")]),
            semester("Spring", &[("Thesis", 9, "O")]),
        ];
        // Mean of semester GPAs would be 5.0
        assert!((cumulative_gpa(&semesters) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_failing_grades_count_toward_credits() {
        let fall = semester("Fall", &[("Art", 2, "F"), ("Music", 2, "O")]);
        assert!((semester_gpa(&fall) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_format_respects_precision() {
        assert_eq!(format_gpa(9.25, 2), "9.25");
        assert_eq!(format_gpa(9.25, 0), "9");
        assert_eq!(format_gpa(0.0, 2), "0.00");
    }
}
