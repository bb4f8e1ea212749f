//! # GPA Calculator
//!
//! Credit-weighted average of letter-grade points:
//!
//! ```text
//! gpa = Σ(points × credits) / Σ(credits)
//! ```
//!
//! Courses are entered as repeating rows of `name`, `grade` and `credits`.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::{CalcError, CalcResult};
use crate::format;
use crate::inputs::{field_text, parse_number, ChoiceOption, FieldKind, FieldSpec, RawInputs};

use super::{Calculator, ResultLine};

/// Letter grade -> grade points (4.0 scale)
pub const GRADE_POINTS: [(&str, f64); 13] = [
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("D-", 0.7),
    ("F", 0.0),
];

const GRADE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("A+", "A+"),
    ChoiceOption::new("A", "A"),
    ChoiceOption::new("A-", "A-"),
    ChoiceOption::new("B+", "B+"),
    ChoiceOption::new("B", "B"),
    ChoiceOption::new("B-", "B-"),
    ChoiceOption::new("C+", "C+"),
    ChoiceOption::new("C", "C"),
    ChoiceOption::new("C-", "C-"),
    ChoiceOption::new("D+", "D+"),
    ChoiceOption::new("D", "D"),
    ChoiceOption::new("D-", "D-"),
    ChoiceOption::new("F", "F"),
];

const ROW_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Course", FieldKind::Text).placeholder("Course name"),
    FieldSpec::new("grade", "Grade", FieldKind::Choice(GRADE_OPTIONS)).default_value("A"),
    FieldSpec::new("credits", "Credits", FieldKind::Decimal).default_value("3"),
];

/// Grade points for a letter grade
pub fn grade_points(grade: &str) -> Option<f64> {
    GRADE_POINTS.iter().find(|(g, _)| *g == grade).map(|(_, p)| *p)
}

/// One validated course row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub grade: String,
    pub credits: f64,
}

impl Course {
    pub fn new(name: impl Into<String>, grade: impl Into<String>, credits: f64) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
            credits,
        }
    }
}

/// Validated course list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaInput {
    pub courses: Vec<Course>,
}

impl GpaInput {
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let courses = raw
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let n = i + 1;
                let grade = field_text(row, "grade");
                if grade_points(grade).is_none() {
                    return Err(CalcError::invalid_input(
                        format!("rows[{}].grade", i),
                        grade,
                        format!("Course {}: please select a valid grade", n),
                    ));
                }
                let credits = parse_number(row, "credits", "number of credits").map_err(|_| {
                    CalcError::invalid_input(
                        format!("rows[{}].credits", i),
                        field_text(row, "credits"),
                        format!("Course {}: please enter valid credits", n),
                    )
                })?;
                let name = match field_text(row, "name") {
                    "" => format!("Course {}", n),
                    name => name.to_string(),
                };
                Ok(Course::new(name, grade, credits))
            })
            .collect::<CalcResult<Vec<_>>>()?;

        let input = GpaInput { courses };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.courses.is_empty() {
            return Err(CalcError::invalid_input("rows", "", "Please add at least one course"));
        }
        for (i, course) in self.courses.iter().enumerate() {
            if grade_points(&course.grade).is_none() {
                return Err(CalcError::invalid_input(
                    format!("rows[{}].grade", i),
                    course.grade.clone(),
                    format!("Course {}: please select a valid grade", i + 1),
                ));
            }
            if course.credits <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("rows[{}].credits", i),
                    course.credits.to_string(),
                    format!("Course {}: credits must be greater than zero", i + 1),
                ));
            }
        }
        Ok(())
    }
}

/// Per-course breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    pub name: String,
    pub grade: String,
    pub credits: f64,
    pub points: f64,
}

/// GPA results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    pub gpa: f64,
    pub total_credits: f64,
    /// Σ(points × credits)
    pub quality_points: f64,
    pub courses: Vec<CourseResult>,
}

pub fn calculate(input: &GpaInput) -> CalcResult<GpaResult> {
    input.validate()?;

    let courses: Vec<CourseResult> = input
        .courses
        .iter()
        .map(|c| CourseResult {
            name: c.name.clone(),
            grade: c.grade.clone(),
            credits: c.credits,
            points: grade_points(&c.grade).unwrap_or(0.0),
        })
        .collect();

    let total_credits: f64 = courses.iter().map(|c| c.credits).sum();
    let quality_points: f64 = courses.iter().map(|c| c.points * c.credits).sum();
    if total_credits == 0.0 {
        return Err(CalcError::invalid_input("rows", "0", "Total credits cannot be zero"));
    }

    Ok(GpaResult {
        gpa: quality_points / total_credits,
        total_credits,
        quality_points,
        courses,
    })
}

/// Calculator front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpaCalculator;

impl Calculator for GpaCalculator {
    type Input = GpaInput;
    type Output = GpaResult;

    fn fields(&self) -> Vec<FieldSpec> {
        Vec::new()
    }

    fn row_fields(&self) -> &'static [FieldSpec] {
        ROW_FIELDS
    }

    fn validate(&self, raw: &RawInputs) -> CalcResult<GpaInput> {
        GpaInput::from_raw(raw)
    }

    fn compute(&self, input: &GpaInput) -> CalcResult<GpaResult> {
        calculate(input)
    }

    fn present(&self, r: &GpaResult, _settings: &Settings) -> Vec<ResultLine> {
        let mut lines = vec![
            ResultLine::new("GPA", format::fixed(r.gpa, 2)),
            ResultLine::new("Total Credits", format::trimmed(r.total_credits, 2)),
        ];
        lines.extend(r.courses.iter().map(|c| {
            ResultLine::new(
                c.name.clone(),
                format!("{} ({} credits, {} pts)", c.grade, format::trimmed(c.credits, 2), format::fixed(c.points, 1)),
            )
        }));
        lines
    }

    fn summary(&self, r: &GpaResult, _settings: &Settings) -> String {
        format!(
            "GPA: {} ({} credits, {} courses)",
            format::fixed(r.gpa, 2),
            format::trimmed(r.total_credits, 2),
            r.courses.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_row<'a>(name: &'a str, grade: &'a str, credits: &'a str) -> [(&'a str, &'a str); 3] {
        [("name", name), ("grade", grade), ("credits", credits)]
    }

    #[test]
    fn test_a_and_b() {
        let raw = RawInputs::new()
            .with_row(course_row("Math", "A", "3"))
            .with_row(course_row("History", "B", "3"));
        let r = calculate(&GpaInput::from_raw(&raw).unwrap()).unwrap();
        assert_eq!(r.gpa, 3.5);
        assert_eq!(format::fixed(r.gpa, 2), "3.50");
        assert_eq!(r.total_credits, 6.0);
    }

    #[test]
    fn test_weighting() {
        let input = GpaInput {
            courses: vec![Course::new("Lab", "A-", 1.0), Course::new("Lecture", "C", 4.0)],
        };
        let r = calculate(&input).unwrap();
        assert!((r.gpa - (3.7 + 8.0) / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_unnamed_course_gets_default_name() {
        let raw = RawInputs::new().with_row(course_row("", "B+", "2"));
        let input = GpaInput::from_raw(&raw).unwrap();
        assert_eq!(input.courses[0].name, "Course 1");
    }

    #[test]
    fn test_row_errors_name_the_row() {
        let raw = RawInputs::new()
            .with_row(course_row("Math", "A", "3"))
            .with_row(course_row("Art", "A", "0"));
        let err = GpaInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.user_message(), "Course 2: credits must be greater than zero");

        let raw = RawInputs::new().with_row(course_row("Math", "E", "3"));
        let err = GpaInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.user_message(), "Course 1: please select a valid grade");

        let raw = RawInputs::new().with_row(course_row("Math", "A", ""));
        let err = GpaInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.user_message(), "Course 1: please enter valid credits");
    }

    #[test]
    fn test_no_courses() {
        let err = GpaInput::from_raw(&RawInputs::new()).unwrap_err();
        assert_eq!(err.user_message(), "Please add at least one course");
    }

    #[test]
    fn test_grade_table() {
        assert_eq!(grade_points("A"), Some(4.0));
        assert_eq!(grade_points("B-"), Some(2.7));
        assert_eq!(grade_points("F"), Some(0.0));
        assert_eq!(grade_points("E"), None);
        assert_eq!(GRADE_OPTIONS.len(), GRADE_POINTS.len());
    }
}
