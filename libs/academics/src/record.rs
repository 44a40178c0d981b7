//! Per-subject result records

use serde::{Deserialize, Serialize};

use crate::grade::{self, Grade};

/// One subject's outcome for one student in one semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub subject_code: String,
    pub subject_name: String,
    pub credits: u32,
    pub semester_number: u32,
    #[serde(default)]
    pub marks_obtained: f64,
    #[serde(default)]
    pub max_marks: f64,
    /// `None` when the source carried no grade or one that is not on the scale
    #[serde(default, deserialize_with = "grade::deserialize_lenient")]
    pub grade: Option<Grade>,
}

impl ResultRecord {
    /// Create a record without marks
    pub fn new(
        subject_code: impl Into<String>,
        subject_name: impl Into<String>,
        credits: u32,
        semester_number: u32,
        grade: Option<Grade>,
    ) -> Self {
        Self {
            subject_code: subject_code.into(),
            subject_name: subject_name.into(),
            credits,
            semester_number,
            marks_obtained: 0.0,
            max_marks: 0.0,
            grade,
        }
    }

    /// Attach the raw marks behind the grade
    pub fn with_marks(mut self, marks_obtained: f64, max_marks: f64) -> Self {
        self.marks_obtained = marks_obtained;
        self.max_marks = max_marks;
        self
    }

    /// Grade point derived from the letter grade
    pub fn grade_point(&self) -> f64 {
        grade::grade_point(self.grade)
    }

    /// Grade point weighted by credits
    pub fn weighted_points(&self) -> f64 {
        self.grade_point() * f64::from(self.credits)
    }

    /// Marks as a percentage of the maximum, or 0 when the maximum is not positive
    pub fn percentage(&self) -> f64 {
        if self.max_marks > 0.0 {
            self.marks_obtained / self.max_marks * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_point_follows_grade() {
        let record = ResultRecord::new("CS201", "Data Structures", 4, 3, Some(Grade::A));
        assert_eq!(record.grade_point(), 9.0);
        assert_eq!(record.weighted_points(), 36.0);
    }

    #[test]
    fn test_percentage_guards_zero_max() {
        let record = ResultRecord::new("CS201", "Data Structures", 4, 3, None);
        assert_eq!(record.percentage(), 0.0);

        let record = record.with_marks(45.0, 60.0);
        assert_eq!(record.percentage(), 75.0);
    }

    #[test]
    fn test_deserialize_unknown_grade_is_none() {
        let json = r#"{
            "subjectCode": "PH101",
            "subjectName": "Physics",
            "credits": 3,
            "semesterNumber": 1,
            "marksObtained": 71.5,
            "maxMarks": 100,
            "grade": "Z"
        }"#;

        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade, None);
        assert_eq!(record.grade_point(), 0.0);
        assert_eq!(record.marks_obtained, 71.5);
    }

    #[test]
    fn test_deserialize_missing_grade_and_marks() {
        let json = r#"{
            "subjectCode": "PH101",
            "subjectName": "Physics",
            "credits": 3,
            "semesterNumber": 1
        }"#;

        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade, None);
        assert_eq!(record.max_marks, 0.0);
    }

    #[test]
    fn test_deserialize_lowercase_grade() {
        let json = r#"{
            "subjectCode": "PH101",
            "subjectName": "Physics",
            "credits": 3,
            "semesterNumber": 1,
            "grade": "b+"
        }"#;

        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade, Some(Grade::BPlus));
    }
}
