//! Letter grades and the fixed grade-point scale

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GradeError;

/// Letter grade on the ten-point scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// One row of the published grade scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleEntry {
    pub grade: Grade,
    pub points: f64,
    /// Lowest percentage (inclusive) that earns this grade
    pub min_percentage: f64,
    /// Highest percentage (inclusive) shown for this grade
    pub max_percentage: f64,
}

/// Grade scale, best grade first
pub const GRADE_SCALE: [ScaleEntry; 8] = [
    ScaleEntry { grade: Grade::APlus, points: 10.0, min_percentage: 90.0, max_percentage: 100.0 },
    ScaleEntry { grade: Grade::A, points: 9.0, min_percentage: 80.0, max_percentage: 89.0 },
    ScaleEntry { grade: Grade::BPlus, points: 8.0, min_percentage: 70.0, max_percentage: 79.0 },
    ScaleEntry { grade: Grade::B, points: 7.0, min_percentage: 60.0, max_percentage: 69.0 },
    ScaleEntry { grade: Grade::CPlus, points: 6.0, min_percentage: 50.0, max_percentage: 59.0 },
    ScaleEntry { grade: Grade::C, points: 5.0, min_percentage: 40.0, max_percentage: 49.0 },
    ScaleEntry { grade: Grade::D, points: 4.0, min_percentage: 35.0, max_percentage: 39.0 },
    ScaleEntry { grade: Grade::F, points: 0.0, min_percentage: 0.0, max_percentage: 34.0 },
];

impl Grade {
    /// Grade point on the 0-10 scale
    pub fn points(self) -> f64 {
        match self {
            Grade::APlus => 10.0,
            Grade::A => 9.0,
            Grade::BPlus => 8.0,
            Grade::B => 7.0,
            Grade::CPlus => 6.0,
            Grade::C => 5.0,
            Grade::D => 4.0,
            Grade::F => 0.0,
        }
    }

    /// Label as printed on mark sheets
    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Parse a label, tolerating surrounding whitespace and lower case.
    ///
    /// Returns `None` for anything that is not on the scale.
    pub fn parse_lenient(label: &str) -> Option<Self> {
        label.trim().to_ascii_uppercase().parse().ok()
    }

    /// Map a percentage onto the published scale.
    pub fn from_percentage(percentage: f64) -> Self {
        if !percentage.is_finite() {
            return Grade::F;
        }

        GRADE_SCALE
            .iter()
            .find(|entry| percentage >= entry.min_percentage)
            .map(|entry| entry.grade)
            .unwrap_or(Grade::F)
    }

    /// Whether the grade counts as a pass
    pub fn is_pass(self) -> bool {
        self != Grade::F
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(GradeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grade point for an optional grade; missing grades count as zero.
pub fn grade_point(grade: Option<Grade>) -> f64 {
    grade.map(Grade::points).unwrap_or(0.0)
}

/// Deserialize an optional grade label without rejecting unknown labels.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Grade::parse_lenient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_points() {
        assert_eq!(Grade::APlus.points(), 10.0);
        assert_eq!(Grade::A.points(), 9.0);
        assert_eq!(Grade::D.points(), 4.0);
        assert_eq!(Grade::F.points(), 0.0);

        for entry in GRADE_SCALE {
            assert_eq!(entry.grade.points(), entry.points);
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert_eq!("B+".parse::<Grade>(), Ok(Grade::BPlus));
        assert_eq!(
            "E".parse::<Grade>(),
            Err(GradeError::Unknown("E".to_string()))
        );
        assert!("a+".parse::<Grade>().is_err());
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(Grade::parse_lenient(" a+ "), Some(Grade::APlus));
        assert_eq!(Grade::parse_lenient("c"), Some(Grade::C));
        assert_eq!(Grade::parse_lenient("AB"), None);
        assert_eq!(Grade::parse_lenient(""), None);
    }

    #[test]
    fn test_from_percentage_bands() {
        assert_eq!(Grade::from_percentage(100.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(90.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(89.5), Grade::A);
        assert_eq!(Grade::from_percentage(72.0), Grade::BPlus);
        assert_eq!(Grade::from_percentage(35.0), Grade::D);
        assert_eq!(Grade::from_percentage(34.9), Grade::F);
        assert_eq!(Grade::from_percentage(-3.0), Grade::F);
        assert_eq!(Grade::from_percentage(f64::NAN), Grade::F);
    }

    #[test]
    fn test_missing_grade_counts_as_zero() {
        assert_eq!(grade_point(None), 0.0);
        assert_eq!(grade_point(Some(Grade::B)), 7.0);
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Grade::CPlus).unwrap(), "\"C+\"");
        let grade: Grade = serde_json::from_str("\"A+\"").unwrap();
        assert_eq!(grade, Grade::APlus);
    }
}
