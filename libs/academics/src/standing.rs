//! Performance band shown next to a CGPA

use serde::Serialize;
use std::fmt;

/// Band a CGPA falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Standing {
    Excellent,
    VeryGood,
    Good,
    Satisfactory,
    NeedsImprovement,
    NoData,
}

impl Standing {
    pub fn from_cgpa(cgpa: f64) -> Self {
        if !cgpa.is_finite() {
            return Standing::NoData;
        }

        if cgpa >= 9.0 {
            Standing::Excellent
        } else if cgpa >= 8.0 {
            Standing::VeryGood
        } else if cgpa >= 7.0 {
            Standing::Good
        } else if cgpa >= 6.0 {
            Standing::Satisfactory
        } else if cgpa > 0.0 {
            Standing::NeedsImprovement
        } else {
            Standing::NoData
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Standing::Excellent => "Excellent",
            Standing::VeryGood => "Very Good",
            Standing::Good => "Good",
            Standing::Satisfactory => "Satisfactory",
            Standing::NeedsImprovement => "Needs Improvement",
            Standing::NoData => "No Data",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
