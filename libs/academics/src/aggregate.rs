//! SGPA and CGPA aggregation
//!
//! Both averages are credit-weighted means of grade points. The CGPA is taken
//! over every record at once, not as a mean of the per-semester SGPAs, so a
//! heavy semester weighs more than a light one.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::record::ResultRecord;
use crate::standing::Standing;

/// How computed averages are rounded before they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    /// Nearest 0.05, i.e. `round(x * 20) / 20`
    #[default]
    NearestTwentieth,
    /// Two decimal places; kept for reproducing older mark sheets
    TwoDecimals,
}

impl RoundingPolicy {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            RoundingPolicy::NearestTwentieth => (value * 20.0).round() / 20.0,
            RoundingPolicy::TwoDecimals => (value * 100.0).round() / 100.0,
        }
    }
}

/// Results of one semester with its SGPA
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterAggregate {
    pub semester_number: u32,
    pub subjects: Vec<ResultRecord>,
    pub sgpa: f64,
    pub total_credits: u32,
}

/// Per-semester aggregates plus the overall CGPA
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    /// Ascending by semester number
    pub per_semester: Vec<SemesterAggregate>,
    pub cgpa: f64,
    pub total_credits_overall: u32,
}

impl Transcript {
    /// Transcript with no semesters and zero averages
    pub fn empty() -> Self {
        Self {
            per_semester: Vec::new(),
            cgpa: 0.0,
            total_credits_overall: 0,
        }
    }

    /// Number of semesters with at least one credit-bearing subject
    pub fn completed_semesters(&self) -> usize {
        self.per_semester
            .iter()
            .filter(|semester| semester.total_credits > 0)
            .count()
    }

    pub fn standing(&self) -> Standing {
        Standing::from_cgpa(self.cgpa)
    }

    pub fn semester(&self, semester_number: u32) -> Option<&SemesterAggregate> {
        self.per_semester
            .iter()
            .find(|semester| semester.semester_number == semester_number)
    }
}

/// Computes SGPA/CGPA from flat result records
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeAggregator {
    rounding: RoundingPolicy,
}

impl GradeAggregator {
    pub fn new(rounding: RoundingPolicy) -> Self {
        Self { rounding }
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Group records by semester and compute every average.
    ///
    /// Never fails: empty input, zero-credit semesters and unknown grades all
    /// degrade to zero values.
    pub fn aggregate(&self, records: &[ResultRecord]) -> Transcript {
        let mut by_semester: BTreeMap<u32, Vec<ResultRecord>> = BTreeMap::new();
        for record in records {
            by_semester
                .entry(record.semester_number)
                .or_default()
                .push(record.clone());
        }

        let per_semester = by_semester
            .into_iter()
            .map(|(semester_number, subjects)| {
                let (sgpa, total_credits) = self.weighted_average(&subjects);
                SemesterAggregate {
                    semester_number,
                    subjects,
                    sgpa,
                    total_credits,
                }
            })
            .collect();

        let (cgpa, total_credits_overall) = self.weighted_average(records);

        Transcript {
            per_semester,
            cgpa,
            total_credits_overall,
        }
    }

    /// Credit-weighted grade-point mean, rounded, together with the credit total
    fn weighted_average(&self, records: &[ResultRecord]) -> (f64, u32) {
        let total_credits = records
            .iter()
            .fold(0u32, |acc, record| acc.saturating_add(record.credits));

        if total_credits == 0 {
            return (0.0, 0);
        }

        let weighted: f64 = records.iter().map(ResultRecord::weighted_points).sum();
        let average = self.rounding.apply(weighted / f64::from(total_credits));

        if average.is_finite() {
            (average, total_credits)
        } else {
            (0.0, total_credits)
        }
    }
}
