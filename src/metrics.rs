use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::CourseOffering;

/// Dataset-level counts reported after a load.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of offering rows.
    pub offerings: usize,
    /// Distinct institutions.
    pub institutions: usize,
    /// Distinct course numbers.
    pub course_numbers: usize,
    /// Distinct titles.
    pub distinct_titles: usize,
    /// Participants summed over every offering.
    pub total_participants: u64,
    /// Earliest launch date.
    pub earliest_launch: NaiveDate,
    /// Latest launch date.
    pub latest_launch: NaiveDate,
}

/// Compute summary counts; `None` for an empty dataset.
pub fn dataset_summary(offerings: &[CourseOffering]) -> Option<DatasetSummary> {
    let first = offerings.first()?;
    let mut institutions: HashSet<&str> = HashSet::new();
    let mut course_numbers: HashSet<&str> = HashSet::new();
    let mut titles: HashSet<&str> = HashSet::new();
    let mut total_participants = 0u64;
    let mut earliest_launch = first.launch_date;
    let mut latest_launch = first.launch_date;
    for offering in offerings {
        institutions.insert(&offering.institution);
        course_numbers.insert(&offering.number);
        titles.insert(&offering.title);
        total_participants = total_participants.saturating_add(offering.participants());
        earliest_launch = earliest_launch.min(offering.launch_date);
        latest_launch = latest_launch.max(offering.launch_date);
    }
    Some(DatasetSummary {
        offerings: offerings.len(),
        institutions: institutions.len(),
        course_numbers: course_numbers.len(),
        distinct_titles: titles.len(),
        total_participants,
        earliest_launch,
        latest_launch,
    })
}
