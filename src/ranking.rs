//! Top-K ranking and filtered title search.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::CourseOffering;
use crate::errors::AnalyzerError;
use crate::types::CourseTitle;
use crate::utils::collect_distinct_titles;

/// Numeric field used to order offerings for top-K ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankField {
    /// Total course hours.
    Hours,
    /// Participant count.
    Participants,
}

impl RankField {
    fn compare_descending(self, a: &CourseOffering, b: &CourseOffering) -> Ordering {
        match self {
            RankField::Hours => b.total_hours().total_cmp(&a.total_hours()),
            RankField::Participants => b.participants().cmp(&a.participants()),
        }
    }
}

impl FromStr for RankField {
    type Err = AnalyzerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "hours" => Ok(RankField::Hours),
            "participants" => Ok(RankField::Participants),
            other => Err(AnalyzerError::InvalidArgument(format!(
                "unknown ranking field '{other}' (expected 'hours' or 'participants')"
            ))),
        }
    }
}

impl fmt::Display for RankField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankField::Hours => f.write_str("hours"),
            RankField::Participants => f.write_str("participants"),
        }
    }
}

/// Criteria for `search_courses`. All three must hold for an offering to match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Case-insensitive substring the subject must contain.
    pub subject: String,
    /// Inclusive lower bound on percent audited.
    pub min_percent_audited: f64,
    /// Inclusive upper bound on total course hours.
    pub max_total_hours: f64,
}

impl SearchFilter {
    /// Create a filter from its three thresholds.
    pub fn new(subject: impl Into<String>, min_percent_audited: f64, max_total_hours: f64) -> Self {
        Self {
            subject: subject.into(),
            min_percent_audited,
            max_total_hours,
        }
    }

    fn matches(&self, offering: &CourseOffering, needle: &str) -> bool {
        offering.subject.to_lowercase().contains(needle)
            && offering.engagement.percent_audited >= self.min_percent_audited
            && offering.engagement.total_hours <= self.max_total_hours
    }
}

/// Return the first `k` distinct titles after a stable descending sort by `field`.
///
/// Equal values keep their load order. The sort runs over a local vector of
/// references, so the caller's slice order is never changed and repeated calls
/// give the same answer.
///
/// Fails with `InsufficientData` when the dataset has fewer than `k` distinct
/// titles; no partial list is returned.
pub fn top_k_by_field(
    offerings: &[CourseOffering],
    k: usize,
    field: RankField,
) -> Result<Vec<CourseTitle>, AnalyzerError> {
    let mut ranked: Vec<&CourseOffering> = offerings.iter().collect();
    ranked.sort_by(|a, b| field.compare_descending(a, b));
    let titles = collect_distinct_titles(ranked.iter().map(|offering| offering.title.as_str()), k);
    if titles.len() < k {
        return Err(AnalyzerError::InsufficientData {
            requested: k,
            available: titles.len(),
        });
    }
    debug!(k, field = %field, "ranked offerings");
    Ok(titles)
}

/// Return the sorted, deduplicated titles of every offering matching `filter`.
pub fn search_courses(offerings: &[CourseOffering], filter: &SearchFilter) -> Vec<CourseTitle> {
    let needle = filter.subject.to_lowercase();
    let titles: BTreeSet<&str> = offerings
        .iter()
        .filter(|offering| filter.matches(offering, &needle))
        .map(|offering| offering.title.as_str())
        .collect();
    titles.into_iter().map(str::to_string).collect()
}
