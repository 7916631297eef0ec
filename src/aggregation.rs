//! Grouped participant rollups.
//!
//! Both rollups fold every offering into an insert-or-update map, so each
//! institution (or institution/subject pair) that appears gets an entry even
//! when all of its offerings report zero participants.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::constants::aggregation::GROUP_KEY_SEPARATOR;
use crate::data::CourseOffering;
use crate::types::{GroupKey, Institution, ParticipantCount};

/// Build the composite `institution-subject` rollup key.
pub fn institution_subject_key(institution: &str, subject: &str) -> GroupKey {
    format!("{institution}{GROUP_KEY_SEPARATOR}{subject}")
}

/// Sum participants per institution, ordered by ascending institution name.
pub fn participants_by_institution(
    offerings: &[CourseOffering],
) -> IndexMap<Institution, ParticipantCount> {
    let totals = sum_participants_by(offerings, |offering| offering.institution.clone());
    let mut entries: Vec<(Institution, ParticipantCount)> = totals.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().collect()
}

/// Sum participants per `institution-subject` key.
///
/// Ordered by descending total; equal totals fall back to ascending key.
pub fn participants_by_institution_and_subject(
    offerings: &[CourseOffering],
) -> IndexMap<GroupKey, ParticipantCount> {
    let totals = sum_participants_by(offerings, |offering| {
        institution_subject_key(&offering.institution, &offering.subject)
    });
    let mut entries: Vec<(GroupKey, ParticipantCount)> = totals.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.into_iter().collect()
}

fn sum_participants_by<F>(offerings: &[CourseOffering], key: F) -> HashMap<String, ParticipantCount>
where
    F: Fn(&CourseOffering) -> String,
{
    let mut totals: HashMap<String, ParticipantCount> = HashMap::new();
    for offering in offerings {
        *totals.entry(key(offering)).or_insert(0) += offering.participants();
    }
    totals
}
