//! Instructor to course-title index.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::constants::instructors::INSTRUCTOR_SEPARATOR;
use crate::data::CourseOffering;
use crate::types::{CourseTitle, InstructorName};

/// Distinct titles an instructor taught alone and with others.
///
/// Both lists are sorted ascending. A title can appear in both when the
/// instructor ran it solo once and co-taught it another time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstructorCourseSets {
    /// Titles taught with no other instructor listed.
    pub solo: Vec<CourseTitle>,
    /// Titles taught alongside at least one other instructor.
    pub co_taught: Vec<CourseTitle>,
}

#[derive(Default)]
struct TitleBuckets {
    solo: BTreeSet<CourseTitle>,
    co_taught: BTreeSet<CourseTitle>,
}

/// Split a raw instructors field into names, dropping repeats within the field.
///
/// First-seen order is kept.
pub fn split_instructors(raw: &str) -> Vec<InstructorName> {
    let mut names: Vec<InstructorName> = Vec::new();
    for name in raw.split(INSTRUCTOR_SEPARATOR) {
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Build the instructor index keyed by instructor name.
///
/// An offering whose deduplicated instructor list has exactly one name lands in
/// that instructor's solo set; otherwise the title lands in every listed
/// instructor's co-taught set.
pub fn course_list_of_instructor(
    offerings: &[CourseOffering],
) -> BTreeMap<InstructorName, InstructorCourseSets> {
    let mut buckets: BTreeMap<InstructorName, TitleBuckets> = BTreeMap::new();
    for offering in offerings {
        let names = split_instructors(&offering.instructors);
        let solo = names.len() == 1;
        for name in names {
            let entry = buckets.entry(name).or_default();
            let target = if solo {
                &mut entry.solo
            } else {
                &mut entry.co_taught
            };
            target.insert(offering.title.clone());
        }
    }
    buckets
        .into_iter()
        .map(|(name, titles)| {
            (
                name,
                InstructorCourseSets {
                    solo: titles.solo.into_iter().collect(),
                    co_taught: titles.co_taught.into_iter().collect(),
                },
            )
        })
        .collect()
}
