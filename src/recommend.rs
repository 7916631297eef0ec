//! Nearest-centroid course recommendations from learner demographics.
//!
//! Ownership model:
//! - `ProfileArena` owns one `CourseProfile` per course number, updated in
//!   place while offerings are folded in a single pass.
//! - Scoring happens once, after the fold, through `ProfileArena::score`,
//!   which consumes the arena and yields finalized `ScoredProfile`s.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RecommenderConfig;
use crate::constants::recommend::PERCENT_SCALE;
use crate::data::CourseOffering;
use crate::types::{CourseNumber, CourseTitle};
use crate::utils::collect_distinct_titles;

/// Demographic triple a recommendation is scored against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerQuery {
    /// Learner age in years.
    pub age: i32,
    /// 1 for male, 0 for female.
    pub gender: i32,
    /// 1 when the learner holds a bachelor's degree or higher, 0 otherwise.
    pub bachelor_or_higher: i32,
}

impl LearnerQuery {
    /// Create a query from its raw integer inputs.
    pub fn new(age: i32, gender: i32, bachelor_or_higher: i32) -> Self {
        Self {
            age,
            gender,
            bachelor_or_higher,
        }
    }
}

/// Running statistics for every offering sharing one course number.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseProfile {
    title: CourseTitle,
    launch_date: NaiveDate,
    count: u64,
    mean_median_age: f64,
    mean_percent_male: f64,
    mean_percent_degree: f64,
}

impl CourseProfile {
    /// Start an empty profile seeded with the first offering's title and date.
    ///
    /// The seeding offering still has to be folded with `add`.
    pub fn new(title: impl Into<CourseTitle>, launch_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            launch_date,
            count: 0,
            mean_median_age: 0.0,
            mean_percent_male: 0.0,
            mean_percent_degree: 0.0,
        }
    }

    /// Fold one offering into the profile.
    ///
    /// A strictly later launch date takes over the title; equal dates keep the
    /// current one. Means use `(mean * n + value) / (n + 1)`.
    pub fn add(&mut self, offering: &CourseOffering) {
        if offering.launch_date > self.launch_date {
            self.launch_date = offering.launch_date;
            self.title = offering.title.clone();
        }
        let n = self.count as f64;
        let demographics = &offering.demographics;
        self.mean_median_age = (self.mean_median_age * n + demographics.median_age) / (n + 1.0);
        self.mean_percent_male =
            (self.mean_percent_male * n + demographics.percent_male) / (n + 1.0);
        self.mean_percent_degree =
            (self.mean_percent_degree * n + demographics.percent_degree) / (n + 1.0);
        self.count += 1;
    }

    /// Squared Euclidean distance between this profile and `query`.
    ///
    /// Flags are scaled by 100 to sit on the percentage scale; no other
    /// weighting is applied.
    pub fn distance(&self, query: &LearnerQuery) -> f64 {
        let age = f64::from(query.age) - self.mean_median_age;
        let male = f64::from(query.gender) * PERCENT_SCALE - self.mean_percent_male;
        let degree = f64::from(query.bachelor_or_higher) * PERCENT_SCALE - self.mean_percent_degree;
        age * age + male * male + degree * degree
    }

    /// Title of the latest-launched offering folded so far.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Launch date backing the current title.
    pub fn launch_date(&self) -> NaiveDate {
        self.launch_date
    }

    /// Number of offerings folded in.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean of median learner age.
    pub fn mean_median_age(&self) -> f64 {
        self.mean_median_age
    }

    /// Running mean of percent male.
    pub fn mean_percent_male(&self) -> f64 {
        self.mean_percent_male
    }

    /// Running mean of percent holding a degree.
    pub fn mean_percent_degree(&self) -> f64 {
        self.mean_percent_degree
    }
}

/// A profile finalized against one query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredProfile {
    /// Course number the profile aggregates.
    pub number: CourseNumber,
    /// Title of the latest-launched offering.
    pub title: CourseTitle,
    /// Non-negative; lower means a closer match.
    pub distance: f64,
}

/// Profiles addressed by course number, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct ProfileArena {
    profiles: IndexMap<CourseNumber, CourseProfile>,
}

impl ProfileArena {
    /// Fold every offering into its course-number profile.
    pub fn build(offerings: &[CourseOffering]) -> Self {
        let mut arena = Self::default();
        for offering in offerings {
            arena.add(offering);
        }
        arena
    }

    /// Fold one offering, creating its profile on first sight.
    pub fn add(&mut self, offering: &CourseOffering) {
        self.profiles
            .entry(offering.number.clone())
            .or_insert_with(|| CourseProfile::new(offering.title.clone(), offering.launch_date))
            .add(offering);
    }

    /// Profile for `number`, if any offering carried it.
    pub fn get(&self, number: &str) -> Option<&CourseProfile> {
        self.profiles.get(number)
    }

    /// Number of distinct course numbers.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True when no offering has been folded in.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Score every profile against `query` and sort ascending by distance,
    /// breaking ties by title.
    pub fn score(self, query: &LearnerQuery) -> Vec<ScoredProfile> {
        let mut scored: Vec<ScoredProfile> = self
            .profiles
            .into_iter()
            .map(|(number, profile)| ScoredProfile {
                distance: profile.distance(query),
                number,
                title: profile.title,
            })
            .collect();
        scored.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.title.cmp(&b.title))
        });
        scored
    }
}

/// Recommend up to `config.limit` distinct titles closest to `query`.
///
/// Returns fewer titles, possibly none, when the dataset runs out.
pub fn recommend_courses_with(
    offerings: &[CourseOffering],
    query: &LearnerQuery,
    config: &RecommenderConfig,
) -> Vec<CourseTitle> {
    let arena = ProfileArena::build(offerings);
    let profiles = arena.len();
    let scored = arena.score(query);
    let titles = collect_distinct_titles(
        scored.iter().map(|profile| profile.title.as_str()),
        config.limit,
    );
    debug!(
        profiles,
        returned = titles.len(),
        age = query.age,
        gender = query.gender,
        bachelor_or_higher = query.bachelor_or_higher,
        "scored course profiles"
    );
    titles
}

/// Recommend the 10 distinct titles closest to `query`.
pub fn recommend_courses(offerings: &[CourseOffering], query: &LearnerQuery) -> Vec<CourseTitle> {
    recommend_courses_with(offerings, query, &RecommenderConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Demographics, EngagementMetrics, OfferingHeader, ParticipationCounts};

    fn offering(
        number: &str,
        title: &str,
        launch: (i32, u32, u32),
        demographics: (f64, f64, f64),
    ) -> CourseOffering {
        let (median_age, percent_male, percent_degree) = demographics;
        CourseOffering::new(
            OfferingHeader {
                institution: "MITx".to_string(),
                number: number.to_string(),
                launch_date: NaiveDate::from_ymd_opt(launch.0, launch.1, launch.2).unwrap(),
                title: title.to_string(),
                instructors: "Staff".to_string(),
                subject: "Science".to_string(),
                year: 1,
                honor_code: 1,
            },
            ParticipationCounts::default(),
            EngagementMetrics::default(),
            Demographics {
                median_age,
                percent_male,
                percent_female: 100.0 - percent_male,
                percent_degree,
            },
        )
    }

    #[test]
    fn running_mean_is_exact() {
        let offerings = vec![
            offering("6.00x", "Intro CS", (2012, 1, 1), (20.0, 60.0, 40.0)),
            offering("6.00x", "Intro CS", (2013, 1, 1), (30.0, 70.0, 50.0)),
            offering("6.00x", "Intro CS", (2014, 1, 1), (40.0, 80.0, 60.0)),
        ];
        let arena = ProfileArena::build(&offerings);
        let profile = arena.get("6.00x").unwrap();
        assert_eq!(profile.count(), 3);
        assert_eq!(profile.mean_median_age(), 30.0);
        assert_eq!(profile.mean_percent_male(), 70.0);
        assert_eq!(profile.mean_percent_degree(), 50.0);
    }

    #[test]
    fn latest_launch_date_owns_the_title() {
        let offerings = vec![
            offering("CS50x", "Old Name", (2013, 5, 1), (25.0, 50.0, 50.0)),
            offering("CS50x", "New Name", (2014, 5, 1), (25.0, 50.0, 50.0)),
            offering("CS50x", "Older Name", (2012, 5, 1), (25.0, 50.0, 50.0)),
            offering("CS50x", "Same Day", (2014, 5, 1), (25.0, 50.0, 50.0)),
        ];
        let arena = ProfileArena::build(&offerings);
        let profile = arena.get("CS50x").unwrap();
        assert_eq!(profile.title(), "New Name");
        assert_eq!(
            profile.launch_date(),
            NaiveDate::from_ymd_opt(2014, 5, 1).unwrap()
        );
    }

    #[test]
    fn distance_sums_squared_differences() {
        let arena = ProfileArena::build(&[offering(
            "1",
            "Match",
            (2013, 1, 1),
            (30.0, 100.0, 0.0),
        )]);
        let profile = arena.get("1").unwrap();
        assert_eq!(profile.distance(&LearnerQuery::new(30, 1, 0)), 0.0);
        assert_eq!(
            profile.distance(&LearnerQuery::new(32, 0, 1)),
            4.0 + 10_000.0 + 10_000.0
        );
    }

    #[test]
    fn recommendations_order_by_distance_then_title() {
        let offerings = vec![
            offering("1", "Far", (2013, 1, 1), (60.0, 50.0, 50.0)),
            offering("2", "Beta", (2013, 1, 1), (31.0, 100.0, 100.0)),
            offering("3", "Alpha", (2013, 1, 1), (29.0, 100.0, 100.0)),
            offering("4", "Exact", (2013, 1, 1), (30.0, 100.0, 100.0)),
        ];
        let titles = recommend_courses(&offerings, &LearnerQuery::new(30, 1, 1));
        assert_eq!(
            titles,
            vec![
                "Exact".to_string(),
                "Alpha".to_string(),
                "Beta".to_string(),
                "Far".to_string()
            ]
        );
    }

    #[test]
    fn recommendations_cap_at_ten_distinct_titles() {
        let mut offerings = Vec::new();
        for idx in 0..15 {
            let title = format!("Course {:02}", idx % 12);
            offerings.push(offering(
                &format!("N{idx}"),
                &title,
                (2013, 1, 1),
                (20.0 + idx as f64, 50.0, 50.0),
            ));
        }
        let titles = recommend_courses(&offerings, &LearnerQuery::new(20, 0, 1));
        assert_eq!(titles.len(), 10);
        let mut unique = titles.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert_eq!(titles[0], "Course 00");
    }

    #[test]
    fn recommendations_tolerate_small_and_empty_datasets() {
        assert!(recommend_courses(&[], &LearnerQuery::new(25, 1, 1)).is_empty());
        let offerings = vec![offering("1", "Only", (2013, 1, 1), (25.0, 50.0, 50.0))];
        assert_eq!(
            recommend_courses(&offerings, &LearnerQuery::new(25, 1, 1)),
            vec!["Only".to_string()]
        );
    }

    #[test]
    fn custom_limit_is_respected() {
        let offerings = vec![
            offering("1", "A", (2013, 1, 1), (25.0, 50.0, 50.0)),
            offering("2", "B", (2013, 1, 1), (26.0, 50.0, 50.0)),
        ];
        let titles = recommend_courses_with(
            &offerings,
            &LearnerQuery::new(25, 0, 0),
            &RecommenderConfig::default().with_limit(1),
        );
        assert_eq!(titles, vec!["A".to_string()]);
    }
}
