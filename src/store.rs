//! Record store and the query surface over it.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::aggregation;
use crate::data::CourseOffering;
use crate::errors::AnalyzerError;
use crate::instructors::{self, InstructorCourseSets};
use crate::metrics::{self, DatasetSummary};
use crate::ranking::{self, RankField, SearchFilter};
use crate::recommend::{self, LearnerQuery};
use crate::types::{CourseTitle, GroupKey, Institution, InstructorName, ParticipantCount};

/// Owns the loaded offerings in load order.
///
/// Every query borrows the store immutably and builds its own result; ranking
/// sorts a private copy, so load order is stable across calls.
#[derive(Clone, Debug, Default)]
pub struct CourseStore {
    offerings: Vec<CourseOffering>,
}

impl CourseStore {
    /// Wrap an already-validated list of offerings.
    pub fn new(offerings: Vec<CourseOffering>) -> Self {
        Self { offerings }
    }

    /// Offerings in load order.
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// Number of loaded offerings.
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Dataset-level counts and launch date range; `None` when empty.
    pub fn summary(&self) -> Option<DatasetSummary> {
        metrics::dataset_summary(&self.offerings)
    }

    /// Participants per institution, ascending by institution.
    pub fn participants_by_institution(&self) -> IndexMap<Institution, ParticipantCount> {
        aggregation::participants_by_institution(&self.offerings)
    }

    /// Participants per `institution-subject`, descending by total then ascending by key.
    pub fn participants_by_institution_and_subject(&self) -> IndexMap<GroupKey, ParticipantCount> {
        aggregation::participants_by_institution_and_subject(&self.offerings)
    }

    /// Solo and co-taught title lists per instructor.
    pub fn course_list_of_instructor(&self) -> BTreeMap<InstructorName, InstructorCourseSets> {
        instructors::course_list_of_instructor(&self.offerings)
    }

    /// Top `k` distinct titles by `field`; errors when fewer than `k` exist.
    pub fn top_k_by_field(
        &self,
        k: usize,
        field: RankField,
    ) -> Result<Vec<CourseTitle>, AnalyzerError> {
        ranking::top_k_by_field(&self.offerings, k, field)
    }

    /// Sorted distinct titles matching all three search thresholds.
    pub fn search_courses(
        &self,
        subject: &str,
        min_percent_audited: f64,
        max_total_hours: f64,
    ) -> Vec<CourseTitle> {
        ranking::search_courses(
            &self.offerings,
            &SearchFilter::new(subject, min_percent_audited, max_total_hours),
        )
    }

    /// Up to 10 distinct titles whose learner demographics sit closest to the query.
    pub fn recommend_courses(
        &self,
        age: i32,
        gender: i32,
        bachelor_or_higher: i32,
    ) -> Vec<CourseTitle> {
        recommend::recommend_courses(
            &self.offerings,
            &LearnerQuery::new(age, gender, bachelor_or_higher),
        )
    }
}

impl From<Vec<CourseOffering>> for CourseStore {
    fn from(offerings: Vec<CourseOffering>) -> Self {
        Self::new(offerings)
    }
}
