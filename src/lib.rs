#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Grouped participant rollups.
pub mod aggregation;
/// Loader and recommender configuration types.
pub mod config;
/// Centralized constants used across the loader, engines, and report app.
pub mod constants;
/// Course offering record types.
pub mod data;
/// Launch date parsing helpers.
pub mod dates;
/// Instructor to course-title index.
pub mod instructors;
/// CSV dataset loader.
pub mod loader;
/// Dataset summary helpers.
pub mod metrics;
/// Top-K ranking and filtered search.
pub mod ranking;
/// Demographic course recommender.
pub mod recommend;
/// Command-line report runner shared by the demo binary.
pub mod report_app;
/// Record store and query surface.
pub mod store;
/// Shared type aliases.
pub mod types;
/// Text and distinct-title helpers.
pub mod utils;

mod errors;

pub use config::{LoaderConfig, RecommenderConfig};
pub use data::{
    CourseOffering, Demographics, EngagementMetrics, OfferingHeader, ParticipationCounts,
};
pub use errors::AnalyzerError;
pub use instructors::InstructorCourseSets;
pub use loader::{load_offerings, read_offerings};
pub use metrics::DatasetSummary;
pub use ranking::{RankField, SearchFilter};
pub use recommend::{CourseProfile, LearnerQuery, ProfileArena, ScoredProfile};
pub use store::CourseStore;
pub use types::{
    CourseNumber, CourseTitle, GroupKey, Institution, InstructorName, ParticipantCount, Subject,
};
