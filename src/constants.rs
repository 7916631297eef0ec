/// Constants used when reading offering rows.
pub mod loader {
    /// Number of ordered fields every dataset row must carry.
    pub const OFFERING_FIELD_COUNT: usize = 23;
    /// Launch date layouts accepted by the loader, tried in order.
    pub const LAUNCH_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];
    /// Quote character stripped once from each end of text fields.
    pub const WRAPPING_QUOTE: char = '"';
}

/// Constants used by grouped participant rollups.
pub mod aggregation {
    /// Joins institution and subject into a composite rollup key.
    pub const GROUP_KEY_SEPARATOR: &str = "-";
}

/// Constants used by the instructor index.
pub mod instructors {
    /// Separator between names in the raw instructors field.
    pub const INSTRUCTOR_SEPARATOR: &str = ", ";
}

/// Constants used by the demographic recommender.
pub mod recommend {
    /// Number of distinct titles returned by a recommendation query.
    pub const RECOMMENDATION_LIMIT: usize = 10;
    /// Scale applied to 0/1 query flags before comparing with percentage means.
    pub const PERCENT_SCALE: f64 = 100.0;
}

/// Constants used by the report app.
pub mod report {
    /// Environment variable consulted when `--dataset` is not given.
    pub const DATASET_ENV_VAR: &str = "COURSE_DATASET";
    /// Dataset path used when neither the argument nor the environment is set.
    pub const DEFAULT_DATASET_PATH: &str = "resources/online_courses.csv";
    /// Default tracing filter when `RUST_LOG` is unset.
    pub const DEFAULT_LOG_FILTER: &str = "info";
}
