use crate::constants::recommend::RECOMMENDATION_LIMIT;

/// Controls how dataset files are read.
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// Whether the first line is a header row to skip.
    pub has_headers: bool,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
        }
    }
}

impl LoaderConfig {
    /// Override whether the first line is skipped as a header.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Override the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Controls recommendation output size.
#[derive(Clone, Debug)]
pub struct RecommenderConfig {
    /// Maximum number of distinct titles returned.
    pub limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            limit: RECOMMENDATION_LIMIT,
        }
    }
}

impl RecommenderConfig {
    /// Override the number of titles returned.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
