use chrono::NaiveDate;

use crate::constants::loader::LAUNCH_DATE_FORMATS;

/// Parse a launch date formatted as `MM/DD/YYYY` or `YYYY-MM-DD`.
///
/// Surrounding whitespace is ignored. Returns `None` when no layout matches or
/// the calendar date does not exist.
pub fn parse_launch_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    LAUNCH_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
