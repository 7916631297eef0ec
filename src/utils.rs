//! Text helpers shared by the record constructor and the query engines.

use std::collections::HashSet;

use crate::constants::loader::WRAPPING_QUOTE;
use crate::types::CourseTitle;

/// Strip at most one leading and one trailing double quote.
///
/// Inner quotes are preserved, and a value that is only `"` collapses to an
/// empty string.
pub fn strip_wrapping_quote(value: &str) -> String {
    let value = value.strip_prefix(WRAPPING_QUOTE).unwrap_or(value);
    let value = value.strip_suffix(WRAPPING_QUOTE).unwrap_or(value);
    value.to_string()
}

/// Walk `titles` in order and keep only first-seen values until `limit` are collected.
///
/// Stops early once the target is met; returns fewer entries when the input
/// runs out first. Callers decide whether a short result is an error.
pub fn collect_distinct_titles<'a, I>(titles: I, limit: usize) -> Vec<CourseTitle>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut collected = Vec::new();
    if limit == 0 {
        return collected;
    }
    for title in titles {
        if !seen.insert(title) {
            continue;
        }
        collected.push(title.to_string());
        if collected.len() == limit {
            break;
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_wrapping_quote_removes_one_pair() {
        assert_eq!(strip_wrapping_quote("\"Circuits\""), "Circuits");
        assert_eq!(strip_wrapping_quote("\"\"Nested\"\""), "\"Nested\"");
        assert_eq!(strip_wrapping_quote("\"Leading only"), "Leading only");
        assert_eq!(strip_wrapping_quote("Trailing only\""), "Trailing only");
        assert_eq!(strip_wrapping_quote("Plain"), "Plain");
        assert_eq!(strip_wrapping_quote("\""), "");
        assert_eq!(strip_wrapping_quote(""), "");
    }

    #[test]
    fn collect_distinct_titles_skips_repeats_and_stops_at_limit() {
        let titles = ["a", "b", "a", "c", "b", "d"];
        assert_eq!(
            collect_distinct_titles(titles.iter().copied(), 3),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn collect_distinct_titles_returns_short_list_when_exhausted() {
        let titles = ["a", "a", "b"];
        assert_eq!(
            collect_distinct_titles(titles.iter().copied(), 5),
            vec!["a", "b"]
        );
        assert!(collect_distinct_titles(titles.iter().copied(), 0).is_empty());
    }
}
