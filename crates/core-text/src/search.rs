//! Case-insensitive first-match search.
//!
//! Two modes exist. `Literal` (the default) escapes the query so that `.`,
//! `*`, `(` and friends match themselves. `Regex` hands the query to the regex
//! engine untouched, so metacharacters keep their regex meaning; an invalid
//! pattern is reported as [`SearchError::InvalidPattern`].
//!
//! Results are char offsets into the haystack. Only the first match is
//! reported; there is no wraparound and no match enumeration.

use regex::RegexBuilder;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Literal,
    Regex,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Char offset of the first case-insensitive match of `needle` in `haystack`.
///
/// An empty needle never matches (`Ok(None)`).
pub fn find(haystack: &str, needle: &str, mode: SearchMode) -> Result<Option<usize>, SearchError> {
    if needle.is_empty() {
        trace!(target: "search", "empty_query_ignored");
        return Ok(None);
    }
    let pattern = match mode {
        SearchMode::Literal => regex::escape(needle),
        SearchMode::Regex => needle.to_string(),
    };
    let re = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
    let offset = re
        .find(haystack)
        .map(|m| crate::byte_to_char(haystack, m.start()));
    debug!(
        target: "search",
        mode = ?mode,
        needle_len = needle.len(),
        found = offset.is_some(),
        "find"
    );
    Ok(offset)
}
