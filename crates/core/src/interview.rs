//! Interview record rules shared by the repository and HTTP layers.
//!
//! - Summary derivation (first [`SUMMARY_MAX_CHARS`] characters of content).
//! - Required-field checks for create and update.
//! - Keyword normalization and LIKE pattern construction for search.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::Date;

/// Entity name used in not-found errors.
pub const ENTITY_NAME: &str = "Interview";

/// Length of a derived summary, counted in characters (not bytes).
pub const SUMMARY_MAX_CHARS: usize = 100;

/// Message returned when a required field is missing or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Resolve the summary to persist.
///
/// A non-empty `summary` is kept verbatim. A missing or empty one is replaced
/// by the first [`SUMMARY_MAX_CHARS`] characters of `content`, cut without
/// regard for word boundaries.
///
/// # Examples
///
/// ```
/// use kiroku_core::interview::derive_summary;
/// assert_eq!(derive_summary(Some("short"), "long content"), "short");
/// assert_eq!(derive_summary(None, "long content"), "long content");
/// assert_eq!(derive_summary(Some(""), "abc"), "abc");
/// ```
pub fn derive_summary(summary: Option<&str>, content: &str) -> String {
    match summary {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => content.chars().take(SUMMARY_MAX_CHARS).collect(),
    }
}

// ---------------------------------------------------------------------------
// Required fields
// ---------------------------------------------------------------------------

/// Create requires all three fields to be present and non-empty.
pub fn validate_create_fields(
    interviewee_name: Option<&str>,
    interview_date: Option<Date>,
    content: Option<&str>,
) -> Result<(), CoreError> {
    let name_ok = interviewee_name.is_some_and(|s| !s.is_empty());
    let content_ok = content.is_some_and(|s| !s.is_empty());
    if name_ok && interview_date.is_some() && content_ok {
        Ok(())
    } else {
        Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string()))
    }
}

/// Update requires the three fields to be present. Empty strings pass.
pub fn validate_update_fields(
    interviewee_name: Option<&str>,
    interview_date: Option<Date>,
    content: Option<&str>,
) -> Result<(), CoreError> {
    if interviewee_name.is_some() && interview_date.is_some() && content.is_some() {
        Ok(())
    } else {
        Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Keyword search
// ---------------------------------------------------------------------------

/// Treat an absent or whitespace-only keyword as "no filter".
///
/// A usable keyword is returned as given; surrounding whitespace is part of
/// the substring being matched.
pub fn normalize_keyword(keyword: Option<&str>) -> Option<&str> {
    keyword.filter(|k| !k.trim().is_empty())
}

/// Build a `LIKE` pattern matching `keyword` as a literal substring.
///
/// `\`, `%` and `_` are escaped with `\`; pair with `ESCAPE '\'` in SQL.
/// Case is left alone so the database folds both sides with `LOWER`.
///
/// # Examples
///
/// ```
/// use kiroku_core::interview::like_pattern;
/// assert_eq!(like_pattern("Tanaka"), "%Tanaka%");
/// assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Deserialize an optional `YYYY-MM-DD` date, treating `""` like `null`.
///
/// Browser forms submit an untouched date input as an empty string; that
/// must surface as a missing field rather than a parse failure.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Date::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
