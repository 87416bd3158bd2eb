//! Free-text canonicalization used for name matching and header matching.

/// Canonicalize free text: collapse whitespace runs to a single space,
/// trim both ends, and lower-case.
///
/// Absent input is treated as the empty string. The function is total and
/// idempotent.
///
/// # Examples
///
/// ```
/// use marksheet_core::normalize::normalize;
///
/// assert_eq!(normalize(Some("  Asha   Rani ")), "asha rani");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(s: Option<&str>) -> String {
    s.unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
