//! Canonical class tokens.
//!
//! Class designations arrive in many shapes ("9th", "Class 9", "nine", "9").
//! Ingestion stores the canonical token and lookup matches it exactly, so
//! both sides must go through [`normalize_class`].

use std::sync::LazyLock;

use regex::Regex;

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(?:st|nd|rd|th)$").expect("valid regex"));

static CLASS_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s*([0-9]+)$").expect("valid regex"));

/// English number words accepted as class labels.
const NUMBER_WORDS: &[(&str, &str)] = &[
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
];

/// Map a class designation to its canonical token.
///
/// Rules, first match wins (all on the trimmed, lower-cased input):
///
/// 1. empty or absent -> `""`
/// 2. digits only -> unchanged
/// 3. digits with an ordinal suffix (`st`, `nd`, `rd`, `th`) -> digits
/// 4. `class` followed by optional whitespace and digits -> digits
/// 5. `one` .. `twelve` -> the digit string
/// 6. anything else -> returned lower-cased and trimmed
///
/// ```
/// use marksheet_core::class_label::normalize_class;
///
/// assert_eq!(normalize_class(Some("9th")), "9");
/// assert_eq!(normalize_class(Some("Class 9")), "9");
/// assert_eq!(normalize_class(Some("nine")), "9");
/// ```
pub fn normalize_class(value: Option<&str>) -> String {
    let s = value.unwrap_or_default().trim().to_lowercase();

    if s.is_empty() || s.bytes().all(|b| b.is_ascii_digit()) {
        return s;
    }

    if let Some(caps) = ORDINAL_RE.captures(&s) {
        return caps[1].to_string();
    }

    if let Some(caps) = CLASS_PREFIX_RE.captures(&s) {
        return caps[1].to_string();
    }

    if let Some((_, digits)) = NUMBER_WORDS.iter().find(|(word, _)| *word == s) {
        return (*digits).to_string();
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalent_labels_share_a_token() {
        let expected = "9";
        for label in ["9th", "Class 9", "nine", "9", " NINE ", "CLASS9", "class   9"] {
            assert_eq!(normalize_class(Some(label)), expected, "label {label:?}");
        }
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(normalize_class(Some("1st")), "1");
        assert_eq!(normalize_class(Some("2nd")), "2");
        assert_eq!(normalize_class(Some("3rd")), "3");
        assert_eq!(normalize_class(Some("10TH")), "10");
    }

    #[test]
    fn digits_pass_through_unchanged() {
        assert_eq!(normalize_class(Some("12")), "12");
        assert_eq!(normalize_class(Some("007")), "007");
    }

    #[test]
    fn number_words_up_to_twelve() {
        assert_eq!(normalize_class(Some("One")), "1");
        assert_eq!(normalize_class(Some("twelve")), "12");
        assert_eq!(normalize_class(Some("thirteen")), "thirteen");
    }

    #[test]
    fn empty_and_absent() {
        assert_eq!(normalize_class(None), "");
        assert_eq!(normalize_class(Some("")), "");
        assert_eq!(normalize_class(Some("   ")), "");
    }

    #[test]
    fn unrecognised_labels_fall_back_to_lowercase() {
        assert_eq!(normalize_class(Some(" Nursery ")), "nursery");
        assert_eq!(normalize_class(Some("Class Nine")), "class nine");
        assert_eq!(normalize_class(Some("9-A")), "9-a");
    }

    #[test]
    fn idempotent_on_canonical_output() {
        for label in ["9th", "Class 10", "seven", "KG"] {
            let once = normalize_class(Some(label));
            assert_eq!(normalize_class(Some(&once)), once);
        }
    }
}
