//! Column classification for uploaded mark sheets.
//!
//! The sheet schema is positional: the first three headers are class,
//! student name, and father name. Every following header pair is
//! `(maximum marks, obtained marks)` for one subject. Pairs whose headers are
//! recognised as bookkeeping columns (roll number, totals, grade, ...) are
//! skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Header index of the class column.
pub const CLASS_COLUMN: usize = 0;

/// Header index of the student name column.
pub const NAME_COLUMN: usize = 1;

/// Header index of the father name column.
pub const FATHER_COLUMN: usize = 2;

/// First header index of the subject pairs.
pub const FIRST_SUBJECT_COLUMN: usize = 3;

/// Normalized header texts that never denote a subject.
///
/// Matching is exact after [`normalize`], never substring.
pub const NON_SUBJECT_HEADERS: &[&str] = &[
    "class",
    "student",
    "student name",
    "name",
    "roll",
    "roll no",
    "roll number",
    "father",
    "father name",
    "f name",
    "fname",
    "fathername",
    "mother",
    "mother name",
    "m name",
    "mname",
    "mothername",
    "guardian",
    "guardian name",
    "total",
    "grand total",
    "overall total",
    "marks",
    "total marks",
    "grand total marks",
    "obtained",
    "obtained marks",
    "marks obtained",
    "overall obtained",
    "grand obtained",
    "overall marks",
    "percentage",
    "grade",
    "status",
    "result",
];

static SUBJECT_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:max|obt|obtained|total|marks)$").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Column indices for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectColumns {
    /// Display name derived from the maximum-marks header.
    pub name: String,
    pub max_index: usize,
    pub obtained_index: usize,
}

/// Header roles resolved once per sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    pub class_index: Option<usize>,
    pub name_index: Option<usize>,
    pub father_index: Option<usize>,
    pub subjects: Vec<SubjectColumns>,
    /// Headers that contributed nothing (denylisted pairs, unpaired tail).
    pub ignored: Vec<String>,
}

impl ColumnLayout {
    /// Subject display names in header order.
    pub fn subject_names(&self) -> Vec<String> {
        self.subjects.iter().map(|s| s.name.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Pure functions
// ---------------------------------------------------------------------------

/// Whether a header names a bookkeeping column rather than a subject.
pub fn is_non_subject(header: &str) -> bool {
    NON_SUBJECT_HEADERS.contains(&normalize(Some(header)).as_str())
}

/// Derive a subject's display name from its maximum-marks header by
/// stripping a trailing `Max`/`Obt`/`Obtained`/`Total`/`Marks` token.
///
/// ```
/// use marksheet_core::columns::extract_subject_name;
///
/// assert_eq!(extract_subject_name("English Max"), "English");
/// assert_eq!(extract_subject_name("Urdu"), "Urdu");
/// ```
pub fn extract_subject_name(header: &str) -> String {
    SUBJECT_SUFFIX_RE.replace(header, "").trim().to_string()
}

/// Resolve header roles for a sheet.
pub fn classify_columns(headers: &[String]) -> ColumnLayout {
    let position = |idx: usize| (idx < headers.len()).then_some(idx);

    let mut subjects = Vec::new();
    let mut ignored = Vec::new();

    let mut i = FIRST_SUBJECT_COLUMN;
    while i < headers.len() {
        let max_header = &headers[i];
        let Some(obtained_header) = headers.get(i + 1) else {
            ignored.push(max_header.clone());
            break;
        };

        if is_non_subject(max_header) || is_non_subject(obtained_header) {
            ignored.push(max_header.clone());
            ignored.push(obtained_header.clone());
        } else {
            subjects.push(SubjectColumns {
                name: extract_subject_name(max_header),
                max_index: i,
                obtained_index: i + 1,
            });
        }
        i += 2;
    }

    ColumnLayout {
        class_index: position(CLASS_COLUMN),
        name_index: position(NAME_COLUMN),
        father_index: position(FATHER_COLUMN),
        subjects,
        ignored,
    }
}
