//! Row derivation engine.
//!
//! Turns one sheet row into a classified [`DerivedResult`]. The engine never
//! fails: malformed numeric cells coerce to zero and missing cells read as
//! blank, so every row yields exactly one record.

use std::sync::LazyLock;

use regex::Regex;

use crate::class_label::normalize_class;
use crate::columns::{classify_columns, ColumnLayout, SubjectColumns};
use crate::normalize::normalize;
use crate::result::{
    DerivedResult, Grade, ObtainedMarks, ResultStatus, SubjectEntry, SubjectStatus,
};
use crate::sheet::RawRow;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A subject fails when obtained marks fall below this fraction of the maximum.
pub const SUBJECT_PASS_FRACTION: f64 = 0.33;

/// Overall percentage below which the student fails outright.
pub const PASS_PERCENTAGE: f64 = 33.0;

/// Failing this many subjects fails the student outright.
pub const OUTRIGHT_FAIL_SUBJECTS: u32 = 3;

/// Percentage is capped here even when obtained marks exceed the maximum.
pub const MAX_PERCENTAGE: f64 = 100.0;

static ABSENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^a(?:b|bs|bsent)?$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// Blank means missing or whitespace only.
fn is_blank(cell: Option<&str>) -> bool {
    cell.map_or(true, |c| c.trim().is_empty())
}

/// Whether an obtained-marks cell marks the student absent
/// (`a`, `ab`, `abs`, `absent`, any case).
pub fn is_absent_marker(cell: &str) -> bool {
    ABSENT_RE.is_match(cell.trim())
}

/// Parse the leading integer of a cell.
///
/// Leading whitespace and a single sign are accepted, then the longest run of
/// ASCII digits is read and anything after it ignored: `"85.5"` reads as 85,
/// `"80abc"` as 80. Returns `None` when no digit follows.
pub fn parse_leading_int(cell: &str) -> Option<i64> {
    let s = cell.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // Saturate absurdly long digit runs instead of failing.
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Round half-up to two decimal places.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

// ---------------------------------------------------------------------------
// Subject and row classification
// ---------------------------------------------------------------------------

/// Running totals for one row.
#[derive(Debug, Default)]
struct Tally {
    grand_total: i64,
    obtained_total: i64,
    fail_count: u32,
    has_absent: bool,
}

/// Classify one subject pair, or `None` when the pair is omitted.
fn derive_subject(row: &RawRow, columns: &SubjectColumns, tally: &mut Tally) -> Option<SubjectEntry> {
    let max_raw = row.cell(columns.max_index);
    let obtained_raw = row.cell(columns.obtained_index);

    // No partial credit: a subject without an obtained value is dropped,
    // whether or not the maximum is present.
    if is_blank(obtained_raw) {
        return None;
    }

    // Negative cells coerce to zero.
    let max = max_raw.and_then(parse_leading_int).unwrap_or(0).max(0);
    let obtained_raw = obtained_raw.unwrap_or_default();

    let (obtained, status) = if is_absent_marker(obtained_raw) {
        tally.has_absent = true;
        (ObtainedMarks::Absent, SubjectStatus::Absent)
    } else {
        let value = parse_leading_int(obtained_raw).unwrap_or(0).max(0);
        let failed = value == 0 || (value as f64) < max as f64 * SUBJECT_PASS_FRACTION;
        if failed {
            tally.fail_count += 1;
        }
        let status = if failed {
            SubjectStatus::Fail
        } else {
            SubjectStatus::Pass
        };
        (ObtainedMarks::Numeric(value), status)
    };

    tally.obtained_total = tally.obtained_total.saturating_add(obtained.value());
    tally.grand_total = tally.grand_total.saturating_add(max);

    Some(SubjectEntry {
        name: columns.name.clone(),
        max,
        obtained,
        status,
    })
}

/// Percentage of obtained over grand total, clamped to `[0, 100]` and
/// rounded half-up to two decimals. Zero when there is nothing to divide by.
pub fn compute_percentage(obtained_total: i64, grand_total: i64) -> f64 {
    if grand_total <= 0 {
        return 0.0;
    }
    let raw = obtained_total as f64 / grand_total as f64 * 100.0;
    round_2dp(raw.clamp(0.0, MAX_PERCENTAGE))
}

/// Overall status from the absence flag, failed-subject count, and percentage.
///
/// Absence overrides everything else.
pub fn overall_status(has_absent: bool, fail_count: u32, percentage: f64) -> ResultStatus {
    if has_absent {
        ResultStatus::Absent
    } else if fail_count >= OUTRIGHT_FAIL_SUBJECTS || percentage < PASS_PERCENTAGE {
        ResultStatus::Fail
    } else if fail_count > 0 {
        ResultStatus::FailSupply
    } else {
        ResultStatus::Pass
    }
}

/// Derive one student result from a sheet row.
///
/// `uploaded_by` is the authenticated uploader; `session` is an optional
/// batch label stamped on the record as-is.
pub fn derive_row(
    row: &RawRow,
    layout: &ColumnLayout,
    uploaded_by: &str,
    session: Option<&str>,
) -> DerivedResult {
    let field = |index: Option<usize>| index.and_then(|i| row.cell(i));

    let class = normalize_class(field(layout.class_index));
    let name = field(layout.name_index).unwrap_or_default().to_string();
    let father_name = field(layout.father_index).unwrap_or_default().to_string();

    let mut tally = Tally::default();
    let subjects: Vec<SubjectEntry> = layout
        .subjects
        .iter()
        .filter_map(|columns| derive_subject(row, columns, &mut tally))
        .collect();

    let percentage = compute_percentage(tally.obtained_total, tally.grand_total);
    let status = overall_status(tally.has_absent, tally.fail_count, percentage);
    let grade = Grade::from_percentage(percentage);

    DerivedResult {
        class,
        normalized_name: normalize(Some(&name)),
        normalized_father: normalize(Some(&father_name)),
        name,
        father_name,
        subjects,
        grand_total: tally.grand_total,
        obtained_total: tally.obtained_total,
        percentage,
        grade,
        status,
        session: session.map(str::to_string),
        uploaded_by: uploaded_by.to_string(),
    }
}

/// Derive results for every row of a sheet, in row order.
pub fn derive_results(headers: &[String], rows: &[RawRow], uploaded_by: &str) -> Vec<DerivedResult> {
    let layout = classify_columns(headers);
    rows.iter()
        .map(|row| derive_row(row, &layout, uploaded_by, None))
        .collect()
}
