//! Result record types produced by the derivation engine.
//!
//! Wire names follow the public JSON contract: camelCase fields, the grade
//! labels `A+`..`F`, and the overall status `"Fail Supply"`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Obtained marks
// ---------------------------------------------------------------------------

/// Literal stored in place of a number when a student was absent.
pub const ABSENT_LABEL: &str = "Absent";

/// Marks obtained in one subject: a number, or an absence marker.
///
/// Serializes as a plain JSON number or the string `"Absent"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObtainedMarks {
    Numeric(i64),
    Absent,
}

impl ObtainedMarks {
    /// Numeric contribution towards the obtained total (absence counts as 0).
    pub fn value(&self) -> i64 {
        match self {
            Self::Numeric(n) => *n,
            Self::Absent => 0,
        }
    }
}

impl Serialize for ObtainedMarks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(n) => serializer.serialize_i64(*n),
            Self::Absent => serializer.serialize_str(ABSENT_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for ObtainedMarks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::Numeric(n)),
            Raw::Text(t) if t == ABSENT_LABEL => Ok(Self::Absent),
            Raw::Text(t) => Err(D::Error::custom(format!(
                "expected a number or \"{ABSENT_LABEL}\", got {t:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Subject status
// ---------------------------------------------------------------------------

/// Outcome of a single subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectStatus {
    Pass,
    Fail,
    Absent,
}

impl SubjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Absent => "Absent",
        }
    }
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subject line on a student's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub max: i64,
    pub obtained: ObtainedMarks,
    pub status: SubjectStatus,
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Letter grade derived from the percentage alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    F,
}

/// Inclusive lower bounds, highest first.
const GRADE_THRESHOLDS: &[(f64, Grade)] = &[
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::BPlus),
    (60.0, Grade::B),
    (50.0, Grade::CPlus),
    (40.0, Grade::C),
    (33.0, Grade::DPlus),
];

impl Grade {
    /// Grade for a percentage. Each threshold is an inclusive lower bound.
    pub fn from_percentage(percentage: f64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    /// Parse a stored grade label.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "C+" => Ok(Self::CPlus),
            "C" => Ok(Self::C),
            "D+" => Ok(Self::DPlus),
            "F" => Ok(Self::F),
            _ => Err(CoreError::Validation(format!(
                "Invalid grade '{s}'. Must be one of: A+, A, B+, B, C+, C, D+, F"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Grade {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_db(&value)
    }
}

// ---------------------------------------------------------------------------
// Overall status
// ---------------------------------------------------------------------------

/// Overall outcome for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Pass,
    /// Failed one or two subjects; eligible for supplementary exams.
    #[serde(rename = "Fail Supply")]
    FailSupply,
    Fail,
    Absent,
}

impl ResultStatus {
    /// Parse a stored status label.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "Pass" => Ok(Self::Pass),
            "Fail Supply" => Ok(Self::FailSupply),
            "Fail" => Ok(Self::Fail),
            "Absent" => Ok(Self::Absent),
            _ => Err(CoreError::Validation(format!(
                "Invalid result status '{s}'. Must be one of: Pass, Fail Supply, Fail, Absent"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::FailSupply => "Fail Supply",
            Self::Fail => "Fail",
            Self::Absent => "Absent",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ResultStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_db(&value)
    }
}

// ---------------------------------------------------------------------------
// Derived result
// ---------------------------------------------------------------------------

/// A student result as produced by the derivation engine, before storage
/// assigns an id and upload timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedResult {
    /// Canonical class token.
    pub class: String,
    pub name: String,
    pub father_name: String,
    pub normalized_name: String,
    pub normalized_father: String,
    pub subjects: Vec<SubjectEntry>,
    pub grand_total: i64,
    pub obtained_total: i64,
    pub percentage: f64,
    pub grade: Grade,
    pub status: ResultStatus,
    pub session: Option<String>,
    pub uploaded_by: String,
}
