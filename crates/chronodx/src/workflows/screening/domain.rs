use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prediction domains supported by the gateway. Each selects a fixed feature
/// schema and a display name; the value is immutable for the duration of one
/// screening attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseType {
    Diabetes,
    Heart,
    Kidney,
}

impl DiseaseType {
    pub const ALL: [DiseaseType; 3] = [
        DiseaseType::Diabetes,
        DiseaseType::Heart,
        DiseaseType::Kidney,
    ];

    /// Accepts exactly the lowercase wire tokens; anything else is a fatal
    /// structural error and must block the prediction request.
    pub fn parse(raw: &str) -> Result<Self, InvalidDiseaseType> {
        match raw {
            "diabetes" => Ok(Self::Diabetes),
            "heart" => Ok(Self::Heart),
            "kidney" => Ok(Self::Kidney),
            other => Err(InvalidDiseaseType(other.to_string())),
        }
    }

    /// Token used in request payloads and URLs.
    pub const fn wire_name(self) -> &'static str {
        match self {
            DiseaseType::Diabetes => "diabetes",
            DiseaseType::Heart => "heart",
            DiseaseType::Kidney => "kidney",
        }
    }

    /// Name substituted into user-facing narratives.
    pub const fn display_name(self) -> &'static str {
        match self {
            DiseaseType::Diabetes => "Diabetes",
            DiseaseType::Heart => "Heart Disease",
            DiseaseType::Kidney => "Chronic Kidney Disease",
        }
    }
}

impl fmt::Display for DiseaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for DiseaseType {
    type Err = InvalidDiseaseType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// Raised when a disease type outside the closed set reaches the workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disease type '{0}': expected diabetes, heart, or kidney")]
pub struct InvalidDiseaseType(pub String);

/// Raw field value as the form layer delivers it. Values are nominally
/// strings, but pre-coded selects may arrive as JSON numbers, so both shapes
/// are accepted here and resolved during encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Categorical token view; numbers have no token representation.
    pub(crate) fn token(&self) -> Option<&str> {
        match self {
            RawValue::Number(_) => None,
            RawValue::Text(text) => Some(text.trim()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Field name to raw value mapping produced by the intake form.
pub type RawFieldMap = BTreeMap<String, RawValue>;

/// One screening attempt: a disease domain plus the raw values entered for
/// that domain's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSubmission {
    pub disease: DiseaseType,
    pub fields: RawFieldMap,
}
