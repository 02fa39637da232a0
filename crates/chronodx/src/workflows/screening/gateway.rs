use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::DiseaseType;
use super::encoding::EncodedFeatures;

/// Outbound payload for one prediction attempt; serializes to the exact
/// `{"disease_type": ..., "features": {...}}` body the service expects.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub disease_type: DiseaseType,
    pub features: EncodedFeatures,
}

/// Loosely-typed positive/negative flag returned by the prediction service.
///
/// The service contract does not pin the encoding (observed responses carry
/// a number, a boolean, a string, or null), so every shape is normalized
/// here at the boundary instead of at each display site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionFlag {
    Bool(bool),
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl PredictionFlag {
    /// Positive iff the flag is the number `1`, the boolean `true`, or the
    /// case-sensitive string `"Positive"`; every other value is negative.
    pub fn is_positive(&self) -> bool {
        match self {
            PredictionFlag::Bool(value) => *value,
            PredictionFlag::Number(value) => *value == 1.0,
            PredictionFlag::Text(value) => value == "Positive",
            PredictionFlag::Null => false,
        }
    }
}

/// Body returned by the prediction service. Both fields default when absent;
/// `probability` is nominally in `[0, 1]` but is not clamped here; the tier
/// mapping absorbs out-of-range values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: PredictionFlag,
    #[serde(default)]
    pub probability: f64,
}

/// Single failure class for the outbound call: either the request did not
/// complete or the service answered with a non-success status. The body of a
/// failed response is not inspected for partial or degraded success.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service answered with status {0}")]
    Status(reqwest::StatusCode),
}

/// Seam for the external prediction service so the screening workflow can be
/// exercised without the network.
#[async_trait]
pub trait PredictionGateway: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, GatewayError>;
}
