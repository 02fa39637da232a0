use std::sync::Arc;

use serde::Serialize;

use super::assessment::{classify, RiskAssessment};
use super::domain::{DiseaseType, ScreeningSubmission};
use super::encoding::{encode, FieldFlag};
use super::gateway::{GatewayError, PredictionGateway, PredictionRequest};

/// Workflow facade: encode the submission, make the single outbound
/// prediction call, classify the returned probability. Each attempt is
/// independent and carries no identity linking it to prior attempts.
pub struct ScreeningService<G> {
    gateway: Arc<G>,
}

/// Outcome of one screening attempt, handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningOutcome {
    #[serde(rename = "disease_type")]
    pub disease: DiseaseType,
    pub probability: f64,
    pub assessment: RiskAssessment,
    /// Fields that encoded to a sentinel; they rode along in the payload and
    /// the model saw them as "unknown".
    pub flagged_fields: Vec<FieldFlag>,
}

/// Error raised by the screening workflow.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    /// The vector is structurally incomplete; no request is attempted. The
    /// intake form is expected to prevent this, so a hit here points at a
    /// client-side validation gap rather than bad patient data.
    #[error("submission is missing required fields: {}", fields.join(", "))]
    IncompleteSubmission { fields: Vec<&'static str> },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl<G> ScreeningService<G>
where
    G: PredictionGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run one screening attempt end to end.
    ///
    /// Degraded fields (unknown category, unparseable number) do not block
    /// submission: they keep their sentinel codes in the payload and are
    /// echoed back in `flagged_fields`. Missing fields do block it.
    pub async fn screen(
        &self,
        submission: ScreeningSubmission,
    ) -> Result<ScreeningOutcome, ScreeningError> {
        let ScreeningSubmission { disease, fields } = submission;

        let features = encode(disease, &fields);
        let report = features.report();
        if !report.missing.is_empty() {
            return Err(ScreeningError::IncompleteSubmission {
                fields: report.missing,
            });
        }

        let response = self
            .gateway
            .predict(&PredictionRequest {
                disease_type: disease,
                features,
            })
            .await?;

        let assessment = classify(disease, response.probability, &response.prediction);

        Ok(ScreeningOutcome {
            disease,
            probability: response.probability,
            assessment,
            flagged_fields: report.flags,
        })
    }
}
