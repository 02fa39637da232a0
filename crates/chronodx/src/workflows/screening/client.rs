//! reqwest-backed prediction client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::gateway::{GatewayError, PredictionGateway, PredictionRequest, PredictionResponse};

/// HTTP client for the prediction service: one JSON POST per screening
/// attempt, no authentication, no retry, and no timeout beyond the transport
/// default. An abandoned attempt is simply discarded by the caller, never
/// cancelled at the network level.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionGateway for HttpPredictionClient {
    #[instrument(skip(self, request), fields(disease = %request.disease_type))]
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, GatewayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        let body = response.json::<PredictionResponse>().await?;
        debug!(probability = body.probability, "prediction received");
        Ok(body)
    }
}
