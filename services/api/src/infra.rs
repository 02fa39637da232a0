use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;

use chronodx::workflows::screening::{
    DiseaseType, GatewayError, PredictionFlag, PredictionGateway, PredictionRequest,
    PredictionResponse,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Gateway used by the demo command and route tests: replays configured
/// responses so the pipeline can be shown end to end without a live model
/// server. Unscripted diseases fall back to a null prediction.
#[derive(Default)]
pub(crate) struct ScriptedPredictionGateway {
    responses: Mutex<HashMap<DiseaseType, PredictionResponse>>,
}

impl ScriptedPredictionGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, disease: DiseaseType, response: PredictionResponse) -> Self {
        self.responses
            .lock()
            .expect("scripted gateway mutex poisoned")
            .insert(disease, response);
        self
    }
}

#[async_trait]
impl PredictionGateway for ScriptedPredictionGateway {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, GatewayError> {
        let guard = self
            .responses
            .lock()
            .expect("scripted gateway mutex poisoned");

        Ok(guard
            .get(&request.disease_type)
            .cloned()
            .unwrap_or(PredictionResponse {
                prediction: PredictionFlag::Null,
                probability: 0.0,
            }))
    }
}
