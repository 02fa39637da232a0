use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DiseaseType, RawFieldMap, ScreeningSubmission};
use super::gateway::PredictionGateway;
use super::service::{ScreeningError, ScreeningService};

/// Router builder exposing the screening endpoint.
pub fn screening_router<G>(service: Arc<ScreeningService<G>>) -> Router
where
    G: PredictionGateway + 'static,
{
    Router::new()
        .route("/api/v1/screenings", post(screen_handler::<G>))
        .with_state(service)
}

/// Raw request body. The disease type stays a string until it is validated
/// so an unknown value produces a structured error instead of a bare decode
/// failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ScreeningRequest {
    pub(crate) disease_type: String,
    pub(crate) fields: RawFieldMap,
}

pub(crate) async fn screen_handler<G>(
    State(service): State<Arc<ScreeningService<G>>>,
    axum::Json(request): axum::Json<ScreeningRequest>,
) -> Response
where
    G: PredictionGateway + 'static,
{
    let disease = match DiseaseType::parse(&request.disease_type) {
        Ok(disease) => disease,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let submission = ScreeningSubmission {
        disease,
        fields: request.fields,
    };

    match service.screen(submission).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(ScreeningError::IncompleteSubmission { fields }) => {
            let payload = json!({
                "error": "submission is missing required fields",
                "missing_fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ScreeningError::Gateway(error)) => {
            let payload = json!({
                "error": "prediction service is unavailable, please try again later",
                "detail": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
