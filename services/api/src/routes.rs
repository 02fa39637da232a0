use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use chronodx::workflows::screening::{screening_router, PredictionGateway, ScreeningService};

pub(crate) fn with_screening_routes<G>(service: Arc<ScreeningService<G>>) -> axum::Router
where
    G: PredictionGateway + 'static,
{
    screening_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ScriptedPredictionGateway;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use chronodx::workflows::screening::{DiseaseType, PredictionFlag, PredictionResponse};

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn screening_route_is_mounted_alongside_the_probes() {
        let gateway = ScriptedPredictionGateway::new().with(
            DiseaseType::Diabetes,
            PredictionResponse {
                prediction: PredictionFlag::Number(1.0),
                probability: 0.35,
            },
        );
        let service = Arc::new(ScreeningService::new(Arc::new(gateway)));
        let router = with_screening_routes(service);

        let fields = json!({
            "pregnancies": "2",
            "glucose": "148",
            "bloodPressure": "72",
            "skinThickness": "35",
            "insulin": "0",
            "bmi": "33.6",
            "diabetesPedigreeFunction": "0.627",
            "age": "50",
        });

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/screenings")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "disease_type": "diabetes",
                            "fields": fields,
                        }))
                        .expect("serialize request"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(payload["assessment"]["tier"], "moderate");
        assert_eq!(payload["assessment"]["is_positive"], true);
    }
}
