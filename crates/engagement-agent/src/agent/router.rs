use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::domain::UserId;
use super::engine::FieldOrigin;
use super::prediction::PredictionSource;
use super::repository::UserRepository;
use super::service::{RecommendationService, ServiceError};

/// Router builder exposing the recommendation endpoint.
pub fn recommendation_router<R, P>(service: Arc<RecommendationService<R, P>>) -> Router
where
    R: UserRepository + 'static,
    P: PredictionSource + 'static,
{
    Router::new()
        .route("/recommend/:user_id", get(recommend_handler::<R, P>))
        .with_state(service)
}

/// Runs the recommendation on the blocking pool so a slow prediction source
/// cannot stall the runtime, bounded by the service's prediction timeout.
pub(crate) async fn recommend_handler<R, P>(
    State(service): State<Arc<RecommendationService<R, P>>>,
    Path(user_id): Path<i64>,
) -> Response
where
    R: UserRepository + 'static,
    P: PredictionSource + 'static,
{
    let user_id = UserId(user_id);
    let timeout = service.prediction_timeout();
    let worker = Arc::clone(&service);
    let task = tokio::task::spawn_blocking(move || worker.recommend_for(user_id));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(recommendation))) => (StatusCode::OK, Json(recommendation)).into_response(),
        Ok(Ok(Err(error))) => service_error_response(error),
        Ok(Err(join_error)) => {
            error!(%user_id, error = %join_error, "recommendation task failed");
            let payload = json!({ "error": "recommendation failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Err(_) => {
            warn!(%user_id, timeout_ms = timeout.as_millis() as u64, "prediction timed out");
            let payload = json!({ "error": "prediction timed out" });
            (StatusCode::GATEWAY_TIMEOUT, Json(payload)).into_response()
        }
    }
}

pub(crate) fn service_error_response(error: ServiceError) -> Response {
    match error {
        ServiceError::UserNotFound(_) => {
            let payload = json!({ "error": "User not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ServiceError::InvalidRecord(report) => {
            let payload = json!({
                "error": "Invalid user record",
                "missing_fields": report.missing_fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        ServiceError::Agent(agent_error) => {
            let status = match agent_error.origin() {
                Some(FieldOrigin::UserRecord) => StatusCode::UNPROCESSABLE_ENTITY,
                Some(FieldOrigin::Prediction) | None => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({ "error": agent_error.to_string() });
            (status, Json(payload)).into_response()
        }
    }
}
