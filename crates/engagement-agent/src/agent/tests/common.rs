use std::io::Cursor;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::agent::domain::{Prediction, PredictionPayload, RecommendedAction, UserRecord};
use crate::agent::prediction::{PredictionError, PredictionSource};
use crate::agent::repository::UserTable;
use crate::agent::router::recommendation_router;
use crate::agent::service::RecommendationService;

pub(super) const USERS_CSV: &str = "user_id,age,gender,last_active,interactions,purchases\n\
1,25,M,2025-08-10,15,2\n\
2,34,F,2025-08-01,42,7\n\
3,19,,2025-07-22,3,\n";

pub(super) fn user_table() -> UserTable {
    UserTable::from_reader(Cursor::new(USERS_CSV)).expect("fixture table loads")
}

pub(super) fn default_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Always answers with the same prediction.
pub(super) struct FixedSource {
    payload: PredictionPayload,
}

impl FixedSource {
    pub(super) fn new(engagement_score: f64, recommended_action: RecommendedAction) -> Self {
        Self::from_payload(
            Prediction {
                engagement_score,
                recommended_action,
            }
            .into_payload(),
        )
    }

    pub(super) fn from_payload(payload: PredictionPayload) -> Self {
        Self { payload }
    }
}

impl PredictionSource for FixedSource {
    fn predict(&self, _features: &UserRecord) -> Result<PredictionPayload, PredictionError> {
        Ok(self.payload.clone())
    }
}

pub(super) struct OfflineSource;

impl PredictionSource for OfflineSource {
    fn predict(&self, _features: &UserRecord) -> Result<PredictionPayload, PredictionError> {
        Err(PredictionError::Unavailable("model endpoint offline".to_string()))
    }
}

/// Sleeps past any reasonable test timeout before answering.
pub(super) struct SlowSource {
    pub(super) delay: Duration,
}

impl PredictionSource for SlowSource {
    fn predict(&self, _features: &UserRecord) -> Result<PredictionPayload, PredictionError> {
        thread::sleep(self.delay);
        Ok(Prediction {
            engagement_score: 0.9,
            recommended_action: RecommendedAction::OfferDiscount,
        }
        .into_payload())
    }
}

pub(super) fn build_service<P>(source: P) -> RecommendationService<UserTable, P>
where
    P: PredictionSource + 'static,
{
    RecommendationService::new(Arc::new(user_table()), Arc::new(source), default_timeout())
}

pub(super) fn router_with_source<P>(source: P) -> axum::Router
where
    P: PredictionSource + 'static,
{
    recommendation_router(Arc::new(build_service(source)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
