use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::domain::{Recommendation, UserId};
use super::engine::{AgentError, RecommendationEngine};
use super::formatter::format_recommendation_output;
use super::prediction::PredictionSource;
use super::repository::UserRepository;
use super::validation::{validate_user_record, ValidationReport};

/// Service composing the user repository, the engine, and the output formatter.
pub struct RecommendationService<R, P> {
    users: Arc<R>,
    engine: RecommendationEngine<P>,
    prediction_timeout: Duration,
}

impl<R, P> RecommendationService<R, P>
where
    R: UserRepository + 'static,
    P: PredictionSource + 'static,
{
    pub fn new(users: Arc<R>, source: Arc<P>, prediction_timeout: Duration) -> Self {
        Self {
            users,
            engine: RecommendationEngine::new(source),
            prediction_timeout,
        }
    }

    /// Upper bound the HTTP layer applies to a single recommendation.
    pub fn prediction_timeout(&self) -> Duration {
        self.prediction_timeout
    }

    pub fn users(&self) -> &R {
        &self.users
    }

    /// Looks up the stored record, rejects it if incomplete, then scores and
    /// formats it.
    pub fn recommend_for(&self, user_id: UserId) -> Result<Recommendation, ServiceError> {
        let record = self
            .users
            .fetch(user_id)
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let report = validate_user_record(record);
        if !report.is_valid() {
            warn!(%user_id, missing = ?report.missing_fields, "stored user record is incomplete");
            return Err(ServiceError::InvalidRecord(report));
        }

        let raw = self.engine.recommend(record)?;
        let recommendation = format_recommendation_output(raw.user_id, raw.action, raw.score);

        info!(
            %user_id,
            action = %recommendation.action,
            score = recommendation.score,
            "recommendation served"
        );

        Ok(recommendation)
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound(UserId),
    #[error("Invalid user record: {}", .0.summary())]
    InvalidRecord(ValidationReport),
    #[error(transparent)]
    Agent(#[from] AgentError),
}
