use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::domain::{
    Prediction, PredictionPayload, Recommendation, RecommendedAction, UserId, UserRecord,
    ENGAGEMENT_THRESHOLD,
};
use super::prediction::{PredictionError, PredictionSource};

/// Where a missing or malformed field was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    UserRecord,
    Prediction,
}

impl fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldOrigin::UserRecord => f.write_str("user record"),
            FieldOrigin::Prediction => f.write_str("prediction"),
        }
    }
}

/// Error raised while producing a recommendation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error("{origin} is missing required field '{field}'")]
    MissingField {
        field: &'static str,
        origin: FieldOrigin,
    },
    #[error("{origin} field '{field}' is not {expected}")]
    InvalidField {
        field: &'static str,
        origin: FieldOrigin,
        expected: &'static str,
    },
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl AgentError {
    pub fn origin(&self) -> Option<FieldOrigin> {
        match self {
            AgentError::MissingField { origin, .. } | AgentError::InvalidField { origin, .. } => {
                Some(*origin)
            }
            AgentError::Prediction(_) => None,
        }
    }
}

/// Applies the engagement threshold to whatever the prediction source proposes.
pub struct RecommendationEngine<P> {
    source: Arc<P>,
}

impl<P> Clone for RecommendationEngine<P> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<P> RecommendationEngine<P>
where
    P: PredictionSource,
{
    pub fn new(source: Arc<P>) -> Self {
        Self { source }
    }

    /// Scores `record` and picks the action. The record is forwarded to the
    /// source as-is and is not validated here. The returned score is unrounded.
    pub fn recommend(&self, record: &UserRecord) -> Result<Recommendation, AgentError> {
        let user_id = user_id_of(record)?;
        let payload = self.source.predict(record)?;
        let prediction = prediction_from_payload(&payload)?;
        let action = decide_action(&prediction);

        debug!(
            %user_id,
            score = prediction.engagement_score,
            proposed = %prediction.recommended_action,
            chosen = %action,
            "recommendation decided"
        );

        Ok(Recommendation {
            user_id,
            action,
            score: prediction.engagement_score,
        })
    }
}

/// Keeps the proposed action only above the threshold; otherwise falls back
/// to `send_message`.
pub fn decide_action(prediction: &Prediction) -> RecommendedAction {
    if prediction.engagement_score > ENGAGEMENT_THRESHOLD {
        prediction.recommended_action
    } else {
        RecommendedAction::SendMessage
    }
}

pub(crate) fn user_id_of(record: &UserRecord) -> Result<UserId, AgentError> {
    let value = record.get("user_id").ok_or(AgentError::MissingField {
        field: "user_id",
        origin: FieldOrigin::UserRecord,
    })?;

    value
        .as_i64()
        .map(UserId)
        .ok_or(AgentError::InvalidField {
            field: "user_id",
            origin: FieldOrigin::UserRecord,
            expected: "an integer",
        })
}

fn prediction_from_payload(payload: &PredictionPayload) -> Result<Prediction, AgentError> {
    let score = payload
        .get("engagement_score")
        .ok_or(AgentError::MissingField {
            field: "engagement_score",
            origin: FieldOrigin::Prediction,
        })?;
    let engagement_score = score.as_f64().ok_or(AgentError::InvalidField {
        field: "engagement_score",
        origin: FieldOrigin::Prediction,
        expected: "a number",
    })?;

    let action = payload
        .get("recommended_action")
        .ok_or(AgentError::MissingField {
            field: "recommended_action",
            origin: FieldOrigin::Prediction,
        })?;
    let recommended_action = action
        .as_str()
        .and_then(|label| label.parse::<RecommendedAction>().ok())
        .ok_or(AgentError::InvalidField {
            field: "recommended_action",
            origin: FieldOrigin::Prediction,
            expected: "a known action",
        })?;

    Ok(Prediction {
        engagement_score,
        recommended_action,
    })
}
