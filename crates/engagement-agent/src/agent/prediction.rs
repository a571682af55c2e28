use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::domain::{Prediction, PredictionPayload, RecommendedAction, UserRecord};

/// Anything able to score a user's features. Implementations may be remote,
/// slow, or nondeterministic; callers only rely on the returned payload
/// carrying `engagement_score` and `recommended_action`.
pub trait PredictionSource: Send + Sync {
    fn predict(&self, features: &UserRecord) -> Result<PredictionPayload, PredictionError>;
}

/// Failure reported by a prediction source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction source unavailable: {0}")]
    Unavailable(String),
    #[error("prediction source rejected features: {0}")]
    Rejected(String),
}

/// Stand-in client that ignores the features and draws a uniform score and
/// action.
#[derive(Debug, Default)]
pub struct RandomPredictionSource {
    seeded: Option<Mutex<StdRng>>,
}

impl RandomPredictionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible sequence for demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn draw<R: Rng>(rng: &mut R) -> Prediction {
        let raw: f64 = rng.gen_range(0.0..=1.0);
        let recommended_action = *RecommendedAction::ALL
            .choose(rng)
            .unwrap_or(&RecommendedAction::SendMessage);

        Prediction {
            engagement_score: (raw * 100.0).round() / 100.0,
            recommended_action,
        }
    }
}

impl PredictionSource for RandomPredictionSource {
    fn predict(&self, _features: &UserRecord) -> Result<PredictionPayload, PredictionError> {
        let prediction = match &self.seeded {
            Some(rng) => {
                let mut guard = rng
                    .lock()
                    .map_err(|_| PredictionError::Unavailable("rng mutex poisoned".to_string()))?;
                Self::draw(&mut *guard)
            }
            None => Self::draw(&mut rand::thread_rng()),
        };

        Ok(prediction.into_payload())
    }
}
