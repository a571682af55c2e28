use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dynamic user record as loaded from the user table. Values keep whatever
/// type the loader inferred; presence checks live in the validator.
pub type UserRecord = Map<String, Value>;

/// Raw response from a prediction source before it is checked for the two
/// fields the engine relies on.
pub type PredictionPayload = Map<String, Value>;

/// Keys every stored user record must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "user_id",
    "age",
    "gender",
    "last_active",
    "interactions",
    "purchases",
];

/// Engagement level a prediction must strictly exceed for its action to stand.
pub const ENGAGEMENT_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Next-best-action labels a prediction may propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    OfferDiscount,
    RecommendProduct,
    SendMessage,
}

impl RecommendedAction {
    pub const ALL: [RecommendedAction; 3] = [
        RecommendedAction::OfferDiscount,
        RecommendedAction::RecommendProduct,
        RecommendedAction::SendMessage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::OfferDiscount => "offer_discount",
            RecommendedAction::RecommendProduct => "recommend_product",
            RecommendedAction::SendMessage => "send_message",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecommendedAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.label() == value)
            .ok_or_else(|| UnknownAction(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

/// Typed view of a prediction once both fields have been checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub engagement_score: f64,
    pub recommended_action: RecommendedAction,
}

impl Prediction {
    /// Wire form as a prediction source would return it.
    pub fn into_payload(self) -> PredictionPayload {
        let mut payload = Map::new();
        payload.insert(
            "engagement_score".to_string(),
            Value::from(self.engagement_score),
        );
        payload.insert(
            "recommended_action".to_string(),
            Value::from(self.recommended_action.label()),
        );
        payload
    }
}

/// Recommendation returned to callers; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub user_id: UserId,
    pub action: RecommendedAction,
    pub score: f64,
}
