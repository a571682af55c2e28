//! Next-best-action agent: record validation, date helpers, the engagement
//! decision rule, output formatting, and the HTTP endpoint serving it.

pub mod dates;
pub mod domain;
pub mod engine;
pub mod formatter;
pub mod prediction;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use dates::{days_since_last_active, days_since_last_active_on, parse_date, DateFormatError};
pub use domain::{
    Prediction, PredictionPayload, Recommendation, RecommendedAction, UserId, UserRecord,
    ENGAGEMENT_THRESHOLD, REQUIRED_FIELDS,
};
pub use engine::{decide_action, AgentError, FieldOrigin, RecommendationEngine};
pub use formatter::format_recommendation_output;
pub use prediction::{PredictionError, PredictionSource, RandomPredictionSource};
pub use repository::{UserRepository, UserTable, UserTableError};
pub use router::recommendation_router;
pub use service::{RecommendationService, ServiceError};
pub use validation::{validate_user_data, validate_user_record, ValidationReport};
