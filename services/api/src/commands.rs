use crate::infra::load_user_table;
use chrono::{Local, NaiveDate};
use clap::Args;
use engagement_agent::agent::{
    days_since_last_active_on, validate_user_record, AgentError, PredictionPayload,
    PredictionSource, RandomPredictionSource, RecommendationService, ServiceError, UserId,
    UserRecord, UserTable,
};
use engagement_agent::config::AgentConfig;
use engagement_agent::error::AppError;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Identifier of the stored user to recommend for
    #[arg(long)]
    pub(crate) user_id: i64,
    /// CSV file holding user records (defaults to APP_USER_DATA)
    #[arg(long)]
    pub(crate) user_data: Option<PathBuf>,
    /// Seed the mock prediction client for a reproducible answer
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// Seed the mock prediction client for a reproducible answer
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct InspectArgs {
    /// CSV file holding user records (defaults to APP_USER_DATA)
    #[arg(long)]
    pub(crate) user_data: Option<PathBuf>,
    /// Reference date for activity recency (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        user_id,
        user_data,
        seed,
    } = args;

    let users = load_user_table(user_data)?;
    let service = RecommendationService::new(
        Arc::new(users),
        Arc::new(prediction_source(seed)),
        AgentConfig::default().prediction_timeout,
    );

    let recommendation = service.recommend_for(UserId(user_id))?;
    print_json(&recommendation)
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let payload = predict_sample(&prediction_source(args.seed))?;
    print_json(&payload)
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), AppError> {
    let InspectArgs { user_data, today } = args;

    let users = load_user_table(user_data)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("User record inspection (evaluated {today})");
    for line in inspect_lines(&users, today) {
        println!("- {line}");
    }

    Ok(())
}

fn prediction_source(seed: Option<u64>) -> RandomPredictionSource {
    match seed {
        Some(seed) => RandomPredictionSource::seeded(seed),
        None => RandomPredictionSource::new(),
    }
}

fn predict_sample<P: PredictionSource>(source: &P) -> Result<PredictionPayload, AppError> {
    source
        .predict(&sample_features())
        .map_err(|err| ServiceError::from(AgentError::from(err)).into())
}

/// Feature set the mock client is exercised with when no table is involved.
fn sample_features() -> UserRecord {
    match json!({ "user_id": 1, "age": 25, "interactions": 15, "purchases": 2 }) {
        serde_json::Value::Object(map) => map,
        _ => UserRecord::new(),
    }
}

fn inspect_lines(users: &UserTable, today: NaiveDate) -> Vec<String> {
    users
        .records()
        .into_iter()
        .map(|(user_id, record)| {
            let report = validate_user_record(record);
            let recency = match record.get("last_active").and_then(|value| value.as_str()) {
                Some(raw) => match days_since_last_active_on(raw, today) {
                    Ok(days) => format!("last active {raw} ({days} days ago)"),
                    Err(err) => err.to_string(),
                },
                None => "no last_active date".to_string(),
            };
            format!("user {user_id}: {}; {recency}", report.summary())
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
