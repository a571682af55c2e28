use chrono::NaiveDate;
use engagement_agent::agent::{self, UserTable};
use engagement_agent::config::AppConfig;
use engagement_agent::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// clap value parser sharing the agent's strict `YYYY-MM-DD` rule.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    agent::parse_date(raw).map_err(|err| err.to_string())
}

/// Loads the user table from an explicit path or the configured default.
pub(crate) fn load_user_table(user_data: Option<PathBuf>) -> Result<UserTable, AppError> {
    let path = match user_data {
        Some(path) => path,
        None => AppConfig::load()?.agent.user_data,
    };
    Ok(UserTable::from_path(path)?)
}
