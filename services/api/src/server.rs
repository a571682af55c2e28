use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_agent_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use engagement_agent::agent::{RandomPredictionSource, RecommendationService, UserRepository, UserTable};
use engagement_agent::config::AppConfig;
use engagement_agent::error::AppError;
use engagement_agent::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(user_data) = args.user_data.take() {
        config.agent.user_data = user_data;
    }

    telemetry::init(&config.telemetry)?;

    let users = Arc::new(UserTable::from_path(&config.agent.user_data)?);
    let user_count = users.len();
    let service = Arc::new(RecommendationService::new(
        users,
        Arc::new(RandomPredictionSource::new()),
        config.agent.prediction_timeout,
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_agent_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        users = user_count,
        timeout_ms = config.agent.prediction_timeout.as_millis() as u64,
        "engagement agent ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
