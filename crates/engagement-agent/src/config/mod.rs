use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_USER_DATA: &str = "data/mock_user_data.csv";
const DEFAULT_PREDICTION_TIMEOUT_MS: u64 = 2_000;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub agent: AgentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let user_data = env::var("APP_USER_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_USER_DATA));
        let prediction_timeout = match env::var("APP_PREDICTION_TIMEOUT_MS") {
            Ok(raw) => {
                let millis = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|millis| *millis > 0)
                    .ok_or_else(|| ConfigError::InvalidPredictionTimeout { value: raw.clone() })?;
                Duration::from_millis(millis)
            }
            Err(_) => Duration::from_millis(DEFAULT_PREDICTION_TIMEOUT_MS),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            agent: AgentConfig {
                user_data,
                prediction_timeout,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Inputs for the recommendation agent: where user records live and how long
/// a single prediction may take.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub user_data: PathBuf,
    pub prediction_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            user_data: PathBuf::from(DEFAULT_USER_DATA),
            prediction_timeout: Duration::from_millis(DEFAULT_PREDICTION_TIMEOUT_MS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPredictionTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPredictionTimeout { value } => write!(
                f,
                "APP_PREDICTION_TIMEOUT_MS must be a positive number of milliseconds, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPredictionTimeout { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_lock;
    use std::env;

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_USER_DATA");
        env::remove_var("APP_PREDICTION_TIMEOUT_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_lock();
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.agent.user_data, PathBuf::from("data/mock_user_data.csv"));
        assert_eq!(config.agent.prediction_timeout, Duration::from_secs(2));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_lock();
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_agent_overrides() {
        let _lock = env_lock();
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_USER_DATA", "/srv/users.csv");
        env::set_var("APP_PREDICTION_TIMEOUT_MS", "250");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.agent.user_data, PathBuf::from("/srv/users.csv"));
        assert_eq!(config.agent.prediction_timeout, Duration::from_millis(250));
        reset_env();
    }

    #[test]
    fn rejects_zero_prediction_timeout() {
        let _lock = env_lock();
        reset_env();
        env::set_var("APP_PREDICTION_TIMEOUT_MS", "0");
        let error = AppConfig::load().expect_err("zero timeout rejected");
        assert!(matches!(
            error,
            ConfigError::InvalidPredictionTimeout { ref value } if value == "0"
        ));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_lock();
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }
}
