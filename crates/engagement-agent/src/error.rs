use crate::agent::{DateFormatError, ServiceError, UserTableError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    UserTable(UserTableError),
    Service(ServiceError),
    Date(DateFormatError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::UserTable(err) => write!(f, "user table error: {}", err),
            AppError::Service(err) => write!(f, "recommendation error: {}", err),
            AppError::Date(err) => write!(f, "date error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::UserTable(err) => Some(err),
            AppError::Service(err) => Some(err),
            AppError::Date(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Service(ServiceError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Service(ServiceError::InvalidRecord(_)) | AppError::Date(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Service(ServiceError::Agent(_)) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::UserTable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<UserTableError> for AppError {
    fn from(value: UserTableError) -> Self {
        Self::UserTable(value)
    }
}

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<DateFormatError> for AppError {
    fn from(value: DateFormatError) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentError, PredictionError, UserId};
    use std::net::TcpListener;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::from(ServiceError::UserNotFound(UserId(9))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn load_failures_are_internal_errors() {
        let error = AppError::from(UserTableError::MissingUserId { row: 4 });
        assert_eq!(
            error.to_string(),
            "user table error: row 4 has no integer user_id"
        );
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn prediction_failures_map_to_bad_gateway() {
        let error = AppError::from(ServiceError::from(AgentError::from(
            PredictionError::Unavailable("model offline".to_string()),
        )));

        assert_eq!(
            error.to_string(),
            "recommendation error: prediction source unavailable: model offline"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn bind_failures_surface_as_io_errors() {
        let occupied = TcpListener::bind("127.0.0.1:0").expect("ephemeral port");
        let addr = occupied.local_addr().expect("bound address");

        let error = AppError::from(TcpListener::bind(addr).expect_err("port in use"));

        assert!(matches!(error, AppError::Io(_)));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
