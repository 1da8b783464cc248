use std::sync::Arc;
use std::time::Duration;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::warn;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::context::Context;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(catalog_service: Arc<dyn CatalogService>, request_timeout: Duration) -> AppState {
        AppState {
            catalog_service,
            request_timeout,
        }
    }

    // every request gets its own deadline
    pub fn request_context(&self) -> Context {
        Context::with_timeout(self.request_timeout)
    }
}

// ServerError renders as {"error": {"code": <status>, "message": <text>}}
#[derive(Debug)]
pub struct ServerError {
    pub status: StatusCode,
    pub message: String,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        ServerError {
            status,
            message: message.to_string(),
        }
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.status.as_u16(),
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Cancelled { .. } => StatusCode::GATEWAY_TIMEOUT,
            CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::DuplicateKey { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = ?err, "request failed");
        }
        ServerError::new(status, err.message())
    }
}
