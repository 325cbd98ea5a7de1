use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body: `{"error": <kind>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Request", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = ?self.message, "request failed");
        } else {
            warn!(status = %self.status, message = ?self.message, "request rejected");
        }
        let body = serde_json::json!({"error": self.error, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidRequest(_) => JsonApiError::invalid_request(e.to_string()),
            ServiceError::NotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Repository(_) => JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string())),
        }
    }
}

// 框架层解析失败（类型错误、未知枚举值、负数分页等）统一视为 400
impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self { JsonApiError::invalid_request(e.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self { JsonApiError::invalid_request(e.body_text()) }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self { JsonApiError::invalid_request(e.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let e: JsonApiError = ServiceError::InvalidRequest("speed".into()).into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        let e: JsonApiError = ServiceError::not_found("ship", 9).into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        let e: JsonApiError = ServiceError::Repository("down".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_carries_kind_and_message() {
        let resp = JsonApiError::invalid_request("bad id").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
