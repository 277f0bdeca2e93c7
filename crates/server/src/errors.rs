use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::MessageResponse;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Failure rendered as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::Decode(_) => StatusCode::BAD_REQUEST,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(r) if r.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, "请求体超过大小限制。")
            }
            JsonRejection::BytesRejection(r) => {
                Self::new(r.status(), format!("读取请求体失败: {}", r.body_text()))
            }
            // wrong field types are plain client errors, not 422
            JsonRejection::JsonDataError(r) => {
                Self::new(StatusCode::BAD_REQUEST, format!("请求字段类型错误: {}", r.body_text()))
            }
            other => Self::new(
                other.status(),
                format!("请求体不是有效的 JSON: {}", other.body_text()),
            ),
        }
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), format!("无效的路径参数: {}", rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        } else {
            warn!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(MessageResponse::failed(self.message))).into_response()
    }
}
