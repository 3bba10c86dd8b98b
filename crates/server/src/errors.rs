use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;
use service::token::TokenError;

/// Errors surfaced over the wire. Every variant maps to a fixed status and
/// a `{"message": ...}` body; storage detail never reaches clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("forbidden access")]
    Forbidden,
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Forbidden => ApiError::Forbidden,
            ServiceError::Validation(msg) => ApiError::BadRequest(msg),
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage operation failed");
                ApiError::Internal
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidClaims => {
                ApiError::BadRequest("claims must be a JSON object".into())
            }
            TokenError::Invalid => ApiError::Unauthorized,
            TokenError::Encode(msg) => {
                error!(error = %msg, "token encoding failed");
                ApiError::Internal
            }
        }
    }
}
