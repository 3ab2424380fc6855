//! Request-level error type and its JSON rendering.
//!
//! Every pipeline stage and handler fails with [`AppError`]; the variant decides the
//! status code and the stable `code` string clients can match on.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// Any failure of the bearer credential. Deliberately carries no detail about
    /// which check failed.
    #[error("invalid or missing authentication token")]
    InvalidCredential,
    #[error("you must be authenticated to access this resource")]
    AuthenticationRequired,
    #[error("your user account must be activated to access this resource")]
    InactiveAccount,
    #[error("your user account doesn't have the necessary permissions to access this resource")]
    Forbidden,
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidCredential | AppError::AuthenticationRequired => {
                StatusCode::UNAUTHORIZED
            }
            AppError::InactiveAccount | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code placed in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidCredential => "invalid_authentication_token",
            AppError::AuthenticationRequired => "authentication_required",
            AppError::InactiveAccount => "inactive_account",
            AppError::Forbidden => "not_permitted",
            AppError::RateLimited => "rate_limit_exceeded",
            AppError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            AppError::NotFound { message, details } => (message, details),
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "internal server error");
                (
                    "the server encountered a problem and could not process your request"
                        .to_string(),
                    json!({}),
                )
            }
            other => (other.to_string(), json!({})),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if code == "invalid_authentication_token" {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
