use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error type for the JSON API. Storage and hashing failures are logged here
/// and rendered with a generic message.
#[derive(Debug, Error)]
pub enum JsonApiError {
    #[error("{message}")]
    BadRequest { message: String, field: Option<String> },
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not authorized")]
    NotAuthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("internal error")]
    Internal,
}

impl JsonApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn employee_not_found() -> Self { Self::NotFound("employee not found".into()) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let field = match &self {
            Self::BadRequest { field, .. } => field.clone(),
            _ => None,
        };
        let body = ErrorBody { error: self.to_string(), field };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation { field, message } => Self::BadRequest { message, field: Some(field) },
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Db(msg) => {
                error!(err = %msg, "storage failure");
                Self::Internal
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => Self::InvalidCredentials,
            AuthError::Validation(message) => Self::BadRequest { message, field: Some("password".into()) },
            other => {
                error!(code = other.code(), err = %other, "auth failure");
                Self::Internal
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(err = %e.body_text(), "rejected request body");
        Self::BadRequest { message: "invalid request body".into(), field: None }
    }
}
