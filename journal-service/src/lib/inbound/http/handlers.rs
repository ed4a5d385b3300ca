use std::error::Error as _;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;

pub mod current_user;
pub mod health;
pub mod login_with_google;
pub mod login_with_password;
pub mod register;

const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
const UNAUTHORIZED: &str = "UNAUTHORIZED";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport-level failure.
///
/// Each variant maps to one status code and one stable error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    Validation(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    LoginFailed(String),
    Unauthorized(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        use crate::domain::auth::errors::ErrorCode;

        match self {
            ApiError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError.as_str(),
            ),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, VALIDATION_ERROR),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound.as_str()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::EmailExists.as_str()),
            ApiError::LoginFailed(_) => (StatusCode::UNAUTHORIZED, ErrorCode::LoginError.as_str()),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, UNAUTHORIZED),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (message, details) = match self {
            ApiError::Validation(details) => ("payload validation failed".to_string(), details),
            ApiError::InternalServerError(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::LoginFailed(msg)
            | ApiError::Unauthorized(msg) => (msg, Vec::new()),
        };

        (
            status,
            Json(ApiErrorBody::new(message, code, details)),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Internal { .. } => {
                tracing::error!(
                    code = %err.code(),
                    error = %err,
                    cause = ?err.source(),
                    "Authentication failed internally"
                );
                ApiError::InternalServerError(err.to_string())
            }
            AuthError::EmailAlreadyRegistered => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials => ApiError::LoginFailed(err.to_string()),
            AuthError::NotFound { .. } => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: &'static str,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status: &'static str,
    message: String,
    error: ApiErrorData,
}

impl ApiErrorBody {
    pub fn new(message: String, code: &'static str, details: Vec<FieldError>) -> Self {
        Self {
            status: "error",
            message,
            error: ApiErrorData { code, details },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

/// Per-field request validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects field errors while a request body is turned into a command.
#[derive(Debug, Default)]
pub(crate) struct FieldValidator {
    errors: Vec<FieldError>,
}

impl FieldValidator {
    pub(crate) fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "is required"));
        }
    }

    pub(crate) fn email(&mut self, field: &str, value: String) -> Option<EmailAddress> {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "is required"));
            return None;
        }

        EmailAddress::new(value)
            .map_err(|_| self.errors.push(FieldError::new(field, "must be a valid email")))
            .ok()
    }

    pub(crate) fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}
