use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldValidator;
use crate::domain::auth::models::PasswordLoginCommand;
use crate::domain::auth::models::Session;
use crate::inbound::http::router::AppState;

pub async fn login_with_password(
    State(state): State<AppState>,
    body: Result<Json<PasswordLoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .login_with_password(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for password login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordLoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl PasswordLoginRequest {
    fn try_into_command(self) -> Result<PasswordLoginCommand, ApiError> {
        let mut validator = FieldValidator::default();
        let email = validator.email("email", self.email);
        validator.required("password", &self.password);
        validator.finish()?;

        match email {
            Some(email) => Ok(PasswordLoginCommand {
                email,
                password: self.password,
            }),
            None => Err(ApiError::Validation(Vec::new())),
        }
    }
}

/// Login response shared by every login flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub uid: String,
    pub name: String,
    pub token: String,
}

impl From<Session> for LoginResponseData {
    fn from(session: Session) -> Self {
        Self {
            uid: session.uid.to_string(),
            name: session.name,
            token: session.token,
        }
    }
}
