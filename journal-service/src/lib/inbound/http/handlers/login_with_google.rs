use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login_with_password::LoginResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::FieldValidator;
use crate::domain::auth::models::GoogleLoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login_with_google(
    State(state): State<AppState>,
    body: Result<Json<GoogleLoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .login_with_google(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for Google login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    id_token: String,
}

impl GoogleLoginRequest {
    fn try_into_command(self) -> Result<GoogleLoginCommand, ApiError> {
        let mut validator = FieldValidator::default();
        validator.required("id_token", &self.id_token);
        validator.finish()?;

        Ok(GoogleLoginCommand {
            id_token: self.id_token,
        })
    }
}
