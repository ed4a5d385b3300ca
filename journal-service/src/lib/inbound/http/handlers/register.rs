use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldValidator;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Registration;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let mut validator = FieldValidator::default();
        validator.required("name", &self.name);
        let email = validator.email("email", self.email);
        validator.required("password", &self.password);
        validator.finish()?;

        match email {
            Some(email) => Ok(RegisterCommand::new(self.name, email, self.password)),
            None => Err(ApiError::Validation(Vec::new())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub uid: String,
    pub email: String,
    pub name: String,
}

impl From<Registration> for RegisterResponseData {
    fn from(registration: Registration) -> Self {
        Self {
            uid: registration.uid.to_string(),
            email: registration.email,
            name: registration.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::handlers::FieldError;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request_becomes_command() {
        let command = request("Ada", "ada@example.com", "pw1").try_into_command().unwrap();

        assert_eq!(command.name, "Ada");
        assert_eq!(command.email.as_str(), "ada@example.com");
        assert_eq!(command.password, "pw1");
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let err = request("", "", "").try_into_command().unwrap_err();

        assert_eq!(
            err,
            ApiError::Validation(vec![
                FieldError::new("name", "is required"),
                FieldError::new("email", "is required"),
                FieldError::new("password", "is required"),
            ])
        );
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let err = request("Ada", "ada-at-example", "pw1").try_into_command().unwrap_err();

        assert_eq!(
            err,
            ApiError::Validation(vec![FieldError::new("email", "must be a valid email")])
        );
    }
}
