use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity carried by the caller's session token
pub async fn current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<CurrentUserResponseData> {
    ApiSuccess::new(StatusCode::OK, user.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub expires_at: i64,
}

impl From<AuthenticatedUser> for CurrentUserResponseData {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            uid: user.uid.to_string(),
            name: user.name,
            email: user.email,
            expires_at: user.expires_at,
        }
    }
}
