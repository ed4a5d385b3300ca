use std::time::Duration;

use async_trait::async_trait;
use auth::GoogleError;
use auth::GoogleTokenVerifier;

use crate::domain::auth::errors::IdentityError;
use crate::domain::auth::models::IdentityPayload;
use crate::domain::auth::ports::IdentityValidator;

/// Google Sign-In validation via the `tokeninfo` endpoint.
pub struct GoogleIdentityValidator {
    verifier: GoogleTokenVerifier,
}

impl GoogleIdentityValidator {
    pub fn new(tokeninfo_url: &str, timeout: Duration) -> Result<Self, GoogleError> {
        Ok(Self {
            verifier: GoogleTokenVerifier::new(tokeninfo_url, timeout)?,
        })
    }
}

#[async_trait]
impl IdentityValidator for GoogleIdentityValidator {
    async fn validate(
        &self,
        id_token: &str,
        audience: &str,
    ) -> Result<IdentityPayload, IdentityError> {
        let identity = self
            .verifier
            .verify(id_token, audience)
            .await
            .map_err(classify)?;

        Ok(IdentityPayload {
            external_id: identity.subject,
            email: identity.email,
            email_verified: identity.email_verified,
            name: identity.name,
        })
    }
}

/// Outages are distinguished from token rejections; everything about the
/// token itself is a rejection.
fn classify(error: GoogleError) -> IdentityError {
    match error {
        GoogleError::ClientBuild(_) | GoogleError::Transport(_) => {
            IdentityError::Unavailable(error.to_string())
        }
        GoogleError::Rejected(status) if status >= 500 => {
            IdentityError::Unavailable(error.to_string())
        }
        _ => IdentityError::Rejected(error.to_string()),
    }
}
