use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use super::errors::GoogleError;

/// Google's token introspection endpoint.
///
/// Docs: https://developers.google.com/identity/sign-in/web/backend-auth
pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Identity extracted from a verified Google ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    /// Google account identifier (`sub`)
    pub subject: String,
    /// Email address, empty when the token carries none
    pub email: String,
    /// Whether Google has verified `email`
    pub email_verified: bool,
    /// Display name, empty when the token carries none
    pub name: String,
}

/// Verifies Google ID tokens through the `tokeninfo` endpoint.
///
/// Google checks the token signature; the verifier then enforces issuer,
/// audience and expiry locally.
pub struct GoogleTokenVerifier {
    http: reqwest::Client,
    tokeninfo_url: String,
}

impl GoogleTokenVerifier {
    /// Create a verifier.
    ///
    /// # Arguments
    /// * `tokeninfo_url` - Introspection endpoint, normally [`GOOGLE_TOKENINFO_URL`]
    /// * `timeout` - Upper bound for a single verification request
    ///
    /// # Errors
    /// * `ClientBuild` - HTTP client could not be constructed
    pub fn new(tokeninfo_url: impl Into<String>, timeout: Duration) -> Result<Self, GoogleError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GoogleError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            tokeninfo_url: tokeninfo_url.into(),
        })
    }

    /// Verify an ID token issued for `audience`.
    ///
    /// # Arguments
    /// * `id_token` - Raw Google ID token
    /// * `audience` - Expected OAuth client id
    ///
    /// # Returns
    /// Identity carried by the token
    ///
    /// # Errors
    /// * `Transport` - Google could not be reached
    /// * `Rejected` - Google refused the token (bad signature, expired, malformed)
    /// * `Malformed` - Response body is not JSON
    /// * `AudienceMismatch`, `IssuerMismatch`, `TokenExpired`, `MissingClaim` - Local checks failed
    pub async fn verify(
        &self,
        id_token: &str,
        audience: &str,
    ) -> Result<GoogleIdentity, GoogleError> {
        tracing::debug!("Validating Google ID token with tokeninfo endpoint");

        let response = self
            .http
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| GoogleError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(http_status = %status, "Google tokeninfo rejected the ID token");
            return Err(GoogleError::Rejected(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GoogleError::Malformed(e.to_string()))?;

        identity_from_token_info(&body, audience, Utc::now().timestamp())
    }
}

/// Apply the local checks to a `tokeninfo` response body.
///
/// `tokeninfo` encodes numeric and boolean claims as strings, so `exp` and
/// `email_verified` are accepted in either form.
pub(crate) fn identity_from_token_info(
    body: &Value,
    audience: &str,
    now: i64,
) -> Result<GoogleIdentity, GoogleError> {
    match string_claim(body, "aud") {
        Some(aud) if aud == audience => {}
        _ => return Err(GoogleError::AudienceMismatch),
    }

    let issuer = string_claim(body, "iss").unwrap_or_default();
    if !GOOGLE_ISSUERS.contains(&issuer) {
        return Err(GoogleError::IssuerMismatch(issuer.to_string()));
    }

    let exp = body
        .get("exp")
        .and_then(|v| v.as_i64().or_else(|| v.as_str()?.parse().ok()))
        .ok_or(GoogleError::MissingClaim("exp"))?;
    if now >= exp {
        return Err(GoogleError::TokenExpired);
    }

    let subject = string_claim(body, "sub")
        .filter(|sub| !sub.is_empty())
        .ok_or(GoogleError::MissingClaim("sub"))?;

    Ok(GoogleIdentity {
        subject: subject.to_string(),
        email: string_claim(body, "email").unwrap_or_default().to_string(),
        email_verified: body
            .get("email_verified")
            .map(|v| v.as_bool().unwrap_or_else(|| v.as_str() == Some("true")))
            .unwrap_or(false),
        name: string_claim(body, "name").unwrap_or_default().to_string(),
    })
}

fn string_claim<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}
