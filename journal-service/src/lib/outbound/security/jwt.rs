use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::SessionClaims;
use crate::domain::auth::ports::TokenCodec;

/// HS256 session tokens signed with the configured secret.
pub struct JwtTokenCodec {
    handler: JwtHandler,
}

impl JwtTokenCodec {
    /// # Errors
    /// * `EmptySecret` - The signing key is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret)?,
        })
    }

    /// Parse against an explicit clock (Unix seconds).
    pub fn parse_at(&self, token: &str, now: i64) -> Result<SessionClaims, TokenError> {
        self.handler
            .decode_at(token, now)
            .map(SessionClaims::from)
            .map_err(rejected)
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let claims = Claims::expiring_at(
            &claims.user_uid,
            &claims.name,
            &claims.email,
            claims.expires_at,
        );

        self.handler
            .encode(&claims)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    fn parse(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.handler
            .decode(token)
            .map(SessionClaims::from)
            .map_err(rejected)
    }
}

fn rejected(error: JwtError) -> TokenError {
    tracing::debug!(error = %error, "Session token rejected");
    TokenError::Invalid
}

impl From<Claims> for SessionClaims {
    fn from(claims: Claims) -> Self {
        SessionClaims {
            user_uid: claims.user_uid,
            name: claims.name,
            email: claims.email,
            expires_at: claims.exp,
        }
    }
}
