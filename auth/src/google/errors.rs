use thiserror::Error;

/// Error type for Google ID-token verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GoogleError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Token info request failed: {0}")]
    Transport(String),

    #[error("Token rejected by Google (status {0})")]
    Rejected(u16),

    #[error("Malformed token info response: {0}")]
    Malformed(String),

    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("Token issuer is not Google: {0}")]
    IssuerMismatch(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Missing required claim: {0}")]
    MissingClaim(&'static str),
}
