use std::fmt;

use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error surfaced by the user store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Error for password hashing capability
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for session token capability
///
/// Every parse failure collapses into `Invalid`; callers never learn which
/// check rejected the token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to issue token: {0}")]
    IssueFailed(String),

    #[error("Invalid token")]
    Invalid,
}

/// Error for third-party identity validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The identity token failed signature, issuer, audience or expiry checks
    #[error("Identity token rejected: {0}")]
    Rejected(String),

    /// The identity provider could not be reached
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Stable taxonomy code carried by every [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InternalError,
    EmailExists,
    LoginError,
    NotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InternalError => "INTERNAL_SERVER_ERROR",
            ErrorCode::EmailExists => "EMAIL_EXIST",
            ErrorCode::LoginError => "LOGIN_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed error taxonomy for authentication flows.
///
/// The `source` of a variant is kept for logging and is never serialized
/// to callers.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("email already registered")]
    EmailAlreadyRegistered,

    /// Unknown email and wrong password are deliberately the same error
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound {
        #[source]
        source: anyhow::Error,
    },
}

impl AuthError {
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AuthError::Internal {
            message,
            source: source.into(),
        }
    }

    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        AuthError::NotFound {
            source: source.into(),
        }
    }

    /// Taxonomy code for the transport mapping layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::Internal { .. } => ErrorCode::InternalError,
            AuthError::EmailAlreadyRegistered => ErrorCode::EmailExists,
            AuthError::InvalidCredentials => ErrorCode::LoginError,
            AuthError::NotFound { .. } => ErrorCode::NotFound,
        }
    }
}
