use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UserIdError;

/// User record.
///
/// `id` is the store's internal key; `uid` is the public identifier used in
/// every external reference. A user may carry a password credential, a
/// Google identity, or both, depending on how it signed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub uid: UserId,
    pub google_id: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public user identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User about to be persisted; the store assigns ids and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub google_id: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    /// User signing up with a password.
    pub fn with_password(name: String, email: String, password_hash: String) -> Self {
        Self {
            google_id: None,
            name,
            email,
            password_hash: Some(password_hash),
        }
    }

    /// User created on first Google sign-in.
    pub fn from_identity(identity: IdentityPayload) -> Self {
        Self {
            google_id: Some(identity.external_id),
            name: identity.name,
            email: identity.email,
            password_hash: None,
        }
    }
}

/// Identity established by a third-party provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPayload {
    pub external_id: String,
    /// Empty when the provider disclosed no email
    pub email: String,
    pub email_verified: bool,
    pub name: String,
}

/// Identity facts embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_uid: String,
    pub name: String,
    pub email: String,
    /// Absolute expiry, Unix timestamp in seconds
    pub expires_at: i64,
}

/// Command to register a user with a password
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(name: String, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct PasswordLoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Command to log in with a Google ID token
#[derive(Debug)]
pub struct GoogleLoginCommand {
    pub id_token: String,
}

/// Outcome of a successful registration. No token is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub uid: UserId,
    pub email: String,
    pub name: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: UserId,
    pub name: String,
    pub token: String,
}

/// Mask an email for log output, keeping the first character and domain.
pub fn masked_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("ada@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_user_id_round_trips_through_display() {
        let id = UserId(Uuid::new_v4());
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("nope").is_err());
    }

    #[test]
    fn test_new_user_from_identity_has_no_password() {
        let user = NewUser::from_identity(IdentityPayload {
            external_id: "g-1".to_string(),
            email: "ada@example.com".to_string(),
            email_verified: true,
            name: "Ada".to_string(),
        });

        assert_eq!(user.google_id.as_deref(), Some("g-1"));
        assert!(user.password_hash.is_none());
    }

    #[test]
    fn test_masked_email() {
        assert_eq!(masked_email("ada@example.com"), "a***@example.com");
        assert_eq!(masked_email("élodie@example.com"), "é***@example.com");
        assert_eq!(masked_email(""), "***@***");
        assert_eq!(masked_email("@example.com"), "***@***");
    }
}
