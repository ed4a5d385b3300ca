use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::CredentialError;
use crate::domain::auth::errors::IdentityError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::GoogleLoginCommand;
use crate::domain::auth::models::IdentityPayload;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::PasswordLoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Registration;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::SessionClaims;
use crate::domain::auth::models::User;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a user with a password credential.
    ///
    /// # Arguments
    /// * `command` - Name, validated email and plaintext password
    ///
    /// # Returns
    /// Public id, email and name of the new user (no token is issued)
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - A user with this email exists
    /// * `Internal` - Lookup, hashing or persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<Registration, AuthError>;

    /// Authenticate with email and password.
    ///
    /// # Returns
    /// Public id, name and a signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or no password credential
    /// * `Internal` - Lookup or token issuance failed
    async fn login_with_password(
        &self,
        command: PasswordLoginCommand,
    ) -> Result<Session, AuthError>;

    /// Authenticate with a Google ID token, creating the user on first sign-in.
    ///
    /// # Returns
    /// Public id, name and a signed session token
    ///
    /// # Errors
    /// * `NotFound` - The ID token was rejected
    /// * `Internal` - Provider unreachable, lookup, creation or token issuance failed
    async fn login_with_google(&self, command: GoogleLoginCommand) -> Result<Session, AuthError>;
}

/// Persistence operations for users.
///
/// Implementations must enforce email uniqueness themselves; the service's
/// check-then-create sequence is not atomic.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Persist a new user in a single atomic operation.
    ///
    /// # Returns
    /// Stored user with id, public id and timestamps assigned
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
}

/// One-way, salted password hashing.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password. Failure is an internal error.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Check a plaintext password against a stored digest.
    ///
    /// # Returns
    /// True on match, false on mismatch
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored digest is unusable
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Signs and parses bearer session tokens.
pub trait TokenCodec: Send + Sync + 'static {
    /// Produce a signed token carrying the claims.
    fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError>;

    /// Verify a token and reconstruct its claims.
    ///
    /// # Errors
    /// * `Invalid` - Wrong algorithm, bad or missing signature, malformed, or expired
    fn parse(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

/// Validates third-party identity tokens.
#[async_trait]
pub trait IdentityValidator: Send + Sync + 'static {
    /// Verify `id_token` was issued for `audience`.
    ///
    /// # Errors
    /// * `Rejected` - Signature, issuer, audience or expiry check failed
    /// * `Unavailable` - The provider could not be reached
    async fn validate(
        &self,
        id_token: &str,
        audience: &str,
    ) -> Result<IdentityPayload, IdentityError>;
}
