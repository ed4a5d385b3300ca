use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::IdentityError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::masked_email;
use crate::domain::auth::models::GoogleLoginCommand;
use crate::domain::auth::models::IdentityPayload;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::PasswordLoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Registration;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::SessionClaims;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityValidator;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::ports::TokenCodec;
use crate::domain::auth::ports::UserRepository;

const LOOKUP_FAILED: &str = "failed to get user";
const CREATE_FAILED: &str = "failed to create user";
const HASH_FAILED: &str = "failed to hash password";
const TOKEN_FAILED: &str = "failed to create token";
const IDENTITY_FAILED: &str = "failed to validate identity token";

/// Construction-time settings for [`AuthService`].
///
/// The signing key is not here: it belongs to the [`TokenCodec`] handed to
/// the service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Expected audience (OAuth client id) of third-party identity tokens
    pub audience: String,
    /// Lifetime of issued session tokens
    pub token_validity: chrono::Duration,
    /// Upper bound for each store or identity-provider call
    pub call_timeout: Duration,
}

impl AuthConfig {
    pub const DEFAULT_TOKEN_VALIDITY_HOURS: i64 = 72;
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(audience: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            token_validity: chrono::Duration::hours(Self::DEFAULT_TOKEN_VALIDITY_HOURS),
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_token_validity(mut self, token_validity: chrono::Duration) -> Self {
        self.token_validity = token_validity;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}

/// Domain service implementation for registration and login.
///
/// Holds no per-request state; one instance serves all requests concurrently.
pub struct AuthService<UR, PH, TC, IV>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TC: TokenCodec,
    IV: IdentityValidator,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
    token_codec: Arc<TC>,
    identity_validator: Arc<IV>,
    config: AuthConfig,
}

impl<UR, PH, TC, IV> AuthService<UR, PH, TC, IV>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TC: TokenCodec,
    IV: IdentityValidator,
{
    /// Create a new auth service with injected capabilities.
    ///
    /// # Arguments
    /// * `repository` - User store
    /// * `password_hasher` - Password hashing capability
    /// * `token_codec` - Session token capability (owns the signing key)
    /// * `identity_validator` - Third-party identity capability
    /// * `config` - Audience, token validity and call timeout
    pub fn new(
        repository: Arc<UR>,
        password_hasher: Arc<PH>,
        token_codec: Arc<TC>,
        identity_validator: Arc<IV>,
        config: AuthConfig,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_codec,
            identity_validator,
            config,
        }
    }

    /// Run a collaborator call under the configured deadline.
    async fn within_deadline<F, T>(&self, operation: &'static str, call: F) -> Result<T, AuthError>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.config.call_timeout, call)
            .await
            .map_err(|elapsed| {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.call_timeout.as_millis() as u64,
                    "Collaborator call timed out"
                );
                AuthError::internal(operation, elapsed)
            })
    }

    /// Existence check: found, not found, or internal error.
    async fn find_user(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.within_deadline(LOOKUP_FAILED, self.repository.find_by_email(email))
            .await?
            .map_err(|e| {
                tracing::error!(error = %e, email = %masked_email(email), "User lookup failed");
                AuthError::internal(LOOKUP_FAILED, e)
            })
    }

    async fn create_user(&self, user: NewUser) -> Result<Result<User, RepositoryError>, AuthError> {
        self.within_deadline(CREATE_FAILED, self.repository.create(user))
            .await
    }

    /// Create the user behind a first Google sign-in.
    ///
    /// A uniqueness violation means a concurrent sign-in won the race, so the
    /// stored user is fetched and reused.
    async fn create_identity_user(&self, identity: IdentityPayload) -> Result<User, AuthError> {
        let email = identity.email.clone();
        let external_id = identity.external_id.clone();
        let email_verified = identity.email_verified;

        match self.create_user(NewUser::from_identity(identity)).await? {
            Ok(user) => {
                tracing::info!(user_uid = %user.uid, "User created from Google identity");
                Ok(user)
            }
            Err(RepositoryError::EmailAlreadyExists(_)) => {
                tracing::info!(
                    email = %masked_email(&email),
                    "User created concurrently, re-fetching"
                );
                let user = self.find_user(&email).await?.ok_or_else(|| {
                    AuthError::internal(
                        CREATE_FAILED,
                        anyhow::anyhow!("user missing after uniqueness violation"),
                    )
                })?;
                ensure_linkable(&user, &external_id, email_verified)?;
                Ok(user)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create user from Google identity");
                Err(AuthError::internal(CREATE_FAILED, e))
            }
        }
    }

    fn issue_session(&self, user: &User) -> Result<Session, AuthError> {
        let expires_at = Utc::now() + self.config.token_validity;
        let claims = SessionClaims {
            user_uid: user.uid.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            expires_at: expires_at.timestamp(),
        };

        let token = self.token_codec.issue(&claims).map_err(|e| {
            tracing::error!(error = %e, user_uid = %user.uid, "Token issuance failed");
            AuthError::internal(TOKEN_FAILED, e)
        })?;

        Ok(Session {
            uid: user.uid,
            name: user.name.clone(),
            token,
        })
    }
}

/// An existing account only signs in through an external identity whose email
/// the provider has verified, unless the account was created by that identity.
fn ensure_linkable(user: &User, external_id: &str, email_verified: bool) -> Result<(), AuthError> {
    if email_verified || user.google_id.as_deref() == Some(external_id) {
        return Ok(());
    }

    tracing::warn!(
        user_uid = %user.uid,
        "Refusing to link unverified Google email to existing account"
    );
    Err(AuthError::not_found(anyhow::anyhow!(
        "unverified email cannot be linked to an existing account"
    )))
}

#[async_trait]
impl<UR, PH, TC, IV> AuthServicePort for AuthService<UR, PH, TC, IV>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TC: TokenCodec,
    IV: IdentityValidator,
{
    async fn register(&self, command: RegisterCommand) -> Result<Registration, AuthError> {
        if self.find_user(command.email.as_str()).await?.is_some() {
            tracing::warn!(
                email = %masked_email(command.email.as_str()),
                "Registration rejected, email already registered"
            );
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = self.password_hasher.hash(&command.password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthError::internal(HASH_FAILED, e)
        })?;

        let new_user =
            NewUser::with_password(command.name, command.email.into_string(), password_hash);

        let user = match self.create_user(new_user).await? {
            Ok(user) => user,
            Err(RepositoryError::EmailAlreadyExists(email)) => {
                tracing::warn!(
                    email = %masked_email(&email),
                    "Registration lost a race, email already registered"
                );
                return Err(AuthError::EmailAlreadyRegistered);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist registered user");
                return Err(AuthError::internal(CREATE_FAILED, e));
            }
        };

        tracing::info!(user_uid = %user.uid, "User registered");

        Ok(Registration {
            uid: user.uid,
            email: user.email,
            name: user.name,
        })
    }

    async fn login_with_password(
        &self,
        command: PasswordLoginCommand,
    ) -> Result<Session, AuthError> {
        let email = command.email.as_str();

        let Some(user) = self.find_user(email).await? else {
            tracing::warn!(email = %masked_email(email), "Login failed, unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let Some(password_hash) = user.password_hash.as_deref() else {
            tracing::warn!(user_uid = %user.uid, "Login failed, account has no password");
            return Err(AuthError::InvalidCredentials);
        };

        match self.password_hasher.verify(&command.password, password_hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_uid = %user.uid, "Login failed, wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(error = %e, user_uid = %user.uid, "Stored password hash unusable");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let session = self.issue_session(&user)?;
        tracing::info!(user_uid = %user.uid, method = "password", "User logged in");

        Ok(session)
    }

    async fn login_with_google(&self, command: GoogleLoginCommand) -> Result<Session, AuthError> {
        let validation = self.within_deadline(
            IDENTITY_FAILED,
            self.identity_validator
                .validate(&command.id_token, &self.config.audience),
        );

        let identity = match validation.await? {
            Ok(identity) => identity,
            Err(IdentityError::Unavailable(reason)) => {
                tracing::error!(reason = %reason, "Identity provider unavailable");
                return Err(AuthError::internal(
                    IDENTITY_FAILED,
                    IdentityError::Unavailable(reason),
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Google ID token rejected");
                return Err(AuthError::not_found(e));
            }
        };

        if identity.email.trim().is_empty() {
            tracing::warn!("Google identity carries no email");
            return Err(AuthError::not_found(anyhow::anyhow!(
                "external identity could not be established"
            )));
        }

        let user = match self.find_user(&identity.email).await? {
            Some(user) => {
                ensure_linkable(&user, &identity.external_id, identity.email_verified)?;
                user
            }
            None => self.create_identity_user(identity).await?,
        };

        let session = self.issue_session(&user)?;
        tracing::info!(user_uid = %user.uid, method = "google", "User logged in");

        Ok(session)
    }
}
