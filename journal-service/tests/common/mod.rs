#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use journal_service::domain::auth::errors::IdentityError;
use journal_service::domain::auth::errors::RepositoryError;
use journal_service::domain::auth::models::IdentityPayload;
use journal_service::domain::auth::models::NewUser;
use journal_service::domain::auth::models::User;
use journal_service::domain::auth::models::UserId;
use journal_service::domain::auth::ports::UserRepository;
use journal_service::domain::auth::service::AuthConfig;
use journal_service::domain::auth::service::AuthService;
use journal_service::inbound::http::router::create_router;
use journal_service::outbound::security::Argon2PasswordHasher;
use journal_service::outbound::security::JwtTokenCodec;
use uuid::Uuid;

pub const AUDIENCE: &str = "journal-test-client";
pub const SECRET: &[u8] = b"integration-test-secret";

pub const ADA_GOOGLE_TOKEN: &str = "google-id-token-ada";
pub const GRACE_GOOGLE_TOKEN: &str = "google-id-token-grace";
pub const OUTAGE_GOOGLE_TOKEN: &str = "google-id-token-outage";
pub const ADA_UNVERIFIED_GOOGLE_TOKEN: &str = "google-id-token-ada-unverified";
pub const ALICE_EMAILLESS_GOOGLE_TOKEN: &str = "google-id-token-alice-no-email";
pub const MALLORY_EMAILLESS_GOOGLE_TOKEN: &str = "google-id-token-mallory-no-email";

/// User store keeping rows in memory, unique on email like the real table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.get(email))
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::EmailAlreadyExists(user.email));
        }

        let now = Utc::now();
        let stored = User {
            id: users.len() as i64 + 1,
            uid: UserId(Uuid::new_v4()),
            google_id: user.google_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(stored.clone());

        Ok(stored)
    }
}

/// User store whose every call fails with a driver-level error.
pub struct FailingUserRepository;

pub const DRIVER_ERROR: &str = "connection refused: postgresql://journal:hunter2@db/journal";

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::DatabaseError(DRIVER_ERROR.to_string()))
    }

    async fn create(&self, _user: NewUser) -> Result<User, RepositoryError> {
        Err(RepositoryError::DatabaseError(DRIVER_ERROR.to_string()))
    }
}

fn identity(external_id: &str, email: &str, email_verified: bool, name: &str) -> IdentityPayload {
    IdentityPayload {
        external_id: external_id.to_string(),
        email: email.to_string(),
        email_verified,
        name: name.to_string(),
    }
}

/// Identity provider answering from a fixed token table.
pub struct FakeIdentityValidator {
    identities: HashMap<&'static str, IdentityPayload>,
}

impl Default for FakeIdentityValidator {
    fn default() -> Self {
        let identities = HashMap::from([
            (
                ADA_GOOGLE_TOKEN,
                identity("google-sub-ada", "ada@example.com", true, "Ada"),
            ),
            (
                GRACE_GOOGLE_TOKEN,
                identity("google-sub-grace", "grace@example.com", true, "Grace"),
            ),
            (
                ADA_UNVERIFIED_GOOGLE_TOKEN,
                identity("google-sub-impostor", "ada@example.com", false, "Not Ada"),
            ),
            (
                ALICE_EMAILLESS_GOOGLE_TOKEN,
                identity("google-sub-alice", "", false, "Alice"),
            ),
            (
                MALLORY_EMAILLESS_GOOGLE_TOKEN,
                identity("google-sub-mallory", "", false, "Mallory"),
            ),
        ]);

        Self { identities }
    }
}

#[async_trait]
impl journal_service::domain::auth::ports::IdentityValidator for FakeIdentityValidator {
    async fn validate(
        &self,
        id_token: &str,
        audience: &str,
    ) -> Result<IdentityPayload, IdentityError> {
        if id_token == OUTAGE_GOOGLE_TOKEN {
            return Err(IdentityError::Unavailable("provider down".to_string()));
        }
        if audience != AUDIENCE {
            return Err(IdentityError::Rejected("audience mismatch".to_string()));
        }

        self.identities
            .get(id_token)
            .cloned()
            .ok_or_else(|| IdentityError::Rejected("unknown token".to_string()))
    }
}

pub type TestAuthService<UR> =
    AuthService<UR, Argon2PasswordHasher, JwtTokenCodec, FakeIdentityValidator>;

/// Service wired with real hashing and token capabilities over the given store.
pub struct TestApp<UR: UserRepository> {
    pub service: Arc<TestAuthService<UR>>,
    pub repository: Arc<UR>,
    pub token_codec: Arc<JwtTokenCodec>,
}

impl<UR: UserRepository> TestApp<UR> {
    pub fn with_repository(repository: UR) -> Self {
        let repository = Arc::new(repository);
        let token_codec = Arc::new(JwtTokenCodec::new(SECRET).unwrap());

        let service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::clone(&token_codec),
            Arc::new(FakeIdentityValidator::default()),
            AuthConfig::new(AUDIENCE),
        ));

        Self {
            service,
            repository,
            token_codec,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.service.clone(), self.token_codec.clone())
    }
}

pub fn test_app() -> TestApp<InMemoryUserRepository> {
    TestApp::with_repository(InMemoryUserRepository::default())
}
