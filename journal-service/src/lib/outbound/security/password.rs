use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PhcError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier as _;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use crate::domain::auth::errors::CredentialError;
use crate::domain::auth::ports::PasswordHasher;

/// Argon2id credential hashing.
///
/// Digests are PHC strings carrying their own salt and cost parameters, so
/// verification follows the parameters a digest was created with even after
/// the configured cost changes.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with the library's recommended Argon2id cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit memory (KiB), iteration and lane costs.
    ///
    /// # Errors
    /// * `HashingFailed` - The cost combination is out of range
    pub fn with_cost(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, CredentialError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let digest = PasswordHash::new(hash)
            .map_err(|e| CredentialError::VerificationFailed(format!("unparseable digest: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &digest) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => Err(CredentialError::VerificationFailed(e.to_string())),
        }
    }
}
