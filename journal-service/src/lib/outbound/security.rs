//! Capability adapters backed by the `auth` library.

pub mod google;
pub mod jwt;
pub mod password;

pub use google::GoogleIdentityValidator;
pub use jwt::JwtTokenCodec;
pub use password::Argon2PasswordHasher;
