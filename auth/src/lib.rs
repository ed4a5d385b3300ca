//! Authentication utilities library
//!
//! Provides the token primitives used by the journal service:
//! - Session token issuance and validation (JWT, HS256)
//! - Google ID-token verification
//!
//! The service defines its own capability traits and adapts these implementations,
//! so none of the types here know about users or storage.
//!
//! # Examples
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::for_user("3f1c", "Ada", "ada@example.com", 72);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.email, "ada@example.com");
//! ```
//!
//! ## Google Sign-In
//! ```no_run
//! use std::time::Duration;
//!
//! use auth::GoogleTokenVerifier;
//!
//! # async fn run() -> Result<(), auth::GoogleError> {
//! let verifier = GoogleTokenVerifier::new(auth::GOOGLE_TOKENINFO_URL, Duration::from_secs(5))?;
//! let identity = verifier.verify("<id token>", "my-client-id.apps.googleusercontent.com").await?;
//! println!("{} <{}>", identity.name, identity.email);
//! # Ok(())
//! # }
//! ```

pub mod google;
pub mod jwt;

// Re-export commonly used items
pub use google::GoogleError;
pub use google::GoogleIdentity;
pub use google::GoogleTokenVerifier;
pub use google::GOOGLE_TOKENINFO_URL;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
