pub mod errors;
pub mod verifier;

pub use errors::GoogleError;
pub use verifier::GoogleIdentity;
pub use verifier::GoogleTokenVerifier;
pub use verifier::GOOGLE_TOKENINFO_URL;
