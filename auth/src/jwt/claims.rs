use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Carries the identity facts of an authenticated user. `exp` is the
/// registered expiration claim (Unix timestamp, seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Public user identifier
    pub user_uid: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user expiring `expiration_hours` from now.
    ///
    /// # Arguments
    /// * `user_uid` - Public user identifier
    /// * `name` - Display name
    /// * `email` - Email address
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with an absolute `exp`
    pub fn for_user(
        user_uid: impl ToString,
        name: impl ToString,
        email: impl ToString,
        expiration_hours: i64,
    ) -> Self {
        let expiration = Utc::now() + Duration::hours(expiration_hours);
        Self::expiring_at(user_uid, name, email, expiration.timestamp())
    }

    /// Create claims with an explicit expiration timestamp.
    pub fn expiring_at(
        user_uid: impl ToString,
        name: impl ToString,
        email: impl ToString,
        exp: i64,
    ) -> Self {
        Self {
            user_uid: user_uid.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            exp,
        }
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at the instant of its `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
