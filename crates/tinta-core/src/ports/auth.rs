//! Authentication ports: password hashing and the signed session cookie.

use uuid::Uuid;

/// Identity carried by the session cookie between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Codec for the signed session cookie. Issuing and decoding are pure
/// CPU-bound operations, so the trait is synchronous.
pub trait SessionCodec: Send + Sync {
    /// Sign the claims into an opaque cookie value.
    fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError>;

    /// Verify the signature and recover the claims.
    fn decode(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("No session cookie present")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
