//! Authentication ports.

use uuid::Uuid;

/// Claims carried by a verified identity artifact.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Identity artifact issuer and verifier.
///
/// A single strategy is active at a time: issue an artifact for a user id,
/// verify an inbound artifact back to that user id, with a bounded lifetime.
pub trait TokenService: Send + Sync {
    /// Issue an identity artifact for a user.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify an inbound artifact and decode its claims.
    fn verify(&self, artifact: &str) -> Result<TokenClaims, AuthError>;

    /// Artifact lifetime in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
