//! Authentication ports - token and password services.

use uuid::Uuid;

use crate::domain::User;

/// Claims decoded from an access token.
#[derive(Debug, Clone)]
pub struct AccessClaims {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub exp: i64,
}

/// Claims decoded from a refresh token. `jti` identifies the token itself
/// for blacklisting.
#[derive(Debug, Clone)]
pub struct RefreshClaims {
    pub user_id: Uuid,
    pub jti: Uuid,
    pub exp: i64,
}

/// Token service for the paired access/refresh scheme.
///
/// Access tokens are short-lived and handed to the client in the response
/// body; refresh tokens live longer and travel only in an HTTP-only cookie.
/// Either kind is rejected when presented in the other's role.
pub trait TokenService: Send + Sync {
    fn issue_access_token(&self, user: &User) -> Result<String, AuthError>;

    fn issue_refresh_token(&self, user: &User) -> Result<String, AuthError>;

    fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AuthError>;

    fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError>;

    /// Lifetime of a refresh token, also used as the cookie max-age.
    fn refresh_max_age_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("invalid token")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("no refresh token")]
    MissingRefreshToken,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
