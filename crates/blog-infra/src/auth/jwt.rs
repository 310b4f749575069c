//! JWT token service - paired access/refresh token issuance.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::User;
use blog_core::ports::{AccessClaims, AuthError, RefreshClaims, TokenService};

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_minutes: i64,
    /// Refresh token lifetime in days. Doubles as the cookie max-age.
    pub refresh_days: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_minutes: 15,
            refresh_days: 5,
            issuer: "blog-api".to_string(),
        }
    }
}

/// Wire format of access token claims.
#[derive(Debug, Serialize, Deserialize)]
struct AccessWire {
    sub: String,
    username: String,
    is_staff: bool,
    token_type: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// Wire format of refresh token claims. `jti` identifies the token for the
/// blacklist.
#[derive(Debug, Serialize, Deserialize)]
struct RefreshWire {
    sub: String,
    jti: String,
    token_type: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        // Warn if using default secret in production
        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let config = JwtConfig {
            secret,
            access_minutes: std::env::var("JWT_ACCESS_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            refresh_days: std::env::var("JWT_REFRESH_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "blog-api".to_string()),
        };
        Self::new(config)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation
    }
}

fn map_decode_err(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken(e.to_string()),
    }
}

impl TokenService for JwtTokenService {
    fn issue_access_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(self.config.access_minutes);

        let claims = AccessWire {
            sub: user.id.to_string(),
            username: user.username.clone(),
            is_staff: user.is_staff,
            token_type: "access".to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn issue_refresh_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::days(self.config.refresh_days);

        let claims = RefreshWire {
            sub: user.id.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: "refresh".to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = decode::<AccessWire>(token, &self.decoding_key, &self.validation())
            .map_err(map_decode_err)?;

        if data.claims.token_type != "access" {
            return Err(AuthError::InvalidToken("not an access token".to_string()));
        }

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(AccessClaims {
            user_id,
            username: data.claims.username,
            is_staff: data.claims.is_staff,
            exp: data.claims.exp,
        })
    }

    fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        let data = decode::<RefreshWire>(token, &self.decoding_key, &self.validation())
            .map_err(map_decode_err)?;

        if data.claims.token_type != "refresh" {
            return Err(AuthError::InvalidToken("not a refresh token".to_string()));
        }

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let jti = Uuid::parse_str(&data.claims.jti)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(RefreshClaims {
            user_id,
            jti,
            exp: data.claims.exp,
        })
    }

    fn refresh_max_age_seconds(&self) -> i64 {
        self.config.refresh_days * 24 * 3600
    }
}
