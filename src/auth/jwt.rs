//! JWT token issuance and validation.
//!
//! Tokens are self-contained: validation is a pure function of the token
//! string and the process-wide secret, with no store lookup. There is no
//! refresh or revocation; a token is good until its fixed expiry.

use crate::{config::AppConfig, error::AppError, models::user::User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,

    /// Role tag as stored; normalized by consumers, not here
    pub role: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: u64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        Ok(Self {
            encoding_key,
            decoding_key,
            token_ttl_secs: config.security.token_ttl_secs,
        })
    }

    /// Issue a token for an authenticated account, expiring after the
    /// configured TTL.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_ttl_secs as i64);

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone().unwrap_or_else(|| "User".to_string()),
            email: user.email.clone(),
            role: user.role.clone().unwrap_or_default(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Validate and decode a token. Rejects signature mismatch, structural
    /// garbage, and expired tokens; callers decide whether rejection aborts
    /// the request or merely withholds identity.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the default 60s leeway would stretch the fixed
        // token lifetime.
        validation.leeway = 0;

        Ok(decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims)
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }
}
