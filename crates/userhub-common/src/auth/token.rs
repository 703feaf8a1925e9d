//! Signed access tokens
//!
//! Tokens are HS256 JWTs. Each carries the user id as subject, the issue and
//! expiry times, and a `jti` made of 32 bytes from the OS random source,
//! base64-encoded. Validation checks signature and expiry only; whether the
//! subject may still act is decided by the caller.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use userhub_core::RecordId;

use crate::error::AppError;

/// Number of random bytes in a token id
pub const TOKEN_ID_BYTES: usize = 32;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Random token id
    pub jti: String,
}

impl Claims {
    /// Get the user ID from the subject
    pub fn user_id(&self) -> Result<RecordId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// A freshly issued token and when it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token service for encoding and decoding access tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a new token service with the given secret and lifetime
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for a user, expiring `ttl_secs` from now
    ///
    /// # Errors
    /// Returns `TokenGeneration` if the OS random source fails or encoding fails
    pub fn issue(&self, user_id: RecordId) -> Result<IssuedToken, AppError> {
        self.issue_with_rng(user_id, &mut OsRng)
    }

    fn issue_with_rng<R: RngCore>(
        &self,
        user_id: RecordId,
        rng: &mut R,
    ) -> Result<IssuedToken, AppError> {
        let jti = random_token_id(rng)?;
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::TokenGeneration(format!("failed to sign token: {e}")))?;

        // Round to whole seconds so the reported expiry matches the claim
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or(expires_at);

        Ok(IssuedToken { token, expires_at })
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` or `InvalidToken`
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn random_token_id<R: RngCore>(rng: &mut R) -> Result<String, AppError> {
    let mut bytes = [0u8; TOKEN_ID_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::TokenGeneration(format!("secure random source unavailable: {e}")))?;
    Ok(STANDARD.encode(bytes))
}
