use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: textual form of the user's UUID.
    pub sub: String,
    /// Email of the user at issue time.
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues a signed HS256 token for a user.
///
/// The token embeds the user's id (as `sub`) and email, and expires
/// `ttl_days` from now. The signing secret comes from the caller, which is
/// expected to hold it in process configuration.
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    ttl_days: i64,
) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::days(ttl_days))
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))
}

/// Verifies a token's signature and expiration, returning its claims.
///
/// Every failure mode (malformed token, bad signature, expired) collapses
/// into a single `Unauthorized` result; callers never learn which check
/// failed.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid token or expired token".into()))
}
