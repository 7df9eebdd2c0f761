//! JWT session tokens
//!
//! A token carries the user id (`sub`) and the user's API key. Both are
//! re-checked against the live user on every request, so a token dies as
//! soon as its user is deactivated.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: "needle".to_string(),
        }
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Raw API key of the user
    pub api_key: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, api_key: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            api_key: api_key.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Claims as found on the wire, before presence checks
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    api_key: Option<String>,
    exp: i64,
    iat: Option<i64>,
    iss: Option<String>,
}

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
    MissingClaims,
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: &str,
    api_key: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_claims = TokenClaims::new(user_id, api_key, config);

    encode(
        &Header::default(),
        &token_claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<RawClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::MissingRequiredClaim(_) => TokenError::MissingClaims,
        ErrorKind::Json(_) => TokenError::MissingClaims,
        _ => TokenError::Invalid,
    })?;

    let raw = token_data.claims;
    match (raw.sub, raw.api_key) {
        (Some(sub), Some(api_key)) if !sub.is_empty() && !api_key.is_empty() => Ok(TokenClaims {
            sub,
            api_key,
            exp: raw.exp,
            iat: raw.iat.unwrap_or_default(),
            iss: raw.iss.unwrap_or_default(),
        }),
        _ => Err(TokenError::MissingClaims),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret", 10)
    }

    fn sign<T: Serialize>(claims: &T, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_verifies() {
        let token = create_token("user-1", "key-1", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.api_key, "key-1");
        assert_eq!(claims.iss, "needle");
        assert_eq!(claims.exp - claims.iat, 10 * 3600);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let mut claims = TokenClaims::new("user-1", "key-1", &config());
        claims.exp = Utc::now().timestamp() - 3600;
        let token = sign(&claims, "test-secret");
        assert_eq!(verify_token(&token, &config()), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let claims = TokenClaims::new("user-1", "key-1", &config());
        let token = sign(&claims, "another-secret");
        assert_eq!(verify_token(&token, &config()), Err(TokenError::Invalid));
        assert_eq!(verify_token("not.a.token", &config()), Err(TokenError::Invalid));
    }

    #[test]
    fn missing_claims_are_detected() {
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
            iss: String,
        }
        let token = sign(
            &Partial {
                sub: "user-1".into(),
                exp: Utc::now().timestamp() + 3600,
                iss: "needle".into(),
            },
            "test-secret",
        );
        assert_eq!(verify_token(&token, &config()), Err(TokenError::MissingClaims));
    }
}
