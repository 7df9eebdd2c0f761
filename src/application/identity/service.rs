//! Authentication service
//!
//! HTTP handlers and the auth middleware are thin wrappers around this
//! service; every auth message a client can see is produced here.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, info};

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::api_key::verify_api_key;
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenError};
use crate::infrastructure::crypto::password::verify_password;
use crate::shared::errors::InfraError;
use crate::shared::validations::rules::is_basic_credentials;

pub const BASIC_HEADER: &str = "x-needle-basic";
pub const TOKEN_HEADER: &str = "x-needle-token";

/// Caller resolved from a session token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// Key presented in the token, reused when a fresh token is issued
    pub api_key: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Login ───────────────────────────────────────────────────

    /// Validate an `x-needle-basic` header value and open a session.
    pub async fn login(&self, header: Option<&str>) -> DomainResult<Session> {
        let (username, password) = parse_basic_header(header)?;

        let invalid = || {
            DomainError::Authentication("username and password combination is invalid".into())
        };

        let Some(user) = self.repos.users().get_active_by_username(&username).await? else {
            debug!(%username, "Login for unknown or inactive user");
            return Err(invalid());
        };

        let valid = verify_password(&password, &user.password_hash).unwrap_or(false);
        if !valid {
            debug!(%username, "Login with wrong password");
            return Err(invalid());
        }

        let token = self.issue_token(&user.id, &user.api_key)?;
        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(Session { token, user })
    }

    // ── Tokens ──────────────────────────────────────────────────

    pub fn issue_token(&self, user_id: &str, api_key: &str) -> DomainResult<String> {
        create_token(user_id, api_key, &self.jwt_config)
            .map_err(|e| InfraError::from(e).into())
    }

    /// Resolve an `x-needle-token` header value to an active user.
    pub async fn authenticate(&self, header: Option<&str>) -> DomainResult<AuthenticatedUser> {
        let Some(token) = header.map(str::trim).filter(|t| !t.is_empty()) else {
            return Err(DomainError::validation(format!(
                "{TOKEN_HEADER} header is missing from input"
            )));
        };

        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            let reason = match e {
                TokenError::Expired => "is expired",
                TokenError::Invalid => "is invalid",
                TokenError::MissingClaims => "is missing required fields",
            };
            debug!(reason, "Rejected session token");
            DomainError::Authentication(format!("{TOKEN_HEADER} {reason}"))
        })?;

        if uuid::Uuid::parse_str(&claims.sub).is_err() {
            return Err(DomainError::validation(format!(
                "{TOKEN_HEADER} contains an invalid id"
            )));
        }

        let user = self
            .repos
            .users()
            .get_active_by_id(&claims.sub)
            .await?
            .filter(|user| verify_api_key(&claims.api_key, &user.api_key))
            .ok_or_else(|| {
                DomainError::Authentication(format!(
                    "{TOKEN_HEADER} user could not be authenticated"
                ))
            })?;

        Ok(AuthenticatedUser {
            user,
            api_key: claims.api_key,
        })
    }
}

/// Split `Basic base64(username:password)` into its parts.
fn parse_basic_header(header: Option<&str>) -> DomainResult<(String, String)> {
    let Some(header) = header else {
        return Err(DomainError::validation(format!(
            "{BASIC_HEADER} header is missing from input"
        )));
    };

    let Some(encoded) = header.trim().strip_prefix("Basic ") else {
        return Err(DomainError::validation(format!(
            "{BASIC_HEADER} must use Basic Auth"
        )));
    };

    let invalid_format =
        || DomainError::validation(format!("{BASIC_HEADER} credentials have invalid format"));

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(invalid_format)?;

    if !is_basic_credentials(&decoded) {
        return Err(invalid_format());
    }

    match decoded.split_once(':') {
        Some((username, password)) => Ok((username.to_string(), password.to_string())),
        None => Err(invalid_format()),
    }
}
