use thiserror::Error;

/// Error taxonomy shared by every layer.
///
/// The display string of the client-facing variants is the exact message
/// returned in the `error` field of the response body.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad or missing input, malformed auth headers.
    #[error("{0}")]
    Validation(String),

    /// Identity could not be established (bad credentials, bad token).
    #[error("{0}")]
    Authentication(String),

    /// Identity is known but lacks the required role.
    #[error("{0}")]
    Authorization(String),

    /// Resource is absent, soft-deleted or out of scope.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule was violated.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Whether the detail must stay server-side.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Database(e) => DomainError::Database(e.to_string()),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        InfraError::Database(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_are_verbatim() {
        let err = DomainError::validation("name is missing from input");
        assert_eq!(err.to_string(), "name is missing from input");
        assert!(!err.is_fatal());
    }

    #[test]
    fn infra_errors_become_fatal() {
        let err: DomainError = InfraError::Crypto("bad key".into()).into();
        assert!(err.is_fatal());

        let err: DomainError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, DomainError::Database(_)));
    }
}
