//! Store error taxonomy

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::object_id::InvalidIdentifier;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed id; raised before any query is issued
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    /// Unique index violation on insert
    #[error("duplicate key in [{collection}] on [{}]: {message}", .field.as_deref().unwrap_or("unknown"))]
    DuplicateKey {
        collection: &'static str,
        field: Option<String>,
        message: String,
    },

    /// A required field was empty
    #[error("invalid record for [{collection}]: [{field}] must not be empty")]
    Validation {
        collection: &'static str,
        field: &'static str,
    },

    /// The record was inserted but could not be read back
    #[error("record [{id}] in [{collection}] disappeared before it could be read back")]
    Vanished { collection: &'static str, id: String },

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

impl StoreError {
    /// Map an insert failure, separating unique violations from other errors.
    pub(crate) fn from_insert(collection: &'static str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => StoreError::DuplicateKey {
                collection,
                field: offending_field(&message),
                message,
            },
            _ => StoreError::Storage(err),
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }

    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, StoreError::InvalidIdentifier(_))
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            StoreError::DuplicateKey { .. } => "DUPLICATE_KEY",
            StoreError::Validation { .. } => "INVALID_RECORD",
            StoreError::Vanished { .. } => "VANISHED",
            StoreError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Pull the offending column(s) or index out of a backend message.
///
/// SQLite: `UNIQUE constraint failed: team_users.team_id, team_users.user_id`
/// PostgreSQL: `duplicate key value violates unique constraint "idx_users_email"`
pub(crate) fn offending_field(message: &str) -> Option<String> {
    if let Some((_, columns)) = message.split_once("constraint failed: ") {
        let fields: Vec<&str> = columns
            .split(',')
            .map(|c| {
                let c = c.trim();
                c.rsplit_once('.').map(|(_, col)| col).unwrap_or(c)
            })
            .filter(|c| !c.is_empty())
            .collect();
        return (!fields.is_empty()).then(|| fields.join(", "));
    }

    if let Some((_, rest)) = message.split_once("unique constraint \"") {
        return rest.split('"').next().map(str::to_string);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offending_field_sqlite_single_column() {
        assert_eq!(
            offending_field("UNIQUE constraint failed: users.email").as_deref(),
            Some("email")
        );
    }

    #[test]
    fn test_offending_field_sqlite_compound() {
        let msg = "error returned from database: (code: 2067) UNIQUE constraint failed: team_users.team_id, team_users.user_id";
        assert_eq!(offending_field(msg).as_deref(), Some("team_id, user_id"));
    }

    #[test]
    fn test_offending_field_postgres() {
        let msg = "duplicate key value violates unique constraint \"idx_organizations_billing_id\"";
        assert_eq!(
            offending_field(msg).as_deref(),
            Some("idx_organizations_billing_id")
        );
    }

    #[test]
    fn test_offending_field_unknown() {
        assert_eq!(offending_field("disk I/O error"), None);
    }

    #[test]
    fn test_error_codes() {
        let err = StoreError::Validation {
            collection: "users",
            field: "email",
        };
        assert_eq!(err.code(), "INVALID_RECORD");
        assert_eq!(
            err.to_string(),
            "invalid record for [users]: [email] must not be empty"
        );

        let err = StoreError::DuplicateKey {
            collection: "users",
            field: Some("email".to_string()),
            message: "UNIQUE constraint failed: users.email".to_string(),
        };
        assert!(err.is_duplicate_key());
        assert_eq!(err.code(), "DUPLICATE_KEY");
    }
}
