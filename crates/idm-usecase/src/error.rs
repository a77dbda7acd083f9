//! Error types for the identity manager

use idm_domain::{RoleKey, RoleNameError, StoreError};
use thiserror::Error;

/// Failures of an identity manager operation
///
/// A role that simply isn't there is not an error: `get_role` answers
/// `Ok(None)`. These variants are for operations that could not do what
/// was asked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdmError {
    /// `create_role` on a name that is already stored
    #[error("Role '{key}' already exists")]
    DuplicateEntity { key: RoleKey },

    /// `update_role` / `remove_role` on a name that is not stored
    #[error("Role '{key}' not found")]
    EntityNotFound { key: RoleKey },

    /// The store adapter failed; passed through as-is
    #[error("Role store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Invalid role name '{name}': {reason}")]
    InvalidRoleName { name: String, reason: RoleNameError },

    #[error("Invalid role filter '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl IdmError {
    /// Translate a store failure for the role identified by `key`
    pub fn from_store(err: StoreError, key: &RoleKey) -> Self {
        match err {
            StoreError::Duplicate { .. } => IdmError::DuplicateEntity { key: key.clone() },
            StoreError::NotFound { .. } => IdmError::EntityNotFound { key: key.clone() },
            StoreError::Unavailable { message } => IdmError::StoreUnavailable { message },
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, IdmError::DuplicateEntity { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, IdmError::EntityNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, IdmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store() {
        let key = RoleKey::for_name("someRole");

        let err = IdmError::from_store(StoreError::duplicate("someRole"), &key);
        assert!(err.is_duplicate());
        assert!(err.to_string().contains("ROLE://someRole"));

        let err = IdmError::from_store(StoreError::not_found("someRole"), &key);
        assert!(err.is_not_found());

        let err = IdmError::from_store(StoreError::unavailable("connection refused"), &key);
        assert_eq!(
            err,
            IdmError::StoreUnavailable {
                message: "connection refused".to_string()
            }
        );
    }
}
