//! Role Store - Abstract persistence for role records
//!
//! The identity manager only ever asks a store for these operations.
//! Whether the records live in a HashMap, a JSON document or a directory
//! server is the adapter's business.

use thiserror::Error;

use crate::model::record::RoleRecord;

/// Errors a store reports back to the identity manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Insert hit an existing name
    #[error("Role '{name}' already exists")]
    Duplicate { name: String },

    /// Replace or delete hit a missing name
    #[error("Role '{name}' not found")]
    NotFound { name: String },

    /// The backend itself failed (I/O, lock poisoning, corrupt data)
    #[error("Role store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::Duplicate { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Role Store Trait
///
/// This is a PORT in hexagonal architecture. Records are keyed by role
/// name. Every method is one atomic unit against the backend: a failed
/// call leaves the stored data as it was.
///
/// Note: No async here, the contract is request/response. An adapter for a
/// remote directory blocks on its own client.
pub trait RoleStore {
    /// Find a record by role name
    fn find(&self, name: &str) -> Result<Option<RoleRecord>, StoreError>;

    /// Add a new record; `StoreError::Duplicate` if the name is taken
    fn insert(&mut self, record: RoleRecord) -> Result<(), StoreError>;

    /// Replace the stored record of the same name wholesale;
    /// `StoreError::NotFound` if there is none
    fn replace(&mut self, record: RoleRecord) -> Result<(), StoreError>;

    /// Delete a record; `StoreError::NotFound` if there is none
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;

    /// All records, in no particular order
    fn list(&self) -> Result<Vec<RoleRecord>, StoreError>;

    /// Check if a role exists
    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.find(name)?.is_some())
    }

    /// Count all roles
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list()?.len())
    }
}

impl<S: RoleStore + ?Sized> RoleStore for Box<S> {
    fn find(&self, name: &str) -> Result<Option<RoleRecord>, StoreError> {
        (**self).find(name)
    }

    fn insert(&mut self, record: RoleRecord) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn replace(&mut self, record: RoleRecord) -> Result<(), StoreError> {
        (**self).replace(record)
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        (**self).delete(name)
    }

    fn list(&self) -> Result<Vec<RoleRecord>, StoreError> {
        (**self).list()
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        (**self).exists(name)
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    /// Minimal store exercising the provided methods
    struct MapStore {
        records: HashMap<String, RoleRecord>,
    }

    impl RoleStore for MapStore {
        fn find(&self, name: &str) -> Result<Option<RoleRecord>, StoreError> {
            Ok(self.records.get(name).cloned())
        }

        fn insert(&mut self, record: RoleRecord) -> Result<(), StoreError> {
            if self.records.contains_key(&record.name) {
                return Err(StoreError::duplicate(record.name));
            }
            self.records.insert(record.name.clone(), record);
            Ok(())
        }

        fn replace(&mut self, record: RoleRecord) -> Result<(), StoreError> {
            match self.records.get_mut(&record.name) {
                Some(slot) => {
                    *slot = record;
                    Ok(())
                }
                None => Err(StoreError::not_found(record.name)),
            }
        }

        fn delete(&mut self, name: &str) -> Result<(), StoreError> {
            self.records
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| StoreError::not_found(name))
        }

        fn list(&self) -> Result<Vec<RoleRecord>, StoreError> {
            Ok(self.records.values().cloned().collect())
        }
    }

    fn record(name: &str) -> RoleRecord {
        let now = Utc::now();
        RoleRecord {
            name: name.to_string(),
            attributes: Default::default(),
            created_at: now,
            last_modified: now,
        }
    }

    #[test]
    fn test_provided_methods() {
        let mut store = MapStore {
            records: HashMap::new(),
        };

        store.insert(record("Administrator")).unwrap();
        store.insert(record("someRole")).unwrap();

        assert!(store.exists("Administrator").unwrap());
        assert!(!store.exists("nobody").unwrap());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn RoleStore> = Box::new(MapStore {
            records: HashMap::new(),
        });

        store.insert(record("someRole")).unwrap();
        assert!(store.insert(record("someRole")).unwrap_err().is_duplicate());
        assert!(store.delete("missing").unwrap_err().is_not_found());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::unavailable("disk full");
        assert!(err.to_string().contains("disk full"));
        assert!(!err.is_duplicate());
        assert!(!err.is_not_found());
    }
}
