//! In-Memory Role Store
//!
//! Thread-safe map of role records. Clones share the same map, so a test
//! can keep one handle while the identity manager owns another.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use idm_domain::{RoleRecord, RoleStore, StoreError};

/// In-memory Role Store
///
/// Each operation holds the lock for its whole duration, which is what
/// makes insert/replace/delete atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleStore {
    records: Arc<RwLock<HashMap<String, RoleRecord>>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, RoleRecord>>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::unavailable("Failed to acquire read lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, RoleRecord>>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::unavailable("Failed to acquire write lock"))
    }
}

impl RoleStore for InMemoryRoleStore {
    fn find(&self, name: &str) -> Result<Option<RoleRecord>, StoreError> {
        Ok(self.read()?.get(name).cloned())
    }

    fn insert(&mut self, record: RoleRecord) -> Result<(), StoreError> {
        let mut records = self.write()?;
        if records.contains_key(&record.name) {
            return Err(StoreError::duplicate(record.name));
        }
        records.insert(record.name.clone(), record);
        Ok(())
    }

    fn replace(&mut self, record: RoleRecord) -> Result<(), StoreError> {
        let mut records = self.write()?;
        match records.get_mut(&record.name) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::not_found(record.name)),
        }
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.write()?
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(name))
    }

    fn list(&self) -> Result<Vec<RoleRecord>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.read()?.contains_key(name))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use idm_domain::{Attribute, AttributeValue, Role};
    use idm_usecase::IdentityManager;

    fn record(name: &str) -> RoleRecord {
        let now = Utc::now();
        RoleRecord::from_role(&Role::new(name), now, now)
    }

    #[test]
    fn test_store_operations() {
        let mut store = InMemoryRoleStore::new();

        store.insert(record("Administrator")).unwrap();
        assert!(store.insert(record("Administrator")).unwrap_err().is_duplicate());
        assert!(store.exists("Administrator").unwrap());
        assert_eq!(store.count().unwrap(), 1);

        assert!(store.replace(record("missing")).unwrap_err().is_not_found());
        assert!(store.delete("missing").unwrap_err().is_not_found());

        store.delete("Administrator").unwrap();
        assert!(store.find("Administrator").unwrap().is_none());
    }

    #[test]
    fn test_clones_share_records() {
        let mut store = InMemoryRoleStore::new();
        let observer = store.clone();

        store.insert(record("someRole")).unwrap();
        assert!(observer.exists("someRole").unwrap());
    }

    #[test]
    fn test_role_management_scenario() {
        let store = InMemoryRoleStore::new();
        let observer = store.clone();
        let mut manager = IdentityManager::new(store);

        manager.create_role(&Role::new("Administrator")).unwrap();

        let mut admin = manager.get_role("Administrator").unwrap().unwrap();
        admin.set_attribute(Attribute::single("one-valued", "1"));
        admin.set_attribute(Attribute::multi("multi-valued", ["1", "2", "3"]).unwrap());
        manager.update_role(&admin).unwrap();

        let stored = observer.find("Administrator").unwrap().unwrap();
        assert_eq!(stored.attributes["one-valued"], AttributeValue::single("1"));
        assert_eq!(
            stored.attributes["multi-valued"],
            AttributeValue::multi(["1", "2", "3"]).unwrap()
        );

        admin.remove_attribute("one-valued");
        manager.update_role(&admin).unwrap();
        let stored = observer.find("Administrator").unwrap().unwrap();
        assert!(!stored.attributes.contains_key("one-valued"));

        manager.remove_role(&admin).unwrap();
        assert_eq!(observer.count().unwrap(), 0);
    }
}
