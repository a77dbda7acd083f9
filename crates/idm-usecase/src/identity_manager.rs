//! IdentityManager - Role lifecycle over a role store
//!
//! ```text
//! absent ──create_role──▶ present ──update_role*──▶ present ──remove_role──▶ absent
//! ```
//!
//! `update_role` is a whole-snapshot replace: whatever attribute mapping the
//! submitted role carries becomes the stored mapping, nothing more and
//! nothing less.

use chrono::Utc;
use glob::Pattern;
use tracing::{debug, info, warn};

use idm_domain::{validate_role_name, Role, RoleKey, RoleRecord, RoleStore, StoreError};

use crate::error::{IdmError, Result};

/// Identity manager for roles
#[derive(Debug)]
pub struct IdentityManager<S> {
    store: S,
}

impl<S: RoleStore> IdentityManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist a new role together with any attributes it already carries
    pub fn create_role(&mut self, role: &Role) -> Result<()> {
        validate_role_name(role.name()).map_err(|reason| IdmError::InvalidRoleName {
            name: role.name().to_string(),
            reason,
        })?;

        let key = role.key();
        let exists = self
            .store
            .exists(role.name())
            .map_err(|e| IdmError::from_store(e, &key))?;
        if exists {
            warn!(role = %key, "Refusing to create role: already exists");
            return Err(IdmError::DuplicateEntity { key });
        }

        let now = Utc::now();
        self.store
            .insert(RoleRecord::from_role(role, now, now))
            .map_err(|e| IdmError::from_store(e, &key))?;

        info!(role = %key, attributes = role.attribute_count(), "Role created");
        Ok(())
    }

    /// Look a role up by name. `Ok(None)` when there is no such role.
    ///
    /// The returned role is a detached snapshot.
    pub fn get_role(&self, name: &str) -> Result<Option<Role>> {
        let record = self
            .store
            .find(name)
            .map_err(|e| IdmError::from_store(e, &RoleKey::for_name(name)))?;

        debug!(role = name, found = record.is_some(), "Role lookup");
        Ok(record.map(Role::from))
    }

    /// Write the entire attribute mapping of `role` over the stored one
    pub fn update_role(&mut self, role: &Role) -> Result<()> {
        let key = role.key();
        let existing = self
            .store
            .find(role.name())
            .map_err(|e| IdmError::from_store(e, &key))?
            .ok_or_else(|| IdmError::EntityNotFound { key: key.clone() })?;

        let record = RoleRecord::from_role(role, existing.created_at, Utc::now());

        let dropped: Vec<&str> = existing
            .attributes
            .keys()
            .filter(|name| !record.attributes.contains_key(*name))
            .map(String::as_str)
            .collect();

        self.store
            .replace(record)
            .map_err(|e| IdmError::from_store(e, &key))?;

        info!(
            role = %key,
            attributes = role.attribute_count(),
            dropped = ?dropped,
            "Role updated"
        );
        Ok(())
    }

    /// Delete a role and all of its attributes
    pub fn remove_role(&mut self, role: &Role) -> Result<()> {
        let key = role.key();
        self.store
            .delete(role.name())
            .map_err(|e| IdmError::from_store(e, &key))?;

        info!(role = %key, "Role removed");
        Ok(())
    }

    /// Check if a role with this name is stored
    pub fn role_exists(&self, name: &str) -> Result<bool> {
        self.store
            .exists(name)
            .map_err(|e| IdmError::from_store(e, &RoleKey::for_name(name)))
    }

    /// All stored roles, sorted by name
    pub fn list_roles(&self) -> Result<Vec<Role>> {
        let records = self.store.list().map_err(|e| match e {
            StoreError::Unavailable { message } => IdmError::StoreUnavailable { message },
            // list never names a single role
            other => IdmError::StoreUnavailable {
                message: other.to_string(),
            },
        })?;

        let mut roles: Vec<Role> = records.into_iter().map(Role::from).collect();
        roles.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(roles)
    }

    /// Stored roles whose name matches a glob pattern (e.g. `Admin*`)
    pub fn find_roles(&self, pattern: &str) -> Result<Vec<Role>> {
        let matcher = Pattern::new(pattern).map_err(|e| IdmError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(self
            .list_roles()?
            .into_iter()
            .filter(|r| matcher.matches(r.name()))
            .collect())
    }

    /// Create every role that is not stored yet; stored ones are left
    /// untouched. Returns how many were created.
    pub fn seed_roles<'a>(&mut self, roles: impl IntoIterator<Item = &'a Role>) -> Result<usize> {
        let mut created = 0;
        for role in roles {
            if self.role_exists(role.name())? {
                debug!(role = %role.key(), "Seed role already present");
                continue;
            }
            self.create_role(role)?;
            created += 1;
        }

        if created > 0 {
            info!(created, "Seeded roles");
        }
        Ok(created)
    }
}
