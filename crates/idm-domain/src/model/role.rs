//! Role - A named authorization entity with an attribute mapping
//!
//! Role is an Entity: identity is the key `ROLE://<name>`, and two roles
//! with the same name are the same role no matter what attributes they carry.
//!
//! A `Role` value is always a detached working copy. Mutating it touches
//! nothing in the store until it is handed back to the identity manager.

use std::collections::BTreeMap;

use thiserror::Error;

use super::attribute::Attribute;
use super::record::RoleRecord;

/// Prefix of every role key
pub const ROLE_KEY_PREFIX: &str = "ROLE://";

/// Stable external identifier of a role: `ROLE://<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleKey(String);

impl RoleKey {
    pub fn for_name(name: &str) -> Self {
        Self(format!("{}{}", ROLE_KEY_PREFIX, name))
    }

    /// Parse a key produced by another system. Only `ROLE://<name>` with a
    /// non-empty name is accepted.
    pub fn parse(text: &str) -> Option<Self> {
        match text.strip_prefix(ROLE_KEY_PREFIX) {
            Some(name) if !name.is_empty() => Some(Self(text.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The role name embedded in the key
    pub fn name(&self) -> &str {
        &self.0[ROLE_KEY_PREFIX.len()..]
    }
}

impl core::fmt::Display for RoleKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a role name was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoleNameError {
    #[error("role name is empty")]
    Empty,
    #[error("role name has leading or trailing whitespace")]
    SurroundingWhitespace,
    #[error("role name contains control characters")]
    ControlCharacter,
}

/// Check that `name` can identify a stored role
pub fn validate_role_name(name: &str) -> Result<(), RoleNameError> {
    if name.is_empty() {
        return Err(RoleNameError::Empty);
    }
    if name.trim() != name {
        return Err(RoleNameError::SurroundingWhitespace);
    }
    if name.chars().any(char::is_control) {
        return Err(RoleNameError::ControlCharacter);
    }
    Ok(())
}

/// Role working copy
#[derive(Debug, Clone)]
pub struct Role {
    /// Unique, immutable name
    name: String,
    /// Attributes keyed by their own name
    attributes: BTreeMap<String, Attribute>,
}

impl Role {
    /// Create a role that exists only in memory until created in a store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.set_attribute(attribute);
        self
    }

    // ========== Identity ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derived from the name on every call; there is no way to set it
    pub fn key(&self) -> RoleKey {
        RoleKey::for_name(&self.name)
    }

    // ========== Attributes ==========

    /// Insert or replace an attribute by name, returning the one it replaced.
    /// The old value is dropped whole; lists are never merged.
    pub fn set_attribute(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.attributes.insert(attribute.name().to_string(), attribute)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn get_attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    /// Remove an attribute; absent names are a no-op
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attributes in name order
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same key = same role
        self.key() == other.key()
    }
}

impl Eq for Role {}

impl core::hash::Hash for Role {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl From<RoleRecord> for Role {
    fn from(record: RoleRecord) -> Self {
        let attributes = record
            .attributes
            .into_iter()
            .map(|(name, value)| (name.clone(), Attribute::new(name, value)))
            .collect();

        Self {
            name: record.name,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::AttributeValue;

    #[test]
    fn test_key_is_derived_from_name() {
        let role = Role::new("Administrator");
        assert_eq!(role.key().as_str(), "ROLE://Administrator");
        assert_eq!(role.key().name(), "Administrator");
    }

    #[test]
    fn test_key_parse() {
        let key = RoleKey::parse("ROLE://someRole").unwrap();
        assert_eq!(key, Role::new("someRole").key());

        assert!(RoleKey::parse("ROLE://").is_none());
        assert!(RoleKey::parse("role://someRole").is_none());
        assert!(RoleKey::parse("someRole").is_none());
    }

    #[test]
    fn test_entity_equality() {
        let plain = Role::new("someRole");
        let decorated = Role::new("someRole").with_attribute(Attribute::single("a", "1"));

        // Same name = same entity (even if attributes differ)
        assert_eq!(plain, decorated);
        assert_ne!(plain, Role::new("otherRole"));
    }

    #[test]
    fn test_set_attribute_replaces_by_name() {
        let mut role = Role::new("someRole");
        role.set_attribute(Attribute::multi("multi-valued", ["1", "2", "3"]).unwrap());

        let previous = role.set_attribute(Attribute::multi("multi-valued", ["3", "4", "5"]).unwrap());
        assert!(previous.is_some());
        assert_eq!(role.attribute_count(), 1);

        let values = role.get_attribute("multi-valued").unwrap().value().as_multi().unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], "3");
        assert_eq!(values[2], "5");
    }

    #[test]
    fn test_set_attribute_is_idempotent() {
        let mut role = Role::new("someRole");
        role.set_attribute(Attribute::single("one-valued", "1"));
        role.set_attribute(Attribute::single("one-valued", "1"));

        assert_eq!(role.attribute_count(), 1);
        assert_eq!(
            role.get_attribute("one-valued").unwrap().value(),
            &AttributeValue::single("1")
        );
    }

    #[test]
    fn test_absent_attribute() {
        let mut role = Role::new("someRole");
        assert!(role.get_attribute("missing").is_none());
        assert!(role.remove_attribute("missing").is_none());
        assert_eq!(role.attribute_count(), 0);
    }

    #[test]
    fn test_attributes_in_name_order() {
        let role = Role::new("someRole")
            .with_attribute(Attribute::single("b", "2"))
            .with_attribute(Attribute::single("a", "1"));

        let names: Vec<_> = role.attribute_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_validate_role_name() {
        assert!(validate_role_name("Administrator").is_ok());
        assert!(validate_role_name("team lead").is_ok());
        assert_eq!(validate_role_name(""), Err(RoleNameError::Empty));
        assert_eq!(
            validate_role_name(" admin"),
            Err(RoleNameError::SurroundingWhitespace)
        );
        assert_eq!(
            validate_role_name("ad\nmin"),
            Err(RoleNameError::ControlCharacter)
        );
    }
}
