//! RoleRecord - The committed form of a role, as adapters persist it

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attribute::AttributeValue;
use super::role::Role;

/// What a store holds for one role
///
/// Adapters only ever see records. The key is not stored; it is derived
/// from `name` whenever a `Role` is materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub name: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,

    pub created_at: DateTime<Utc>,

    pub last_modified: DateTime<Utc>,
}

impl RoleRecord {
    /// Capture the full attribute mapping of a working copy
    pub fn from_role(role: &Role, created_at: DateTime<Utc>, last_modified: DateTime<Utc>) -> Self {
        Self {
            name: role.name().to_string(),
            attributes: role
                .attributes()
                .map(|a| (a.name().to_string(), a.value().clone()))
                .collect(),
            created_at,
            last_modified,
        }
    }
}
