//! Configuration for the identity manager
//!
//! ```yaml
//! store:
//!   backend: file
//!   path: roles.json
//! seed:
//!   - name: Administrator
//!     attributes:
//!       description: Full administrative access
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use idm_domain::{
    validate_role_name, Attribute, AttributeValue, Role, RoleNameError, RoleStore, StoreError,
};
use idm_usecase::{IdentityManager, IdmError};

use crate::repository::file_system::FileRoleStore;
use crate::repository::in_memory::InMemoryRoleStore;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid seed role '{name}': {reason}")]
    InvalidSeed { name: String, reason: RoleNameError },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Idm(#[from] IdmError),
}

/// Which store backs the identity manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-local; everything is gone on exit
    Memory,
    /// JSON document on disk
    File { path: PathBuf },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: PathBuf::from("roles.json"),
        }
    }
}

/// A role created at initialization if it is not stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRole {
    pub name: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl SeedRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn to_role(&self) -> Role {
        self.attributes
            .iter()
            .fold(Role::new(self.name.clone()), |role, (name, value)| {
                role.with_attribute(Attribute::new(name.clone(), value.clone()))
            })
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdmConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub seed: Vec<SeedRole>,
}

impl IdmConfig {
    /// Load configuration from a YAML file. A relative store path is taken
    /// relative to the directory holding the config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;

        if let StoreConfig::File { path: store_path } = &mut config.store {
            if store_path.is_relative() {
                if let Some(base) = path.parent() {
                    *store_path = base.join(&*store_path);
                }
            }
        }

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check seed names before anything touches a store
    pub fn validate(&self) -> Result<(), ConfigError> {
        for seed in &self.seed {
            validate_role_name(&seed.name).map_err(|reason| ConfigError::InvalidSeed {
                name: seed.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    /// Build the configured store
    pub fn open_store(&self) -> Result<Box<dyn RoleStore>, ConfigError> {
        let store: Box<dyn RoleStore> = match &self.store {
            StoreConfig::Memory => Box::new(InMemoryRoleStore::new()),
            StoreConfig::File { path } => Box::new(FileRoleStore::open(path)?),
        };
        Ok(store)
    }

    /// Seed roles as working copies
    pub fn seed_roles(&self) -> Vec<Role> {
        self.seed.iter().map(SeedRole::to_role).collect()
    }

    /// Open the store and create any missing seed roles. Meant for
    /// initialization; day-to-day access goes through `open_store`.
    pub fn bootstrap(&self) -> Result<IdentityManager<Box<dyn RoleStore>>, ConfigError> {
        let mut manager = IdentityManager::new(self.open_store()?);
        let created = manager.seed_roles(&self.seed_roles())?;

        info!(backend = ?self.store, seeded = created, "Identity manager ready");
        Ok(manager)
    }
}
