//! IDM CLI library: command implementations shared by the `idm` binary
//! and its tests.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Context as _;
use idm_adapter::IdmConfig;
use idm_domain::RoleStore;
use idm_usecase::IdentityManager;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration file; a missing file means the default configuration
    pub config_path: PathBuf,
    /// Print JSON instead of text
    pub json: bool,
}

impl Context {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            json: false,
        }
    }

    pub fn load_config(&self) -> anyhow::Result<IdmConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(IdmConfig::default());
        }

        IdmConfig::from_file(&self.config_path)
            .with_context(|| format!("Failed to load {}", self.config_path.display()))
    }

    /// Open the configured store. Seed roles are only created by `init`,
    /// so a removed seed role stays removed.
    pub fn manager(&self) -> anyhow::Result<IdentityManager<Box<dyn RoleStore>>> {
        Ok(IdentityManager::new(self.load_config()?.open_store()?))
    }
}
