//! idm init command

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use idm_adapter::{IdmConfig, SeedRole, StoreConfig};
use idm_domain::AttributeValue;

use crate::output;

/// File name written into the initialized directory
pub const CONFIG_FILE: &str = "idm.yaml";

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Do not seed the Administrator role
    #[arg(long)]
    pub minimal: bool,

    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let config_path = self.directory.join(CONFIG_FILE);
        if config_path.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        std::fs::create_dir_all(&self.directory)?;
        std::fs::write(&config_path, self.default_config().to_yaml()?)?;

        // Re-read so the store path resolves against the new directory
        let manager = IdmConfig::from_file(&config_path)?.bootstrap()?;
        let roles = manager.list_roles()?;

        output::success(format!(
            "IDM initialized in {} ({} role(s))",
            self.directory.display(),
            roles.len()
        ));
        Ok(())
    }

    fn default_config(&self) -> IdmConfig {
        let mut seed = Vec::new();
        if !self.minimal {
            let mut admin = SeedRole::new("Administrator");
            admin.attributes.insert(
                "description".to_string(),
                AttributeValue::single("Full administrative access"),
            );
            seed.push(admin);
        }

        IdmConfig {
            store: StoreConfig::File {
                path: PathBuf::from("roles.json"),
            },
            seed,
        }
    }
}
