//! idm role command

use anyhow::{anyhow, bail};
use clap::{Args, Subcommand};
use idm_domain::{Attribute, Role};

use crate::{output, Context};

#[derive(Debug, Args)]
pub struct RoleCommand {
    #[command(subcommand)]
    pub command: RoleSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RoleSubcommand {
    /// Create a role
    Create {
        /// Role name
        name: String,
        /// Initial single-valued string attribute (repeatable)
        #[arg(short, long = "attr", value_name = "NAME=VALUE")]
        attrs: Vec<String>,
    },
    /// Show a role and its attributes
    Get {
        /// Role name
        name: String,
    },
    /// List roles
    List {
        /// Only roles whose name matches this glob (e.g. 'Admin*')
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Remove a role and all of its attributes
    Remove {
        /// Role name
        name: String,
    },
}

/// Split `name=value` into a single-valued string attribute
pub fn parse_attr_pair(pair: &str) -> anyhow::Result<Attribute> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(Attribute::single(name, value)),
        _ => bail!("Expected NAME=VALUE, got '{}'", pair),
    }
}

impl RoleCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let mut manager = ctx.manager()?;

        match &self.command {
            RoleSubcommand::Create { name, attrs } => {
                let mut role = Role::new(name.clone());
                for pair in attrs {
                    role.set_attribute(parse_attr_pair(pair)?);
                }
                manager.create_role(&role)?;
                output::success(format!("Created {}", role.key()));
            }
            RoleSubcommand::Get { name } => {
                let role = manager
                    .get_role(name)?
                    .ok_or_else(|| anyhow!("Role '{}' not found", name))?;
                output::print_role(&role, ctx.json)?;
            }
            RoleSubcommand::List { filter } => {
                let roles = match filter {
                    Some(pattern) => manager.find_roles(pattern)?,
                    None => manager.list_roles()?,
                };
                output::print_roles(&roles, ctx.json)?;
            }
            RoleSubcommand::Remove { name } => {
                let role = manager
                    .get_role(name)?
                    .ok_or_else(|| anyhow!("Role '{}' not found", name))?;
                manager.remove_role(&role)?;
                output::success(format!("Removed {}", role.key()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::{InitCommand, CONFIG_FILE};
    use idm_usecase::IdmError;

    fn project() -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        InitCommand {
            directory: dir.path().to_path_buf(),
            minimal: false,
            force: false,
        }
        .run()
        .unwrap();
        let ctx = Context::new(dir.path().join(CONFIG_FILE));
        (dir, ctx)
    }

    fn run(ctx: &Context, command: RoleSubcommand) -> anyhow::Result<()> {
        RoleCommand { command }.run(ctx)
    }

    #[test]
    fn test_parse_attr_pair() {
        let attr = parse_attr_pair("department=ops=eu").unwrap();
        assert_eq!(attr.name(), "department");
        assert_eq!(attr.value().as_single().unwrap(), "ops=eu");

        assert!(parse_attr_pair("novalue").is_err());
        assert!(parse_attr_pair("=x").is_err());
    }

    #[test]
    fn test_create_get_remove() {
        let (_dir, ctx) = project();

        run(
            &ctx,
            RoleSubcommand::Create {
                name: "someRole".to_string(),
                attrs: vec!["department=ops".to_string()],
            },
        )
        .unwrap();

        let role = ctx.manager().unwrap().get_role("someRole").unwrap().unwrap();
        assert_eq!(role.key().as_str(), "ROLE://someRole");
        assert!(role.has_attribute("department"));

        run(&ctx, RoleSubcommand::Get { name: "someRole".to_string() }).unwrap();
        run(&ctx, RoleSubcommand::Remove { name: "someRole".to_string() }).unwrap();

        assert!(run(&ctx, RoleSubcommand::Get { name: "someRole".to_string() }).is_err());
        assert!(run(&ctx, RoleSubcommand::Remove { name: "someRole".to_string() }).is_err());
    }

    #[test]
    fn test_removed_seed_role_stays_removed() {
        let (_dir, ctx) = project();
        let administrator = || RoleSubcommand::Get {
            name: "Administrator".to_string(),
        };

        run(&ctx, administrator()).unwrap();
        run(
            &ctx,
            RoleSubcommand::Remove {
                name: "Administrator".to_string(),
            },
        )
        .unwrap();

        assert!(run(&ctx, administrator()).is_err());
        assert!(ctx.manager().unwrap().get_role("Administrator").unwrap().is_none());

        // Later commands do not bring it back either
        run(&ctx, RoleSubcommand::List { filter: None }).unwrap();
        assert!(ctx.manager().unwrap().get_role("Administrator").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_fails() {
        let (_dir, ctx) = project();

        let err = run(
            &ctx,
            RoleSubcommand::Create {
                name: "Administrator".to_string(),
                attrs: vec![],
            },
        )
        .unwrap_err();

        assert!(err
            .downcast_ref::<IdmError>()
            .map(IdmError::is_duplicate)
            .unwrap_or(false));
    }

    #[test]
    fn test_list_with_filter() {
        let (_dir, ctx) = project();
        run(&ctx, RoleSubcommand::List { filter: Some("Admin*".to_string()) }).unwrap();
        assert!(run(&ctx, RoleSubcommand::List { filter: Some("[".to_string()) }).is_err());
    }
}
