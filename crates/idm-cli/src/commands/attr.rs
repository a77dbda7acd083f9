//! idm attr command
//!
//! Every change goes fetch → mutate → update_role; the whole snapshot is
//! written back, which is the only way attributes change in a store.

use anyhow::{anyhow, bail};
use clap::{Args, Subcommand, ValueEnum};
use idm_domain::{Attribute, AttributeValue, Role, RoleStore, ScalarType};
use idm_usecase::IdentityManager;

use crate::{output, Context};

#[derive(Debug, Args)]
pub struct AttrCommand {
    #[command(subcommand)]
    pub command: AttrSubcommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Integer,
    Boolean,
}

impl From<ValueType> for ScalarType {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::String => ScalarType::String,
            ValueType::Integer => ScalarType::Integer,
            ValueType::Boolean => ScalarType::Boolean,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AttrSubcommand {
    /// Set (insert or replace) an attribute on a role
    Set {
        /// Role name
        role: String,
        /// Attribute name
        name: String,
        /// Value(s); more than one requires --multi
        #[arg(required = true)]
        values: Vec<String>,
        /// Store as a multi-valued attribute, even with a single value
        #[arg(long)]
        multi: bool,
        /// Scalar type of the value(s)
        #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
    },
    /// Remove an attribute from a role
    Unset {
        /// Role name
        role: String,
        /// Attribute name
        name: String,
    },
}

/// Build the attribute value described by the command line
pub fn build_value(
    values: &[String],
    multi: bool,
    value_type: ValueType,
) -> anyhow::Result<AttributeValue> {
    let scalar_type = ScalarType::from(value_type);
    let scalars = values
        .iter()
        .map(|v| scalar_type.parse(v))
        .collect::<Result<Vec<_>, _>>()?;

    if multi {
        return Ok(AttributeValue::multi(scalars)?);
    }

    let mut scalars = scalars.into_iter();
    match (scalars.next(), scalars.next()) {
        (Some(single), None) => Ok(AttributeValue::Single(single)),
        _ => bail!(
            "{} values given; pass --multi for a multi-valued attribute",
            values.len()
        ),
    }
}

fn fetch(manager: &IdentityManager<Box<dyn RoleStore>>, name: &str) -> anyhow::Result<Role> {
    manager
        .get_role(name)?
        .ok_or_else(|| anyhow!("Role '{}' not found", name))
}

impl AttrCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let mut manager = ctx.manager()?;

        match &self.command {
            AttrSubcommand::Set {
                role,
                name,
                values,
                multi,
                value_type,
            } => {
                let value = build_value(values, *multi, *value_type)?;
                let mut snapshot = fetch(&manager, role)?;
                snapshot.set_attribute(Attribute::new(name.clone(), value));
                manager.update_role(&snapshot)?;
                output::success(format!("Set {} on {}", name, snapshot.key()));
            }
            AttrSubcommand::Unset { role, name } => {
                let mut snapshot = fetch(&manager, role)?;
                if snapshot.remove_attribute(name).is_none() {
                    output::note(format!("{} has no attribute '{}'", snapshot.key(), name));
                    return Ok(());
                }
                manager.update_role(&snapshot)?;
                output::success(format!("Removed {} from {}", name, snapshot.key()));
            }
        }
        Ok(())
    }
}
