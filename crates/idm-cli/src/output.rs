//! Rendering roles for the terminal

use std::collections::BTreeMap;

use console::style;
use idm_domain::{AttributeValue, Role};
use serde::Serialize;

/// JSON shape of a role
#[derive(Debug, Serialize)]
pub struct RoleView<'a> {
    pub key: String,
    pub name: &'a str,
    pub attributes: BTreeMap<&'a str, &'a AttributeValue>,
}

impl<'a> From<&'a Role> for RoleView<'a> {
    fn from(role: &'a Role) -> Self {
        Self {
            key: role.key().to_string(),
            name: role.name(),
            attributes: role.attributes().map(|a| (a.name(), a.value())).collect(),
        }
    }
}

/// Text form: key line, then one indented line per attribute
pub fn render_role(role: &Role) -> String {
    let mut out = format!("{}\n", role.key());
    for attr in role.attributes() {
        let arity = if attr.is_multi_valued() { " (multi)" } else { "" };
        out.push_str(&format!("  {} = {}{}\n", attr.name(), attr.value(), arity));
    }
    out
}

pub fn print_role(role: &Role, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&RoleView::from(role))?);
    } else {
        print!("{}", render_role(role));
    }
    Ok(())
}

pub fn print_roles(roles: &[Role], json: bool) -> anyhow::Result<()> {
    if json {
        let views: Vec<RoleView<'_>> = roles.iter().map(RoleView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if roles.is_empty() {
        println!("No roles");
    }
    for role in roles {
        println!(
            "{}  {}",
            style(role.key()).bold(),
            style(format!("{} attribute(s)", role.attribute_count())).dim()
        );
    }
    Ok(())
}

/// Status line for a completed change
pub fn success(message: impl AsRef<str>) {
    println!("{} {}", style("✓").green(), message.as_ref());
}

/// Status line for a command that had nothing to change
pub fn note(message: impl AsRef<str>) {
    println!("{}", note_line(message));
}

pub fn note_line(message: impl AsRef<str>) -> String {
    format!("{} {}", style("·").dim(), message.as_ref())
}
