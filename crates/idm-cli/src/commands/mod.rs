//! CLI Commands

pub mod attr;
pub mod init;
pub mod role;

pub use attr::AttrCommand;
pub use init::InitCommand;
pub use role::RoleCommand;
