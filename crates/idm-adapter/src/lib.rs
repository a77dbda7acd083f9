//! # IDM Adapter Layer
//!
//! Implementations of the `RoleStore` port and the configuration that
//! picks one at startup.
//!
//! ## Structure
//!
//! - `repository/` - Role store implementations (memory, JSON file)
//! - `config` - YAML configuration, store selection and seeding

pub mod config;
pub mod repository;

pub use config::{ConfigError, IdmConfig, SeedRole, StoreConfig};
pub use repository::file_system::FileRoleStore;
pub use repository::in_memory::InMemoryRoleStore;
