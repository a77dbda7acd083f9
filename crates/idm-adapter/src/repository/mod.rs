//! Persistence Adapters - Role store implementations
//!
//! These implement the `RoleStore` trait from idm-domain.

pub mod file_system;
pub mod in_memory;
