//! # IDM Use Case Layer
//!
//! The identity manager contract: create, get, update and remove roles
//! through any [`idm_domain::RoleStore`].
//!
//! Attribute changes follow one protocol only: fetch a snapshot with
//! `get_role`, mutate it in memory, hand the whole snapshot to
//! `update_role`. There is no per-attribute remote call.

pub mod error;
pub mod identity_manager;

pub use idm_domain;

pub use error::{IdmError, Result};
pub use identity_manager::IdentityManager;
