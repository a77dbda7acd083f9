//! # IDM Domain Layer
//!
//! Roles, their attributes, and the port through which they are stored.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/      - Role, Attribute, RoleRecord                  ││
//! │  │  repository/ - RoleStore trait (not implementations)        ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No I/O happens here. Swapping the JSON file for a directory server
//! changes idm-adapter, never this crate.

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::{
    attribute::{Attribute, AttributeError, AttributeValue, Scalar, ScalarList, ScalarType},
    record::RoleRecord,
    role::{validate_role_name, Role, RoleKey, RoleNameError, ROLE_KEY_PREFIX},
};

pub use repository::role_store::{RoleStore, StoreError};
