//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants roles persisted,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait RoleStore       │  InMemoryRoleStore
//!   fn insert()         │  FileRoleStore
//!   fn replace()        │  (directory server, ...)
//! ```

pub mod role_store;
