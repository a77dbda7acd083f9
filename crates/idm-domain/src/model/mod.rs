//! Domain Models - The vocabulary of role management
//!
//! `Role` is the working copy callers mutate; `RoleRecord` is the committed
//! form a store holds. Nothing crosses between them except through
//! `RoleRecord::from_role` and `Role::from(record)`.

pub mod attribute;
pub mod record;
pub mod role;
