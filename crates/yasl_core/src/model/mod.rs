//! Shopping list domain model.
//!
//! # Responsibility
//! - Define the value shapes exchanged between the repository and callers.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never reused.
//! - Model types carry no storage-specific behavior; row mapping lives in `repo`.

pub mod item;
pub mod list;
