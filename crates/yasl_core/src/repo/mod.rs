//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the list/item data-access contract.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Each repository operation is exactly one SQL statement.
//! - Delete/update on a missing id is not an error; callers needing
//!   existence checks read first.
//! - Store failures surface as a closed `RepoError` kind, never retried.

pub mod shopping_repo;
