//! Repository layer for roster storage.
//!
//! # Responsibility
//! - Define the storage capabilities the search service depends on.
//! - Keep SQLite query text and row decoding inside the persistence boundary.
//!
//! # Invariants
//! - The search capability is read-only.
//! - Store failures surface as `RepoError::Db` without retry.

pub mod member_repo;
