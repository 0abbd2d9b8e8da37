//! # TaskTitan Shared Library
//!
//! This crate contains the persistence layer and domain models used by the
//! TaskTitan API server and its seeding tool.
//!
//! ## Module Organization
//!
//! - `db`: SQLite gateway, generic repository, schema bootstrap and seed data
//! - `models`: Users, tasks and notes
//! - `auth`: Password hashing

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskTitan shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
