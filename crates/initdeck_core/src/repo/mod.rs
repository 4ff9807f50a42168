//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key/value blob contract the group store persists through.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - Repository construction validates schema readiness before use.
//! - `set` replaces the whole blob; partial updates do not exist.

pub mod blob_repo;
