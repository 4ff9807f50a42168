//! Group store orchestration.
//!
//! # Responsibility
//! - Own the authoritative in-memory group set for one kind.
//! - Write the full set through to blob persistence after each mutation.
//!
//! # Invariants
//! - Persistence failures never surface to callers; the in-memory set
//!   stays authoritative for the session.

pub mod group_store;
