//! Key input model and shortcut resolution.
//!
//! # Responsibility
//! - Describe key presses and focus context independent of any UI toolkit.
//! - Resolve application-level shortcut rules as a pure function.
//!
//! # Invariants
//! - Resolution never touches the store or moves focus; the controller
//!   applies the resolved action.

pub mod shortcuts;
