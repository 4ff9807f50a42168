//! Combatant domain model and initiative input handling.
//!
//! # Responsibility
//! - Define the character record stored inside a group blob.
//! - Police edit-time initiative text and coerce it on commit.
//!
//! # Invariants
//! - `id` is stable and never reused for another character.
//! - A committed `initiative` is always a plain integer; text that cannot
//!   be parsed commits as 0.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one combatant entry.
pub type CharacterId = Uuid;

/// Shape an initiative field may hold mid-edit: optional sign, digits only.
static PARTIAL_INITIATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*$").expect("partial initiative pattern is valid"));

/// One combatant inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Stable id used for replace-by-id updates and focus tracking.
    pub id: CharacterId,
    /// Display name. May be empty.
    pub name: String,
    /// Turn-order priority; higher acts first. May be negative.
    pub initiative: i64,
}

impl Character {
    /// Creates a blank character with a generated stable id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a blank character with a caller-provided stable id.
    pub fn with_id(id: CharacterId) -> Self {
        Self {
            id,
            name: String::new(),
            initiative: 0,
        }
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns whether `text` is acceptable in-progress initiative input.
///
/// Empty text and a lone `-` are acceptable while typing; anything outside
/// an optional sign plus digits is rejected before it reaches the field.
pub fn is_partial_initiative(text: &str) -> bool {
    PARTIAL_INITIATIVE_RE.is_match(text)
}

/// Coerces committed initiative text to its integer value.
///
/// Empty, partial (`-`) and unparsable text all commit as 0; no validation
/// error is surfaced.
pub fn coerce_initiative(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}
