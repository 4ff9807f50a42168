//! Group domain model and ordering policy.
//!
//! # Responsibility
//! - Define the named ordered collection of characters.
//! - Re-establish descending-initiative ranking after character updates.
//!
//! # Invariants
//! - `id` is stable and never reused for another group.
//! - After `rank_characters`, the list is sorted by descending initiative
//!   and ties keep the relative order they had before the pass.

use crate::model::character::{Character, CharacterId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use uuid::Uuid;

/// Stable identifier for one group.
pub type GroupId = Uuid;

/// Direction for a neighbor swap inside a group's character row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

/// A named ordered collection of characters: one encounter or turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Stable id used for rename/delete targeting and focus tracking.
    pub id: GroupId,
    /// Display name. May be empty.
    pub name: String,
    /// Combatants in current ranked order, highest initiative first.
    pub characters: Vec<Character>,
}

impl Group {
    /// Creates an empty group with a generated stable id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty group with a caller-provided stable id.
    pub fn with_id(id: GroupId) -> Self {
        Self {
            id,
            name: String::new(),
            characters: Vec::new(),
        }
    }

    /// Index of a character by id, if present.
    pub fn position_of(&self, character_id: CharacterId) -> Option<usize> {
        self.characters
            .iter()
            .position(|character| character.id == character_id)
    }

    /// Re-sorts characters by descending initiative.
    ///
    /// The standard sort is stable, so characters with equal initiative
    /// keep the relative order they had before this pass.
    pub fn rank_characters(&mut self) {
        self.characters
            .sort_by_key(|character| Reverse(character.initiative));
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Character, Group};

    fn named(name: &str, initiative: i64) -> Character {
        let mut character = Character::new();
        character.name = name.to_string();
        character.initiative = initiative;
        character
    }

    #[test]
    fn ranking_sorts_by_descending_initiative() {
        let mut group = Group::new();
        group.characters = vec![named("a", 3), named("b", 20), named("c", -1)];

        group.rank_characters();

        let order: Vec<i64> = group.characters.iter().map(|c| c.initiative).collect();
        assert_eq!(order, vec![20, 3, -1]);
    }

    #[test]
    fn ranking_keeps_prior_order_for_ties() {
        let mut group = Group::new();
        group.characters = vec![named("first", 5), named("second", 5), named("third", 5)];

        group.rank_characters();

        let order: Vec<&str> = group
            .characters
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }
}
