//! In-memory group store with write-through blob persistence.
//!
//! # Responsibility
//! - Own the group set for one kind and expose its CRUD operations.
//! - Serialize the full set to the blob repository after each mutation.
//!
//! # Invariants
//! - Operations on missing groups or characters are no-ops, not errors.
//! - `update_character` re-establishes the descending-initiative ranking;
//!   add, delete, and move never re-rank.
//! - An absent or unparsable blob rehydrates as an empty set.

use crate::model::character::{Character, CharacterId};
use crate::model::group::{Group, GroupId, MoveDirection};
use crate::repo::blob_repo::BlobRepository;
use log::warn;

/// Which persisted list a store instance manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Encounter prep lists.
    Encounters,
    /// Live turn-order lists.
    TurnOrders,
}

impl GroupKind {
    /// Blob key this kind persists under.
    ///
    /// Fixed wire identifiers; the `turnOrders` spelling keeps blobs
    /// written by earlier builds readable.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Encounters => "encounters",
            Self::TurnOrders => "turnOrders",
        }
    }

    /// Human-facing label for list headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Encounters => "Encounters",
            Self::TurnOrders => "Turn Orders",
        }
    }
}

/// In-memory group collection with write-through persistence.
pub struct GroupStore<R: BlobRepository> {
    repo: R,
    kind: GroupKind,
    groups: Vec<Group>,
}

impl<R: BlobRepository> GroupStore<R> {
    /// Loads the store for `kind`, rehydrating from the blob repository.
    ///
    /// An absent or unparsable blob yields an empty set; the failure is
    /// logged and never surfaced.
    pub fn load(repo: R, kind: GroupKind) -> Self {
        let groups = match repo.get(kind.storage_key()) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Group>>(&raw) {
                Ok(groups) => groups,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=recovered kind={} error={err}",
                        kind.storage_key()
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered kind={} error={err}",
                    kind.storage_key()
                );
                Vec::new()
            }
        };
        Self { repo, kind, groups }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Current group set: newest group first, characters in ranked order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Creates an empty group at the head of the set.
    pub fn create_group(&mut self) -> GroupId {
        let group = Group::new();
        let id = group.id;
        self.groups.insert(0, group);
        self.persist();
        id
    }

    /// Removes a group. Missing ids are a no-op.
    pub fn delete_group(&mut self, id: GroupId) {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != id);
        if self.groups.len() != before {
            self.persist();
        }
    }

    /// Replaces a group's name. Missing ids are a no-op.
    pub fn rename_group(&mut self, id: GroupId, name: &str) {
        if let Some(group) = self.group_mut(id) {
            group.name = name.to_string();
            self.persist();
        }
    }

    /// Appends a blank character to a group.
    ///
    /// Returns the new character's id, or `None` when the group is missing.
    pub fn add_character(&mut self, group_id: GroupId) -> Option<CharacterId> {
        let group = self.group_mut(group_id)?;
        let character = Character::new();
        let id = character.id;
        group.characters.push(character);
        self.persist();
        Some(id)
    }

    /// Replaces the character matching `character.id` and re-ranks the
    /// group's list. Missing group or character ids are a no-op.
    pub fn update_character(&mut self, group_id: GroupId, character: Character) {
        let Some(group) = self.group_mut(group_id) else {
            return;
        };
        let Some(position) = group.position_of(character.id) else {
            return;
        };
        group.characters[position] = character;
        group.rank_characters();
        self.persist();
    }

    /// Removes a character from a group. Missing ids are a no-op.
    pub fn delete_character(&mut self, group_id: GroupId, character_id: CharacterId) {
        let Some(group) = self.group_mut(group_id) else {
            return;
        };
        let before = group.characters.len();
        group.characters.retain(|character| character.id != character_id);
        if group.characters.len() != before {
            self.persist();
        }
    }

    /// Swaps a character with its immediate neighbor in `direction`.
    ///
    /// Boundary moves and missing ids are a no-op.
    pub fn move_character(
        &mut self,
        group_id: GroupId,
        character_id: CharacterId,
        direction: MoveDirection,
    ) {
        let Some(group) = self.group_mut(group_id) else {
            return;
        };
        let Some(index) = group.position_of(character_id) else {
            return;
        };
        match direction {
            MoveDirection::Left if index > 0 => group.characters.swap(index - 1, index),
            MoveDirection::Right if index + 1 < group.characters.len() => {
                group.characters.swap(index, index + 1)
            }
            _ => return,
        }
        self.persist();
    }

    /// Serialized group set in the blob wire format, for rendering
    /// surfaces.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.groups).unwrap_or_else(|_| "[]".to_string())
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    /// Serializes the full set under this kind's key.
    ///
    /// A failed write leaves in-memory state ahead of the persisted blob
    /// until the next successful write.
    fn persist(&self) {
        let raw = match serde_json::to_string(&self.groups) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=skipped kind={} error={err}",
                    self.kind.storage_key()
                );
                return;
            }
        };
        if let Err(err) = self.repo.set(self.kind.storage_key(), &raw) {
            warn!(
                "event=store_persist module=store status=skipped kind={} error={err}",
                self.kind.storage_key()
            );
        }
    }
}
