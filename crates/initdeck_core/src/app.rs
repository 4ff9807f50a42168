//! Top-level application controller.
//!
//! # Responsibility
//! - Own one group store plus the focus state for its rendering surface.
//! - Serve as the single key-event entry point injected into UI shells.
//!
//! # Invariants
//! - Focus never points at a deleted group or character.
//! - Shortcut handling is the only path that moves focus implicitly.

use crate::input::shortcuts::{resolve, FocusTarget, KeyInput, ShortcutAction};
use crate::model::character::{coerce_initiative, Character, CharacterId};
use crate::model::group::{GroupId, MoveDirection};
use crate::repo::blob_repo::BlobRepository;
use crate::store::group_store::{GroupKind, GroupStore};
use log::debug;

/// Controller owning one group store and the focus state.
pub struct TrackerApp<R: BlobRepository> {
    store: GroupStore<R>,
    focus: Option<FocusTarget>,
}

impl<R: BlobRepository> TrackerApp<R> {
    /// Loads the controller for one kind from the blob repository.
    pub fn load(repo: R, kind: GroupKind) -> Self {
        Self {
            store: GroupStore::load(repo, kind),
            focus: None,
        }
    }

    pub fn store(&self) -> &GroupStore<R> {
        &self.store
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    /// UI notification that an editable field gained focus (or none has it).
    pub fn set_focus(&mut self, focus: Option<FocusTarget>) {
        self.focus = focus;
    }

    /// Handles one key press from the UI shell.
    ///
    /// Returns whether the press was consumed and must not be inserted as
    /// text by the shell.
    pub fn handle_key(&mut self, input: KeyInput) -> bool {
        let resolution = resolve(input, self.focus);
        if let Some(action) = resolution.action {
            self.apply(action);
        }
        resolution.consume
    }

    /// Creates a group through the header control; focuses its name field.
    pub fn create_group(&mut self) -> GroupId {
        let group_id = self.store.create_group();
        self.focus = Some(FocusTarget::GroupName(group_id));
        debug!("event=group_create module=app group={group_id}");
        group_id
    }

    /// Adds a character through a group's add control.
    ///
    /// Mirrors the shortcut path: the new character's initiative field
    /// takes focus. Returns `None` when the group is missing.
    pub fn add_character(&mut self, group_id: GroupId) -> Option<CharacterId> {
        let character_id = self.store.add_character(group_id)?;
        self.focus = Some(FocusTarget::CharacterInitiative(group_id, character_id));
        debug!("event=character_add module=app group={group_id} character={character_id}");
        Some(character_id)
    }

    /// Replaces a group's name. Missing ids are a no-op.
    pub fn rename_group(&mut self, group_id: GroupId, name: &str) {
        self.store.rename_group(group_id, name);
    }

    /// Deletes a group, dropping focus if it pointed inside it.
    pub fn delete_group(&mut self, group_id: GroupId) {
        self.store.delete_group(group_id);
        self.clear_stale_focus();
    }

    /// Deletes a character, dropping focus if it pointed at it.
    pub fn delete_character(&mut self, group_id: GroupId, character_id: CharacterId) {
        self.store.delete_character(group_id, character_id);
        self.clear_stale_focus();
    }

    /// Swaps a character with its neighbor; boundary moves are a no-op.
    pub fn move_character(
        &mut self,
        group_id: GroupId,
        character_id: CharacterId,
        direction: MoveDirection,
    ) {
        self.store.move_character(group_id, character_id, direction);
    }

    /// Commits edited name text for one character.
    pub fn commit_character_name(
        &mut self,
        group_id: GroupId,
        character_id: CharacterId,
        name: &str,
    ) {
        let Some(mut character) = self.character(group_id, character_id) else {
            return;
        };
        character.name = name.to_string();
        self.store.update_character(group_id, character);
    }

    /// Commits edited initiative text for one character.
    ///
    /// Text is coerced per the invalid-to-zero rule before the group is
    /// re-ranked.
    pub fn commit_initiative(&mut self, group_id: GroupId, character_id: CharacterId, raw: &str) {
        let Some(mut character) = self.character(group_id, character_id) else {
            return;
        };
        character.initiative = coerce_initiative(raw);
        self.store.update_character(group_id, character);
    }

    fn apply(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::CreateGroup => {
                self.create_group();
            }
            ShortcutAction::AddToFirstGroup => {
                let Some(group_id) = self.store.groups().first().map(|group| group.id) else {
                    return;
                };
                self.add_character(group_id);
            }
            ShortcutAction::FocusCharacterName(group_id, character_id) => {
                self.focus = Some(FocusTarget::CharacterName(group_id, character_id));
            }
        }
    }

    fn character(&self, group_id: GroupId, character_id: CharacterId) -> Option<Character> {
        self.store
            .groups()
            .iter()
            .find(|group| group.id == group_id)?
            .characters
            .iter()
            .find(|character| character.id == character_id)
            .cloned()
    }

    fn clear_stale_focus(&mut self) {
        let Some(focus) = self.focus else {
            return;
        };
        let (group_id, character_id) = match focus {
            FocusTarget::GroupName(group_id) => (group_id, None),
            FocusTarget::CharacterName(group_id, character_id)
            | FocusTarget::CharacterInitiative(group_id, character_id) => {
                (group_id, Some(character_id))
            }
        };
        let alive = self
            .store
            .groups()
            .iter()
            .find(|group| group.id == group_id)
            .map_or(false, |group| {
                character_id.map_or(true, |character_id| {
                    group.position_of(character_id).is_some()
                })
            });
        if !alive {
            self.focus = None;
        }
    }
}
