//! Application shortcut rules.
//!
//! # Responsibility
//! - Translate one key press plus focus context into an action.
//! - Decide whether the press must be consumed before text insertion.
//!
//! # Invariants
//! - `resolve` is pure: no store access, no focus mutation.
//! - The shortcut key never reaches a text field as a literal character.

use crate::model::character::CharacterId;
use crate::model::group::GroupId;

/// The application shortcut key.
pub const SHORTCUT_KEY: char = '+';

/// Key identity, reduced to what the shortcut rules distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Tab,
}

/// One key press as delivered by the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn char(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl_char(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            ctrl: true,
            shift: false,
        }
    }

    pub fn tab() -> Self {
        Self {
            code: KeyCode::Tab,
            ctrl: false,
            shift: false,
        }
    }

    pub fn shift_tab() -> Self {
        Self {
            code: KeyCode::Tab,
            ctrl: false,
            shift: true,
        }
    }
}

/// Which editable text field currently holds input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    GroupName(GroupId),
    CharacterName(GroupId, CharacterId),
    CharacterInitiative(GroupId, CharacterId),
}

/// Action the controller must apply after a resolved press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Create a group and focus its name field.
    CreateGroup,
    /// Add a character to the first group and focus its initiative field.
    AddToFirstGroup,
    /// Hop focus from a character's initiative field to its name field.
    FocusCharacterName(GroupId, CharacterId),
}

/// Outcome of resolving one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResolution {
    /// Action to apply, if any.
    pub action: Option<ShortcutAction>,
    /// Whether the press must be consumed instead of inserted as text.
    pub consume: bool,
}

impl KeyResolution {
    const PASS: Self = Self {
        action: None,
        consume: false,
    };
}

/// Resolves one key press against the current focus context.
///
/// With ctrl held, the shortcut key creates a group; bare, it adds a
/// character to the first group. Either way the press is consumed, so a
/// focused text field never receives the literal character while the
/// shortcut still fires. Tab inside an initiative field hops to the
/// character's name field; shift-tab keeps default traversal.
pub fn resolve(input: KeyInput, focus: Option<FocusTarget>) -> KeyResolution {
    match input.code {
        KeyCode::Char(SHORTCUT_KEY) => {
            let action = if input.ctrl {
                ShortcutAction::CreateGroup
            } else {
                ShortcutAction::AddToFirstGroup
            };
            KeyResolution {
                action: Some(action),
                consume: true,
            }
        }
        KeyCode::Tab => match focus {
            Some(FocusTarget::CharacterInitiative(group_id, character_id)) if !input.shift => {
                KeyResolution {
                    action: Some(ShortcutAction::FocusCharacterName(group_id, character_id)),
                    consume: true,
                }
            }
            _ => KeyResolution::PASS,
        },
        KeyCode::Char(_) => KeyResolution::PASS,
    }
}
