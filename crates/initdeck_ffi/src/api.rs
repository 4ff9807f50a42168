//! FFI use-case API for the rendering shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level tracker functions to the UI via FRB.
//! - Keep error semantics simple: response envelopes, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutating call leaves the persisted blob consistent with the
//!   snapshot a follow-up call would return.

use initdeck_core::db::open_db;
use initdeck_core::{
    coerce_initiative, core_version as core_version_inner, init_logging as init_logging_inner,
    is_partial_initiative, Character, GroupKind, GroupStore, MoveDirection, SqliteBlobRepository,
};
use log::info;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const TRACKER_DB_FILE_NAME: &str = "initdeck.sqlite3";
static TRACKER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose the core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same configuration (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Returns whether `text` is acceptable in-progress initiative input.
///
/// The UI calls this on every edit so an initiative field only ever holds
/// an optional sign plus digits.
///
/// # FFI contract
/// - Sync call, non-blocking, no DB access.
/// - Never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn initiative_input_is_valid(text: String) -> bool {
    is_partial_initiative(&text)
}

/// Generic action response envelope for tracker mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Created entity id, when the operation creates one.
    pub created_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TrackerActionResponse {
    fn success(message: impl Into<String>, created_id: Option<String>) -> Self {
        Self {
            ok: true,
            created_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            created_id: None,
            message: message.into(),
        }
    }
}

/// Snapshot envelope: the serialized group set for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSnapshotResponse {
    /// Whether the snapshot was produced.
    pub ok: bool,
    /// JSON array of groups, newest first, characters in ranked order.
    pub groups_json: String,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Human-facing heading for one kind, empty for unknown kinds.
///
/// # FFI contract
/// - Sync call, non-blocking, no DB access.
/// - Never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_kind_label(kind: String) -> String {
    parse_kind(&kind)
        .map(|kind| kind.label().to_string())
        .unwrap_or_default()
}

/// Returns the current group set for one kind.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; an unreadable store is reported in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_snapshot(kind: String) -> TrackerSnapshotResponse {
    let result = parse_kind(&kind).and_then(|kind| with_store(kind, |store| store.to_json()));
    match result {
        Ok(groups_json) => TrackerSnapshotResponse {
            ok: true,
            groups_json,
            message: String::new(),
        },
        Err(err) => TrackerSnapshotResponse {
            ok: false,
            groups_json: "[]".to_string(),
            message: format!("tracker_snapshot failed: {err}"),
        },
    }
}

/// Creates a group at the head of the set.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns the created group id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_create_group(kind: String) -> TrackerActionResponse {
    let result =
        parse_kind(&kind).and_then(|kind| with_store(kind, |store| store.create_group()));
    match result {
        Ok(group_id) => {
            TrackerActionResponse::success("Group created.", Some(group_id.to_string()))
        }
        Err(err) => TrackerActionResponse::failure(format!("tracker_create_group failed: {err}")),
    }
}

/// Replaces a group's name. Missing ids are a silent no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_rename_group(kind: String, group_id: String, name: String) -> TrackerActionResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let group_id = parse_id(&group_id, "group_id")?;
        with_store(kind, |store| store.rename_group(group_id, &name))
    });
    match result {
        Ok(()) => TrackerActionResponse::success("Group renamed.", None),
        Err(err) => TrackerActionResponse::failure(format!("tracker_rename_group failed: {err}")),
    }
}

/// Deletes a group. Missing ids are a silent no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_delete_group(kind: String, group_id: String) -> TrackerActionResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let group_id = parse_id(&group_id, "group_id")?;
        with_store(kind, |store| store.delete_group(group_id))
    });
    match result {
        Ok(()) => TrackerActionResponse::success("Group deleted.", None),
        Err(err) => TrackerActionResponse::failure(format!("tracker_delete_group failed: {err}")),
    }
}

/// Appends a blank character to a group.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns the created character id, or a failure when
///   the group is missing.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_character(kind: String, group_id: String) -> TrackerActionResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let group_id = parse_id(&group_id, "group_id")?;
        with_store(kind, |store| store.add_character(group_id))
    });
    match result {
        Ok(Some(character_id)) => {
            TrackerActionResponse::success("Character added.", Some(character_id.to_string()))
        }
        Ok(None) => TrackerActionResponse::failure("tracker_add_character failed: unknown group"),
        Err(err) => TrackerActionResponse::failure(format!("tracker_add_character failed: {err}")),
    }
}

/// Commits edited character fields and re-ranks the group.
///
/// `initiative_text` carries the raw field text; it is coerced with the
/// invalid-to-zero rule before the update.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids are a silent no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_commit_character(
    kind: String,
    group_id: String,
    character_id: String,
    name: String,
    initiative_text: String,
) -> TrackerActionResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let group_id = parse_id(&group_id, "group_id")?;
        let character_id = parse_id(&character_id, "character_id")?;
        let character = Character {
            id: character_id,
            name,
            initiative: coerce_initiative(&initiative_text),
        };
        with_store(kind, |store| store.update_character(group_id, character))
    });
    match result {
        Ok(()) => TrackerActionResponse::success("Character updated.", None),
        Err(err) => {
            TrackerActionResponse::failure(format!("tracker_commit_character failed: {err}"))
        }
    }
}

/// Deletes a character. Missing ids are a silent no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_delete_character(
    kind: String,
    group_id: String,
    character_id: String,
) -> TrackerActionResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let group_id = parse_id(&group_id, "group_id")?;
        let character_id = parse_id(&character_id, "character_id")?;
        with_store(kind, |store| store.delete_character(group_id, character_id))
    });
    match result {
        Ok(()) => TrackerActionResponse::success("Character deleted.", None),
        Err(err) => {
            TrackerActionResponse::failure(format!("tracker_delete_character failed: {err}"))
        }
    }
}

/// Swaps a character with its neighbor; boundary moves are a no-op.
///
/// `direction` is `left` or `right`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; an unknown direction is reported in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_move_character(
    kind: String,
    group_id: String,
    character_id: String,
    direction: String,
) -> TrackerActionResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let group_id = parse_id(&group_id, "group_id")?;
        let character_id = parse_id(&character_id, "character_id")?;
        let direction = parse_direction(&direction)?;
        with_store(kind, |store| {
            store.move_character(group_id, character_id, direction)
        })
    });
    match result {
        Ok(()) => TrackerActionResponse::success("Character moved.", None),
        Err(err) => TrackerActionResponse::failure(format!("tracker_move_character failed: {err}")),
    }
}

fn resolve_tracker_db_path() -> PathBuf {
    TRACKER_DB_PATH
        .get_or_init(|| {
            let path = match std::env::var("INITDECK_DB_PATH") {
                Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
                _ => std::env::temp_dir().join(TRACKER_DB_FILE_NAME),
            };
            info!("event=db_path module=ffi path={}", path.display());
            path
        })
        .clone()
}

fn with_store<T>(
    kind: GroupKind,
    f: impl FnOnce(&mut GroupStore<SqliteBlobRepository<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_tracker_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("tracker DB open failed: {err}"))?;
    let repo = SqliteBlobRepository::try_new(&conn)
        .map_err(|err| format!("tracker repo init failed: {err}"))?;
    let mut store = GroupStore::load(repo, kind);
    Ok(f(&mut store))
}

fn parse_kind(value: &str) -> Result<GroupKind, String> {
    match value {
        "encounters" => Ok(GroupKind::Encounters),
        "turnOrders" => Ok(GroupKind::TurnOrders),
        other => Err(format!(
            "unknown kind `{other}`; expected encounters|turnOrders"
        )),
    }
}

fn parse_direction(value: &str) -> Result<MoveDirection, String> {
    match value {
        "left" => Ok(MoveDirection::Left),
        "right" => Ok(MoveDirection::Right),
        other => Err(format!("unknown direction `{other}`; expected left|right")),
    }
}

fn parse_id(value: &str, field: &'static str) -> Result<Uuid, String> {
    Uuid::parse_str(value).map_err(|_| format!("invalid uuid `{value}` in {field}"))
}
