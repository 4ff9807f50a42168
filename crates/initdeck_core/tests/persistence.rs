use initdeck_core::db::open_db_in_memory;
use initdeck_core::{
    BlobRepository, GroupKind, GroupStore, RepoError, RepoResult, SqliteBlobRepository,
};

#[test]
fn rehydrated_store_matches_persisted_state() {
    let conn = open_db_in_memory().unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let mut store = GroupStore::load(repo, GroupKind::Encounters);
    let group_id = store.create_group();
    store.rename_group(group_id, "Bandit Camp");
    let a = store.add_character(group_id).unwrap();
    let b = store.add_character(group_id).unwrap();
    let mut character = store.groups()[0].characters[0].clone();
    character.name = "Askel".to_string();
    character.initiative = 12;
    store.update_character(group_id, character);

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let reloaded = GroupStore::load(repo, GroupKind::Encounters);

    assert_eq!(reloaded.groups(), store.groups());
    let characters = &reloaded.groups()[0].characters;
    assert_eq!(characters[0].id, a);
    assert_eq!(characters[0].name, "Askel");
    assert_eq!(characters[0].initiative, 12);
    assert_eq!(characters[1].id, b);
}

#[test]
fn kinds_persist_under_separate_keys() {
    let conn = open_db_in_memory().unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let mut encounters = GroupStore::load(repo, GroupKind::Encounters);
    encounters.create_group();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let turn_orders = GroupStore::load(repo, GroupKind::TurnOrders);
    assert!(turn_orders.groups().is_empty());

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let reloaded = GroupStore::load(repo, GroupKind::Encounters);
    assert_eq!(reloaded.groups().len(), 1);
}

#[test]
fn absent_blob_loads_as_empty_set() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBlobRepository::try_new(&conn).unwrap();

    let store = GroupStore::load(repo, GroupKind::TurnOrders);
    assert!(store.groups().is_empty());
}

#[test]
fn malformed_blob_loads_as_empty_set() {
    let conn = open_db_in_memory().unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    repo.set(GroupKind::Encounters.storage_key(), "not json at all")
        .unwrap();

    let store = GroupStore::load(repo, GroupKind::Encounters);
    assert!(store.groups().is_empty());
}

#[test]
fn malformed_blob_is_replaced_on_next_write() {
    let conn = open_db_in_memory().unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    repo.set(GroupKind::Encounters.storage_key(), "[{\"truncated\":")
        .unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let mut store = GroupStore::load(repo, GroupKind::Encounters);
    store.create_group();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let reloaded = GroupStore::load(repo, GroupKind::Encounters);
    assert_eq!(reloaded.groups().len(), 1);
}

struct FailingRepository;

impl BlobRepository for FailingRepository {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::MissingRequiredTable("blobs"))
    }
}

#[test]
fn write_failure_keeps_in_memory_state_authoritative() {
    let mut store = GroupStore::load(FailingRepository, GroupKind::Encounters);

    let group_id = store.create_group();
    store.rename_group(group_id, "Ghost Ship");
    let character_id = store.add_character(group_id).unwrap();

    assert_eq!(store.groups().len(), 1);
    assert_eq!(store.groups()[0].name, "Ghost Ship");
    assert_eq!(store.groups()[0].characters[0].id, character_id);
}

struct UnreadableRepository;

impl BlobRepository for UnreadableRepository {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Err(RepoError::MissingRequiredTable("blobs"))
    }

    fn set(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Ok(())
    }
}

#[test]
fn read_failure_loads_as_empty_set() {
    let store = GroupStore::load(UnreadableRepository, GroupKind::Encounters);
    assert!(store.groups().is_empty());
}

#[test]
fn blob_holds_json_array_of_groups() {
    let conn = open_db_in_memory().unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let mut store = GroupStore::load(repo, GroupKind::Encounters);
    let group_id = store.create_group();
    store.rename_group(group_id, "Bridge Duel");
    store.add_character(group_id).unwrap();

    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let raw = repo
        .get(GroupKind::Encounters.storage_key())
        .unwrap()
        .expect("blob should be written");

    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let groups = parsed.as_array().expect("top level is an array");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Bridge Duel");
    assert!(groups[0]["id"].is_string());
    let characters = groups[0]["characters"]
        .as_array()
        .expect("characters is an array");
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0]["initiative"], 0);
}
