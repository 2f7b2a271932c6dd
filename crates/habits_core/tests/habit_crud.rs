use habits_core::db::open_db_in_memory;
use habits_core::{
    EntityKind, Habit, HabitRepository, HabitRequest, HabitService, Item, ItemKey, ItemStore,
    RepoError, ServiceError, SqliteItemStore, StoreHabitRepository,
};
use serde_json::{json, Map};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

fn shared_store() -> Arc<SqliteItemStore> {
    Arc::new(SqliteItemStore::try_new(open_db_in_memory().unwrap()).unwrap())
}

fn repo() -> StoreHabitRepository<Arc<SqliteItemStore>> {
    StoreHabitRepository::new(shared_store())
}

fn request(name: &str) -> HabitRequest {
    HabitRequest {
        name: name.to_string(),
        description: "Daily workout".to_string(),
        color: "#ff0000".to_string(),
    }
}

static TICKS: AtomicI64 = AtomicI64::new(1_000);

fn ticking_clock() -> i64 {
    TICKS.fetch_add(1, Ordering::SeqCst)
}

#[test]
fn create_and_find_roundtrip() {
    let repo = repo();
    let habit = Habit::from_request("h-1", &request("Exercise"), 100);
    repo.create_habit("user-a", &habit).unwrap();

    let loaded = repo.find_habit_by_id("user-a", "h-1").unwrap();
    assert_eq!(loaded, habit);
}

#[test]
fn create_overwrites_on_id_collision() {
    let repo = repo();
    repo.create_habit("user-a", &Habit::from_request("h-1", &request("first"), 1))
        .unwrap();
    repo.create_habit("user-a", &Habit::from_request("h-1", &request("second"), 2))
        .unwrap();

    let habits = repo.list_habits("user-a").unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "second");
}

#[test]
fn list_for_empty_tenant_is_empty() {
    let repo = repo();
    assert!(repo.list_habits("nobody").unwrap().is_empty());
}

#[test]
fn tenants_are_isolated() {
    let repo = repo();
    repo.create_habit("user-a", &Habit::from_request("h-1", &request("a"), 1))
        .unwrap();

    assert!(repo.list_habits("user-b").unwrap().is_empty());
    let err = repo.find_habit_by_id("user-b", "h-1").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { kind: EntityKind::Habit, .. }));
    let err = repo.delete_habit("user-b", "h-1").unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(repo.list_habits("user-a").unwrap().len(), 1);
}

#[test]
fn find_missing_returns_not_found() {
    let repo = repo();
    let err = repo.find_habit_by_id("user-a", "missing").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { ref id, .. } if id == "missing"));
}

#[test]
fn delete_then_find_returns_not_found() {
    let repo = repo();
    repo.create_habit("user-a", &Habit::from_request("h-1", &request("a"), 1))
        .unwrap();

    repo.delete_habit("user-a", "h-1").unwrap();
    assert!(repo.find_habit_by_id("user-a", "h-1").unwrap_err().is_not_found());
    assert!(repo.delete_habit("user-a", "h-1").unwrap_err().is_not_found());
}

#[test]
fn update_does_not_require_existing_item() {
    let repo = repo();
    let habit = Habit::from_request("h-9", &request("ghost"), 5);
    repo.update_habit("user-a", "h-9", &habit).unwrap();

    assert_eq!(repo.find_habit_by_id("user-a", "h-9").unwrap(), habit);
}

#[test]
fn habits_are_stored_under_prefixed_sort_key() {
    let store = shared_store();
    let repo = StoreHabitRepository::new(store.clone());
    repo.create_habit("user-a", &Habit::from_request("h-1", &request("a"), 1))
        .unwrap();

    let item = store
        .get_item(&ItemKey::new("user-a", "habit#h-1"))
        .unwrap()
        .unwrap();
    assert_eq!(item.attributes["id"], "h-1");
    assert_eq!(item.attributes["createdAt"], 1);
}

#[test]
fn habit_logs_do_not_appear_in_habit_list() {
    let store = shared_store();
    store
        .put_item(&Item {
            key: ItemKey::new("user-a", "habit-log#l-1"),
            attributes: Map::new(),
        })
        .unwrap();

    let repo = StoreHabitRepository::new(store);
    assert!(repo.list_habits("user-a").unwrap().is_empty());
}

#[test]
fn corrupt_item_is_reported_as_invalid_data() {
    let store = shared_store();
    let attributes = match json!({"id": "h-1", "name": 7}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    store
        .put_item(&Item {
            key: ItemKey::new("user-a", "habit#h-1"),
            attributes,
        })
        .unwrap();

    let repo = StoreHabitRepository::new(store);
    let err = repo.find_habit_by_id("user-a", "h-1").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_create_assigns_id_and_timestamps() {
    let service = HabitService::new(repo());

    let created = service.create_habit("user-a", &request("Exercise")).unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Exercise");
    assert_eq!(created.created_at, created.updated_at);

    let found = service.find_habit("user-a", &created.id).unwrap();
    assert_eq!(found, created);
}

#[test]
fn service_generates_distinct_ids() {
    let service = HabitService::new(repo());
    let first = service.create_habit("user-a", &request("a")).unwrap();
    let second = service.create_habit("user-a", &request("b")).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.list_habits("user-a").unwrap().len(), 2);
}

#[test]
fn service_update_overlays_fields_and_keeps_created_at() {
    let service = HabitService::with_clock(repo(), ticking_clock);
    let created = service.create_habit("user-a", &request("Exercise")).unwrap();

    let updated = service
        .update_habit(
            "user-a",
            &created.id,
            &HabitRequest {
                name: "Yoga".to_string(),
                description: String::new(),
                color: "#00ff00".to_string(),
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Yoga");
    assert_eq!(updated.description, "");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let stored = service.find_habit("user-a", &created.id).unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn service_update_missing_returns_not_found_and_writes_nothing() {
    let service = HabitService::new(repo());

    let err = service
        .update_habit("user-a", "missing", &request("x"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: EntityKind::Habit, .. }));
    assert!(service.list_habits("user-a").unwrap().is_empty());
}

#[test]
fn service_delete_missing_returns_not_found() {
    let service = HabitService::new(repo());
    let err = service.delete_habit("user-a", "never-created").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}
