use chrono::NaiveDate;
use pocketdeck_core::db::{open_db, open_db_in_memory};
use pocketdeck_core::{
    JsonStore, KeyValueStore, NewTask, Priority, SqliteKvStore, StoreError, Task, TaskRepository,
};

#[test]
fn collection_survives_a_fresh_process_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketdeck.sqlite3");

    let written: Vec<Task> = {
        let conn = open_db(&path).unwrap();
        let mut repo = TaskRepository::load(SqliteKvStore::new(&conn)).unwrap();
        for text in ["first", "second", "third"] {
            repo.add_task(NewTask {
                text: text.to_string(),
                priority: Priority::High,
                due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                due_time: Some("09:00".parse().unwrap()),
            })
            .unwrap();
        }
        let ids: Vec<_> = repo.tasks().iter().rev().map(|task| task.id).collect();
        repo.reorder(&ids).unwrap();
        repo.tasks().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let reloaded = TaskRepository::load(SqliteKvStore::new(&conn)).unwrap();
    assert_eq!(reloaded.tasks(), written.as_slice());
    let texts: Vec<&str> = reloaded.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["third", "second", "first"]);
}

#[test]
fn corrupt_or_null_payloads_fall_back_to_default() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let store = JsonStore::new(kv);

    kv.set_raw("todos", "{not json").unwrap();
    let tasks: Vec<Task> = store.get("todos", Vec::new()).unwrap();
    assert!(tasks.is_empty());

    kv.set_raw("settings", "null").unwrap();
    let theme: Vec<String> = store.get("settings", vec!["dark".to_string()]).unwrap();
    assert_eq!(theme, ["dark"]);

    let missing: u32 = store.get("absent", 7).unwrap();
    assert_eq!(missing, 7);
}

#[test]
fn corrupt_record_is_replaced_by_the_next_write() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    kv.set_raw("todos", "[{\"id\":").unwrap();

    let mut repo = TaskRepository::load(kv).unwrap();
    assert!(repo.tasks().is_empty());
    repo.add_task(NewTask::new("recovered")).unwrap();

    let raw = kv.get_raw("todos").unwrap().unwrap();
    let stored: Vec<Task> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].text, "recovered");
}

#[test]
fn write_failures_reach_the_caller() {
    let conn = open_db_in_memory().unwrap();
    let store = JsonStore::new(SqliteKvStore::new(&conn));
    conn.execute_batch("DROP TABLE kv_records;").unwrap();

    let err = store.set("notes", &Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, StoreError::Sqlite(_)));
}

#[test]
fn undecodable_element_does_not_wipe_its_neighbours() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    kv.set_raw(
        "todos",
        r#"[
            {"id":"6f1c2a52-8a52-4a0e-9d0e-3f1f6b1f0a01","text":"Keep me","done":false,"priority":"High"},
            {"id":"6f1c2a52-8a52-4a0e-9d0e-3f1f6b1f0a02","text":"Odd time","dueDate":"2024-01-01","dueTime":"09:00:00"}
        ]"#,
    )
    .unwrap();

    let mut repo = TaskRepository::load(kv).unwrap();
    let texts: Vec<&str> = repo.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["Keep me"]);

    repo.add_task(NewTask::new("New")).unwrap();
    let raw = kv.get_raw("todos").unwrap().unwrap();
    let stored: Vec<Task> = serde_json::from_str(&raw).unwrap();
    let texts: Vec<&str> = stored.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["Keep me", "New"]);
}

#[test]
fn non_array_payload_loads_as_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    kv.set_raw("todos", r#"{"text":"not a list"}"#).unwrap();

    let tasks: Vec<Task> = JsonStore::new(kv).get_list("todos").unwrap();
    assert!(tasks.is_empty());
}
