use pocketdeck_core::db::open_db_in_memory;
use pocketdeck_core::{
    AlarmRepository, BookmarkRepository, JsonStore, NewAlarm, NewTask, Note, NoteRepository,
    Repeat, RepoError, SettingsRepository, SqliteKvStore, TaskRepository, Theme,
};
use uuid::Uuid;

#[test]
fn blank_task_text_is_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let mut tasks = TaskRepository::load(kv).unwrap();

    assert_eq!(tasks.add_task(NewTask::new("   ")).unwrap(), None);
    assert!(tasks.tasks().is_empty());
    assert_eq!(pocketdeck_core::KeyValueStore::get_raw(&kv, "todos").unwrap(), None);
}

#[test]
fn task_mutations_are_persisted_immediately() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let mut tasks = TaskRepository::load(kv).unwrap();

    let id = tasks.add_task(NewTask::new("  Pay rent  ")).unwrap().unwrap();
    assert_eq!(tasks.get(id).unwrap().text, "Pay rent");
    assert!(tasks.toggle_done(id).unwrap());
    tasks.edit_text(id, " Pay rent today ").unwrap();

    let fresh = TaskRepository::load(kv).unwrap();
    let stored = fresh.get(id).unwrap();
    assert!(stored.done);
    assert_eq!(stored.text, "Pay rent today");
    assert!(!stored.reminded);

    assert!(!tasks.toggle_done(id).unwrap());
    let removed = tasks.remove(id).unwrap();
    assert_eq!(removed.id, id);
    assert!(TaskRepository::load(kv).unwrap().tasks().is_empty());
}

#[test]
fn unknown_ids_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut tasks = TaskRepository::load(SqliteKvStore::new(&conn)).unwrap();
    let missing = Uuid::new_v4();

    assert!(matches!(tasks.toggle_done(missing), Err(RepoError::NotFound(id)) if id == missing));
    assert!(matches!(tasks.remove(missing), Err(RepoError::NotFound(_))));
}

#[test]
fn reorder_accepts_only_exact_permutations() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let mut notes = NoteRepository::load(kv).unwrap();
    let a = notes.add_note("a").unwrap().unwrap();
    let b = notes.add_note("b").unwrap().unwrap();
    let c = notes.add_note("c").unwrap().unwrap();

    notes.reorder(&[c, a, b]).unwrap();
    let order: Vec<_> = notes.notes().iter().map(|note| note.id).collect();
    assert_eq!(order, [c, a, b]);

    for bad in [
        vec![c, a],
        vec![c, a, b, Uuid::new_v4()],
        vec![c, a, Uuid::new_v4()],
        vec![c, c, a],
    ] {
        assert!(matches!(notes.reorder(&bad), Err(RepoError::InvalidOrder(_))));
    }

    let stored: Vec<Note> = JsonStore::new(kv).get("notes", Vec::new()).unwrap();
    let stored_order: Vec<_> = stored.iter().map(|note| note.id).collect();
    assert_eq!(stored_order, [c, a, b]);
}

#[test]
fn note_edits_keep_text_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let mut notes = NoteRepository::load(SqliteKvStore::new(&conn)).unwrap();
    assert_eq!(notes.add_note("\n\t").unwrap(), None);

    let id = notes.add_note("  groceries  ").unwrap().unwrap();
    assert_eq!(notes.get(id).unwrap().text, "groceries");
    notes.edit_text(id, "milk\neggs\n").unwrap();
    assert_eq!(notes.get(id).unwrap().text, "milk\neggs\n");
}

#[test]
fn bookmarks_trim_fields_and_drop_blank_descriptions() {
    let conn = open_db_in_memory().unwrap();
    let mut bookmarks = BookmarkRepository::load(SqliteKvStore::new(&conn)).unwrap();
    assert_eq!(bookmarks.add_bookmark("  ", Some("ignored")).unwrap(), None);

    let id = bookmarks
        .add_bookmark(" https://example.com ", Some("  "))
        .unwrap()
        .unwrap();
    let saved = bookmarks.get(id).unwrap();
    assert_eq!(saved.url, "https://example.com");
    assert_eq!(saved.description(), None);

    bookmarks
        .edit(id, " https://example.org ", Some(" docs "))
        .unwrap();
    let edited = bookmarks.get(id).unwrap();
    assert_eq!(edited.url, "https://example.org");
    assert_eq!(edited.description(), Some("docs"));
}

#[test]
fn alarms_start_active_and_can_be_toggled() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let mut alarms = AlarmRepository::load(kv).unwrap();

    let id = alarms
        .add_alarm(NewAlarm {
            time: "07:00".parse().unwrap(),
            label: Some("Wake up".to_string()),
            repeat: Repeat::Weekdays,
            sound_data_url: Some("data:audio/mpeg;base64,AAAA".to_string()),
        })
        .unwrap();
    assert!(alarms.get(id).unwrap().active);

    alarms.set_active(id, false).unwrap();
    let fresh = AlarmRepository::load(kv).unwrap();
    let stored = fresh.get(id).unwrap();
    assert!(!stored.active);
    assert_eq!(stored.label(), Some("Wake up"));
    assert_eq!(
        stored.sound_data_url.as_deref(),
        Some("data:audio/mpeg;base64,AAAA")
    );
}

#[test]
fn reload_picks_up_writes_from_another_handle() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let mut poller_view = AlarmRepository::load(kv).unwrap();
    let mut editor_view = AlarmRepository::load(kv).unwrap();

    editor_view
        .add_alarm(NewAlarm::new("06:30".parse().unwrap(), Repeat::Daily))
        .unwrap();
    assert!(poller_view.alarms().is_empty());
    poller_view.reload().unwrap();
    assert_eq!(poller_view.alarms().len(), 1);
}

#[test]
fn theme_defaults_to_dark_and_toggles_persistently() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);
    let mut settings = SettingsRepository::load(kv).unwrap();
    assert_eq!(settings.theme(), Theme::Dark);

    assert_eq!(settings.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(SettingsRepository::load(kv).unwrap().theme(), Theme::Light);
    assert_eq!(
        pocketdeck_core::KeyValueStore::get_raw(&kv, "settings")
            .unwrap()
            .as_deref(),
        Some("{\"theme\":\"light\"}")
    );
}
