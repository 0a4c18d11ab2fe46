use scout_client::{FileKvStore, KvStore};

#[test]
fn set_then_get_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileKvStore::new(dir.path()).expect("file store");

    store.set("chat_abc123", "[1,2,3]").expect("set");
    assert_eq!(store.get("chat_abc123").expect("get").as_deref(), Some("[1,2,3]"));
}

#[test]
fn missing_key_is_none_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileKvStore::new(dir.path()).expect("file store");

    assert_eq!(store.get("absent").expect("get"), None);
}

#[test]
fn set_replaces_the_previous_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileKvStore::new(dir.path()).expect("file store");

    store.set("k", "old").expect("set");
    store.set("k", "new").expect("set");
    assert_eq!(store.get("k").expect("get").as_deref(), Some("new"));
}

#[test]
fn keys_that_sanitize_alike_stay_distinct() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileKvStore::new(dir.path()).expect("file store");

    // Both keys sanitize to "chat_a_b"; the hash suffix keeps them apart.
    store.set("chat_a/b", "slash").expect("set");
    store.set("chat_a.b", "dot").expect("set");

    assert_eq!(store.get("chat_a/b").expect("get").as_deref(), Some("slash"));
    assert_eq!(store.get("chat_a.b").expect("get").as_deref(), Some("dot"));
}

#[test]
fn values_survive_reopening_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let store = FileKvStore::new(dir.path()).expect("file store");
        store.set("chat_abc123", "persisted").expect("set");
    }

    let reopened = FileKvStore::new(dir.path()).expect("file store");
    assert_eq!(
        reopened.get("chat_abc123").expect("get").as_deref(),
        Some("persisted")
    );
}
