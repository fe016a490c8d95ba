use super::*;

fn sample_user() -> CurrentUser {
    CurrentUser {
        id: 7,
        email: "agent@blazing.test".to_owned(),
        first_name: "Avery".to_owned(),
        last_name: "Stone".to_owned(),
        is_staff: true,
    }
}

#[test]
fn memory_store_get_set_clear() {
    let store = MemoryTokenStore::new();
    assert!(store.get().is_none());

    store.set(Session::new("a1", "r1")).unwrap();
    assert_eq!(store.access_token().as_deref(), Some("a1"));

    store.clear().unwrap();
    assert!(store.get().is_none());
}

#[test]
fn refreshed_keeps_refresh_token_unless_rotated() {
    let session = Session::new("a1", "r1");
    let same = session.clone().refreshed("a2".to_owned(), None);
    assert_eq!(same.access, "a2");
    assert_eq!(same.refresh, "r1");

    let rotated = session.refreshed("a3".to_owned(), Some("r2".to_owned()));
    assert_eq!(rotated.refresh, "r2");
}

#[test]
fn file_store_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let store = FileTokenStore::open(&path).unwrap();
    assert!(store.get().is_none());

    let mut session = Session::new("a1", "r1");
    session.user = Some(sample_user());
    store.set(session.clone()).unwrap();

    let reopened = FileTokenStore::open(&path).unwrap();
    assert_eq!(reopened.get(), Some(session));
}

#[test]
fn file_store_clear_removes_file_and_tolerates_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileTokenStore::open(&path).unwrap();

    store.set(Session::new("a1", "r1")).unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(!path.exists());
    assert!(store.get().is_none());

    store.clear().unwrap();
}

#[test]
fn file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileTokenStore::open(&path).unwrap_err();
    assert!(matches!(err, SessionError::Json(_)));
}

#[cfg(unix)]
#[test]
fn file_store_writes_owner_only_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileTokenStore::open(&path).unwrap();
    store.set(Session::new("a1", "r1")).unwrap();
    store.set(Session::new("a2", "r1")).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert!(!path.with_extension("json.tmp").exists());
}
