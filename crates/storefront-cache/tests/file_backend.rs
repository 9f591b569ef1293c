use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, FileBackend, KvBackend, Session, SessionId};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Basket {
    lines: Vec<(i64, u32)>,
}

#[test]
fn values_survive_reopening_the_directory() {
    let dir = tempfile::tempdir().unwrap();

    {
        let cache = Cache::open(dir.path()).unwrap();
        cache.set("order:1001", &Basket { lines: vec![(1, 2)] }).unwrap();
    }

    let cache = Cache::open(dir.path()).unwrap();
    let basket: Basket = cache.get("order:1001").unwrap().unwrap();
    assert_eq!(basket.lines, vec![(1, 2)]);
}

#[test]
fn keys_roundtrip_through_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::open(dir.path()).unwrap();

    backend.set("session:sess_a/b", b"{}").unwrap();
    backend.set("order:7", b"{}").unwrap();
    std::fs::write(dir.path().join("stray.txt"), b"ignored").unwrap();

    assert_eq!(
        backend.keys().unwrap(),
        vec!["order:7".to_string(), "session:sess_a/b".to_string()]
    );
}

#[test]
fn missing_keys_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::open(dir.path()).unwrap();

    assert_eq!(backend.get("nope").unwrap(), None);
    assert!(!backend.exists("nope").unwrap());
    backend.delete("nope").unwrap();
}

#[test]
fn sessions_persist_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let id = SessionId::new("sess_disk");

    Session::<Basket>::new(Cache::open(dir.path()).unwrap())
        .set(&id, &Basket { lines: vec![(3, 1)] })
        .unwrap();

    let reopened = Session::<Basket>::new(Cache::open(dir.path()).unwrap());
    assert_eq!(reopened.get(&id).unwrap().unwrap().lines, vec![(3, 1)]);
}
