use groupview_engine::RecentGroupsStore;
use pretty_assertions::assert_eq;

#[test]
fn record_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecentGroupsStore::new(dir.path().to_path_buf());

    store.record("g1").expect("record g1");
    store.record("g2").expect("record g2");

    assert_eq!(store.load(), vec!["g2".to_string(), "g1".to_string()]);
}

#[test]
fn recording_a_known_group_moves_it_to_the_front() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecentGroupsStore::new(dir.path().to_path_buf());

    store.record("g1").expect("record");
    store.record("g2").expect("record");
    store.record("g1").expect("record again");

    assert_eq!(store.load(), vec!["g1".to_string(), "g2".to_string()]);
}

#[test]
fn missing_file_is_an_empty_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecentGroupsStore::new(dir.path().to_path_buf());
    assert_eq!(store.load(), Vec::<String>::new());
}

#[test]
fn corrupt_file_is_tolerated() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".groupview_history.ron"), "not ron at all")
        .expect("write corrupt file");
    let store = RecentGroupsStore::new(dir.path().to_path_buf());

    assert_eq!(store.load(), Vec::<String>::new());

    // A fresh record overwrites the corrupt file.
    store.record("g1").expect("record");
    assert_eq!(store.load(), vec!["g1".to_string()]);
}
