use uuid::Uuid;

use amparo_core::store_keys;

#[test]
fn newer_assessments_sort_first() {
    let id = Uuid::new_v4();
    let older = jiff::Timestamp::from_millisecond(1_700_000_000_000).unwrap();
    let newer = jiff::Timestamp::from_millisecond(1_700_000_000_001).unwrap();

    let older_key = store_keys::assessment("u1", older, id);
    let newer_key = store_keys::assessment("u1", newer, id);

    assert!(newer_key < older_key);
    assert!(older_key.starts_with(&store_keys::assessments_prefix("u1")));
}

#[test]
fn key_segments_reject_path_tricks() {
    assert!(store_keys::is_key_segment("3f2a9c1e-user"));
    assert!(store_keys::is_key_segment("ana@example.com"));
    for bad in ["", ".", "..", "a/b", "../u2", "u 1", "ñ"] {
        assert!(!store_keys::is_key_segment(bad), "{bad:?}");
    }
    assert!(!store_keys::is_key_segment(&"a".repeat(129)));
}
