//! Integration tests for the document store over real repositories.

use casedoc_codec::Value;
use casedoc_core::{
    CaseCreatedEvent, CaseEventHub, CaseId, CoreError, DocumentStore,
};
use casedoc_storage::{FileRepository, InMemoryRepository};

fn flat(pairs: Vec<(&str, Value)>) -> Vec<(String, Value)> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[test]
fn upsert_merge_creates_a_nested_document() {
    let store = DocumentStore::new(InMemoryRepository::new());
    let id = CaseId::new();

    let record = store
        .upsert_merge(id, flat(vec![("a.b", Value::Integer(1))]))
        .unwrap();

    let a = record.document.get("a").and_then(Value::as_map).unwrap();
    assert_eq!(a.get("b"), Some(&Value::Integer(1)));
    assert!(store.exists(id).unwrap());
}

#[test]
fn upsert_merge_deep_merges_into_an_existing_document() {
    let store = DocumentStore::new(InMemoryRepository::new());
    let id = CaseId::new();

    store
        .upsert_merge(
            id,
            flat(vec![("a.b", Value::Integer(1)), ("a.c", Value::Integer(2))]),
        )
        .unwrap();
    let record = store
        .upsert_merge(
            id,
            flat(vec![("a.b", Value::Integer(99)), ("a.d", Value::Integer(3))]),
        )
        .unwrap();

    let a = record.document.get("a").and_then(Value::as_map).unwrap();
    assert_eq!(a.get("b"), Some(&Value::Integer(99)));
    assert_eq!(a.get("c"), Some(&Value::Integer(2)));
    assert_eq!(a.get("d"), Some(&Value::Integer(3)));
}

#[test]
fn read_at_path_distinguishes_absent_from_stored() {
    let store = DocumentStore::new(InMemoryRepository::new());
    let id = CaseId::new();

    store
        .upsert_merge(
            id,
            flat(vec![
                ("a.b", Value::Integer(99)),
                ("a.n", Value::Null),
            ]),
        )
        .unwrap();

    assert_eq!(store.read_at_path(id, "a.b").unwrap(), Some(Value::Integer(99)));
    assert_eq!(store.read_at_path(id, "a.n").unwrap(), Some(Value::Null));
    // Absent is a normal outcome, not an error.
    assert_eq!(store.read_at_path(id, "a.z").unwrap(), None);
    assert_eq!(store.read_at_path(id, "a.b.too.deep").unwrap(), None);
}

#[test]
fn write_at_path_requires_an_existing_record() {
    let store = DocumentStore::new(InMemoryRepository::new());

    let err = store
        .write_at_path(CaseId::new(), "a.b", Value::Integer(1))
        .unwrap_err();
    assert!(matches!(err, CoreError::CaseNotFound { .. }));
}

#[test]
fn delete_then_fetch_is_not_found() {
    let store = DocumentStore::new(InMemoryRepository::new());
    let id = CaseId::new();

    store.create(id).unwrap();
    store.delete(id).unwrap();

    let err = store.fetch(id).unwrap_err();
    assert!(matches!(err, CoreError::CaseNotFound { .. }));
}

#[test]
fn write_then_read_roundtrips_through_storage() {
    let store = DocumentStore::new(InMemoryRepository::new());
    let id = CaseId::new();
    store.create(id).unwrap();

    store
        .write_at_path(id, "amounts.total", Value::decimal("12345.678900001"))
        .unwrap();
    store
        .write_at_path(id, "amounts.paid", Value::Bool(false))
        .unwrap();

    assert_eq!(
        store.read_at_path(id, "amounts.total").unwrap(),
        Some(Value::decimal("12345.678900001"))
    );
    assert_eq!(
        store.read_at_path(id, "amounts/paid").unwrap(),
        Some(Value::Bool(false))
    );
}

#[test]
fn form_layer_keys_and_absolute_keys_address_the_same_value() {
    let store = DocumentStore::new(InMemoryRepository::new());
    let id = CaseId::new();
    store.create(id).unwrap();

    store
        .write_at_path(id, "person.name", Value::from("alice"))
        .unwrap();

    assert_eq!(
        store.read_at_path(id, "/person/name").unwrap(),
        Some(Value::from("alice"))
    );
}

#[test]
fn creation_trigger_seeds_an_empty_document() {
    let hub = CaseEventHub::new();
    let events = hub.subscribe();

    let store = DocumentStore::new(InMemoryRepository::new());
    let case_uuid = CaseId::new();
    hub.emit(CaseCreatedEvent::with_case_id(case_uuid, "CASE-001"));

    // Drain the subscription the way a listener thread would.
    for event in events.try_iter() {
        store.seed_from_event(&event).unwrap();
    }

    let record = store.fetch_by_case_id("CASE-001").unwrap();
    assert_eq!(record.case_uuid, case_uuid);
    assert!(record.document.is_empty());
}

#[test]
fn documents_survive_a_file_repository_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let id = CaseId::new();

    {
        let store = DocumentStore::new(FileRepository::open(dir.path()).unwrap());
        store
            .upsert_merge_with_case_id(
                id,
                "CASE-001",
                flat(vec![("a.b", Value::Integer(1)), ("a.n", Value::Null)]),
            )
            .unwrap();
    }

    let store = DocumentStore::new(FileRepository::open(dir.path()).unwrap());
    assert_eq!(store.read_at_path(id, "a.b").unwrap(), Some(Value::Integer(1)));
    assert_eq!(store.read_at_path(id, "a.n").unwrap(), Some(Value::Null));

    let record = store.fetch_by_case_id("CASE-001").unwrap();
    assert_eq!(record.case_uuid, id);
}
