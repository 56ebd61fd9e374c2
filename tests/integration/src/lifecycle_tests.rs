//! Dataset lifecycle scenarios across the engine, translator and stores
//!
//! Absent -> Creating -> Present -> Updating -> Present -> Deleting -> Absent,
//! driven against the in-memory appliance with every store call recorded.

use nas_core::{Error, PlanAction, ReadFailure, ReconciliationEngine, StoreError};
use nas_props::{DesiredConfiguration, Property};
use nas_store::MemoryStore;
use nas_test_utils::record::RecordBuilder;
use nas_test_utils::store::{Call, Operation, RecordingStore};
use pretty_assertions::assert_eq;
use rstest::rstest;

type Engine = ReconciliationEngine<RecordingStore<MemoryStore>>;

fn engine() -> Engine {
    ReconciliationEngine::new(RecordingStore::new(MemoryStore::new()))
}

fn seeded(records: Vec<nas_props::WireRecord>) -> Engine {
    let store = MemoryStore::new();
    for record in records {
        store.insert(record).unwrap();
    }
    ReconciliationEngine::new(RecordingStore::new(store))
}

#[tokio::test]
async fn test_full_lifecycle() {
    let engine = engine();
    let desired = DesiredConfiguration::new("tank", "", "data")
        .with(Property::Compression, "LZ4")
        .with(Property::Atime, "off");

    let created = engine.create(&desired).await.unwrap();
    assert_eq!(created.id, "tank/data");
    assert_eq!(created.text(Property::Compression), Some("lz4"));
    assert_eq!(created.text(Property::Atime), Some("off"));

    let read = engine.read(&created.id).await.unwrap();
    assert_eq!(read, created);

    let updated = engine.update(&created.id, &desired).await.unwrap();
    assert_eq!(updated, created);

    engine.delete(&created.id).await.unwrap();
    let err = engine.read(&created.id).await.unwrap_err();
    assert!(matches!(err, Error::RemoteNotFound { .. }));

    assert_eq!(
        engine.store().calls(),
        vec![
            Call::Create("tank/data".into()),
            Call::Get("tank/data".into()),
            Call::Get("tank/data".into()),
            Call::Get("tank/data".into()),
            Call::Delete("tank/data".into()),
            Call::Get("tank/data".into()),
        ]
    );
}

#[tokio::test]
async fn test_update_never_writes_even_with_drift() {
    let engine = seeded(vec![
        RecordBuilder::new("tank/data")
            .dual("compression", "GZIP", "gzip")
            .dual("copies", "1", "1")
            .build(),
    ]);
    let desired = DesiredConfiguration::new("tank", "", "data")
        .with(Property::Compression, "lz4")
        .with(Property::Copies, 3);

    let state = engine.update("tank/data", &desired).await.unwrap();

    assert_eq!(state.text(Property::Compression), Some("gzip"));
    assert_eq!(state.integer(Property::Copies), Some(1));
    assert_eq!(engine.store().write_count(), 0);
    assert_eq!(engine.store().calls(), vec![Call::Get("tank/data".into())]);
}

#[tokio::test]
async fn test_delete_nonexistent_is_remote_delete() {
    let engine = engine();

    let err = engine.delete("tank/ghost").await.unwrap_err();

    assert!(matches!(
        err,
        Error::RemoteDelete {
            ref id,
            source: StoreError::NotFound { .. },
        } if id == "tank/ghost"
    ));
    assert_eq!(engine.store().calls(), vec![Call::Delete("tank/ghost".into())]);
}

#[tokio::test]
async fn test_create_failure_skips_read_back() {
    let engine = engine();
    engine.store().fail_next(
        Operation::Create,
        StoreError::Transport {
            message: "503 Service Unavailable".into(),
        },
    );

    let err = engine
        .create(&DesiredConfiguration::new("tank", "", "data"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RemoteCreate { .. }));
    assert_eq!(engine.store().calls(), vec![Call::Create("tank/data".into())]);
    assert!(engine.store().inner().snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn test_read_transport_failure_is_remote_read() {
    let engine = seeded(vec![RecordBuilder::new("tank/data").build()]);
    engine.store().fail_next(
        Operation::Get,
        StoreError::Transport {
            message: "connection reset".into(),
        },
    );

    let err = engine.read("tank/data").await.unwrap_err();
    assert!(matches!(
        err,
        Error::RemoteRead {
            source: ReadFailure::Store(StoreError::Transport { .. }),
            ..
        }
    ));

    // one-shot failure: the next read goes through
    engine.read("tank/data").await.unwrap();
}

#[rstest]
#[case::record_size_bytes("recordsize", "record_size_bytes")]
#[case::quota("quota", "quota_bytes")]
#[case::reservation("refreservation", "ref_reservation")]
#[tokio::test]
async fn test_non_numeric_raw_value_names_field(#[case] key: &str, #[case] field: &str) {
    let engine = seeded(vec![
        RecordBuilder::new("tank/data")
            .dual(key, "256K", "notanumber")
            .build(),
    ]);

    let err = engine.read("tank/data").await.unwrap_err();

    match err {
        Error::RemoteRead {
            source: ReadFailure::Translation(nas_props::Error::NumericParse { field: got, value, .. }),
            ..
        } => {
            assert_eq!(got, field);
            assert_eq!(value, "notanumber");
        }
        other => panic!("expected NumericParse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_read_reports_encryption_and_unset_slots() {
    let engine = seeded(vec![
        RecordBuilder::new("tank/secure/vault")
            .encrypted("tank/secure")
            .property("key_format", "PASSPHRASE")
            .property("encryption_algorithm", "AES-256-GCM")
            .dual("pbkdf2iters", "-1", "-1")
            .null("origin")
            .build(),
    ]);

    let state = engine.read("tank/secure/vault").await.unwrap();

    assert_eq!(state.parent, "secure");
    assert!(state.encrypted);
    assert!(state.key_loaded);
    assert_eq!(state.encryption_root.as_deref(), Some("tank/secure"));
    assert_eq!(state.text(Property::KeyFormat), Some("passphrase"));
    assert_eq!(state.text(Property::EncryptionAlgorithm), Some("AES-256-GCM"));
    assert_eq!(state.get(Property::Pbkdf2Iters), None);
    assert_eq!(state.get(Property::Origin), None);
    assert_eq!(state.get(Property::Compression), None);
}

#[tokio::test]
async fn test_read_uses_identity_reported_by_remote() {
    let engine = seeded(vec![RecordBuilder::new("tank/a/b/c").build()]);

    let state = engine.read("tank/a/b/c").await.unwrap();

    assert_eq!(state.identity, nas_path::decode("tank/a/b/c").unwrap());
    assert_eq!(nas_path::encode(&state.identity), state.id);
    assert_eq!((state.pool.as_str(), state.parent.as_str(), state.name.as_str()), ("tank", "a/b", "c"));
}

#[tokio::test]
async fn test_refresh_keeps_values_remote_stopped_reporting() {
    let store = MemoryStore::new();
    store
        .insert(
            RecordBuilder::new("tank/data")
                .property("comments", "Media library")
                .dual("compression", "LZ4", "lz4")
                .build(),
        )
        .unwrap();
    let engine = ReconciliationEngine::new(store);
    let prior = engine.read("tank/data").await.unwrap();

    engine
        .store()
        .insert(RecordBuilder::new("tank/data").dual("compression", "ZSTD", "zstd").build())
        .unwrap();
    let refreshed = engine.refresh(&prior).await.unwrap();

    assert_eq!(refreshed.text(Property::Comments), Some("Media library"));
    assert_eq!(refreshed.text(Property::Compression), Some("zstd"));
}

#[tokio::test]
async fn test_reconcile_sequence() {
    let engine = engine();
    let desired = DesiredConfiguration::new("tank", "", "data").with(Property::Sync, "always");

    let first = engine.reconcile(&desired, None).await.unwrap();
    assert_eq!(first.action, PlanAction::Create);

    let second = engine.reconcile(&desired, Some(&first.state.id)).await.unwrap();
    assert_eq!(second.action, PlanAction::NoChange);

    let renamed = DesiredConfiguration::new("tank", "", "renamed").with(Property::Sync, "always");
    let third = engine.reconcile(&renamed, Some(&first.state.id)).await.unwrap();
    assert!(matches!(third.action, PlanAction::Replace { .. }));
    assert_eq!(third.state.id, "tank/renamed");

    let ids: Vec<String> = engine
        .store()
        .inner()
        .snapshot()
        .unwrap()
        .ids()
        .map(String::from)
        .collect();
    assert_eq!(ids, vec!["tank/renamed"]);
}
