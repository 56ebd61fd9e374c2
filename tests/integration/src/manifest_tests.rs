//! Manifest-driven reconciliation against the file-backed appliance

use std::time::Duration;

use nas_core::{DriftStatus, Manifest, PlanAction, ReconciliationEngine, plan};
use nas_props::Property;
use nas_store::SnapshotStore;
use nas_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;

const MANIFEST: &str = r#"
[engine]
create_timeout = 120
read_timeout = 30

[[dataset]]
pool = "tank"
name = "media"
compression = "zstd-3"
record_size = "1024K"
atime = "off"

[[dataset]]
pool = "tank"
name = "shares"
share_type = "smb"

[[dataset]]
pool = "tank"
parent = "shares"
name = "public"
readonly = "on"
quota_bytes = 10737418240
quota_warning = 90
"#;

fn load(ws: &TestWorkspace, content: &str) -> Manifest {
    ws.write_manifest(content);
    Manifest::load(&ws.manifest_path()).unwrap()
}

async fn apply(ws: &TestWorkspace, manifest: &Manifest) -> Vec<PlanAction> {
    let engine =
        ReconciliationEngine::with_config(SnapshotStore::new(ws.state_path()), manifest.engine);
    let mut actions = Vec::new();
    for desired in &manifest.datasets {
        let id = desired.identity().unwrap().to_string();
        actions.push(engine.reconcile(desired, Some(&id)).await.unwrap().action);
    }
    actions
}

#[test]
fn test_manifest_engine_settings() {
    let ws = TestWorkspace::new();
    let manifest = load(&ws, MANIFEST);

    assert_eq!(manifest.engine.create_timeout(), Duration::from_secs(120));
    assert_eq!(manifest.engine.read_timeout(), Duration::from_secs(30));
    assert_eq!(manifest.engine.delete_timeout(), Duration::from_secs(240));
    assert_eq!(manifest.datasets.len(), 3);
}

#[test]
fn test_manifest_rejects_unsupported_record_size() {
    let ws = TestWorkspace::new();
    ws.write_manifest(&MANIFEST.replace(r#"record_size = "1024K""#, r#"record_size = "2M""#));

    assert!(Manifest::load(&ws.manifest_path()).is_err());
}

#[test]
fn test_manifest_rejects_conflicting_share_type() {
    let ws = TestWorkspace::new();
    ws.write_manifest(&MANIFEST.replace(
        r#"share_type = "smb""#,
        "share_type = \"smb\"\ncase_sensitivity = \"insensitive\"",
    ));

    let err = Manifest::load(&ws.manifest_path()).unwrap_err();
    assert!(err.to_string().contains("share_type"), "got: {}", err);
}

#[tokio::test]
async fn test_apply_is_idempotent() {
    let ws = TestWorkspace::new();
    let manifest = load(&ws, MANIFEST);

    let first = apply(&ws, &manifest).await;
    assert_eq!(first, vec![PlanAction::Create; 3]);
    assert_eq!(
        ws.dataset_ids(),
        vec!["tank/media", "tank/shares", "tank/shares/public"]
    );

    let second = apply(&ws, &manifest).await;
    assert_eq!(second, vec![PlanAction::NoChange; 3]);
}

#[tokio::test]
async fn test_applied_state_reads_back() {
    let ws = TestWorkspace::new();
    let manifest = load(&ws, MANIFEST);
    apply(&ws, &manifest).await;

    let engine = ReconciliationEngine::new(SnapshotStore::new(ws.state_path()));

    let media = engine.read("tank/media").await.unwrap();
    assert_eq!(media.text(Property::Compression), Some("zstd-3"));
    assert_eq!(media.integer(Property::RecordSizeBytes), Some(1 << 20));
    assert_eq!(media.text(Property::Atime), Some("off"));

    let public = engine.read("tank/shares/public").await.unwrap();
    assert_eq!(public.text(Property::Readonly), Some("on"));
    assert_eq!(public.integer(Property::QuotaBytes), Some(10737418240));
    assert_eq!(public.integer(Property::QuotaWarning), Some(90));
    assert_eq!(public.integer(Property::QuotaCritical), Some(95));
    assert_eq!(public.text(Property::ShareType), Some("generic"));
}

#[tokio::test]
async fn test_check_and_plan_after_out_of_band_delete() {
    let ws = TestWorkspace::new();
    let manifest = load(&ws, MANIFEST);
    apply(&ws, &manifest).await;

    let engine = ReconciliationEngine::new(SnapshotStore::new(ws.state_path()));
    engine.delete("tank/media").await.unwrap();

    let media = &manifest.datasets[0];
    let report = engine.check(media, None).await.unwrap();
    assert_eq!(report.status, DriftStatus::Missing);

    let current = engine.lookup("tank/media").await.unwrap();
    assert_eq!(plan(media, current.as_ref()).unwrap().action, PlanAction::Create);

    let actions = apply(&ws, &manifest).await;
    assert_eq!(
        actions,
        vec![PlanAction::Create, PlanAction::NoChange, PlanAction::NoChange]
    );
}
