//! CLI end-to-end tests that invoke the compiled `nasctl` binary.
//!
//! Every test works on its own manifest and state file inside a
//! [`TestWorkspace`], so the emulated appliance starts empty.

use assert_cmd::Command;
use nas_test_utils::workspace::TestWorkspace;
use predicates::prelude::*;

const MANIFEST: &str = r#"
[engine]
create_timeout = 30

[[dataset]]
pool = "tank"
name = "apps"
compression = "zstd"

[[dataset]]
pool = "tank"
parent = "apps"
name = "db"
record_size = "16K"
sync = "always"
comments = "Postgres data"
"#;

fn nasctl(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nasctl"));
    cmd.arg("--manifest")
        .arg(ws.manifest_path())
        .arg("--state")
        .arg(ws.state_path())
        .env_remove("NASCTL_MANIFEST")
        .env_remove("NASCTL_STATE")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write_manifest(MANIFEST);
    ws
}

#[test]
fn test_help_exits_zero() {
    Command::new(assert_cmd::cargo::cargo_bin!("nasctl"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("destroy"));
}

#[test]
fn test_plan_on_empty_state_creates_everything() {
    let ws = workspace();

    nasctl(&ws)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("tank/apps"))
        .stdout(predicate::str::contains("tank/apps/db"))
        .stdout(predicate::str::contains("2 to create"));

    assert!(ws.state().is_none(), "plan must not write state");
}

#[test]
fn test_plan_json() {
    let ws = workspace();

    let output = nasctl(&ws).args(["plan", "--json"]).output().unwrap();
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plans[0]["id"], "tank/apps");
    assert_eq!(plans[0]["action"], "create");
    assert_eq!(plans[1]["id"], "tank/apps/db");
}

#[test]
fn test_apply_then_check_is_clean() {
    let ws = workspace();

    nasctl(&ws)
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("2 dataset(s) changed"));

    assert_eq!(ws.dataset_ids(), vec!["tank/apps", "tank/apps/db"]);

    nasctl(&ws)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All datasets in sync"));

    nasctl(&ws)
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"))
        .stdout(predicate::str::contains("0 dataset(s) changed"));
}

#[test]
fn test_show_prints_reconciled_state() {
    let ws = workspace();
    nasctl(&ws).arg("apply").assert().success();

    let output = nasctl(&ws).args(["show", "tank/apps/db"]).output().unwrap();
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["pool"], "tank");
    assert_eq!(state["parent"], "apps");
    assert_eq!(state["name"], "db");
    assert_eq!(state["mount_point"], "/mnt/tank/apps/db");
    assert_eq!(state["record_size"], "16K");
    assert_eq!(state["record_size_bytes"], 16384);
    assert_eq!(state["sync"], "always");
    assert_eq!(state["comments"], "Postgres data");
    // inherited from tank/apps
    assert_eq!(state["compression"], "zstd");
}

#[test]
fn test_show_missing_dataset_fails() {
    let ws = workspace();

    nasctl(&ws)
        .args(["show", "tank/nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_show_malformed_identity_fails() {
    let ws = workspace();

    nasctl(&ws)
        .args(["show", "tank"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tank"));
}

#[test]
fn test_destroy_requires_children_first() {
    let ws = workspace();
    nasctl(&ws).arg("apply").assert().success();

    nasctl(&ws)
        .args(["destroy", "tank/apps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("children"));

    nasctl(&ws)
        .args(["destroy", "tank/apps/db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Destroyed"));

    assert_eq!(ws.dataset_ids(), vec!["tank/apps"]);
}

#[test]
fn test_destroy_missing_dataset_fails() {
    let ws = workspace();

    nasctl(&ws)
        .args(["destroy", "tank/nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to delete dataset tank/nothing"));
}

#[test]
fn test_check_reports_missing_dataset() {
    let ws = workspace();

    nasctl(&ws)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing"))
        .stderr(predicate::str::contains("2 dataset(s) out of sync"));
}

#[test]
fn test_check_reports_drift_after_manifest_change() {
    let ws = workspace();
    nasctl(&ws).arg("apply").assert().success();

    ws.write_manifest(&MANIFEST.replace(r#"sync = "always""#, r#"sync = "disabled""#));

    nasctl(&ws)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("sync: expected disabled, found always"));

    // update never writes, so apply reports the same drift and leaves it
    nasctl(&ws)
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("drifted"));
    nasctl(&ws).arg("check").assert().failure();
}

#[test]
fn test_apply_replaces_on_case_sensitivity_change() {
    let ws = workspace();
    nasctl(&ws).arg("apply").assert().success();

    ws.write_manifest(&format!("{}case_sensitivity = \"insensitive\"\n", MANIFEST));

    nasctl(&ws)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("(replace)"))
        .stdout(predicate::str::contains("case_sensitivity changes to insensitive"));

    nasctl(&ws)
        .arg("apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced"));
}

#[test]
fn test_invalid_manifest_value_fails_before_any_change() {
    let ws = TestWorkspace::new();
    ws.write_manifest(
        r#"
[[dataset]]
pool = "tank"
name = "data"
compression = "lz5"
"#,
    );

    nasctl(&ws)
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration for tank/data"));

    assert!(ws.state().is_none());
}

#[test]
fn test_missing_manifest_fails() {
    let ws = TestWorkspace::new();

    nasctl(&ws)
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read manifest"));
}
