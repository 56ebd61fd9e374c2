//! [`TestWorkspace`] for manifest and state-file scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding a `datasets.toml` manifest and the
/// `state.json` file of a snapshot store.
///
/// # Example
///
/// ```rust,no_run
/// use nas_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_manifest(r#"
/// [[dataset]]
/// pool = "tank"
/// name = "data"
/// "#);
/// assert!(ws.manifest_path().exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("datasets.toml")
    }

    pub fn state_path(&self) -> PathBuf {
        self.root().join("state.json")
    }

    pub fn write_manifest(&self, content: &str) {
        fs::write(self.manifest_path(), content)
            .expect("TestWorkspace::write_manifest: failed to write manifest");
    }

    /// Parsed contents of the state file, or `None` before the first write.
    pub fn state(&self) -> Option<serde_json::Value> {
        let content = fs::read_to_string(self.state_path()).ok()?;
        Some(serde_json::from_str(&content).expect("TestWorkspace::state: invalid JSON"))
    }

    /// Identities currently stored in the state file.
    pub fn dataset_ids(&self) -> Vec<String> {
        self.state()
            .and_then(|state| {
                state["datasets"]
                    .as_object()
                    .map(|datasets| datasets.keys().cloned().collect())
            })
            .unwrap_or_default()
    }
}
