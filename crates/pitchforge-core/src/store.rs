//! Best-effort JSON snapshot store.
//!
//! One JSON file per storage key under a state directory. The contract is
//! deliberately forgiving: loads fall back to defaults on any failure, saves
//! swallow errors after logging. The engines never see a storage error;
//! worst case is stale or default-valued state.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Default storage key for the checklist snapshot.
pub const CHECKLIST_KEY: &str = "pitchforge_checklist_v2";
/// Default storage key for the drill snapshot.
pub const DRILL_KEY: &str = "pitchforge_drill_v2";
/// Default storage key for the notebook snapshot.
pub const NOTES_KEY: &str = "pitchforge_notes";
/// Default storage key for the metrics snapshot.
pub const METRICS_KEY: &str = "pitchforge_metrics";

/// A key-value snapshot store rooted at a state directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file a storage key maps to.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let content = std::fs::read_to_string(self.path_for(key))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }

    /// Load a snapshot, falling back to `T::default()` on a missing key,
    /// unreadable file, or malformed JSON.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) if e.is_missing() => {
                tracing::debug!("no snapshot for '{key}', starting from defaults");
                T::default()
            }
            Err(e) => {
                tracing::warn!("snapshot '{key}' unusable ({e}), starting from defaults");
                T::default()
            }
        }
    }

    /// Persist a snapshot, best effort. Failures are logged and swallowed.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            tracing::warn!("failed to save snapshot '{key}': {e}");
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::ChecklistState;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        value: u32,
        #[serde(default)]
        label: String,
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let sample = Sample {
            value: 7,
            label: "seven".into(),
        };
        store.save("sample", &sample);
        let loaded: Sample = store.load_or_default("sample");
        assert_eq!(loaded, sample);
    }

    #[test]
    fn missing_key_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let loaded: Sample = store.load_or_default("nothing_here");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        std::fs::write(store.path_for("broken"), "{not json!").unwrap();
        let loaded: Sample = store.load_or_default("broken");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        std::fs::write(
            store.path_for("sample"),
            r#"{"value": 3, "label": "x", "unexpected": [1, 2, 3]}"#,
        )
        .unwrap();
        let loaded: Sample = store.load_or_default("sample");
        assert_eq!(loaded.value, 3);
    }

    #[test]
    fn save_failure_is_swallowed() {
        // Point the store's directory at an existing *file* so create_dir_all fails.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = SnapshotStore::new(&blocker);
        store.save("sample", &Sample::default());
    }

    #[test]
    fn checklist_state_roundtrips_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let mut state = ChecklistState::default();
        state.toggle("svc-problem-pain");
        store.save(CHECKLIST_KEY, &state);

        let mut restored: ChecklistState = store.load_or_default(CHECKLIST_KEY);
        restored.ensure_seeded();
        assert_eq!(restored.summary().checked_items, 1);
    }
}
