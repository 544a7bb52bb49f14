//! The progress store: one flat JSON object mapping item id to its
//! [`ReviewState`], loaded at session start and rewritten whole.

use crate::sm2::ReviewState;
use anyhow::Context;
use anyhow::Result;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

pub type ProgressStore = BTreeMap<String, ReviewState>;

/// A missing file is an empty store; a malformed file (including an
/// unparseable `due` date on any entry) is a hard error.
pub fn load_progress(path: &Path) -> Result<ProgressStore> {
    if !path.exists() {
        return Ok(ProgressStore::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read progress store {path:?}"))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed progress store {path:?}"))
}

/// Rewrite the whole store atomically: serialize into a tempfile next to
/// the target, then rename over it.
pub fn save_progress(progress: &ProgressStore, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("progress store {path:?} has no parent directory"))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {dir:?}"))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, progress)?;
    file.write_all(b"\n")?;
    file.persist(path)
        .map_err(|err| anyhow::anyhow!("failed to replace progress store {path:?}: {err}"))?;
    info!("saved {} entries to {path:?}", progress.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sm2::update_sm2;
    use chrono::NaiveDate;

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_progress(&dir.path().join("progress.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let mut store = ProgressStore::new();
        store.insert("Action::Define".to_owned(), update_sm2(None, 5, today));
        store.insert("Pump::NaK".to_owned(), update_sm2(None, 2, today));

        save_progress(&store, &path).unwrap();
        let loaded = load_progress(&path).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn partial_entries_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"Action::Define": {"interval": 3}}"#).unwrap();

        let store = load_progress(&path).unwrap();
        let entry = &store["Action::Define"];

        assert_eq!(entry.repetitions, 0);
        assert_eq!(entry.interval, 3);
        assert_eq!(entry.efactor, 2.5);
        assert_eq!(entry.due, None);
    }

    #[test]
    fn garbage_due_date_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"Action::Define": {"due": "not-a-date"}}"#).unwrap();

        assert!(load_progress(&path).is_err());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        save_progress(&ProgressStore::new(), &path).unwrap();

        assert!(path.exists());
    }
}
