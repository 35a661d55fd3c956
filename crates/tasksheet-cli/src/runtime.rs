// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tasksheet_app::{Record, SheetStore};
use tasksheet_tui::{ActionOutcome, SheetActions};

/// Toolbar actions for the standalone binary. Import, export, share,
/// and extra tabs have no backend yet; every call reports that.
#[derive(Debug, Default)]
pub struct StubActions;

impl SheetActions for StubActions {
    fn import_rows(&mut self) -> Result<ActionOutcome> {
        Ok(ActionOutcome::Unavailable)
    }

    fn export_rows(&mut self) -> Result<ActionOutcome> {
        Ok(ActionOutcome::Unavailable)
    }

    fn share_view(&mut self) -> Result<ActionOutcome> {
        Ok(ActionOutcome::Unavailable)
    }

    fn add_tab(&mut self) -> Result<ActionOutcome> {
        Ok(ActionOutcome::Unavailable)
    }
}

/// Builds the startup store: rows from the JSON file when one is
/// configured, the built-in sample set otherwise.
pub fn open_store(rows_path: Option<&Path>) -> Result<SheetStore> {
    match rows_path {
        Some(path) => {
            let rows = load_rows(path)?;
            let mut store = SheetStore::new();
            store
                .replace_rows(rows)
                .with_context(|| format!("load rows from {}", path.display()))?;
            Ok(store)
        }
        None => Ok(SheetStore::seeded()),
    }
}

fn load_rows(path: &Path) -> Result<Vec<Record>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read rows file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse rows JSON {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{StubActions, open_store};
    use anyhow::Result;
    use tasksheet_app::{Field, RecordId};
    use tasksheet_tui::{ActionOutcome, SheetActions};

    #[test]
    fn open_store_without_rows_file_seeds_the_sample_set() -> Result<()> {
        let store = open_store(None)?;
        assert_eq!(store.len(), 5);
        assert_eq!(
            store.record(RecordId::new(1)).map(|row| row.submitter.as_str()),
            Some("Asha Patel")
        );
        Ok(())
    }

    #[test]
    fn open_store_reads_rows_from_json() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("rows.json");
        std::fs::write(&path, tasksheet_testkit::sample_rows_json())?;

        let store = open_store(Some(&path))?;
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.record(RecordId::new(10)).map(|row| row.field_text(Field::Status)),
            Some("In-process".to_owned())
        );
        assert_eq!(
            store.record(RecordId::new(11)).map(|row| row.field_text(Field::Value)),
            Some("125000".to_owned())
        );
        Ok(())
    }

    #[test]
    fn open_store_rejects_duplicate_ids_in_rows_file() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("rows.json");
        std::fs::write(&path, tasksheet_testkit::duplicate_id_rows_json())?;

        let error = open_store(Some(&path)).expect_err("duplicate ids should fail");
        assert!(error.to_string().contains("load rows from"));
        Ok(())
    }

    #[test]
    fn open_store_reports_malformed_json_with_the_path() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("rows.json");
        std::fs::write(&path, "[{not json")?;

        let error = open_store(Some(&path)).expect_err("malformed rows should fail");
        assert!(error.to_string().contains("parse rows JSON"));
        Ok(())
    }

    #[test]
    fn stub_actions_are_all_unavailable() -> Result<()> {
        let mut actions = StubActions;
        assert_eq!(actions.import_rows()?, ActionOutcome::Unavailable);
        assert_eq!(actions.export_rows()?, ActionOutcome::Unavailable);
        assert_eq!(actions.share_view()?, ActionOutcome::Unavailable);
        assert_eq!(actions.add_tab()?, ActionOutcome::Unavailable);
        Ok(())
    }
}
