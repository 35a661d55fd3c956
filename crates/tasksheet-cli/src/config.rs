// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "tasksheet";
const DEFAULT_PLACEHOLDER_ROWS: i64 = 15;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub sheet: Sheet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            sheet: Sheet::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub placeholder_rows: Option<i64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            placeholder_rows: Some(DEFAULT_PLACEHOLDER_ROWS),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sheet {
    /// Optional JSON file of rows loaded at startup; the built-in
    /// sample set is used when unset.
    pub rows_path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("TASKSHEET_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set TASKSHEET_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [ui] and [sheet]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(rows) = self.ui.placeholder_rows
            && rows < 0
        {
            bail!(
                "ui.placeholder_rows in {} must be non-negative, got {}",
                path.display(),
                rows
            );
        }

        if let Some(rows_path) = &self.sheet.rows_path
            && rows_path.contains("://")
        {
            bail!(
                "sheet.rows_path in {} looks like a URI, expected a filesystem path: {}",
                path.display(),
                rows_path
            );
        }

        Ok(())
    }

    pub fn placeholder_rows(&self) -> usize {
        self.ui
            .placeholder_rows
            .unwrap_or(DEFAULT_PLACEHOLDER_ROWS)
            .max(0) as usize
    }

    /// Rows file resolution order: [sheet].rows_path, then the
    /// TASKSHEET_ROWS_PATH environment variable, then none.
    pub fn rows_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.sheet.rows_path {
            return Some(PathBuf::from(path));
        }
        env::var_os("TASKSHEET_ROWS_PATH").map(PathBuf::from)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# tasksheet config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\nplaceholder_rows = {}\n\n[sheet]\n# Optional. JSON array of rows loaded at startup; omit to use the sample set.\n# rows_path = \"/absolute/path/to/rows.json\"\n",
            path.display(),
            DEFAULT_PLACEHOLDER_ROWS,
        )
    }
}
