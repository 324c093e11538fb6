//! JSON-file persistence for committed calculations.
//!
//! The engine only emits [`HistoryEntry`] values; this adapter owns the
//! storage mechanics. The file holds a JSON array, newest entry last.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calc_model::HistoryEntry;
use chrono::DateTime;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::warn;

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load the store at `path`; a missing file is an empty store, an
    /// unreadable one is reported and treated as empty rather than blocking
    /// the calculator.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(path = %path.display(), %error, "history file is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "history file unreadable, starting empty");
                Vec::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Write the full store back to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create history directory {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write history file {}", self.path.display()))
    }
}

/// Render history entries as a table, newest last.
pub fn history_table(entries: &[HistoryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Expression", "Result"]);
    for entry in entries {
        table.add_row(vec![
            format_timestamp(entry.timestamp_millis),
            entry.expression.clone(),
            entry.result.clone(),
        ]);
    }
    table
}

fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(when) => when.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
