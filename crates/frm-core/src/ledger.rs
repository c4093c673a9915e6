//! Append-only interaction log
//!
//! One JSON object per line: `{"contact", "path"?, "time", "note"?}`.
//! Lines are only ever appended; malformed lines are skipped on read so a
//! torn trailing write never makes the log unreadable.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contact::ContactRecord;
use crate::error::{FrmError, Result};

/// File name of the ledger inside the config directory
pub const LEDGER_FILE: &str = "log.jsonl";

/// One logged interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LogEntry {
    pub fn new(contact: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            contact: contact.into(),
            path: None,
            time,
            note: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.filter(|n| !n.is_empty());
        self
    }

    /// Identity key: the stable path when recorded, else the lowercase name
    pub fn identity_key(&self) -> String {
        match self.path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => path.to_string(),
            None => name_key(&self.contact),
        }
    }

    /// Whether this entry refers to `name` (case-insensitive) or `path`
    pub fn refers_to(&self, name: &str, path: Option<&str>) -> bool {
        let path_match = matches!(
            (self.path.as_deref(), path),
            (Some(own), Some(wanted)) if !own.is_empty() && own == wanted
        );
        path_match || name_key(&self.contact) == name_key(name)
    }
}

/// Identity key used for entries without a path
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Most recent contact time per identity key
#[derive(Debug, Clone, Default)]
pub struct LastContactIndex {
    latest: HashMap<String, DateTime<Utc>>,
}

impl LastContactIndex {
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        let mut latest: HashMap<String, DateTime<Utc>> = HashMap::new();
        for entry in entries {
            latest
                .entry(entry.identity_key())
                .and_modify(|t| *t = (*t).max(entry.time))
                .or_insert(entry.time);
        }
        Self { latest }
    }

    pub fn get(&self, key: &str) -> Option<DateTime<Utc>> {
        self.latest.get(key).copied()
    }

    /// Last contact for a record: the later of its path key and its
    /// lowercase display-name key.
    pub fn for_record(&self, record: &ContactRecord) -> Option<DateTime<Utc>> {
        let by_path = self.get(&record.path);
        let by_name = Some(record.display_name())
            .filter(|n| !n.is_empty())
            .and_then(|n| self.get(&name_key(n)));
        by_path.max(by_name)
    }

    pub fn has_history(&self, record: &ContactRecord) -> bool {
        self.for_record(record).is_some()
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

/// Interaction count for one identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionCount {
    /// Display name from the most recent entry
    pub name: String,
    pub count: usize,
}

/// The local interaction ledger
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger stored in `dir/log.jsonl`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(LEDGER_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a single line, creating the directory if needed
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| FrmError::io_operation("create log directory", dir.display(), e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FrmError::io_operation("open log file", self.path.display(), e))?;

        let mut line = Vec::new();
        if !ends_with_newline(&mut file)
            .map_err(|e| FrmError::io_operation("read log file", self.path.display(), e))?
        {
            warn!(path = %self.path.display(), "log file ends mid-line, starting a new line");
            line.push(b'\n');
        }
        serde_json::to_writer(&mut line, entry)?;
        line.push(b'\n');

        // single write so the line lands whole in append mode
        file.write_all(&line)
            .map_err(|e| FrmError::io_operation("write log entry", self.path.display(), e))?;

        debug!(contact = %entry.contact, path = ?entry.path, "appended ledger entry");
        Ok(())
    }

    /// Every well-formed entry in file order; a missing file is empty
    pub fn read_all(&self) -> Result<Vec<LogEntry>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FrmError::io_operation("read log file", self.path.display(), e)),
        };

        let mut entries = Vec::new();
        for (index, line) in data.split(|b| *b == b'\n').enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<LogEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => debug!(line = index + 1, error = %e, "skipping malformed ledger line"),
            }
        }
        Ok(entries)
    }

    pub fn last_contact_by_key(&self) -> Result<LastContactIndex> {
        Ok(LastContactIndex::from_entries(&self.read_all()?))
    }

    /// Entries for one contact, matched by name or path, in file order
    pub fn history_for(&self, name: &str, path: Option<&str>) -> Result<Vec<LogEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.refers_to(name, path))
            .collect())
    }
}

/// Count interactions per identity key
pub fn interaction_counts(entries: &[LogEntry]) -> Vec<InteractionCount> {
    let mut counts: HashMap<String, (String, DateTime<Utc>, usize)> = HashMap::new();
    for entry in entries {
        let slot = counts
            .entry(entry.identity_key())
            .or_insert_with(|| (entry.contact.clone(), entry.time, 0));
        if entry.time >= slot.1 {
            slot.0 = entry.contact.clone();
            slot.1 = entry.time;
        }
        slot.2 += 1;
    }
    counts
        .into_values()
        .map(|(name, _, count)| InteractionCount { name, count })
        .collect()
}

/// Whether the file is empty or its last byte is `\n`
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
