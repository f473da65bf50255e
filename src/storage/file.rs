//! JSON-lines file backend
//!
//! # Layout
//!
//! ```text
//! {"format":1,"next_id":4}                       <- meta line
//! {"id":1,"title":"...","tags":"a,b",...}         <- one line per event
//! {"id":3,"title":"...",...}
//! ```
//!
//! The whole file is rewritten on every mutation through a temp file that
//! is synced and then renamed over the previous file, so a crash leaves either
//! the old or the new contents on disk.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::tags::{decode_tags, encode_tags};
use super::EventBackend;
use crate::error::{ArchiveError, ArchiveResult};
use crate::types::{Event, EventCategory, EventImportance};

/// Version written to the meta line
pub const FILE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct FileMeta {
    format: u32,
    next_id: u64,
}

/// On-disk shape of an event; tags are kept as one delimited string
#[derive(Debug, Serialize, Deserialize)]
struct EventRow {
    id: u64,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    category: EventCategory,
    importance: EventImportance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    related_url: Option<String>,
    event_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            category: event.category,
            importance: event.importance,
            tags: encode_tags(&event.tags),
            location: event.location.clone(),
            related_url: event.related_url.clone(),
            event_date: event.event_date,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            tags: decode_tags(row.tags.as_deref()),
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            importance: row.importance,
            location: row.location,
            related_url: row.related_url,
            event_date: row.event_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Default)]
struct FileState {
    next_id: u64,
    events: BTreeMap<u64, Event>,
}

/// File-backed storage with an in-memory copy for reads
pub struct JsonlBackend {
    path: PathBuf,
    state: RwLock<FileState>,
}

impl JsonlBackend {
    /// Open the archive at `path`, loading it if it exists.
    /// A missing file is an empty archive; nothing is written until the
    /// first mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> ArchiveResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = Self::load(&path)?;
        info!(
            path = %path.display(),
            events = state.events.len(),
            next_id = state.next_id,
            "Opened archive file"
        );
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Create the archive file if it does not exist yet and clear any temp
    /// file left behind by an interrupted write.
    ///
    /// Returns `true` when a new file was created.
    pub fn initialize<P: AsRef<Path>>(path: P) -> ArchiveResult<bool> {
        let path = path.as_ref();
        let temp = temp_path(path);
        if temp != path && temp.exists() {
            warn!(path = %temp.display(), "Removing leftover temp file");
            fs::remove_file(&temp)?;
        }
        if path.exists() {
            // Refuse to bless a file we cannot read
            Self::load(path)?;
            return Ok(false);
        }
        write_atomically(path, &render(&FileState::default().with_first_id())?)?;
        info!(path = %path.display(), "Initialized archive file");
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> ArchiveResult<FileState> {
        if !path.exists() {
            return Ok(FileState::default().with_first_id());
        }

        let content = fs::read_to_string(path)?;
        let mut state = FileState::default().with_first_id();
        let mut meta_next_id = 0;

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
                ArchiveError::storage(format!(
                    "{}: line {} is not valid JSON: {}",
                    path.display(),
                    line_num + 1,
                    e
                ))
            })?;

            if value.get("next_id").is_some() {
                let meta: FileMeta = serde_json::from_value(value)?;
                if meta.format > FILE_FORMAT_VERSION {
                    return Err(ArchiveError::storage(format!(
                        "{}: unsupported format version {}",
                        path.display(),
                        meta.format
                    )));
                }
                meta_next_id = meta.next_id;
                continue;
            }

            let row: EventRow = serde_json::from_value(value).map_err(|e| {
                ArchiveError::storage(format!(
                    "{}: line {} is not a valid event: {}",
                    path.display(),
                    line_num + 1,
                    e
                ))
            })?;
            if state.events.insert(row.id, row.into()).is_some() {
                return Err(ArchiveError::storage(format!(
                    "{}: duplicate event id at line {}",
                    path.display(),
                    line_num + 1
                )));
            }
        }

        let max_id = state.events.keys().next_back().copied().unwrap_or(0);
        state.next_id = meta_next_id.max(max_id + 1).max(1);
        Ok(state)
    }

    fn persist(&self, state: &FileState) -> ArchiveResult<()> {
        write_atomically(&self.path, &render(state)?)?;
        debug!(path = %self.path.display(), events = state.events.len(), "Persisted archive");
        Ok(())
    }
}

impl FileState {
    fn with_first_id(mut self) -> Self {
        self.next_id = 1;
        self
    }
}

impl EventBackend for JsonlBackend {
    fn describe(&self) -> String {
        format!("jsonl:{}", self.path.display())
    }

    fn allocate_id(&self) -> ArchiveResult<u64> {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id += 1;
        Ok(id)
    }

    fn insert(&self, event: &Event) -> ArchiveResult<()> {
        let mut state = self.state.write();
        let previous = state.events.insert(event.id, event.clone());
        if let Err(e) = self.persist(&state) {
            match previous {
                Some(old) => state.events.insert(old.id, old),
                None => state.events.remove(&event.id),
            };
            return Err(e);
        }
        Ok(())
    }

    fn fetch(&self, id: u64) -> ArchiveResult<Option<Event>> {
        Ok(self.state.read().events.get(&id).cloned())
    }

    fn replace(&self, event: &Event) -> ArchiveResult<bool> {
        let mut state = self.state.write();
        let Some(slot) = state.events.get_mut(&event.id) else {
            return Ok(false);
        };
        let old = std::mem::replace(slot, event.clone());
        if let Err(e) = self.persist(&state) {
            state.events.insert(old.id, old);
            return Err(e);
        }
        Ok(true)
    }

    fn remove(&self, id: u64) -> ArchiveResult<bool> {
        let mut state = self.state.write();
        let Some(old) = state.events.remove(&id) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&state) {
            state.events.insert(old.id, old);
            return Err(e);
        }
        Ok(true)
    }

    fn scan(&self) -> ArchiveResult<Vec<Event>> {
        Ok(self.state.read().events.values().cloned().collect())
    }

    fn count(&self) -> ArchiveResult<usize> {
        Ok(self.state.read().events.len())
    }
}

fn render(state: &FileState) -> ArchiveResult<String> {
    let mut content = serde_json::to_string(&FileMeta {
        format: FILE_FORMAT_VERSION,
        next_id: state.next_id,
    })?;
    content.push('\n');
    for event in state.events.values() {
        content.push_str(&serde_json::to_string(&EventRow::from(event))?);
        content.push('\n');
    }
    Ok(content)
}

/// `<file name>.tmp` beside the archive, never the archive itself
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write to `<path>.tmp`, sync, then rename over `path`
fn write_atomically(path: &Path, content: &str) -> ArchiveResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = temp_path(path);
    let mut file = File::create(&temp)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp, path)?;
    Ok(())
}
