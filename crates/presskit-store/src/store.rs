//! JSON-backed record store keyed by listing id.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use presskit_core::{CorruptStorePolicy, EnrichedRecord, Enrichment, ListingId, ListingStub, ReleaseDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// Current on-disk format version.
pub const STORE_VERSION: u32 = 1;

fn current_version() -> u32 {
    STORE_VERSION
}

#[derive(Deserialize)]
struct StoreFile {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    records: BTreeMap<ListingId, EnrichedRecord>,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    updated_at: DateTime<Utc>,
    records: &'a BTreeMap<ListingId, EnrichedRecord>,
}

/// Effect of one upsert on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was created
    Created,
    /// An existing record gained contact data
    Changed,
    /// Contact data already matched; descriptive fields may have been refreshed
    Unchanged,
}

/// Durable mapping from listing id to [`EnrichedRecord`].
///
/// Loaded once per run, mutated through [`RecordStore::upsert`] and
/// [`RecordStore::insert_stub`], and written in full by [`RecordStore::save`].
/// Records are never deleted.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: BTreeMap<ListingId, EnrichedRecord>,
}

impl RecordStore {
    /// An empty store that will be saved to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Load the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    /// [`StoreError::Corrupt`] when the file exists but cannot be parsed,
    /// [`StoreError::Io`] when it cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            info!(path = %path.display(), "no record store yet, starting empty");
            return Ok(Self::empty(path));
        }

        // Raw bytes: invalid UTF-8 is corruption, not an I/O failure
        let contents = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
        let file: StoreFile = match serde_json::from_slice(&contents) {
            Ok(file) => file,
            Err(source) => return Err(StoreError::Corrupt { path, source }),
        };

        if file.version > STORE_VERSION {
            debug!(
                version = file.version,
                supported = STORE_VERSION,
                "store written by a newer version, reading known fields only"
            );
        }

        let records = file
            .records
            .into_values()
            .map(|record| (record.id.clone(), record))
            .collect::<BTreeMap<_, _>>();
        info!(path = %path.display(), records = records.len(), "loaded record store");

        Ok(Self { path, records })
    }

    /// Load the store, applying `policy` if the file is corrupt.
    ///
    /// With [`CorruptStorePolicy::BackupAndReset`] the unreadable file is
    /// renamed to `<name>.corrupt-<timestamp>` before starting empty, so the
    /// next save cannot overwrite it.
    pub fn open(path: impl Into<PathBuf>, policy: CorruptStorePolicy) -> Result<Self> {
        let path = path.into();
        match Self::load(&path) {
            Err(StoreError::Corrupt { path, source }) => match policy {
                CorruptStorePolicy::Abort => {
                    error!(path = %path.display(), error = %source, "record store is corrupt, aborting");
                    Err(StoreError::Corrupt { path, source })
                }
                CorruptStorePolicy::BackupAndReset => {
                    let backup = backup_path(&path, Utc::now());
                    fs::rename(&path, &backup).map_err(|e| StoreError::io(&path, e))?;
                    error!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %source,
                        "record store is corrupt, moved aside and starting empty"
                    );
                    Ok(Self::empty(path))
                }
            },
            other => other,
        }
    }

    /// Store file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a record.
    pub fn get(&self, id: &ListingId) -> Option<&EnrichedRecord> {
        self.records.get(id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, ordered by id.
    pub fn records(&self) -> impl Iterator<Item = &EnrichedRecord> {
        self.records.values()
    }

    /// Number of records with at least one contact channel.
    pub fn actionable_count(&self) -> usize {
        self.records.values().filter(|r| r.is_actionable()).count()
    }

    /// Records sorted by release date, newest and unannounced first.
    ///
    /// Unparseable dates sort last; ties keep id order.
    pub fn sorted_by_release_desc(&self) -> Vec<&EnrichedRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by_key(|record| std::cmp::Reverse(ReleaseDate::parse(&record.release_date)));
        records
    }

    /// Merge one pass's findings for `stub` into the store.
    pub fn upsert(&mut self, stub: &ListingStub, enrichment: Enrichment) -> UpsertOutcome {
        match self.records.get_mut(&stub.id) {
            Some(record) => {
                if record.merge(stub, enrichment) {
                    UpsertOutcome::Changed
                } else {
                    UpsertOutcome::Unchanged
                }
            }
            None => {
                let mut record = EnrichedRecord::from_stub(stub);
                record.merge(stub, enrichment);
                self.records.insert(stub.id.clone(), record);
                UpsertOutcome::Created
            }
        }
    }

    /// Create a bare record for `stub` unless one exists. Existing records are untouched.
    pub fn insert_stub(&mut self, stub: &ListingStub) -> bool {
        if self.records.contains_key(&stub.id) {
            return false;
        }
        self.records
            .insert(stub.id.clone(), EnrichedRecord::from_stub(stub));
        true
    }

    /// Write the whole store atomically (temp file in the same directory, then rename).
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let file = StoreFileRef {
            version: STORE_VERSION,
            updated_at: Utc::now(),
            records: &self.records,
        };
        let json = serde_json::to_string_pretty(&file)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), records = self.records.len(), "saved record store");
        Ok(())
    }
}

fn backup_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "records.json".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.corrupt-{}", now.format("%Y%m%dT%H%M%SZ")))
}
