//! Whole-file load and save of named JSON collections.

use dashmap::DashMap;
use pos_engine::{CollectionName, IdGenerator, Record, RecordId, Timestamp};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Contents of a collection file.
#[derive(Debug, Default)]
struct Loaded {
    records: Vec<Record>,
    /// Array elements that are not objects.
    skipped: usize,
}

/// Disk-backed store of named collections.
///
/// Cloning is cheap; clones share the same writer locks and id generator.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    root: PathBuf,
    writers: DashMap<CollectionName, Arc<AsyncMutex<()>>>,
    ids: Mutex<IdGenerator>,
}

impl CollectionStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until
    /// [`CollectionStore::ensure_initialized`] or a save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                root: root.into(),
                writers: DashMap::new(),
                ids: Mutex::new(IdGenerator::new()),
            }),
        }
    }

    /// Directory holding the collection files.
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// File backing the collection `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.inner.root.join(format!("{name}.json"))
    }

    /// Create the data directory and seed every missing collection with an
    /// empty array. Existing files are left alone.
    pub async fn ensure_initialized<'a, I>(&self, names: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        fs::create_dir_all(self.root()).await?;

        for name in names {
            if fs::try_exists(self.path(name)).await? {
                continue;
            }
            tracing::info!(collection = name, "Seeding empty collection");
            self.save(name, &[]).await?;
        }

        Ok(())
    }

    /// Read the whole collection.
    ///
    /// Never fails: a missing, unreadable or corrupt file reads as an empty
    /// collection. Elements of the array that are not objects are skipped.
    pub async fn load(&self, name: &str) -> Vec<Record> {
        self.read(name).await.records
    }

    async fn read(&self, name: &str) -> Loaded {
        let path = self.path(name);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(collection = name, "Collection file missing, reading as empty");
                return Loaded::default();
            }
            Err(e) => {
                tracing::error!(
                    collection = name,
                    path = %path.display(),
                    "Failed to read collection file, reading as empty: {}",
                    e
                );
                return Loaded::default();
            }
        };

        let elements: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(elements) => elements,
            Err(e) => {
                tracing::error!(
                    collection = name,
                    path = %path.display(),
                    "Collection file is corrupt, reading as empty: {}",
                    e
                );
                return Loaded::default();
            }
        };

        let mut loaded = Loaded::default();
        for element in elements {
            match Record::try_from(element) {
                Ok(record) => loaded.records.push(record),
                Err(_) => loaded.skipped += 1,
            }
        }
        if loaded.skipped > 0 {
            tracing::error!(
                collection = name,
                path = %path.display(),
                skipped = loaded.skipped,
                "Collection holds elements that are not objects"
            );
        }
        loaded
    }

    /// Replace the whole collection.
    ///
    /// The new content is written to a temporary file next to the target and
    /// renamed over it, so readers see either the old or the new array.
    pub async fn save(&self, name: &str, records: &[Record]) -> io::Result<()> {
        let path = self.path(name);
        let tmp = self
            .inner
            .root
            .join(format!(".{name}.json.{}.tmp", uuid::Uuid::new_v4()));

        let body = serde_json::to_vec_pretty(records).map_err(io::Error::other)?;

        let result = write_then_rename(&tmp, &path, &body).await;
        if result.is_err() {
            // Best effort.
            let _ = fs::remove_file(&tmp).await;
        }
        result
    }

    /// Run `f` over the collection under its writer lock and save the result.
    ///
    /// Nothing is saved when `f` fails. Concurrent calls on the same
    /// collection run one after another, so no update is lost.
    ///
    /// A collection holding elements that are not objects is never written:
    /// saving it would drop them.
    pub async fn modify<T, F>(&self, name: &str, f: F) -> crate::error::Result<T>
    where
        F: FnOnce(&mut Vec<Record>) -> pos_engine::error::Result<T>,
    {
        let _guard = self.writer(name).await;

        let Loaded {
            mut records,
            skipped,
        } = self.read(name).await;
        if skipped > 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{name} holds {skipped} non-object elements, refusing to overwrite"),
            )
            .into());
        }

        let output = f(&mut records)?;
        self.save(name, &records).await?;

        Ok(output)
    }

    /// Issue a fresh id, above `floor` when given.
    pub fn next_id(
        &self,
        now: Timestamp,
        floor: Option<RecordId>,
    ) -> pos_engine::error::Result<RecordId> {
        self.inner
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next(now, floor)
    }

    async fn writer(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .writers
            .entry(name.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp).await?;
    file.write_all(body).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp, path).await
}
