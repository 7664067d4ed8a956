//! Flat-file record storage over a dump directory.
//!
//! A dump directory holds one `<collection>.json` file per entity set, each
//! an [`EntityCollection`] envelope. The store resolves collection names to
//! files, parses envelopes, and offers filtered lookups; it never caches and
//! never writes. Storage is local and static within a run, so a failed read
//! is final and never retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::config::DumpConfig;
use crate::error::{AccessError, AccessResult};
use crate::records::EntityCollection;

/// Read-only access to the collection files of one dump directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dump_dir: PathBuf,
}

impl RecordStore {
    /// Create a store over the given dump directory.
    pub fn new(dump_dir: impl Into<PathBuf>) -> Self {
        Self {
            dump_dir: dump_dir.into(),
        }
    }

    /// Create a store over the directory a [`DumpConfig`] points at.
    pub fn from_config(config: &DumpConfig) -> Self {
        Self::new(&config.dump_dir)
    }

    /// The directory this store reads from.
    pub fn dump_dir(&self) -> &Path {
        &self.dump_dir
    }

    /// Whether a collection resource exists in the dump.
    ///
    /// This is the precondition gate callers use before a load that is
    /// allowed to be optional. Names that are not plain file basenames never
    /// exist: the entity-set name is caller-supplied and gets joined to a
    /// filesystem path, so it must not be able to leave the dump directory.
    pub fn exists(&self, collection: &str) -> bool {
        if !is_plain_name(collection) {
            debug!("rejecting collection name '{collection}': not a plain basename");
            return false;
        }
        self.collection_path(collection).is_file()
    }

    /// Load every record of a collection, preserving file order.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> AccessResult<Vec<T>> {
        if !is_plain_name(collection) {
            return Err(AccessError::StorageUnavailable {
                collection: collection.to_string(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    "collection names must be plain file basenames",
                ),
            });
        }

        let path = self.collection_path(collection);
        let raw = fs::read_to_string(&path).map_err(|source| AccessError::StorageUnavailable {
            collection: collection.to_string(),
            source,
        })?;
        let envelope: EntityCollection<T> =
            serde_json::from_str(&raw).map_err(|source| AccessError::MalformedCollection {
                collection: collection.to_string(),
                source,
            })?;

        if envelope.odata_next.is_some() {
            warn!(
                "collection '{collection}' carries a nextLink: the dump is truncated \
                 and aggregation over it may under-report"
            );
        }

        Ok(envelope.value)
    }

    /// Load a collection and keep only the records matching `predicate`,
    /// preserving load order. Higher components only ever use single-field
    /// equality predicates.
    pub fn find<T, P>(&self, collection: &str, mut predicate: P) -> AccessResult<Vec<T>>
    where
        T: DeserializeOwned,
        P: FnMut(&T) -> bool,
    {
        let mut records = self.load::<T>(collection)?;
        records.retain(|record| predicate(record));
        Ok(records)
    }

    /// Sorted basenames of the collections present in the dump directory.
    pub fn available_collections(&self) -> AccessResult<Vec<String>> {
        let entries = fs::read_dir(&self.dump_dir)
            .map_err(|source| self.dump_dir_unavailable(source))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| self.dump_dir_unavailable(source))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dump_dir.join(format!("{collection}.json"))
    }

    fn dump_dir_unavailable(&self, source: io::Error) -> AccessError {
        AccessError::StorageUnavailable {
            collection: self.dump_dir.display().to_string(),
            source,
        }
    }
}

/// True when `name` is a bare basename: non-empty, no path separators, and
/// not a directory traversal component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|c| c != '/' && c != '\\')
}
