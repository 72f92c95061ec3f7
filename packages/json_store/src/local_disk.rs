//! Preference store persisted as one JSON document per domain.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use std::{fs, io};

use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use parking_lot::{Mutex, RwLock};
use prefkit_ll_store::{Entry, LLError, PrefStore, Scalar};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::StoreConfig;

type Document = BTreeMap<String, Entry>;

type SharedDocument = Arc<RwLock<Document>>;

lazy_static! {
    /// Documents currently open in this process, by canonical path.
    static ref OPEN_DOCUMENTS: Mutex<HashMap<PathBuf, Weak<RwLock<Document>>>> =
        Mutex::new(HashMap::new());
}

/// On-disk form of an entry: `{"type": "double", "value": 1.5}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
enum StoredEntry {
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    Date(DateTime<Utc>),
    /// Base64 of the codec output.
    Bytes(String),
}

impl From<&Entry> for StoredEntry {
    fn from(entry: &Entry) -> Self {
        match entry {
            Entry::Scalar(Scalar::String(s)) => StoredEntry::String(s.clone()),
            Entry::Scalar(Scalar::Bool(b)) => StoredEntry::Bool(*b),
            Entry::Scalar(Scalar::Integer(i)) => StoredEntry::Integer(*i),
            Entry::Scalar(Scalar::Float(f)) => StoredEntry::Float(*f),
            Entry::Scalar(Scalar::Double(d)) => StoredEntry::Double(*d),
            Entry::Scalar(Scalar::Date(t)) => StoredEntry::Date(*t),
            Entry::Bytes(b) => {
                StoredEntry::Bytes(base64::engine::general_purpose::STANDARD.encode(b))
            }
        }
    }
}

impl StoredEntry {
    fn into_entry(self, identity: &str) -> Result<Entry, LLError> {
        let scalar = match self {
            StoredEntry::String(s) => Scalar::String(s),
            StoredEntry::Bool(b) => Scalar::Bool(b),
            StoredEntry::Integer(i) => Scalar::Integer(i),
            StoredEntry::Float(f) => Scalar::Float(f),
            StoredEntry::Double(d) => Scalar::Double(d),
            StoredEntry::Date(t) => Scalar::Date(t),
            StoredEntry::Bytes(encoded) => {
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| LLError::Corrupt {
                        message: format!("entry {:?} has invalid base64: {}", identity, e),
                    })?;
                return Ok(Entry::Bytes(Bytes::from(decoded)));
            }
        };
        Ok(Entry::Scalar(scalar))
    }
}

/// A preference store that keeps each persistence domain in
/// `<root>/<domain>.json`.
///
/// Handles opened in one process on the same document share a single
/// in-memory copy, so they always see each other's writes. Reads are served
/// from that copy. Every mutating call re-reads the document, applies the
/// change and rewrites it (temp file, fsync, rename) before it returns.
/// Writes from other processes show up in reads after
/// [`reload`](LocalDiskStore::reload) or the next local mutation.
///
/// Non-finite floats are rejected: JSON cannot represent them.
pub struct LocalDiskStore {
    root: PathBuf,
    domain: String,
    entries: SharedDocument,
}

impl LocalDiskStore {
    /// Open the store described by `config`, creating its root directory if
    /// needed.
    pub fn open(config: &StoreConfig) -> Result<LocalDiskStore, LLError> {
        validate_domain(&config.domain)?;

        fs::create_dir_all(&config.root)?;
        let attr = fs::metadata(&config.root)?;

        if !attr.is_dir() {
            return Err(io::Error::other(format!(
                "root path {} must be a directory",
                config.root.display()
            ))
            .into());
        }

        if attr.permissions().readonly() {
            return Err(io::Error::other(format!(
                "root directory {} must be writable",
                config.root.display()
            ))
            .into());
        }

        let root = config.root.canonicalize()?;
        let entries = shared_document(&document_path(&root, &config.domain))?;

        Ok(LocalDiskStore {
            root,
            domain: config.domain.clone(),
            entries,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The document holding the active domain.
    pub fn document_path(&self) -> PathBuf {
        document_path(&self.root, &self.domain)
    }

    /// Re-read the active domain from disk, dropping the in-memory copy.
    pub fn reload(&self) -> Result<(), LLError> {
        let fresh = load_document(&self.document_path())?;
        *self.entries.write() = fresh;
        Ok(())
    }

    /// Lock the document and bring it up to date with the file.
    fn lock_fresh(&self) -> Result<parking_lot::RwLockWriteGuard<'_, Document>, LLError> {
        let mut entries = self.entries.write();
        *entries = load_document(&self.document_path())?;
        Ok(entries)
    }

    fn persist(&self, entries: &Document) -> Result<(), LLError> {
        let file_path = self.document_path();
        tracing::debug!(path = %file_path.display(), "writing preference document");

        let stored: BTreeMap<&str, StoredEntry> = entries
            .iter()
            .map(|(identity, entry)| (identity.as_str(), StoredEntry::from(entry)))
            .collect();
        let json = serde_json::to_vec_pretty(&stored).map_err(io::Error::other)?;

        let tmp_path = file_path.with_extension(format!("json.{}.tmp", std::process::id()));
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(&json)?;
        f.sync_all()?;
        fs::rename(&tmp_path, &file_path)?;

        Ok(())
    }
}

impl PrefStore for LocalDiskStore {
    fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
        Ok(self.entries.read().get(identity).cloned())
    }

    fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
        if !is_representable(&entry) {
            return Err(LLError::NotSupported);
        }

        let mut entries = self.lock_fresh()?;
        let previous = entries.insert(identity.to_string(), entry);

        if let Err(error) = self.persist(&entries) {
            match previous {
                Some(previous) => entries.insert(identity.to_string(), previous),
                None => entries.remove(identity),
            };
            return Err(error);
        }

        Ok(())
    }

    fn delete(&self, identity: &str) -> Result<(), LLError> {
        let mut entries = self.lock_fresh()?;
        let Some(previous) = entries.remove(identity) else {
            return Ok(());
        };

        if let Err(error) = self.persist(&entries) {
            entries.insert(identity.to_string(), previous);
            return Err(error);
        }

        Ok(())
    }

    fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError> {
        validate_domain(name)?;

        let file_path = document_path(&self.root, name);

        // Hold the lock across the file removal so no write can slip between.
        let open = if name == self.domain {
            Some(Arc::clone(&self.entries))
        } else {
            OPEN_DOCUMENTS.lock().get(&file_path).and_then(Weak::upgrade)
        };
        let mut active = open.as_ref().map(|document| document.write());

        tracing::debug!(path = %file_path.display(), "removing preference domain");
        match fs::remove_file(&file_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if let Some(entries) = active.as_mut() {
            entries.clear();
        }

        Ok(())
    }
}

/// The in-process copy of the document at `file_path`, loading it if no
/// handle has it open.
fn shared_document(file_path: &Path) -> Result<SharedDocument, LLError> {
    let mut open = OPEN_DOCUMENTS.lock();

    if let Some(document) = open.get(file_path).and_then(Weak::upgrade) {
        return Ok(document);
    }

    let document = Arc::new(RwLock::new(load_document(file_path)?));
    open.retain(|_, weak| weak.strong_count() > 0);
    open.insert(file_path.to_path_buf(), Arc::downgrade(&document));

    Ok(document)
}

fn document_path(root: &Path, domain: &str) -> PathBuf {
    root.join(format!("{}.json", domain))
}

fn validate_domain(name: &str) -> Result<(), LLError> {
    lazy_static! {
        static ref DOMAIN_NAME: Regex =
            Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*(\.[A-Za-z0-9_-]+)*$").unwrap();
    }

    if DOMAIN_NAME.is_match(name) {
        Ok(())
    } else {
        Err(LLError::InvalidDomain {
            name: name.to_string(),
        })
    }
}

fn is_representable(entry: &Entry) -> bool {
    match entry {
        Entry::Scalar(Scalar::Float(f)) => f.is_finite(),
        Entry::Scalar(Scalar::Double(d)) => d.is_finite(),
        _ => true,
    }
}

fn load_document(file_path: &Path) -> Result<Document, LLError> {
    tracing::debug!(path = %file_path.display(), "reading preference document");

    let bytes = match fs::read(file_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::new()),
        Err(e) => return Err(e.into()),
    };

    let stored: BTreeMap<String, StoredEntry> =
        serde_json::from_slice(&bytes).map_err(|e| LLError::Corrupt {
            message: format!("{}: {}", file_path.display(), e),
        })?;

    stored
        .into_iter()
        .map(|(identity, entry)| {
            let entry = entry.into_entry(&identity)?;
            Ok((identity, entry))
        })
        .collect()
}
