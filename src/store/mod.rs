//! Local game store
//!
//! Key-value storage of raw uploaded game files, keyed by name:
//! - `put` inserts or overwrites (last write wins)
//! - `get_all` returns every record in unspecified order
//! - `get` returns one record or `StoreError::NotFound`
//!
//! Persistent backends wrap each record in a versioned JSON envelope, so the
//! same format works for files and LocalStorage. UTF-8 payloads (every game
//! file) are stored as plain text to stay within the LocalStorage quota; any
//! other payload is base64-encoded.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A stored game file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub name: String,
    /// Raw uploaded bytes, parsed lazily when a session loads
    pub payload: Vec<u8>,
}

/// Storage backend for uploaded game files
pub trait GameStore {
    /// Insert or overwrite the record for `name`
    fn put(&mut self, name: &str, payload: &[u8]) -> Result<(), StoreError>;

    /// Fetch the record for `name`
    fn get(&self, name: &str) -> Result<StoredRecord, StoreError>;

    /// Fetch every stored record
    fn get_all(&self) -> Result<Vec<StoredRecord>, StoreError>;
}

/// Current envelope format version
pub const ENVELOPE_VERSION: u32 = 1;

/// How the envelope's `payload` string holds the record bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum PayloadEncoding {
    #[default]
    Base64,
    Utf8,
}

/// On-disk / in-storage wrapper for a record
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    name: String,
    #[serde(default)]
    encoding: PayloadEncoding,
    payload: String,
}

/// Serialize a record into its envelope
pub(crate) fn encode_envelope(name: &str, payload: &[u8]) -> Result<String, StoreError> {
    let (encoding, payload) = match std::str::from_utf8(payload) {
        Ok(text) => (PayloadEncoding::Utf8, text.to_string()),
        Err(_) => (PayloadEncoding::Base64, STANDARD.encode(payload)),
    };
    let envelope = Envelope {
        version: ENVELOPE_VERSION,
        name: name.to_string(),
        encoding,
        payload,
    };
    serde_json::to_string(&envelope).map_err(|e| StoreError::Write {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Decode an envelope; `origin` names the source in error messages
pub(crate) fn decode_envelope(origin: &str, json: &str) -> Result<StoredRecord, StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        name: origin.to_string(),
        reason,
    };

    let envelope: Envelope = serde_json::from_str(json).map_err(|e| corrupt(e.to_string()))?;
    if envelope.version != ENVELOPE_VERSION {
        return Err(corrupt(format!(
            "unsupported envelope version {}",
            envelope.version
        )));
    }
    let payload = match envelope.encoding {
        PayloadEncoding::Utf8 => envelope.payload.into_bytes(),
        PayloadEncoding::Base64 => STANDARD
            .decode(&envelope.payload)
            .map_err(|e| corrupt(e.to_string()))?,
    };

    Ok(StoredRecord {
        name: envelope.name,
        payload,
    })
}

/// Outcome of storing several uploaded files
#[derive(Debug, Default)]
pub struct ImportReport {
    pub stored: Vec<String>,
    pub failed: Vec<(String, StoreError)>,
}

impl ImportReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Store uploaded files keyed by their file names; a failing file does not stop the rest
pub fn import_files<S, I, N, P>(store: &mut S, files: I) -> ImportReport
where
    S: GameStore + ?Sized,
    I: IntoIterator<Item = (N, P)>,
    N: Into<String>,
    P: AsRef<[u8]>,
{
    let mut report = ImportReport::default();
    for (name, payload) in files {
        let name = name.into();
        match store.put(&name, payload.as_ref()) {
            Ok(()) => report.stored.push(name),
            Err(e) => {
                log::error!("Failed to store {}: {}", name, e);
                report.failed.push((name, e));
            }
        }
    }
    log::info!(
        "Imported {} game files ({} failed)",
        report.stored.len(),
        report.failed.len()
    );
    report
}

/// Sorted names of every stored game
pub fn catalog<S: GameStore + ?Sized>(store: &S) -> Result<Vec<String>, StoreError> {
    let mut names: Vec<String> = store.get_all()?.into_iter().map(|r| r.name).collect();
    names.sort();
    Ok(names)
}
