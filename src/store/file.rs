//! Directory-backed game store (native)
//!
//! One envelope file per record. Writes go to a temporary file that is then
//! renamed over the record.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{GameStore, StoredRecord, decode_envelope, encode_envelope};
use crate::error::StoreError;

const RECORD_EXT: &str = "game";
const TMP_EXT: &str = "tmp";

/// Game store backed by a directory of envelope files
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

/// File stem for a key: hex of its UTF-8 bytes, so any name is a safe file name
fn file_stem(name: &str) -> String {
    name.bytes().map(|b| format!("{:02x}", b)).collect()
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", dir.display(), e)))?;
        log::info!("Opened game store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", file_stem(name), RECORD_EXT))
    }

    fn read_record(&self, path: &Path) -> Result<StoredRecord, StoreError> {
        let origin = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| StoreError::Read {
            name: origin.clone(),
            reason: e.to_string(),
        })?;
        decode_envelope(&origin, &json)
    }
}

impl GameStore for FileStore {
    fn put(&mut self, name: &str, payload: &[u8]) -> Result<(), StoreError> {
        let write_err = |e: std::io::Error| StoreError::Write {
            name: name.to_string(),
            reason: e.to_string(),
        };

        let json = encode_envelope(name, payload)?;
        let path = self.record_path(name);
        let tmp = path.with_extension(TMP_EXT);
        {
            let mut file = File::create(&tmp).map_err(write_err)?;
            file.write_all(json.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        log::info!("Stored game {} ({} bytes)", name, payload.len());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<StoredRecord, StoreError> {
        let path = self.record_path(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        log::debug!("Reading game {} from {}", name, path.display());
        self.read_record(&path)
    }

    fn get_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let read_err = |e: std::io::Error| StoreError::Read {
            name: self.dir.display().to_string(),
            reason: e.to_string(),
        };

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            records.push(self.read_record(&path)?);
        }
        log::debug!("Listed {} stored games", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_is_hex() {
        assert_eq!(file_stem("a/b"), "612f62");
        assert_eq!(file_stem(""), "");
    }

    #[test]
    fn test_put_get_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.put("Animais.json", b"first").unwrap();
        store.put("Frutas.json", b"other").unwrap();
        store.put("Animais.json", b"second").unwrap();

        assert_eq!(store.get("Animais.json").unwrap().payload, b"second");

        let mut all = store.get_all().unwrap();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Animais.json");
        assert_eq!(all[0].payload, b"second");
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.put("Cores/Básico", b"payload").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("Cores/Básico").unwrap().payload, b"payload");
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.get("nope"), Err(StoreError::NotFound(_))));
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.put("Animais", b"ok").unwrap();
        fs::write(store.record_path("Animais"), "garbage").unwrap();

        assert!(matches!(store.get("Animais"), Err(StoreError::Corrupt { .. })));
        assert!(matches!(store.get_all(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_failed_rename_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let path = store.record_path("Animais");
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            store.put("Animais", b"payload"),
            Err(StoreError::Write { .. })
        ));
        assert!(!path.with_extension(TMP_EXT).exists());
    }

    #[test]
    fn test_open_on_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        assert!(matches!(
            FileStore::open(blocker.join("games")),
            Err(StoreError::Unavailable(_))
        ));
    }
}
