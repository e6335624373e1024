//! Browser LocalStorage game store (wasm32)

use web_sys::Storage;

use super::{GameStore, StoredRecord, decode_envelope, encode_envelope};
use crate::error::StoreError;

/// Key prefix separating game records from other LocalStorage entries
const KEY_PREFIX: &str = "libras_play_game:";

/// Game store backed by the page's LocalStorage
pub struct LocalStorageStore {
    storage: Storage,
}

impl std::fmt::Debug for LocalStorageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorageStore").finish_non_exhaustive()
    }
}

fn js_reason(value: wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl LocalStorageStore {
    /// Open the window's LocalStorage
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(js_reason(e)))?
            .ok_or_else(|| StoreError::Unavailable("LocalStorage disabled".into()))?;
        log::info!("Opened LocalStorage game store");
        Ok(Self { storage })
    }

    fn key(name: &str) -> String {
        format!("{}{}", KEY_PREFIX, name)
    }
}

impl GameStore for LocalStorageStore {
    fn put(&mut self, name: &str, payload: &[u8]) -> Result<(), StoreError> {
        let json = encode_envelope(name, payload)?;
        self.storage
            .set_item(&Self::key(name), &json)
            .map_err(|e| StoreError::Write {
                name: name.to_string(),
                reason: js_reason(e),
            })?;
        log::info!("Stored game {} ({} bytes)", name, payload.len());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<StoredRecord, StoreError> {
        let json = self
            .storage
            .get_item(&Self::key(name))
            .map_err(|e| StoreError::Read {
                name: name.to_string(),
                reason: js_reason(e),
            })?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        decode_envelope(name, &json)
    }

    fn get_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let read_err = |e| StoreError::Read {
            name: "LocalStorage".into(),
            reason: js_reason(e),
        };

        let len = self.storage.length().map_err(read_err)?;
        let mut records = Vec::new();
        for i in 0..len {
            let Some(key) = self.storage.key(i).map_err(read_err)? else {
                continue;
            };
            let Some(name) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            records.push(self.get(name)?);
        }
        log::debug!("Listed {} stored games", records.len());
        Ok(records)
    }
}
