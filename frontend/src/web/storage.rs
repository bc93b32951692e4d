//! Session storage backed by `window.localStorage`.
//!
//! Values are stored raw (no JSON quoting) so the keys stay compatible with
//! sessions written by other clients of the same backend.

use gloo_storage::{LocalStorage, Storage};
use icycon::KeyValueStorage;

#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::raw().remove_item(key).is_ok()
    }
}
