// Copyright 2025 The secureswipe Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use secureswipe_core::error::ErrorReport;
use secureswipe_core::error::Fallible;
use secureswipe_core::store::MemoryStore;
use secureswipe_core::store::Store;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::Storage;

fn js_error(e: JsValue) -> ErrorReport {
    ErrorReport::new(format!("storage error: {e:?}"))
}

/// The browser's `localStorage`, holding one JSON document per key.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Fallible<Self> {
        let window = web_sys::window().ok_or_else(|| ErrorReport::new("no window"))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ErrorReport::new("localStorage is unavailable"))?;
        Ok(Self { storage })
    }
}

impl Store for LocalStorage {
    fn get(&self, key: &str) -> Fallible<Option<Value>> {
        match self.storage.get_item(key).map_err(js_error)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Fallible<()> {
        let text = serde_json::to_string(&value)?;
        self.storage.set_item(key, &text).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// `localStorage` when the page may use it, otherwise memory that lasts
/// as long as the page.
pub enum BrowserStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Ok(storage) => BrowserStore::Local(storage),
            Err(e) => {
                log::warn!("Progress will not be saved: {e}");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl Store for BrowserStore {
    fn get(&self, key: &str) -> Fallible<Option<Value>> {
        match self {
            BrowserStore::Local(s) => s.get(key),
            BrowserStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Fallible<()> {
        match self {
            BrowserStore::Local(s) => s.set(key, value),
            BrowserStore::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        match self {
            BrowserStore::Local(s) => s.remove(key),
            BrowserStore::Memory(s) => s.remove(key),
        }
    }
}
