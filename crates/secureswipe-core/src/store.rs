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

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;

pub const USER_KEY: &str = "secureswipe_user";
pub const PROGRESS_KEY: &str = "secureswipe_progress";
pub const COLLECTION_KEY: &str = "secureswipe_collection";
pub const SETTINGS_KEY: &str = "secureswipe_settings";
pub const DAILY_CARD_KEY: &str = "secureswipe_daily_card";

/// Every key secureswipe writes.
pub const ALL_KEYS: [&str; 5] = [
    USER_KEY,
    PROGRESS_KEY,
    COLLECTION_KEY,
    SETTINGS_KEY,
    DAILY_CARD_KEY,
];

/// A durable key-value store holding JSON values.
pub trait Store {
    /// Returns `None` if the key is absent.
    fn get(&self, key: &str) -> Fallible<Option<Value>>;

    fn set(&mut self, key: &str, value: Value) -> Fallible<()>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Fallible<()>;
}

/// A store that lives in memory. Values are kept as JSON text, like browser
/// storage does.
#[derive(Default, Debug)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under a key, bypassing serialization.
    pub fn set_raw(&mut self, key: &str, text: impl Into<String>) {
        self.entries.insert(key.to_string(), text.into());
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<Value>> {
        match self.entries.get(key) {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Fallible<()> {
        let text = serde_json::to_string(&value)?;
        self.entries.insert(key.to_string(), text);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read and decode a value. Missing keys, store failures and malformed
/// values all come back as `None`; the latter two are logged.
pub fn read<T: DeserializeOwned>(store: &impl Store, key: &str) -> Option<T> {
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read {key}: {e}");
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("Ignoring malformed value under {key}: {e}");
            None
        }
    }
}

/// Encode and write a value. Failures are logged and reported as `false`.
pub fn write<T: Serialize>(store: &mut impl Store, key: &str, value: &T) -> bool {
    let result = serde_json::to_value(value)
        .map_err(ErrorReport::from)
        .and_then(|value| store.set(key, value));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to write {key}: {e}");
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::fail;

    /// A store whose every operation fails.
    #[derive(Default)]
    pub struct BrokenStore;

    impl Store for BrokenStore {
        fn get(&self, _key: &str) -> Fallible<Option<Value>> {
            fail("storage unavailable")
        }

        fn set(&mut self, _key: &str, _value: Value) -> Fallible<()> {
            fail("storage unavailable")
        }

        fn remove(&mut self, _key: &str) -> Fallible<()> {
            fail("storage unavailable")
        }
    }

    #[test]
    fn test_memory_store() -> Fallible<()> {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a")?, None);
        store.set("a", json!({"x": [1, 2]}))?;
        assert_eq!(store.get("a")?, Some(json!({"x": [1, 2]})));
        assert_eq!(store.get_raw("a"), Some(r#"{"x":[1,2]}"#));
        store.remove("a")?;
        store.remove("a")?;
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set_raw("a", "{not json");
        let value: Option<Vec<String>> = read(&store, "a");
        assert_eq!(value, None);

        store.set_raw("b", r#"{"wrong": "shape"}"#);
        let value: Option<Vec<String>> = read(&store, "b");
        assert_eq!(value, None);
    }

    #[test]
    fn test_broken_store() {
        let mut store = BrokenStore;
        let value: Option<Vec<String>> = read(&store, "a");
        assert_eq!(value, None);
        assert!(!write(&mut store, "a", &vec!["x".to_string()]));
    }
}
