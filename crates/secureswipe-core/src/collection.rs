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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::CardId;

/// The cards a player has saved for later. Order is the order of saving.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    ids: Vec<CardId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the card was already saved.
    pub fn add(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Returns false if the card was not saved.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|x| x == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn ids(&self) -> &[CardId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_add_remove() {
        let mut c = Collection::new();
        assert!(c.add("a"));
        assert!(!c.add("a"));
        assert!(c.add("b"));
        assert_eq!(c.ids(), ["a".to_string(), "b".to_string()]);
        assert!(c.remove("a"));
        assert!(!c.remove("a"));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_serializes_as_array() -> Fallible<()> {
        let mut c = Collection::new();
        c.add("x");
        assert_eq!(serde_json::to_string(&c)?, r#"["x"]"#);
        let back: Collection = serde_json::from_str(r#"["x","y"]"#)?;
        assert!(back.contains("y"));
        Ok(())
    }
}
