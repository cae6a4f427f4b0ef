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

use crate::types::card_type::CardType;

/// The lowest difficulty, used when a card does not declare one.
pub const DEFAULT_DIFFICULTY: u8 = 1;

pub type CardId = String;

/// An educational card. Cards are immutable once loaded.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub category: String,
    /// Between 1 and 3, where 3 is the hardest.
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
}

fn default_difficulty() -> u8 {
    DEFAULT_DIFFICULTY
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        card_type: CardType,
        category: impl Into<String>,
        difficulty: u8,
        title: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            card_type,
            category: category.into(),
            difficulty,
            title: title.into(),
            explanation: explanation.into(),
        }
    }

    pub fn is_vulnerability(&self) -> bool {
        self.card_type == CardType::Vulnerability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_missing_difficulty_defaults_to_one() -> Fallible<()> {
        let json = r#"{"id": "sqli", "type": "vulnerability", "category": "web", "title": "SQL injection"}"#;
        let card: Card = serde_json::from_str(json)?;
        assert_eq!(card.difficulty, 1);
        assert_eq!(card.explanation, "");
        assert!(card.is_vulnerability());
        Ok(())
    }

    #[test]
    fn test_unknown_fields_are_ignored() -> Fallible<()> {
        let json = r#"{"id": "mfa", "type": "good_practice", "title": "MFA", "difficulty": 2, "examples": ["totp"]}"#;
        let card: Card = serde_json::from_str(json)?;
        assert_eq!(card.card_type, CardType::GoodPractice);
        assert_eq!(card.difficulty, 2);
        Ok(())
    }
}
