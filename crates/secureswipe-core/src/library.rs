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

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::Category;
use crate::types::card::DEFAULT_DIFFICULTY;
use crate::types::card_type::CardType;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckOrder {
    #[default]
    Random,
    /// Easiest first.
    Difficulty,
    /// Grouped by category name.
    Category,
}

impl DeckOrder {
    pub fn as_str(&self) -> &str {
        match self {
            DeckOrder::Random => "random",
            DeckOrder::Difficulty => "difficulty",
            DeckOrder::Category => "category",
        }
    }
}

impl Display for DeckOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeckOrder {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(DeckOrder::Random),
            "difficulty" => Ok(DeckOrder::Difficulty),
            "category" => Ok(DeckOrder::Category),
            _ => Err(ErrorReport::new(format!("Invalid deck order: {s}"))),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct ChallengeFilters {
    pub category: Option<String>,
    pub difficulty: Option<u8>,
}

impl ChallengeFilters {
    fn matches(&self, card: &Card) -> bool {
        let category_ok = match &self.category {
            Some(category) => &card.category == category,
            None => true,
        };
        let difficulty_ok = match self.difficulty {
            Some(difficulty) => card.difficulty == difficulty,
            None => true,
        };
        category_ok && difficulty_ok
    }
}

/// Supplies the decks the game is played with.
pub trait CardProvider {
    fn ordered_deck(&self, order: DeckOrder, rng: &mut impl Rng) -> Vec<Card>;

    /// Up to `count` cards matching `filters`. If there are no more than
    /// `count` matches they are all returned, in library order; otherwise a
    /// uniform random sample.
    fn challenge_deck(
        &self,
        count: usize,
        filters: &ChallengeFilters,
        rng: &mut impl Rng,
    ) -> Vec<Card>;

    /// A random card whose ID is not in `exclude`, falling back to any card.
    fn daily_card(&self, exclude: &[String], rng: &mut impl Rng) -> Option<Card>;
}

/// The contents of a cards file.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardLibrary {
    cards: Vec<Card>,
    categories: Vec<Category>,
}

fn effective_difficulty(card: &Card) -> u8 {
    if card.difficulty == 0 {
        DEFAULT_DIFFICULTY
    } else {
        card.difficulty
    }
}

impl CardLibrary {
    pub fn new(cards: Vec<Card>, categories: Vec<Category>) -> Self {
        Self { cards, categories }
    }

    /// Parse a `{ "cards": [...], "categories": [...] }` document.
    pub fn from_json(text: &str) -> Fallible<Self> {
        let library: CardLibrary = serde_json::from_str(text)?;
        Ok(library)
    }

    /// Append another library's cards and any categories not already known.
    pub fn merge(&mut self, other: CardLibrary) {
        self.cards.extend(other.cards);
        for category in other.categories {
            if !self.categories.iter().any(|c| c.id == category.id) {
                self.categories.push(category);
            }
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn by_category(&self, category: &str) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.category == category).collect()
    }

    pub fn by_type(&self, card_type: CardType) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.card_type == card_type).collect()
    }

    pub fn by_difficulty(&self, difficulty: u8) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| c.difficulty == difficulty)
            .collect()
    }

    /// The saved cards that exist in this library, in library order.
    pub fn collection_cards(&self, ids: &[String]) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| ids.iter().any(|id| id == &c.id))
            .collect()
    }

    /// Problems that would confuse players: duplicate IDs, difficulties
    /// outside 1..=3, and undeclared categories.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for card in &self.cards {
            if !seen.insert(card.id.as_str()) {
                problems.push(format!("duplicate card id: {}", card.id));
            }
            if !(1..=3).contains(&card.difficulty) {
                problems.push(format!(
                    "card {} has difficulty {}, expected 1 to 3",
                    card.id, card.difficulty
                ));
            }
            if card.title.trim().is_empty() {
                problems.push(format!("card {} has no title", card.id));
            }
            if !self.categories.is_empty()
                && !self.categories.iter().any(|c| c.id == card.category)
            {
                problems.push(format!(
                    "card {} has unknown category: {}",
                    card.id, card.category
                ));
            }
        }
        problems
    }
}

impl CardProvider for CardLibrary {
    fn ordered_deck(&self, order: DeckOrder, rng: &mut impl Rng) -> Vec<Card> {
        let mut deck = self.cards.clone();
        match order {
            DeckOrder::Random => deck.shuffle(rng),
            DeckOrder::Difficulty => deck.sort_by_key(effective_difficulty),
            DeckOrder::Category => deck.sort_by(|a, b| a.category.cmp(&b.category)),
        }
        deck
    }

    fn challenge_deck(
        &self,
        count: usize,
        filters: &ChallengeFilters,
        rng: &mut impl Rng,
    ) -> Vec<Card> {
        let mut matches: Vec<Card> = self
            .cards
            .iter()
            .filter(|card| filters.matches(card))
            .cloned()
            .collect();
        if matches.len() <= count {
            return matches;
        }
        let (chosen, _) = matches.partial_shuffle(rng, count);
        chosen.to_vec()
    }

    fn daily_card(&self, exclude: &[String], rng: &mut impl Rng) -> Option<Card> {
        let fresh: Vec<&Card> = self
            .cards
            .iter()
            .filter(|card| !exclude.contains(&card.id))
            .collect();
        if let Some(card) = fresh.choose(rng) {
            return Some((*card).clone());
        }
        self.cards.choose(rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const LIBRARY: &str = r#"{
        "cards": [
            {"id": "sqli", "type": "vulnerability", "category": "web", "difficulty": 2, "title": "SQL injection", "explanation": "Untrusted input in queries."},
            {"id": "mfa", "type": "good_practice", "category": "auth", "difficulty": 1, "title": "MFA", "explanation": "A second factor."},
            {"id": "xss", "type": "vulnerability", "category": "web", "difficulty": 1, "title": "XSS", "explanation": "Script injection."},
            {"id": "csp", "type": "good_practice", "category": "web", "title": "CSP", "explanation": "Restricts script sources."},
            {"id": "weak", "type": "vulnerability", "category": "auth", "difficulty": 3, "title": "Weak passwords", "explanation": "Easily guessed."}
        ],
        "categories": [
            {"id": "web", "name": "Web"},
            {"id": "auth", "name": "Authentication", "description": "Who are you?"}
        ]
    }"#;

    fn library() -> CardLibrary {
        CardLibrary::from_json(LIBRARY).unwrap()
    }

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_from_json() -> Fallible<()> {
        let library = CardLibrary::from_json(LIBRARY)?;
        assert_eq!(library.len(), 5);
        assert_eq!(library.categories().len(), 2);
        assert_eq!(library.card("csp").map(|c| c.difficulty), Some(1));
        assert!(library.card("nope").is_none());
        assert!(CardLibrary::from_json("{}")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_queries() {
        let library = library();
        assert_eq!(library.by_category("auth").len(), 2);
        assert_eq!(library.by_type(CardType::GoodPractice).len(), 2);
        assert_eq!(library.by_difficulty(1).len(), 3);
        let saved = vec!["weak".to_string(), "mfa".to_string(), "gone".to_string()];
        let cards: Vec<&str> = library
            .collection_cards(&saved)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(cards, vec!["mfa", "weak"]);
    }

    #[test]
    fn test_order_by_difficulty_is_stable() {
        let mut rng = StdRng::seed_from_u64(0);
        let deck = library().ordered_deck(DeckOrder::Difficulty, &mut rng);
        assert_eq!(ids(&deck), vec!["mfa", "xss", "csp", "sqli", "weak"]);
    }

    #[test]
    fn test_order_by_category() {
        let mut rng = StdRng::seed_from_u64(0);
        let deck = library().ordered_deck(DeckOrder::Category, &mut rng);
        assert_eq!(ids(&deck), vec!["mfa", "weak", "sqli", "xss", "csp"]);
    }

    #[test]
    fn test_random_order_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let deck = library().ordered_deck(DeckOrder::Random, &mut rng);
        let mut got = ids(&deck);
        got.sort();
        assert_eq!(got, vec!["csp", "mfa", "sqli", "weak", "xss"]);
    }

    #[test]
    fn test_challenge_returns_all_when_few_match() {
        let mut rng = StdRng::seed_from_u64(0);
        let filters = ChallengeFilters {
            category: Some("web".to_string()),
            difficulty: None,
        };
        let deck = library().challenge_deck(10, &filters, &mut rng);
        assert_eq!(ids(&deck), vec!["sqli", "xss", "csp"]);

        let filters = ChallengeFilters {
            category: Some("web".to_string()),
            difficulty: Some(1),
        };
        let deck = library().challenge_deck(10, &filters, &mut rng);
        assert_eq!(ids(&deck), vec!["xss", "csp"]);
    }

    #[test]
    fn test_challenge_samples_without_replacement() {
        let library = library();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let deck = library.challenge_deck(3, &ChallengeFilters::default(), &mut rng);
            assert_eq!(deck.len(), 3);
            let unique: HashSet<&str> = deck.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_challenge_sampling_reaches_every_card() {
        let library = library();
        let mut seen: HashSet<String> = HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            for card in library.challenge_deck(1, &ChallengeFilters::default(), &mut rng) {
                seen.insert(card.id);
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_daily_card_prefers_unseen() {
        let library = library();
        let exclude: Vec<String> = ["sqli", "mfa", "xss", "csp"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            let card = library.daily_card(&exclude, &mut rng);
            assert_eq!(card.map(|c| c.id), Some("weak".to_string()));
        }
    }

    #[test]
    fn test_daily_card_falls_back() {
        let library = library();
        let exclude: Vec<String> = library.cards().iter().map(|c| c.id.clone()).collect();
        let mut rng = StdRng::seed_from_u64(9);
        assert!(library.daily_card(&exclude, &mut rng).is_some());
        assert!(CardLibrary::default().daily_card(&[], &mut rng).is_none());
    }

    #[test]
    fn test_merge_and_validate() -> Fallible<()> {
        let mut library = library();
        assert!(library.validate().is_empty());
        let extra = CardLibrary::from_json(
            r#"{"cards": [
                {"id": "sqli", "type": "vulnerability", "category": "web", "title": "Again"},
                {"id": "odd", "type": "good_practice", "category": "infra", "difficulty": 5, "title": "Odd"}
            ], "categories": [{"id": "web", "name": "Web again"}]}"#,
        )?;
        library.merge(extra);
        assert_eq!(library.categories().len(), 2);
        let problems = library.validate();
        assert_eq!(
            problems,
            vec![
                "duplicate card id: sqli".to_string(),
                "card odd has difficulty 5, expected 1 to 3".to_string(),
                "card odd has unknown category: infra".to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_deck_order_from_str() -> Fallible<()> {
        assert_eq!("category".parse::<DeckOrder>()?, DeckOrder::Category);
        assert!("alphabetical".parse::<DeckOrder>().is_err());
        Ok(())
    }
}
