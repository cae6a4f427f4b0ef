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

use secureswipe_core::error::Fallible;
use secureswipe_core::error::fail;
use secureswipe_core::library::CardLibrary;
use secureswipe_core::progress::ProgressTracker;
use secureswipe_core::store::Store;

use crate::context::Context;

pub fn add(context: &Context, id: &str) -> Fallible<()> {
    let library = context.library()?;
    let mut tracker = context.tracker()?;
    println!("{}", add_card(&library, &mut tracker, id)?);
    Ok(())
}

pub fn remove(context: &Context, id: &str) -> Fallible<()> {
    let mut tracker = context.tracker()?;
    println!("{}", remove_card(&mut tracker, id));
    Ok(())
}

pub fn list(context: &Context) -> Fallible<()> {
    let library = context.library()?;
    let tracker = context.tracker()?;
    println!("{}", list_cards(&library, &tracker));
    Ok(())
}

fn add_card<S: Store>(
    library: &CardLibrary,
    tracker: &mut ProgressTracker<S>,
    id: &str,
) -> Fallible<String> {
    let Some(card) = library.card(id) else {
        return fail(format!("no card with id {id}."));
    };
    if tracker.add_to_collection(id) {
        Ok(format!("Saved {}.", card.title))
    } else {
        Ok(format!("{} is already saved.", card.title))
    }
}

fn remove_card<S: Store>(tracker: &mut ProgressTracker<S>, id: &str) -> String {
    if tracker.remove_from_collection(id) {
        format!("Removed {id}.")
    } else {
        format!("{id} is not in your collection.")
    }
}

fn list_cards<S: Store>(library: &CardLibrary, tracker: &ProgressTracker<S>) -> String {
    let collection = tracker.collection();
    let cards = library.collection_cards(collection.ids());
    if cards.is_empty() {
        return "Your collection is empty.".to_string();
    }
    cards
        .iter()
        .map(|card| format!("{}\t{}\t{}", card.id, card.card_type, card.title))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use secureswipe_core::store::MemoryStore;
    use secureswipe_core::types::card::Card;
    use secureswipe_core::types::card_type::CardType;

    use super::*;

    fn library() -> CardLibrary {
        CardLibrary::new(
            vec![
                Card::new("xss", CardType::Vulnerability, "web", 1, "XSS", ""),
                Card::new("mfa", CardType::GoodPractice, "auth", 1, "MFA", ""),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_add_list_remove() -> Fallible<()> {
        let library = library();
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        assert_eq!(list_cards(&library, &tracker), "Your collection is empty.");
        assert_eq!(add_card(&library, &mut tracker, "mfa")?, "Saved MFA.");
        assert_eq!(add_card(&library, &mut tracker, "mfa")?, "MFA is already saved.");
        assert_eq!(add_card(&library, &mut tracker, "xss")?, "Saved XSS.");
        assert_eq!(
            list_cards(&library, &tracker),
            "xss\tvulnerability\tXSS\nmfa\tgood_practice\tMFA"
        );
        assert_eq!(remove_card(&mut tracker, "xss"), "Removed xss.");
        assert_eq!(remove_card(&mut tracker, "xss"), "xss is not in your collection.");
        Ok(())
    }

    #[test]
    fn test_add_unknown_card() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let result = add_card(&library(), &mut tracker, "nope");
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: no card with id nope.".to_string())
        );
        assert!(tracker.collection().is_empty());
    }
}
