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

use crate::collection::Collection;
use crate::store::ALL_KEYS;
use crate::store::COLLECTION_KEY;
use crate::store::PROGRESS_KEY;
use crate::store::Store;
use crate::store::read;
use crate::store::write;
use crate::streak::compute_streak;
use crate::streak::parse_completions;
use crate::types::card::CardId;
use crate::types::date::Date;

/// Everything the player has done, as persisted under the progress key.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub cards_viewed: Vec<CardId>,
    pub correct_answers: Vec<CardId>,
    pub incorrect_answers: Vec<CardId>,
    pub daily_cards: DailyCards,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyCards {
    pub last_accessed: Option<String>,
    /// ISO dates (`YYYY-MM-DD`, UTC) on which the daily card was completed.
    pub completed: Vec<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_viewed: usize,
    pub total_correct: usize,
    pub total_incorrect: usize,
    /// Percentage of viewed cards answered correctly, to two decimals.
    pub success_rate: f64,
    pub collection_size: usize,
    pub daily_streak: u32,
}

fn insert_unique(ids: &mut Vec<CardId>, id: &str) -> bool {
    if ids.iter().any(|x| x == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

/// Persists play history and derives statistics from it.
///
/// Every read goes to the store. When the store cannot be read, the tracker
/// falls back to the last value it saw or wrote, so a session keeps working
/// with broken storage; failed writes are logged and otherwise ignored.
pub struct ProgressTracker<S: Store> {
    pub(crate) store: S,
    progress: ProgressRecord,
    collection: Collection,
}

impl<S: Store> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        let progress = read(&store, PROGRESS_KEY).unwrap_or_default();
        let collection = read(&store, COLLECTION_KEY).unwrap_or_default();
        Self {
            store,
            progress,
            collection,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn progress(&self) -> ProgressRecord {
        read(&self.store, PROGRESS_KEY).unwrap_or_else(|| self.progress.clone())
    }

    /// Read-modify-write on the progress record. `f` reports whether it
    /// changed anything; unchanged records are not written back.
    fn update_progress(&mut self, f: impl FnOnce(&mut ProgressRecord) -> bool) -> bool {
        let mut record = self.progress();
        let changed = f(&mut record);
        if changed {
            write(&mut self.store, PROGRESS_KEY, &record);
        }
        self.progress = record;
        changed
    }

    pub fn record_view(&mut self, id: &str) -> bool {
        self.update_progress(|p| insert_unique(&mut p.cards_viewed, id))
    }

    pub fn record_correct(&mut self, id: &str) -> bool {
        self.update_progress(|p| insert_unique(&mut p.correct_answers, id))
    }

    pub fn record_incorrect(&mut self, id: &str) -> bool {
        self.update_progress(|p| insert_unique(&mut p.incorrect_answers, id))
    }

    /// Mark the daily card as done for `today`. Returns false, changing
    /// nothing, if it was already done.
    pub fn register_daily_completion(&mut self, today: Date) -> bool {
        let today = today.to_iso_string();
        let registered = self.update_progress(|p| {
            if p.daily_cards.completed.contains(&today) {
                return false;
            }
            p.daily_cards.last_accessed = Some(today.clone());
            p.daily_cards.completed.push(today.clone());
            true
        });
        if registered {
            log::debug!("Daily card completed on {today}");
        }
        registered
    }

    pub fn has_completed_today(&self, today: Date) -> bool {
        let today = today.to_iso_string();
        self.progress().daily_cards.completed.contains(&today)
    }

    pub fn compute_streak(&self, today: Date) -> u32 {
        let completions = parse_completions(&self.progress().daily_cards.completed);
        compute_streak(&completions, today)
    }

    pub fn statistics(&self, today: Date) -> Statistics {
        let progress = self.progress();
        let total_viewed = progress.cards_viewed.len();
        let total_correct = progress.correct_answers.len();
        let total_incorrect = progress.incorrect_answers.len();
        let success_rate = if total_viewed > 0 {
            let rate = total_correct as f64 / total_viewed as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };
        let completions = parse_completions(&progress.daily_cards.completed);
        Statistics {
            total_viewed,
            total_correct,
            total_incorrect,
            success_rate,
            collection_size: self.collection().len(),
            daily_streak: compute_streak(&completions, today),
        }
    }

    pub fn collection(&self) -> Collection {
        read(&self.store, COLLECTION_KEY).unwrap_or_else(|| self.collection.clone())
    }

    fn update_collection(&mut self, f: impl FnOnce(&mut Collection) -> bool) -> bool {
        let mut collection = self.collection();
        let changed = f(&mut collection);
        if changed {
            write(&mut self.store, COLLECTION_KEY, &collection);
        }
        self.collection = collection;
        changed
    }

    /// Returns false if the card was already saved.
    pub fn add_to_collection(&mut self, id: &str) -> bool {
        self.update_collection(|c| c.add(id))
    }

    /// Returns false if the card was not saved.
    pub fn remove_from_collection(&mut self, id: &str) -> bool {
        self.update_collection(|c| c.remove(id))
    }

    pub fn in_collection(&self, id: &str) -> bool {
        self.collection().contains(id)
    }

    /// Forget everything: progress, collection, profile and settings.
    pub fn reset(&mut self) {
        for key in ALL_KEYS {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Failed to remove {key}: {e}");
            }
        }
        self.progress = ProgressRecord::default();
        self.collection = Collection::default();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Fallible;
    use crate::store::MemoryStore;
    use crate::store::tests::BrokenStore;

    fn today() -> Date {
        Date::parse("2025-06-15").unwrap()
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        assert!(tracker.record_correct("a"));
        assert!(!tracker.record_correct("a"));
        assert_eq!(tracker.progress().correct_answers, vec!["a".to_string()]);
    }

    #[test]
    fn test_card_can_be_both_correct_and_incorrect() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        tracker.record_correct("a");
        tracker.record_incorrect("a");
        let stats = tracker.statistics(today());
        assert_eq!(stats.total_correct, 1);
        assert_eq!(stats.total_incorrect, 1);
    }

    #[test]
    fn test_daily_completion_once_per_day() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        assert!(!tracker.has_completed_today(today()));
        assert!(tracker.register_daily_completion(today()));
        assert!(!tracker.register_daily_completion(today()));
        assert!(tracker.has_completed_today(today()));
        let progress = tracker.progress();
        assert_eq!(progress.daily_cards.completed, vec!["2025-06-15".to_string()]);
        assert_eq!(progress.daily_cards.last_accessed.as_deref(), Some("2025-06-15"));
    }

    #[test]
    fn test_streak_over_several_days() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        tracker.register_daily_completion(today().minus_days(2));
        tracker.register_daily_completion(today().minus_days(1));
        assert_eq!(tracker.compute_streak(today()), 2);
        tracker.register_daily_completion(today());
        assert_eq!(tracker.compute_streak(today()), 3);
        // Two days later without playing, the streak is gone.
        let later = Date::parse("2025-06-17").unwrap();
        assert_eq!(tracker.compute_streak(later), 0);
    }

    #[test]
    fn test_statistics() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        for id in ["a", "b", "c"] {
            tracker.record_view(id);
        }
        tracker.record_correct("a");
        tracker.record_incorrect("b");
        tracker.add_to_collection("c");
        let stats = tracker.statistics(today());
        assert_eq!(stats.total_viewed, 3);
        assert_eq!(stats.success_rate, 33.33);
        assert_eq!(stats.collection_size, 1);
        assert_eq!(stats.daily_streak, 0);
    }

    #[test]
    fn test_statistics_without_views() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        assert_eq!(tracker.statistics(today()), Statistics::default());
    }

    #[test]
    fn test_reads_original_shape() -> Fallible<()> {
        let mut store = MemoryStore::new();
        store.set(
            PROGRESS_KEY,
            json!({
                "cardsViewed": ["a", "b"],
                "correctAnswers": ["a"],
                "incorrectAnswers": [],
                "dailyCards": { "lastAccessed": "2025-06-14", "completed": ["2025-06-14"] }
            }),
        )?;
        let tracker = ProgressTracker::new(store);
        let stats = tracker.statistics(today());
        assert_eq!(stats.total_viewed, 2);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(stats.daily_streak, 1);
        Ok(())
    }

    #[test]
    fn test_malformed_progress_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set_raw(PROGRESS_KEY, "{\"cardsViewed\": 12");
        let tracker = ProgressTracker::new(store);
        assert_eq!(tracker.progress(), ProgressRecord::default());
        assert_eq!(tracker.statistics(today()).total_viewed, 0);
    }

    #[test]
    fn test_broken_store_keeps_session_in_memory() {
        let mut tracker = ProgressTracker::new(BrokenStore);
        assert!(tracker.record_view("a"));
        assert!(tracker.record_correct("a"));
        assert!(tracker.add_to_collection("a"));
        assert!(tracker.register_daily_completion(today()));
        let stats = tracker.statistics(today());
        assert_eq!(stats.total_viewed, 1);
        assert_eq!(stats.success_rate, 100.0);
        assert_eq!(stats.collection_size, 1);
        assert_eq!(stats.daily_streak, 1);
        tracker.reset();
        assert_eq!(tracker.statistics(today()), Statistics::default());
    }

    #[test]
    fn test_collection() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        assert!(tracker.add_to_collection("x"));
        assert!(!tracker.add_to_collection("x"));
        assert!(tracker.in_collection("x"));
        assert!(tracker.remove_from_collection("x"));
        assert!(!tracker.remove_from_collection("x"));
        assert!(tracker.collection().is_empty());
    }

    #[test]
    fn test_reset_clears_store() -> Fallible<()> {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        tracker.record_view("a");
        tracker.add_to_collection("a");
        tracker.register_daily_completion(today());
        tracker.reset();
        assert!(tracker.store().is_empty());
        assert_eq!(tracker.progress(), ProgressRecord::default());
        assert_eq!(tracker.compute_streak(today()), 0);
        Ok(())
    }
}
