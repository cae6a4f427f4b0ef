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

use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::collection::Collection;
use crate::progress::ProgressRecord;
use crate::progress::ProgressTracker;
use crate::store::COLLECTION_KEY;
use crate::store::DAILY_CARD_KEY;
use crate::store::PROGRESS_KEY;
use crate::store::SETTINGS_KEY;
use crate::store::Store;
use crate::store::USER_KEY;
use crate::store::read;
use crate::store::write;
use crate::types::card::CardId;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub created_at: Timestamp,
    pub last_visit: Timestamp,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub animations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            animations: true,
        }
    }
}

/// The daily card chosen for a given day, so it stays the same all day.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyCardPin {
    date: String,
    card_id: CardId,
}

/// `user_<unix millis>_<nine base36 characters>`.
pub fn generate_user_id(now: Timestamp, rng: &mut impl Rng) -> String {
    let suffix: String = (0..9)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("user_{}_{}", now.as_millis(), suffix)
}

impl<S: Store> ProgressTracker<S> {
    /// Create the user record on first use, or refresh its last visit, and
    /// write empty defaults for anything else that is missing.
    pub fn initialize(&mut self, now: Timestamp, rng: &mut impl Rng) -> UserRecord {
        let user = match read::<UserRecord>(&self.store, USER_KEY) {
            Some(mut user) => {
                user.last_visit = now;
                user
            }
            None => {
                let user = UserRecord {
                    id: generate_user_id(now, rng),
                    created_at: now,
                    last_visit: now,
                };
                log::debug!("Created user {}", user.id);
                user
            }
        };
        write(&mut self.store, USER_KEY, &user);
        if read::<ProgressRecord>(&self.store, PROGRESS_KEY).is_none() {
            let progress = self.progress();
            write(&mut self.store, PROGRESS_KEY, &progress);
        }
        if read::<Collection>(&self.store, COLLECTION_KEY).is_none() {
            let collection = self.collection();
            write(&mut self.store, COLLECTION_KEY, &collection);
        }
        if read::<Settings>(&self.store, SETTINGS_KEY).is_none() {
            write(&mut self.store, SETTINGS_KEY, &Settings::default());
        }
        user
    }

    pub fn user(&self) -> Option<UserRecord> {
        read(&self.store, USER_KEY)
    }

    pub fn settings(&self) -> Settings {
        read(&self.store, SETTINGS_KEY).unwrap_or_default()
    }

    pub fn set_settings(&mut self, settings: &Settings) -> bool {
        write(&mut self.store, SETTINGS_KEY, settings)
    }

    /// The card pinned as today's daily card, if one was pinned today.
    pub fn pinned_daily_card(&self, today: Date) -> Option<CardId> {
        let pin: DailyCardPin = read(&self.store, DAILY_CARD_KEY)?;
        if pin.date == today.to_iso_string() {
            Some(pin.card_id)
        } else {
            None
        }
    }

    pub fn pin_daily_card(&mut self, today: Date, card_id: &str) {
        let pin = DailyCardPin {
            date: today.to_iso_string(),
            card_id: card_id.to_string(),
        };
        write(&mut self.store, DAILY_CARD_KEY, &pin);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::Fallible;
    use crate::store::MemoryStore;

    #[test]
    fn test_generate_user_id() -> Fallible<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_user_id(Timestamp::from_millis(1_700_000_000_000)?, &mut rng);
        let suffix = id
            .strip_prefix("user_1700000000000_")
            .expect("unexpected prefix");
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));
        Ok(())
    }

    #[test]
    fn test_initialize_creates_defaults() -> Fallible<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let now = Timestamp::from_millis(1_000)?;
        let user = tracker.initialize(now, &mut rng);
        assert_eq!(user.created_at, now);
        assert_eq!(tracker.user(), Some(user.clone()));
        assert_eq!(tracker.settings(), Settings::default());
        assert!(tracker.store().get_raw(PROGRESS_KEY).is_some());
        assert_eq!(tracker.store().get_raw(COLLECTION_KEY), Some("[]"));

        let later = Timestamp::from_millis(9_000)?;
        let again = tracker.initialize(later, &mut rng);
        assert_eq!(again.id, user.id);
        assert_eq!(again.created_at, now);
        assert_eq!(again.last_visit, later);
        Ok(())
    }

    #[test]
    fn test_initialize_keeps_progress() -> Fallible<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        tracker.record_view("a");
        tracker.initialize(Timestamp::from_millis(0)?, &mut rng);
        assert_eq!(tracker.progress().cards_viewed, vec!["a".to_string()]);
        Ok(())
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let settings = Settings {
            theme: Theme::Dark,
            animations: false,
        };
        assert!(tracker.set_settings(&settings));
        assert_eq!(tracker.settings(), settings);
    }

    #[test]
    fn test_daily_pin_expires() -> Fallible<()> {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let today = Date::parse("2025-06-15")?;
        assert_eq!(tracker.pinned_daily_card(today), None);
        tracker.pin_daily_card(today, "xss");
        assert_eq!(tracker.pinned_daily_card(today), Some("xss".to_string()));
        let tomorrow = Date::parse("2025-06-16")?;
        assert_eq!(tracker.pinned_daily_card(tomorrow), None);
        Ok(())
    }
}
