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

use rand::thread_rng;
use secureswipe_core::config::Config;
use secureswipe_core::error::Fallible;
use secureswipe_core::error::fail;
use secureswipe_core::gesture::Direction;
use secureswipe_core::gesture::GestureEvent;
use secureswipe_core::gesture::Point;
use secureswipe_core::library::CardLibrary;
use secureswipe_core::library::CardProvider;
use secureswipe_core::library::ChallengeFilters;
use secureswipe_core::library::DeckOrder;
use secureswipe_core::profile::Settings;
use secureswipe_core::progress::ProgressTracker;
use secureswipe_core::progress::Statistics;
use secureswipe_core::session::Mode;
use secureswipe_core::session::Session;
use secureswipe_core::session::Step;
use secureswipe_core::store::Store;
use secureswipe_core::types::card::Card;
use secureswipe_core::types::timestamp::Timestamp;

/// The game as the page sees it. Times are milliseconds since the epoch,
/// as `Date.now()` reports them.
pub struct Game<S: Store> {
    library: CardLibrary,
    config: Config,
    session: Session<S>,
}

impl<S: Store> Game<S> {
    pub fn new(library: CardLibrary, config: Config, store: S, now: Timestamp) -> Self {
        let mut tracker = ProgressTracker::new(store);
        tracker.initialize(now, &mut thread_rng());
        let deck = library.ordered_deck(config.deck.order, &mut thread_rng());
        let session = Session::new(tracker, deck, config.gesture.clone(), Mode::Practice, now);
        Self {
            library,
            config,
            session,
        }
    }

    fn handle(&mut self, event: GestureEvent, t: i64) -> Fallible<Step> {
        let now = Timestamp::from_millis(t)?;
        Ok(self.session.handle(event, now))
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, t: i64) -> Fallible<Step> {
        self.handle(GestureEvent::DragStart(Point::new(x, y)), t)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, t: i64) -> Fallible<Step> {
        self.handle(GestureEvent::DragMove(Point::new(x, y)), t)
    }

    pub fn pointer_up(&mut self, t: i64) -> Fallible<Step> {
        self.handle(GestureEvent::DragEnd, t)
    }

    pub fn pointer_leave(&mut self, t: i64) -> Fallible<Step> {
        self.handle(GestureEvent::PointerLeave, t)
    }

    pub fn swipe(&mut self, direction: &str, t: i64) -> Fallible<Step> {
        let direction = match direction {
            "left" => Direction::Left,
            "right" => Direction::Right,
            other => return fail(format!("invalid direction: {other}")),
        };
        self.handle(GestureEvent::Swipe(direction), t)
    }

    /// The page calls this once the fly-out animation has finished.
    pub fn settle(&mut self, t: i64) -> Fallible<Step> {
        self.handle(GestureEvent::SettleElapsed, t)
    }

    pub fn play(&mut self, order: Option<DeckOrder>, t: i64) -> Fallible<Step> {
        let order = order.unwrap_or(self.config.deck.order);
        let deck = self.library.ordered_deck(order, &mut thread_rng());
        Ok(self.session.start(Mode::Practice, deck, Timestamp::from_millis(t)?))
    }

    pub fn challenge(
        &mut self,
        count: Option<usize>,
        filters: &ChallengeFilters,
        t: i64,
    ) -> Fallible<Step> {
        let count = count.unwrap_or(self.config.deck.challenge_size);
        let deck = self.library.challenge_deck(count, filters, &mut thread_rng());
        Ok(self.session.start(Mode::Challenge, deck, Timestamp::from_millis(t)?))
    }

    /// Start today's card. The deck is empty when it was already answered.
    pub fn daily(&mut self, t: i64) -> Fallible<Step> {
        let now = Timestamp::from_millis(t)?;
        let today = now.date();
        let tracker = self.session.tracker_mut();
        let deck: Vec<Card> = if tracker.has_completed_today(today) {
            Vec::new()
        } else {
            let pinned = tracker
                .pinned_daily_card(today)
                .and_then(|id| self.library.card(&id).cloned());
            let card = match pinned {
                Some(card) => Some(card),
                None => {
                    let viewed = tracker.progress().cards_viewed;
                    let card = self.library.daily_card(&viewed, &mut thread_rng());
                    if let Some(card) = &card {
                        tracker.pin_daily_card(today, &card.id);
                    }
                    card
                }
            };
            card.into_iter().collect()
        };
        Ok(self.session.start(Mode::Daily, deck, now))
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.session.current_card()
    }

    /// Save the current card, or unsave it if already saved. Returns
    /// whether it is now saved.
    pub fn toggle_saved(&mut self) -> Fallible<bool> {
        let Some(id) = self.session.current_card().map(|c| c.id.clone()) else {
            return fail("no card is showing.");
        };
        let tracker = self.session.tracker_mut();
        if tracker.in_collection(&id) {
            tracker.remove_from_collection(&id);
            Ok(false)
        } else {
            tracker.add_to_collection(&id);
            Ok(true)
        }
    }

    pub fn saved_cards(&self) -> Vec<&Card> {
        let collection = self.session.tracker().collection();
        self.library.collection_cards(collection.ids())
    }

    pub fn statistics(&self, t: i64) -> Fallible<Statistics> {
        let today = Timestamp::from_millis(t)?.date();
        Ok(self.session.tracker().statistics(today))
    }

    pub fn settings(&self) -> Settings {
        self.session.tracker().settings()
    }

    pub fn set_settings(&mut self, settings: &Settings) -> bool {
        self.session.tracker_mut().set_settings(settings)
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Forget all progress and start a fresh profile.
    pub fn reset(&mut self, t: i64) -> Fallible<Step> {
        let now = Timestamp::from_millis(t)?;
        let tracker = self.session.tracker_mut();
        tracker.reset();
        tracker.initialize(now, &mut thread_rng());
        let deck = self.library.ordered_deck(self.config.deck.order, &mut thread_rng());
        Ok(self.session.start(Mode::Practice, deck, now))
    }
}
