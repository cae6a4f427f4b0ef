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

use serde::Serialize;

use crate::config::GestureConfig;
use crate::evaluation::EvaluationResult;
use crate::evaluation::judge;
use crate::gesture::Effect;
use crate::gesture::GestureEngine;
use crate::gesture::GestureEvent;
use crate::gesture::SwipeDecision;
use crate::progress::ProgressTracker;
use crate::store::Store;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Play through a deck.
    Practice,
    /// A timed run whose scores add up.
    Challenge,
    /// The card of the day; answering it extends the streak.
    Daily,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub decision: SwipeDecision,
    pub result: EvaluationResult,
    pub response_time_ms: u64,
}

/// What one input event produced.
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub effects: Vec<Effect>,
    pub answer: Option<Answer>,
    /// Set in daily mode when this step registered today's completion.
    pub daily_completed: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Summary {
    pub answered: usize,
    pub correct: usize,
    pub score: u32,
}

/// A game in progress: gesture input in, judged and recorded answers out.
pub struct Session<S: Store> {
    engine: GestureEngine,
    tracker: ProgressTracker<S>,
    mode: Mode,
    /// When the active card was shown.
    shown_at: Option<Timestamp>,
    answers: Vec<Answer>,
}

impl<S: Store> Session<S> {
    pub fn new(
        tracker: ProgressTracker<S>,
        deck: Vec<Card>,
        config: GestureConfig,
        mode: Mode,
        now: Timestamp,
    ) -> Self {
        let mut session = Self {
            engine: GestureEngine::new(Vec::new(), config),
            tracker,
            mode,
            shown_at: None,
            answers: Vec::new(),
        };
        session.restart(deck, now);
        session
    }

    /// Start a new round with a new deck. The summary covers only the new
    /// round; recorded progress is untouched.
    pub fn restart(&mut self, deck: Vec<Card>, now: Timestamp) -> Step {
        let effects = self.engine.reset(deck);
        self.shown_at = None;
        self.answers.clear();
        self.apply(effects, now)
    }

    /// Switch to another mode and deck.
    pub fn start(&mut self, mode: Mode, deck: Vec<Card>, now: Timestamp) -> Step {
        self.mode = mode;
        self.restart(deck, now)
    }

    pub fn handle(&mut self, event: GestureEvent, now: Timestamp) -> Step {
        let effects = self.engine.handle(event);
        self.apply(effects, now)
    }

    fn apply(&mut self, effects: Vec<Effect>, now: Timestamp) -> Step {
        let mut step = Step::default();
        for effect in &effects {
            match effect {
                Effect::CardActivated { card_id, .. } => {
                    self.tracker.record_view(card_id);
                    self.shown_at = Some(now);
                }
                Effect::Decided(decision) => {
                    let Some(card) = self.engine.card(decision.card_index) else {
                        continue;
                    };
                    let response_time_ms = match self.shown_at {
                        Some(shown_at) => now.millis_since(shown_at),
                        None => 0,
                    };
                    let result = judge(card, decision.direction, response_time_ms);
                    if result.is_correct {
                        self.tracker.record_correct(&decision.card_id);
                    } else {
                        self.tracker.record_incorrect(&decision.card_id);
                    }
                    if self.mode == Mode::Daily {
                        step.daily_completed = self.tracker.register_daily_completion(now.date());
                    }
                    let answer = Answer {
                        decision: decision.clone(),
                        result,
                        response_time_ms,
                    };
                    self.answers.push(answer.clone());
                    step.answer = Some(answer);
                }
                _ => {}
            }
        }
        step.effects = effects;
        step
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.engine.active_card()
    }

    pub fn tracker(&self) -> &ProgressTracker<S> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ProgressTracker<S> {
        &mut self.tracker
    }

    pub fn into_tracker(self) -> ProgressTracker<S> {
        self.tracker
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn summary(&self) -> Summary {
        Summary {
            answered: self.answers.len(),
            correct: self.answers.iter().filter(|a| a.result.is_correct).count(),
            score: self.answers.iter().map(|a| a.result.score).sum(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::gesture::Direction;
    use crate::gesture::Point;
    use crate::store::MemoryStore;
    use crate::types::card_type::CardType;
    use crate::types::date::Date;

    fn deck() -> Vec<Card> {
        vec![
            Card::new("A", CardType::Vulnerability, "web", 2, "Open redirect", ""),
            Card::new("B", CardType::GoodPractice, "web", 1, "Input validation", ""),
        ]
    }

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn drag(session: &mut Session<MemoryStore>, dx: f64, now: Timestamp) -> Step {
        session.handle(GestureEvent::DragStart(Point::new(0.0, 0.0)), now);
        session.handle(GestureEvent::DragMove(Point::new(dx, 0.0)), now);
        session.handle(GestureEvent::DragEnd, now)
    }

    #[test]
    fn test_end_to_end() -> Fallible<()> {
        let start = 1_750_000_000_000;
        let tracker = ProgressTracker::new(MemoryStore::new());
        let mut session = Session::new(
            tracker,
            deck(),
            GestureConfig::default(),
            Mode::Practice,
            at(start),
        );

        let step = drag(&mut session, -200.0, at(start + 2_000));
        let answer = step.answer.expect("no answer");
        assert!(answer.result.is_correct);
        assert_eq!(answer.result.score, 300);
        assert_eq!(answer.response_time_ms, 2_000);

        session.handle(GestureEvent::SettleElapsed, at(start + 2_500));
        assert_eq!(session.current_card().map(|c| c.id.as_str()), Some("B"));

        let step = drag(&mut session, -200.0, at(start + 4_000));
        let answer = step.answer.expect("no answer");
        assert!(!answer.result.is_correct);
        assert_eq!(answer.result.score, 0);

        let step = session.handle(GestureEvent::SettleElapsed, at(start + 4_500));
        assert_eq!(step.effects, vec![Effect::DeckExhausted]);
        assert!(session.is_finished());

        let stats = session.tracker().statistics(at(start).date());
        assert_eq!(stats.total_viewed, 2);
        assert_eq!(stats.total_correct, 1);
        assert_eq!(stats.total_incorrect, 1);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(
            session.summary(),
            Summary {
                answered: 2,
                correct: 1,
                score: 300,
            }
        );
        Ok(())
    }

    #[test]
    fn test_snap_back_records_nothing() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        let mut session = Session::new(tracker, deck(), GestureConfig::default(), Mode::Practice, at(0));
        let step = drag(&mut session, 150.0, at(100));
        assert!(step.answer.is_none());
        assert!(step.effects.contains(&Effect::SnapBack));
        assert_eq!(session.tracker().progress().cards_viewed, vec!["A".to_string()]);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_response_time_counts_from_card_shown() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        let mut session = Session::new(tracker, deck(), GestureConfig::default(), Mode::Challenge, at(0));
        session.handle(GestureEvent::Swipe(Direction::Left), at(1_000));
        session.handle(GestureEvent::SettleElapsed, at(1_500));
        let step = session.handle(GestureEvent::Swipe(Direction::Right), at(13_000));
        let answer = step.answer.expect("no answer");
        assert_eq!(answer.response_time_ms, 11_500);
        assert_eq!(answer.result.score, 80);
        assert_eq!(session.summary().score, 300 + 80);
    }

    #[test]
    fn test_daily_mode_registers_completion() -> Fallible<()> {
        let now = Timestamp::from_millis(1_750_000_000_000)?;
        let tracker = ProgressTracker::new(MemoryStore::new());
        let card = deck().remove(1);
        let mut session = Session::new(tracker, vec![card], GestureConfig::default(), Mode::Daily, now);
        let step = session.handle(GestureEvent::Swipe(Direction::Right), now);
        assert!(step.daily_completed);
        let today: Date = now.date();
        assert!(session.tracker().has_completed_today(today));
        assert_eq!(session.tracker().compute_streak(today), 1);
        Ok(())
    }

    #[test]
    fn test_restart_after_exhaustion() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        let mut session = Session::new(tracker, Vec::new(), GestureConfig::default(), Mode::Practice, at(0));
        assert!(session.is_finished());
        let step = session.restart(deck(), at(10));
        assert!(matches!(step.effects[0], Effect::CardActivated { card_index: 0, .. }));
        assert!(!session.is_finished());
    }

    #[test]
    fn test_start_switches_mode() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        let mut session = Session::new(tracker, deck(), GestureConfig::default(), Mode::Practice, at(0));
        let card = deck().remove(1);
        session.start(Mode::Daily, vec![card], at(10));
        assert_eq!(session.mode(), Mode::Daily);
        assert_eq!(session.engine().len(), 1);
        let step = session.handle(GestureEvent::Swipe(Direction::Right), at(20));
        assert!(step.daily_completed);
    }

    #[test]
    fn test_summary_covers_current_round() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        let mut session = Session::new(tracker, deck(), GestureConfig::default(), Mode::Practice, at(0));
        let step = session.handle(GestureEvent::Swipe(Direction::Left), at(1_000));
        assert_eq!(step.answer.map(|a| a.result.score), Some(300));

        session.start(Mode::Challenge, deck(), at(2_000));
        assert_eq!(session.summary(), Summary::default());
        assert!(session.answers().is_empty());
        assert_eq!(session.tracker().progress().correct_answers, vec!["A".to_string()]);

        session.handle(GestureEvent::Swipe(Direction::Left), at(3_000));
        assert_eq!(
            session.summary(),
            Summary {
                answered: 1,
                correct: 1,
                score: 300,
            }
        );
    }
}
