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

//! Turns a pointer drag on the top card of a deck into a left/right
//! decision.
//!
//! The engine never touches a UI. Each call to [`GestureEngine::handle`]
//! takes one input event and returns the [`Effect`]s a renderer should
//! apply. The only timer is the settle delay: after a swipe the engine asks
//! the host to deliver [`GestureEvent::SettleElapsed`] once the fly-out
//! animation is over.

pub mod feedback;

use serde::Deserialize;
use serde::Serialize;

use crate::config::GestureConfig;
use crate::gesture::feedback::Feedback;
use crate::gesture::feedback::Offset;
use crate::gesture::feedback::feedback;
use crate::types::card::Card;
use crate::types::card::CardId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GestureEvent {
    DragStart(Point),
    DragMove(Point),
    DragEnd,
    PointerLeave,
    /// Dismiss the active card without a drag, e.g. from a button.
    Swipe(Direction),
    /// The host's settle timer fired.
    SettleElapsed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Dragging,
    AnimatingOut(Direction),
    Exhausted,
}

/// The drag in progress, if any.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct DragState {
    pub start: Point,
    pub offset: Offset,
    pub is_active: bool,
}

/// Emitted once per completed swipe.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeDecision {
    pub card_id: CardId,
    pub direction: Direction,
    pub card_index: usize,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Effect {
    /// Redraw the dragged card.
    Feedback(Feedback),
    /// The drag fell short: return the card to rest.
    SnapBack,
    Decided(SwipeDecision),
    /// Animate the dismissed card off screen, then send
    /// [`GestureEvent::SettleElapsed`] after `settle_after_ms`.
    #[serde(rename_all = "camelCase")]
    FlyOut {
        direction: Direction,
        settle_after_ms: u64,
    },
    #[serde(rename_all = "camelCase")]
    CardActivated { card_index: usize, card_id: CardId },
    DeckExhausted,
}

pub struct GestureEngine {
    config: GestureConfig,
    cards: Vec<Card>,
    /// Index of the card that is, or was last, on top of the deck.
    cursor: usize,
    phase: Phase,
    drag: DragState,
}

impl GestureEngine {
    pub fn new(cards: Vec<Card>, config: GestureConfig) -> Self {
        let phase = if cards.is_empty() {
            Phase::Exhausted
        } else {
            Phase::Idle
        };
        Self {
            config,
            cards,
            cursor: 0,
            phase,
            drag: DragState::default(),
        }
    }

    /// Replace the deck. This is the only way out of `Exhausted`, and it
    /// abandons any fly-out in progress.
    pub fn reset(&mut self, cards: Vec<Card>) -> Vec<Effect> {
        self.cards = cards;
        self.cursor = 0;
        self.drag = DragState::default();
        if self.cards.is_empty() {
            self.phase = Phase::Exhausted;
            vec![Effect::DeckExhausted]
        } else {
            self.phase = Phase::Idle;
            vec![self.activated()]
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The card accepting input. `None` while a dismissed card is flying
    /// out and once the deck is exhausted.
    pub fn active_card(&self) -> Option<&Card> {
        match self.phase {
            Phase::Idle | Phase::Dragging => self.cards.get(self.cursor),
            Phase::AnimatingOut(_) | Phase::Exhausted => None,
        }
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_card().map(|_| self.cursor)
    }

    /// Cards not yet dismissed, the active one included.
    pub fn remaining(&self) -> usize {
        match self.phase {
            Phase::Idle | Phase::Dragging => self.cards.len() - self.cursor,
            Phase::AnimatingOut(_) => self.cards.len() - self.cursor - 1,
            Phase::Exhausted => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::Exhausted
    }

    pub fn handle(&mut self, event: GestureEvent) -> Vec<Effect> {
        match (self.phase, event) {
            (Phase::Idle | Phase::Dragging, GestureEvent::DragStart(point)) => {
                self.drag = DragState {
                    start: point,
                    offset: Offset::default(),
                    is_active: true,
                };
                self.phase = Phase::Dragging;
                Vec::new()
            }
            (Phase::Dragging, GestureEvent::DragMove(point)) => {
                self.drag.offset = Offset {
                    dx: point.x - self.drag.start.x,
                    dy: point.y - self.drag.start.y,
                };
                vec![Effect::Feedback(feedback(self.drag.offset, &self.config))]
            }
            (Phase::Dragging, GestureEvent::DragEnd | GestureEvent::PointerLeave) => {
                let dx = self.drag.offset.dx;
                if dx.abs() > self.config.threshold {
                    let direction = if dx > 0.0 {
                        Direction::Right
                    } else {
                        Direction::Left
                    };
                    self.dismiss(direction)
                } else {
                    self.drag = DragState::default();
                    self.phase = Phase::Idle;
                    vec![Effect::SnapBack, Effect::Feedback(Feedback::neutral())]
                }
            }
            (Phase::Idle | Phase::Dragging, GestureEvent::Swipe(direction)) => {
                self.dismiss(direction)
            }
            (Phase::AnimatingOut(_), GestureEvent::SettleElapsed) => self.advance(),
            (phase, event) => {
                log::debug!("Ignoring {event:?} in phase {phase:?}");
                Vec::new()
            }
        }
    }

    fn dismiss(&mut self, direction: Direction) -> Vec<Effect> {
        let card = &self.cards[self.cursor];
        let decision = SwipeDecision {
            card_id: card.id.clone(),
            direction,
            card_index: self.cursor,
        };
        log::debug!(
            "Card {} swiped {}",
            decision.card_id,
            decision.direction.as_str()
        );
        self.drag = DragState::default();
        self.phase = Phase::AnimatingOut(direction);
        vec![
            Effect::Decided(decision),
            Effect::FlyOut {
                direction,
                settle_after_ms: self.config.settle_delay_ms,
            },
        ]
    }

    fn advance(&mut self) -> Vec<Effect> {
        self.cursor += 1;
        if self.cursor < self.cards.len() {
            self.phase = Phase::Idle;
            vec![self.activated()]
        } else {
            log::debug!("Deck exhausted after {} cards", self.cards.len());
            self.cursor = self.cards.len();
            self.phase = Phase::Exhausted;
            vec![Effect::DeckExhausted]
        }
    }

    fn activated(&self) -> Effect {
        Effect::CardActivated {
            card_index: self.cursor,
            card_id: self.cards[self.cursor].id.clone(),
        }
    }
}
