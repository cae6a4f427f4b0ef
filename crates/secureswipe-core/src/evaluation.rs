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

use crate::gesture::Direction;
use crate::types::card::Card;
use crate::types::card::DEFAULT_DIFFICULTY;
use crate::types::card_type::CardType;

/// Points for a correct answer at difficulty 1.
const BASE_POINTS: u32 = 100;

/// Answers faster than this earn a bonus.
const FAST_ANSWER_MS: u64 = 3_000;

/// Answers slower than this are penalized.
const SLOW_ANSWER_MS: u64 = 10_000;

const FAST_FACTOR: f64 = 1.5;
const SLOW_FACTOR: f64 = 0.8;

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct FeedbackMessage {
    pub title: String,
    pub message: String,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub is_correct: bool,
    pub feedback: FeedbackMessage,
    pub score: u32,
}

/// Left rejects ("this is bad"), right accepts ("this is good").
pub fn evaluate(card_type: CardType, direction: Direction) -> bool {
    matches!(
        (card_type, direction),
        (CardType::Vulnerability, Direction::Left) | (CardType::GoodPractice, Direction::Right)
    )
}

pub fn feedback(card: &Card, is_correct: bool) -> FeedbackMessage {
    let (title, message) = match (card.card_type, is_correct) {
        (CardType::Vulnerability, true) => (
            "You correctly identified a vulnerability",
            format!(
                "Correct! {} is a security vulnerability. {}",
                card.title, card.explanation
            ),
        ),
        (CardType::Vulnerability, false) => (
            "You mistook a vulnerability for a good practice",
            format!(
                "Incorrect. {} is actually a vulnerability. {}",
                card.title, card.explanation
            ),
        ),
        (CardType::GoodPractice, true) => (
            "You correctly identified a good practice",
            format!(
                "Correct! {} is a good security practice. {}",
                card.title, card.explanation
            ),
        ),
        (CardType::GoodPractice, false) => (
            "You mistook a good practice for a vulnerability",
            format!(
                "Incorrect. {} is actually a good practice. {}",
                card.title, card.explanation
            ),
        ),
    };
    FeedbackMessage {
        title: title.to_string(),
        message: message.trim_end().to_string(),
    }
}

/// Zero for a wrong answer; otherwise `100 * difficulty`, scaled up for
/// fast answers and down for slow ones. Both boundaries get the neutral
/// factor.
pub fn score(card: &Card, is_correct: bool, response_time_ms: u64) -> u32 {
    if !is_correct {
        return 0;
    }
    let difficulty = if card.difficulty == 0 {
        DEFAULT_DIFFICULTY
    } else {
        card.difficulty
    };
    let base = BASE_POINTS * difficulty as u32;
    let factor = if response_time_ms < FAST_ANSWER_MS {
        FAST_FACTOR
    } else if response_time_ms > SLOW_ANSWER_MS {
        SLOW_FACTOR
    } else {
        1.0
    };
    (base as f64 * factor).round() as u32
}

pub fn judge(card: &Card, direction: Direction, response_time_ms: u64) -> EvaluationResult {
    let is_correct = evaluate(card.card_type, direction);
    EvaluationResult {
        is_correct,
        feedback: feedback(card, is_correct),
        score: score(card, is_correct, response_time_ms),
    }
}
