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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::thread::sleep;
use std::time::Duration;

use secureswipe_core::error::Fallible;
use secureswipe_core::gesture::Direction;
use secureswipe_core::gesture::Effect;
use secureswipe_core::gesture::GestureEvent;
use secureswipe_core::gesture::Point;
use secureswipe_core::library::CardProvider;
use secureswipe_core::library::ChallengeFilters;
use secureswipe_core::library::DeckOrder;
use secureswipe_core::session::Mode;
use secureswipe_core::session::Session;
use secureswipe_core::session::Step;
use secureswipe_core::store::Store;
use secureswipe_core::types::card::Card;
use secureswipe_core::types::date::Date;
use secureswipe_core::types::timestamp::Timestamp;

use crate::context::Context;

#[derive(Debug, PartialEq)]
pub enum Input {
    Swipe(Direction),
    /// Replay a horizontal drag of this many pixels.
    Drag(f64),
    /// Save or unsave the card.
    Save,
    Quit,
}

pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "l" | "left" => Some(Input::Swipe(Direction::Left)),
        "r" | "right" => Some(Input::Swipe(Direction::Right)),
        "s" | "save" => Some(Input::Save),
        "q" | "quit" => Some(Input::Quit),
        other => other.parse::<f64>().ok().filter(|dx| dx.is_finite()).map(Input::Drag),
    }
}

pub fn play(context: &Context, order: Option<DeckOrder>) -> Fallible<()> {
    let library = context.library()?;
    let order = order.unwrap_or(context.config.deck.order);
    let deck = library.ordered_deck(order, &mut rand::thread_rng());
    play_deck(context, deck, Mode::Practice)
}

pub fn challenge(
    context: &Context,
    count: Option<usize>,
    category: Option<String>,
    difficulty: Option<u8>,
) -> Fallible<()> {
    let library = context.library()?;
    let count = count.unwrap_or(context.config.deck.challenge_size);
    let filters = ChallengeFilters {
        category,
        difficulty,
    };
    let deck = library.challenge_deck(count, &filters, &mut rand::thread_rng());
    if deck.is_empty() {
        println!("No cards match those filters.");
        return Ok(());
    }
    play_deck(context, deck, Mode::Challenge)
}

pub fn daily(context: &Context) -> Fallible<()> {
    let today = Date::today();
    let mut tracker = context.tracker()?;
    tracker.initialize(Timestamp::now(), &mut rand::thread_rng());
    if tracker.has_completed_today(today) {
        println!(
            "You already completed today's card. Streak: {} day(s).",
            tracker.compute_streak(today)
        );
        return Ok(());
    }
    let library = context.library()?;
    let pinned = tracker
        .pinned_daily_card(today)
        .and_then(|id| library.card(&id).cloned());
    let card = match pinned {
        Some(card) => card,
        None => {
            let viewed = tracker.progress().cards_viewed;
            let Some(card) = library.daily_card(&viewed, &mut rand::thread_rng()) else {
                println!("There are no cards.");
                return Ok(());
            };
            tracker.pin_daily_card(today, &card.id);
            card
        }
    };
    let mut session = Session::new(
        tracker,
        vec![card],
        context.config.gesture.clone(),
        Mode::Daily,
        Timestamp::now(),
    );
    run(&mut session, &mut stdin().lock(), &mut stdout().lock())?;
    println!(
        "Daily streak: {} day(s).",
        session.tracker().compute_streak(today)
    );
    Ok(())
}

fn play_deck(context: &Context, deck: Vec<Card>, mode: Mode) -> Fallible<()> {
    let mut tracker = context.tracker()?;
    tracker.initialize(Timestamp::now(), &mut rand::thread_rng());
    let mut session = Session::new(
        tracker,
        deck,
        context.config.gesture.clone(),
        mode,
        Timestamp::now(),
    );
    run(&mut session, &mut stdin().lock(), &mut stdout().lock())?;
    let summary = session.summary();
    println!(
        "Answered {}, {} correct, {} points.",
        summary.answered, summary.correct, summary.score
    );
    Ok(())
}

/// Drive a session from line-oriented input until the deck is exhausted,
/// the player quits, or input ends.
pub fn run<S: Store>(
    session: &mut Session<S>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Fallible<()> {
    while let Some(card) = session.current_card().cloned() {
        let position = session.engine().active_index().unwrap_or(0) + 1;
        let total = session.engine().len();
        let saved = if session.tracker().in_collection(&card.id) {
            " [saved]"
        } else {
            ""
        };
        writeln!(out)?;
        writeln!(
            out,
            "({position}/{total}) {} [{}, difficulty {}]{saved}",
            card.title, card.category, card.difficulty
        )?;
        writeln!(
            out,
            "l: vulnerability, r: good practice, <number>: drag, s: save, q: quit"
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let Some(command) = parse_input(&line) else {
            writeln!(out, "Unrecognized input: {}", line.trim())?;
            continue;
        };
        let steps = match command {
            Input::Quit => break,
            Input::Save => {
                let tracker = session.tracker_mut();
                if tracker.add_to_collection(&card.id) {
                    writeln!(out, "Saved to your collection.")?;
                } else {
                    tracker.remove_from_collection(&card.id);
                    writeln!(out, "Removed from your collection.")?;
                }
                continue;
            }
            Input::Swipe(direction) => {
                vec![session.handle(GestureEvent::Swipe(direction), Timestamp::now())]
            }
            Input::Drag(dx) => {
                let start = GestureEvent::DragStart(Point::default());
                let movement = GestureEvent::DragMove(Point::new(dx, 0.0));
                vec![
                    session.handle(start, Timestamp::now()),
                    session.handle(movement, Timestamp::now()),
                    session.handle(GestureEvent::DragEnd, Timestamp::now()),
                ]
            }
        };
        for step in steps {
            report(session, step, out)?;
        }
    }
    Ok(())
}

fn report<S: Store>(session: &mut Session<S>, step: Step, out: &mut impl Write) -> Fallible<()> {
    if let Some(answer) = &step.answer {
        writeln!(out, "{}", answer.result.feedback.title)?;
        writeln!(out, "{}", answer.result.feedback.message)?;
        if session.mode() == Mode::Challenge {
            writeln!(
                out,
                "+{} points ({:.1}s)",
                answer.result.score,
                answer.response_time_ms as f64 / 1000.0
            )?;
        }
    }
    if step.daily_completed {
        writeln!(out, "Daily card completed.")?;
    }
    for effect in step.effects {
        match effect {
            Effect::SnapBack => {
                writeln!(
                    out,
                    "Not far enough: drag more than {} to decide.",
                    session.engine().config().threshold
                )?;
            }
            Effect::FlyOut {
                settle_after_ms, ..
            } => {
                sleep(Duration::from_millis(settle_after_ms));
                let settled = session.handle(GestureEvent::SettleElapsed, Timestamp::now());
                if settled.effects.contains(&Effect::DeckExhausted) {
                    writeln!(out)?;
                    writeln!(out, "You have completed all the cards!")?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
