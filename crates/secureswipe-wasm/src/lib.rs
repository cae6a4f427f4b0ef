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

//! Browser bindings. Every method takes the current time as milliseconds
//! since the epoch and returns its result as a JSON string.

pub mod game;
pub mod logger;
pub mod storage;

use secureswipe_core::config::Config;
use secureswipe_core::library::CardLibrary;
use secureswipe_core::library::ChallengeFilters;
use secureswipe_core::library::DeckOrder;
use secureswipe_core::profile::Settings;
use secureswipe_core::types::timestamp::Timestamp;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::storage::BrowserStore;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init();
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    Ok(serde_json::to_string(value)?)
}

fn millis(t: f64) -> i64 {
    t as i64
}

#[wasm_bindgen]
pub struct SwipeGame {
    game: Game<BrowserStore>,
}

#[wasm_bindgen]
impl SwipeGame {
    /// `cards_json` holds `{"cards": [...], "categories": [...]}`.
    /// `config_toml` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(cards_json: &str, config_toml: &str) -> Result<SwipeGame, JsError> {
        let library = CardLibrary::from_json(cards_json)?;
        let config = if config_toml.trim().is_empty() {
            Config::default()
        } else {
            Config::from_toml(config_toml)?
        };
        let now = Timestamp::from_millis(millis(js_sys::Date::now()))?;
        log::info!("Loaded {} cards", library.len());
        let game = Game::new(library, config, BrowserStore::open(), now);
        Ok(SwipeGame { game })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, t: f64) -> Result<String, JsError> {
        to_json(&self.game.pointer_down(x, y, millis(t))?)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, t: f64) -> Result<String, JsError> {
        to_json(&self.game.pointer_move(x, y, millis(t))?)
    }

    pub fn pointer_up(&mut self, t: f64) -> Result<String, JsError> {
        to_json(&self.game.pointer_up(millis(t))?)
    }

    pub fn pointer_leave(&mut self, t: f64) -> Result<String, JsError> {
        to_json(&self.game.pointer_leave(millis(t))?)
    }

    /// `direction` is `"left"` or `"right"`.
    pub fn swipe(&mut self, direction: &str, t: f64) -> Result<String, JsError> {
        to_json(&self.game.swipe(direction, millis(t))?)
    }

    pub fn settle(&mut self, t: f64) -> Result<String, JsError> {
        to_json(&self.game.settle(millis(t))?)
    }

    /// `order` is `"random"`, `"difficulty"` or `"category"`.
    pub fn play(&mut self, order: Option<String>, t: f64) -> Result<String, JsError> {
        let order = order.map(|o| o.parse::<DeckOrder>()).transpose()?;
        to_json(&self.game.play(order, millis(t))?)
    }

    pub fn challenge(
        &mut self,
        count: Option<u32>,
        category: Option<String>,
        difficulty: Option<u8>,
        t: f64,
    ) -> Result<String, JsError> {
        let filters = ChallengeFilters {
            category,
            difficulty,
        };
        let count = count.map(|c| c as usize);
        to_json(&self.game.challenge(count, &filters, millis(t))?)
    }

    pub fn daily(&mut self, t: f64) -> Result<String, JsError> {
        to_json(&self.game.daily(millis(t))?)
    }

    pub fn current_card(&self) -> Result<String, JsError> {
        to_json(&self.game.current_card())
    }

    pub fn toggle_saved(&mut self) -> Result<bool, JsError> {
        Ok(self.game.toggle_saved()?)
    }

    pub fn saved_cards(&self) -> Result<String, JsError> {
        to_json(&self.game.saved_cards())
    }

    pub fn statistics(&self, t: f64) -> Result<String, JsError> {
        to_json(&self.game.statistics(millis(t))?)
    }

    pub fn summary(&self) -> Result<String, JsError> {
        to_json(&self.game.session().summary())
    }

    pub fn settings(&self) -> Result<String, JsError> {
        to_json(&self.game.settings())
    }

    pub fn set_settings(&mut self, settings_json: &str) -> Result<bool, JsError> {
        let settings: Settings = serde_json::from_str(settings_json)?;
        Ok(self.game.set_settings(&settings))
    }

    pub fn reset(&mut self, t: f64) -> Result<String, JsError> {
        to_json(&self.game.reset(millis(t))?)
    }
}
