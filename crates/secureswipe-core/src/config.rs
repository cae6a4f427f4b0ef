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

use crate::error::Fallible;
use crate::error::fail;
use crate::library::DeckOrder;

/// User-authored settings, read from `secureswipe.toml`.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub gesture: GestureConfig,
    pub deck: DeckConfig,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Horizontal distance a drag must strictly exceed to count as a swipe.
    pub threshold: f64,
    /// Degrees of rotation per unit of horizontal offset.
    pub rotation_per_px: f64,
    /// Delay between a swipe decision and the next card becoming active.
    pub settle_delay_ms: u64,
}

impl GestureConfig {
    /// The threshold must be finite and non-negative, the rotation finite.
    pub fn validate(&self) -> Fallible<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return fail(format!(
                "gesture.threshold must be a non-negative number, got {}",
                self.threshold
            ));
        }
        if !self.rotation_per_px.is_finite() {
            return fail(format!(
                "gesture.rotation_per_px must be a finite number, got {}",
                self.rotation_per_px
            ));
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: 150.0,
            rotation_per_px: 0.1,
            settle_delay_ms: 500,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    pub order: DeckOrder,
    pub challenge_size: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            order: DeckOrder::Random,
            challenge_size: 10,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(text)?;
        config.gesture.validate()?;
        Ok(config)
    }
}
