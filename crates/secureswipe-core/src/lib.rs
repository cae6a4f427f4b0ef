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

//! The game engine behind secureswipe: players judge security cards by
//! swiping left ("this is a vulnerability") or right ("this is a good
//! practice").
//!
//! [`gesture`] turns pointer drags into decisions, [`evaluation`] judges and
//! scores them, and [`progress`] keeps the player's history and daily
//! streak in a [`store::Store`]. [`session`] ties the three together.

pub mod collection;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod gesture;
pub mod library;
pub mod profile;
pub mod progress;
pub mod session;
pub mod store;
pub mod streak;
pub mod types;
