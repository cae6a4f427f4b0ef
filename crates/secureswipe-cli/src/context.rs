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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::PathBuf;

use secureswipe_core::config::Config;
use secureswipe_core::error::Fallible;
use secureswipe_core::error::fail;
use secureswipe_core::library::CardLibrary;
use secureswipe_core::progress::ProgressTracker;

use crate::db::SqliteStore;
use crate::deck::load_library;

const DATABASE_FILE: &str = "secureswipe.db";
const CONFIG_FILE: &str = "secureswipe.toml";

/// Where a command finds its data.
pub struct Context {
    pub directory: PathBuf,
    pub cards_path: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn new(data: Option<String>, cards: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match data {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config_path = directory.join(CONFIG_FILE);
        let config = if config_path.exists() {
            log::debug!("Reading {}", config_path.display());
            let text = read_to_string(&config_path)?;
            Config::from_toml(&text).map_err(|e| e.with_context(CONFIG_FILE))?
        } else {
            Config::default()
        };

        let cards_path = match cards {
            Some(path) => PathBuf::from(path),
            None => directory.join("cards"),
        };

        Ok(Self {
            directory,
            cards_path,
            config,
        })
    }

    pub fn tracker(&self) -> Fallible<ProgressTracker<SqliteStore>> {
        let store = SqliteStore::open(&self.directory.join(DATABASE_FILE))?;
        Ok(ProgressTracker::new(store))
    }

    pub fn library(&self) -> Fallible<CardLibrary> {
        load_library(&self.cards_path)
    }
}
