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

use std::fs::read_to_string;
use std::path::Path;
use std::time::Instant;

use secureswipe_core::error::ErrorReport;
use secureswipe_core::error::Fallible;
use secureswipe_core::error::fail;
use secureswipe_core::library::CardLibrary;
use walkdir::WalkDir;

/// Load cards from a JSON file, or from every `*.json` file under a
/// directory.
pub fn load_library(path: &Path) -> Fallible<CardLibrary> {
    if !path.exists() {
        return fail(format!("cards not found at {}.", path.display()));
    }
    log::debug!("Loading cards...");
    let start = Instant::now();
    let library = if path.is_dir() {
        let mut library = CardLibrary::default();
        let mut files = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| ErrorReport::new(e.to_string()))?;
            let file = entry.path();
            if file.is_file() && file.extension().is_some_and(|ext| ext == "json") {
                files.push(file.to_path_buf());
            }
        }
        files.sort();
        for file in files {
            let content = read_to_string(&file)?;
            let part = CardLibrary::from_json(&content)
                .map_err(|e| e.with_context(&file.display().to_string()))?;
            library.merge(part);
        }
        library
    } else {
        let content = read_to_string(path)?;
        CardLibrary::from_json(&content)?
    };
    let duration = start.elapsed().as_millis();
    log::debug!("Loaded {} cards in {duration}ms.", library.len());
    Ok(library)
}
