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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use secureswipe_core::error::Fallible;
use secureswipe_core::progress::Statistics;
use secureswipe_core::types::date::Date;

use crate::context::Context;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(context: &Context, format: StatsFormat) -> Fallible<()> {
    let tracker = context.tracker()?;
    let stats = tracker.statistics(Date::today());
    println!("{}", render(&stats, format)?);
    Ok(())
}

fn render(stats: &Statistics, format: StatsFormat) -> Fallible<String> {
    match format {
        StatsFormat::Text => {
            let lines = [
                format!("Cards viewed:    {}", stats.total_viewed),
                format!("Correct:         {}", stats.total_correct),
                format!("Incorrect:       {}", stats.total_incorrect),
                format!("Success rate:    {}%", stats.success_rate),
                format!("Saved cards:     {}", stats.collection_size),
                format!("Daily streak:    {}", stats.daily_streak),
            ];
            Ok(lines.join("\n"))
        }
        StatsFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}
