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

use crate::types::date::Date;

/// The number of consecutive days, ending today or yesterday, on which the
/// daily card was completed.
///
/// A streak survives until the end of the day after its last completion:
/// if the most recent completion is older than yesterday the streak is
/// zero, however long it used to be. Duplicate dates count once.
pub fn compute_streak(completions: &[Date], today: Date) -> u32 {
    let mut dates: Vec<Date> = completions.to_vec();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let Some(latest) = dates.first() else {
        return 0;
    };
    if today.days_since(*latest) > 1 {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2) {
        if pair[0].days_since(pair[1]) == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Parse stored completion dates, skipping entries that are not dates.
pub fn parse_completions(raw: &[String]) -> Vec<Date> {
    raw.iter()
        .filter_map(|s| match Date::parse(s) {
            Ok(date) => Some(date),
            Err(e) => {
                log::warn!("Skipping daily completion {s:?}: {e}");
                None
            }
        })
        .collect()
}
