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

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::date::Date;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from milliseconds since the Unix epoch, the unit
    /// browsers use for event times.
    pub fn from_millis(millis: i64) -> Fallible<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| ErrorReport::new(format!("timestamp out of range: {millis}")))
    }

    pub fn as_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Milliseconds elapsed since `earlier`, clamped at zero.
    pub fn millis_since(self, earlier: Timestamp) -> u64 {
        let delta = self.as_millis() - earlier.as_millis();
        delta.max(0) as u64
    }

    /// The UTC calendar date of this timestamp.
    pub fn date(self) -> Date {
        Date::new(self.0.date_naive())
    }

    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339()
    }
}
