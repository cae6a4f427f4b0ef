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

use secureswipe_core::error::Fallible;

use crate::context::Context;

/// Forget all progress, saved cards, settings and the user profile.
pub fn reset(context: &Context) -> Fallible<()> {
    let mut tracker = context.tracker()?;
    tracker.reset();
    println!("All progress has been reset.");
    Ok(())
}
