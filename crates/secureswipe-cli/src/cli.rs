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

use clap::Parser;
use clap::Subcommand;
use secureswipe_core::error::Fallible;
use secureswipe_core::library::DeckOrder;

use crate::cmd::check::check_cards;
use crate::cmd::collection;
use crate::cmd::play::challenge;
use crate::cmd::play::daily;
use crate::cmd::play::play;
use crate::cmd::reset::reset;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::context::Context;

#[derive(Parser)]
#[command(version, about = "Learn to tell vulnerabilities from good practices.", long_about = None)]
struct Cli {
    /// Directory holding the database and configuration. Defaults to the
    /// current directory.
    #[arg(long, global = true)]
    data: Option<String>,
    /// Card file, or directory of card files. Defaults to `<data>/cards`.
    #[arg(long, global = true)]
    cards: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Swipe through the whole deck.
    Play {
        /// Deck order: random, difficulty or category.
        #[arg(long)]
        order: Option<DeckOrder>,
    },
    /// Play a scored round against the clock.
    Challenge {
        /// Number of cards in the round.
        #[arg(long)]
        count: Option<usize>,
        /// Only cards in this category.
        #[arg(long)]
        category: Option<String>,
        /// Only cards of this difficulty.
        #[arg(long)]
        difficulty: Option<u8>,
    },
    /// Play today's card.
    Daily,
    /// Print progress statistics.
    Stats {
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Manage saved cards.
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Check the cards for mistakes.
    Check,
    /// Forget all progress.
    Reset,
}

#[derive(Subcommand)]
enum CollectionAction {
    /// Save a card.
    Add { id: String },
    /// Remove a saved card.
    Remove { id: String },
    /// List saved cards.
    List,
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let context = Context::new(cli.data, cli.cards)?;
    match cli.command {
        Command::Play { order } => play(&context, order),
        Command::Challenge {
            count,
            category,
            difficulty,
        } => challenge(&context, count, category, difficulty),
        Command::Daily => daily(&context),
        Command::Stats { format } => print_stats(&context, format),
        Command::Collection { action } => match action {
            CollectionAction::Add { id } => collection::add(&context, &id),
            CollectionAction::Remove { id } => collection::remove(&context, &id),
            CollectionAction::List => collection::list(&context),
        },
        Command::Check => check_cards(&context),
        Command::Reset => reset(&context),
    }
}
