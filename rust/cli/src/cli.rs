//! Command-line surface, parsed with clap derive.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "parlor",
    version,
    about = "Parlor card-game engines: blackjack and Texas Hold'em"
)]
pub struct ParlorCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand and show every seat's cards
    Deal {
        #[arg(long, value_enum, default_value_t = GameKind::Holdem)]
        game: GameKind,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        seats: Option<usize>,
    },
    /// Play AI-only hands or rounds and optionally record them as JSONL
    Sim {
        #[arg(long, value_enum, default_value_t = GameKind::Holdem)]
        game: GameKind,
        #[arg(long, default_value_t = 10)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        ai: Option<String>,
        #[arg(long)]
        seats: Option<usize>,
    },
    /// Estimate hold'em win probability by sampling
    Equity {
        #[arg(long)]
        hand: String,
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Compare two poker hands of five to seven cards
    Compare {
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    Holdem,
    Blackjack,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Holdem => "holdem",
            GameKind::Blackjack => "blackjack",
        }
    }
}
