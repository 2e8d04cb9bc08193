//! Simulation command handler: AI-only hands or rounds, recorded as JSONL.
//!
//! Every hand gets its own deck seeded with `base_seed + hand_index`; AI
//! decisions draw from one generator seeded with `base_seed`, so a run is
//! reproducible from its seed.
//!
//! # Environment Variables
//!
//! - `PARLOR_SIM_BREAK_AFTER`: Stop after N hands and report an interruption (for testing)
//! - `PARLOR_SIM_SLEEP_MICROS`: Delay after every AI move, for watching a run

use crate::cli::GameKind;
use crate::config::{self, Config, MAX_SEATS, MIN_SEATS};
use crate::error::CliError;
use crate::ui;
use parlor_ai::equity::EquityAI;
use parlor_ai::{
    BlackjackOpponent, HoldemOpponent, create_blackjack_ai, create_holdem_ai, perform_ai_action,
    perform_blackjack_ai_action,
};
use parlor_engine::blackjack_table::{
    BlackjackConfig, BlackjackStage, BlackjackTable, standard_lineup,
};
use parlor_engine::deck::Deck;
use parlor_engine::errors::GameError;
use parlor_engine::game::{HoldemConfig, HoldemTable};
use parlor_engine::logger::{HandLogger, HandRecord, RoundRecord};
use parlor_engine::player::SeatConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound on AI moves within one hand before the run is abandoned.
const MAX_STEPS_PER_HAND: usize = 500;

struct RunControl {
    break_after: Option<u64>,
    delay: Option<Duration>,
}

impl RunControl {
    fn from_env() -> Self {
        let break_after = std::env::var("PARLOR_SIM_BREAK_AFTER")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());
        let delay = std::env::var("PARLOR_SIM_SLEEP_MICROS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_micros);
        Self { break_after, delay }
    }

    fn pause(&self) {
        if let Some(d) = self.delay {
            std::thread::sleep(d);
        }
    }

    fn should_stop(&self, completed: u64) -> bool {
        self.break_after == Some(completed)
    }
}

/// Handle the sim command.
///
/// # Arguments
///
/// * `game` - Which table to run
/// * `hands` - Hands (hold'em) or rounds (blackjack) to play
/// * `output` - JSONL file for the records; truncated if it exists
/// * `seed` - Base seed; falls back to the configured seed, then a random one
/// * `ai` - AI name for every seat
/// * `seats` - Seat count; falls back to the configured count
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    game: GameKind,
    hands: u64,
    output: Option<String>,
    seed: Option<u64>,
    ai: Option<String>,
    seats: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut logger = match output.as_deref() {
        Some(path) => match HandLogger::create(path) {
            Ok(logger) => logger,
            Err(e) => {
                return Err(CliError::Io(std::io::Error::new(
                    e.kind(),
                    format!("cannot open {}: {}", path, e),
                )));
            }
        },
        None => HandLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
    };
    let control = RunControl::from_env();
    info!(game = game.as_str(), hands, base_seed, "simulation started");

    match game {
        GameKind::Holdem => {
            let name = ai.unwrap_or_else(|| cfg.ai.clone());
            let Some(ai) = holdem_ai(&name, cfg.equity_samples) else {
                return Err(CliError::InvalidInput(format!("unknown hold'em AI: {}", name)));
            };
            let seats = seats.unwrap_or(cfg.seats);
            if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
                return Err(CliError::InvalidInput(format!(
                    "seats must be between {} and {}",
                    MIN_SEATS, MAX_SEATS
                )));
            }
            sim_holdem(
                &cfg,
                seats,
                hands,
                base_seed,
                ai.as_ref(),
                &mut logger,
                &control,
                out,
            )
        }
        GameKind::Blackjack => {
            let name = ai.unwrap_or_else(|| "threshold".to_string());
            let Some(ai) = create_blackjack_ai(&name) else {
                return Err(CliError::InvalidInput(format!("unknown blackjack AI: {}", name)));
            };
            sim_blackjack(
                seats.unwrap_or(cfg.seats),
                hands,
                base_seed,
                ai.as_ref(),
                &mut logger,
                &control,
                out,
                err,
            )
        }
    }
}

/// The equity AI takes its sample count from the configuration.
fn holdem_ai(name: &str, samples: usize) -> Option<Box<dyn HoldemOpponent>> {
    match name {
        "equity" => Some(Box::new(EquityAI::with_samples(samples))),
        other => create_holdem_ai(other),
    }
}

#[allow(clippy::too_many_arguments)]
fn sim_holdem(
    cfg: &Config,
    seats: usize,
    hands: u64,
    base_seed: u64,
    ai: &dyn HoldemOpponent,
    logger: &mut HandLogger,
    control: &RunControl,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let lineup = (0..seats)
        .map(|i| SeatConfig::ai(i, cfg.starting_chips))
        .collect();
    let table_cfg = HoldemConfig {
        small_blind: cfg.small_blind,
        big_blind: cfg.big_blind,
    };
    let mut table = HoldemTable::new(lineup, table_cfg)?;
    let mut rng = ChaCha20Rng::seed_from_u64(base_seed);
    let mut completed = 0u64;

    for i in 0..hands {
        if table.players.iter().filter(|p| p.chips > 0).count() < 2 {
            warn!(hand = i, "one seat holds every chip");
            writeln!(out, "Table closed: one seat holds every chip")?;
            break;
        }
        let hand_seed = base_seed.wrapping_add(i);
        table.start_hand(Deck::new_with_seed(hand_seed))?;
        let mut steps = 0;
        while table.is_hand_live() {
            if perform_ai_action(&mut table, ai, &mut rng)?.is_none() {
                return Err(GameError::NoActingSeat.into());
            }
            steps += 1;
            if steps > MAX_STEPS_PER_HAND {
                return Err(CliError::Interrupted(format!(
                    "hand {} did not finish after {} moves",
                    table.hand_id, MAX_STEPS_PER_HAND
                )));
            }
            control.pause();
        }

        let record = HandRecord::from_table(logger.next_id(), Some(hand_seed), &table);
        logger.write(&record)?;
        completed += 1;

        if control.should_stop(completed) {
            writeln!(out, "Interrupted: saved {}/{}", completed, hands)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                completed, hands
            )));
        }
    }

    info!(completed, "simulation finished");
    writeln!(out, "Simulated: {} hands", completed)?;
    let stacks: Vec<String> = table.players.iter().map(|p| p.chips.to_string()).collect();
    writeln!(out, "Stacks: {}", stacks.join(" "))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn sim_blackjack(
    seats: usize,
    rounds: u64,
    base_seed: u64,
    ai: &dyn BlackjackOpponent,
    logger: &mut HandLogger,
    control: &RunControl,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let table_cfg = BlackjackConfig::default();
    let lineup = standard_lineup(seats, table_cfg.stake, None);
    if lineup.len() != seats {
        ui::display_warning(
            err,
            &format!("blackjack seats {} adjusted to {}", seats, lineup.len()),
        )?;
    }
    let mut table = BlackjackTable::new(lineup, table_cfg)?;
    let mut completed = 0u64;

    for i in 0..rounds {
        if table.player_chips() == 0 {
            warn!(round = i, "every seat is broke");
            writeln!(out, "Table closed: every seat is broke")?;
            break;
        }
        let round_seed = base_seed.wrapping_add(i);
        table.start_round(Deck::new_with_seed(round_seed));
        table.place_initial_bets(None)?;
        table.deal_initial_cards()?;
        while table.stage == BlackjackStage::PlayerTurns {
            if perform_blackjack_ai_action(&mut table, ai)?.is_none() {
                return Err(GameError::NoActingSeat.into());
            }
            control.pause();
        }
        if table.stage == BlackjackStage::Dealer {
            table.resolve_round()?;
        }

        let record = RoundRecord::from_table(logger.next_id(), Some(round_seed), &table);
        logger.write(&record)?;
        completed += 1;

        if control.should_stop(completed) {
            writeln!(out, "Interrupted: saved {}/{}", completed, rounds)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                completed, rounds
            )));
        }
    }

    info!(completed, "simulation finished");
    writeln!(out, "Simulated: {} rounds", completed)?;
    let stacks: Vec<String> = table.players.iter().map(|p| p.chips.to_string()).collect();
    writeln!(out, "Stacks: {}", stacks.join(" "))?;
    Ok(())
}
