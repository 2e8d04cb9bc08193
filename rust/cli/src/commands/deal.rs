//! Deal command handler: one seeded hand laid out for inspection.
//!
//! Hold'em deals hole cards and a full board with burns, then names the
//! best hand at each seat. Blackjack seats a standard table, takes the
//! automatic wagers and deals two cards to everyone, dealer included.

use crate::cli::GameKind;
use crate::config::{self, MAX_SEATS, MIN_SEATS};
use crate::error::CliError;
use crate::ui::format_cards;
use parlor_engine::blackjack::is_blackjack;
use parlor_engine::blackjack_table::{BlackjackConfig, BlackjackTable, standard_lineup};
use parlor_engine::deck::Deck;
use parlor_engine::hand::{determine_winners, evaluate_hand};
use parlor_engine::holdem::{deal_community, deal_hole_cards};
use std::io::Write;

/// Handle the deal command.
///
/// The seed falls back to the configured seed, then to a random one; it is
/// printed first so any deal can be repeated.
pub fn handle_deal_command(
    game: GameKind,
    seed: Option<u64>,
    seats: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let seats = seats.unwrap_or(cfg.seats);
    if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
        return Err(CliError::InvalidInput(format!(
            "seats must be between {} and {}",
            MIN_SEATS, MAX_SEATS
        )));
    }

    writeln!(out, "Seed: {}", seed)?;
    match game {
        GameKind::Holdem => deal_holdem(seed, seats, out),
        GameKind::Blackjack => deal_blackjack(seed, seats, out),
    }
}

fn deal_holdem(seed: u64, seats: usize, out: &mut dyn Write) -> Result<(), CliError> {
    let mut deck = Deck::new_with_seed(seed);
    let holes = deal_hole_cards(&mut deck, seats)?;
    let board = deal_community(&mut deck)?;

    for (i, hole) in holes.iter().enumerate() {
        let mut cards = hole.clone();
        cards.extend_from_slice(&board);
        let strength = evaluate_hand(&cards);
        writeln!(
            out,
            "Seat {}: {} ({})",
            i,
            format_cards(hole),
            strength.category.name()
        )?;
    }
    writeln!(out, "Board: {}", format_cards(&board))?;

    let indices: Vec<usize> = (0..seats).collect();
    let winners = determine_winners(|i| holes[i].as_slice(), &board, &indices);
    let names: Vec<String> = winners.iter().map(|w| w.to_string()).collect();
    writeln!(out, "Winners: {}", names.join(" "))?;
    Ok(())
}

fn deal_blackjack(seed: u64, seats: usize, out: &mut dyn Write) -> Result<(), CliError> {
    let table_cfg = BlackjackConfig::default();
    let mut table = BlackjackTable::new(standard_lineup(seats, table_cfg.stake, None), table_cfg)?;
    table.start_round(Deck::new_with_seed(seed));
    table.place_initial_bets(None)?;
    table.deal_initial_cards()?;

    for p in &table.players {
        let label = if p.is_dealer {
            "Dealer".to_string()
        } else {
            format!("Seat {}", p.seat_index)
        };
        let natural = if is_blackjack(&p.hand) { " blackjack" } else { "" };
        writeln!(
            out,
            "{}: {} ({}){}",
            label,
            format_cards(&p.hand),
            p.value(),
            natural
        )?;
    }
    Ok(())
}
