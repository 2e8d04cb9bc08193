//! Equity command handler: sampled win probability for one hold'em hand.

use crate::config;
use crate::error::CliError;
use crate::ui::format_cards;
use parlor_engine::cards::{Card, parse_cards};
use parlor_engine::equity::estimate_win_probability;
use parlor_engine::hand::evaluate_hand;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::io::Write;

/// Handle the equity command.
///
/// `hand` must hold two cards and `board` zero, three, four or five; no card
/// may appear twice. Sample count falls back to the configuration.
pub fn handle_equity_command(
    hand: &str,
    board: &str,
    opponents: usize,
    samples: Option<usize>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let (hole, community) = parse_spot(hand, board).map_err(CliError::InvalidInput)?;
    if opponents == 0 {
        return Err(CliError::InvalidInput("opponents must be >= 1".into()));
    }
    let samples = samples.unwrap_or(cfg.equity_samples);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let equity = estimate_win_probability(&hole, &community, opponents, samples, &mut rng);

    writeln!(out, "Hand: {}", format_cards(&hole))?;
    writeln!(out, "Board: {}", format_cards(&community))?;
    if community.len() >= 3 {
        let mut cards = hole.clone();
        cards.extend_from_slice(&community);
        writeln!(out, "Made: {}", evaluate_hand(&cards).category.name())?;
    }
    writeln!(
        out,
        "Equity: {:.4} ({} samples vs {} opponent(s), seed {})",
        equity, samples, opponents, seed
    )?;
    Ok(())
}

fn parse_spot(hand: &str, board: &str) -> Result<(Vec<Card>, Vec<Card>), String> {
    let hole = parse_cards(hand).map_err(|e| e.to_string())?;
    let community = parse_cards(board).map_err(|e| e.to_string())?;
    if hole.len() != 2 {
        return Err(format!("hand needs 2 cards, got {}", hole.len()));
    }
    if !matches!(community.len(), 0 | 3 | 4 | 5) {
        return Err(format!(
            "board needs 0, 3, 4 or 5 cards, got {}",
            community.len()
        ));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = hole.iter().chain(&community).find(|c| !seen.insert(**c)) {
        return Err(format!("card {} appears twice", dup));
    }
    Ok((hole, community))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_parsing_checks_counts_and_duplicates() {
        assert!(parse_spot("AS KD", "").is_ok());
        assert!(parse_spot("AS KD", "2C 3C 4C").is_ok());
        assert!(parse_spot("AS", "").is_err());
        assert!(parse_spot("AS KD", "2C 3C").is_err());
        let dup = parse_spot("AS KD", "AS 3C 4C").unwrap_err();
        assert_eq!(dup, "card AS appears twice");
        assert!(parse_spot("AS XX", "").is_err());
    }

    #[test]
    fn reports_equity_with_seed() {
        let mut out = Vec::new();
        handle_equity_command("AH AD", "", 1, Some(200), Some(9), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Hand: AH AD"));
        assert!(output.contains("Board: -"));
        assert!(output.contains("(200 samples vs 1 opponent(s), seed 9)"));
        let eq: f64 = output
            .lines()
            .find_map(|l| l.strip_prefix("Equity: "))
            .and_then(|l| l.split_whitespace().next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(eq > 0.7, "aces should be big favourites, got {}", eq);
    }

    #[test]
    fn made_hand_is_named_postflop() {
        let mut out = Vec::new();
        handle_equity_command("AH AD", "AC 7S 2D", 2, Some(20), Some(3), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Made: "));
    }

    #[test]
    fn zero_opponents_is_rejected() {
        let mut out = Vec::new();
        let result = handle_equity_command("AH AD", "", 0, None, Some(1), &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
