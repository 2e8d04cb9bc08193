//! Compare command handler: which of two poker hands is stronger.

use crate::error::CliError;
use crate::ui::format_cards;
use parlor_engine::cards::{Card, parse_cards};
use parlor_engine::hand::{compare_strengths, evaluate_hand};
use std::cmp::Ordering;
use std::io::Write;

/// Handle the compare command. Each side is five to seven cards and the
/// best five of each are compared.
pub fn handle_compare_command(
    a: &str,
    b: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let a_cards = parse_side("a", a)?;
    let b_cards = parse_side("b", b)?;
    let a_strength = evaluate_hand(&a_cards);
    let b_strength = evaluate_hand(&b_cards);

    writeln!(
        out,
        "A: {} ({})",
        format_cards(&a_cards),
        a_strength.category.name()
    )?;
    writeln!(
        out,
        "B: {} ({})",
        format_cards(&b_cards),
        b_strength.category.name()
    )?;
    let verdict = match compare_strengths(&a_strength, &b_strength) {
        Ordering::Greater => "A wins",
        Ordering::Less => "B wins",
        Ordering::Equal => "Tie",
    };
    writeln!(out, "Result: {}", verdict)?;
    Ok(())
}

fn parse_side(label: &str, text: &str) -> Result<Vec<Card>, CliError> {
    let cards =
        parse_cards(text).map_err(|e| CliError::InvalidInput(format!("--{}: {}", label, e)))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "--{} needs 5 to 7 cards, got {}",
            label,
            cards.len()
        )));
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(a: &str, b: &str) -> String {
        let mut out = Vec::new();
        handle_compare_command(a, b, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn flush_beats_straight() {
        let output = compare("2H 5H 9H JH KH", "9C TD JS QH KC");
        assert!(output.ends_with("Result: A wins\n"));
    }

    #[test]
    fn board_plays_for_both() {
        let output = compare("2C 3D AS KS QS JS TS", "4C 5D AS KS QS JS TS");
        assert!(output.ends_with("Result: Tie\n"));
    }

    #[test]
    fn kicker_decides() {
        let output = compare("AH AD KC 7S 2D", "AS AC QC 7D 2H");
        assert!(output.ends_with("Result: A wins\n"));
        let output = compare("AS AC QC 7D 2H", "AH AD KC 7S 2D");
        assert!(output.ends_with("Result: B wins\n"));
    }

    #[test]
    fn short_hands_are_rejected() {
        let mut out = Vec::new();
        let result = handle_compare_command("AS KS", "2C 3C 4C 5C 6C", &mut out);
        assert!(matches!(
            result,
            Err(CliError::InvalidInput(ref msg)) if msg == "--a needs 5 to 7 cards, got 2"
        ));
    }
}
