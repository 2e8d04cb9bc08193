//! Side-pot construction and pot splitting.

use serde::{Deserialize, Serialize};

use crate::player::HoldemPlayer;

/// One layer of the pot. Every seat in `contributors` put in at least this
/// layer's threshold; folded seats contribute but cannot win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u32,
    pub contributors: Vec<usize>,
}

/// A pot as it was paid out at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub winners: Vec<usize>,
}

/// Splits the chips committed this hand into layered pots.
///
/// Each distinct positive `total_bet` is a threshold, ascending; a layer holds
/// `(threshold - previous) * seats_at_or_above_threshold` chips. The sum over
/// all layers equals the sum of `total_bet`.
pub fn build_side_pots(players: &[HoldemPlayer]) -> Vec<SidePot> {
    let mut thresholds: Vec<u32> = players
        .iter()
        .map(|p| p.total_bet)
        .filter(|&b| b > 0)
        .collect();
    thresholds.sort_unstable();
    thresholds.dedup();

    let mut pots = Vec::with_capacity(thresholds.len());
    let mut previous = 0;
    for threshold in thresholds {
        let contributors: Vec<usize> = players
            .iter()
            .filter(|p| p.total_bet >= threshold)
            .map(|p| p.seat_index)
            .collect();
        let amount = (threshold - previous) * contributors.len() as u32;
        pots.push(SidePot {
            amount,
            contributors,
        });
        previous = threshold;
    }
    pots
}

/// Per-seat shares of `amount` split between `winners`.
///
/// Integer division; the odd chips go one at a time to the winners in table
/// order starting from the seat left of `dealer_index`.
pub fn split_pot(
    amount: u32,
    winners: &[usize],
    dealer_index: usize,
    seats: usize,
) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let seats = seats.max(1);
    let first = (dealer_index + 1) % seats;
    let mut ordered = winners.to_vec();
    ordered.sort_by_key(|&seat| (seat + seats - first) % seats);
    let share = amount / ordered.len() as u32;
    let mut remainder = amount % ordered.len() as u32;
    ordered
        .into_iter()
        .map(|seat| {
            let extra = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            (seat, share + extra)
        })
        .collect()
}
