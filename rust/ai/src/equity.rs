//! The table heuristic: sample an equity estimate and compare it to fixed
//! thresholds. Not a solver, and not meant to become one.

use crate::HoldemOpponent;
use parlor_engine::equity::{DEFAULT_SAMPLES, estimate_win_probability};
use parlor_engine::game::HoldemTable;
use parlor_engine::player::PlayerAction;
use rand::RngCore;

/// Facing a bet, fold below this equity.
pub const FOLD_BELOW: f64 = 0.28;
/// Facing a bet, call below this equity and raise at or above it.
pub const CALL_BELOW: f64 = 0.45;
/// With nothing to call, bet above this equity.
pub const BET_ABOVE: f64 = 0.55;

#[derive(Debug, Clone)]
pub struct EquityAI {
    samples: usize,
}

impl EquityAI {
    pub fn with_samples(samples: usize) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Maps an equity estimate to an action. `min_raise` scales the sizes;
    /// both sizes are capped by `chips`.
    pub fn choose(equity: f64, to_call: u32, chips: u32, min_raise: u32) -> PlayerAction {
        let scaled = |base: f64| ((min_raise as f64 * (base + equity)).round() as u32).min(chips);
        if to_call > 0 {
            if equity < FOLD_BELOW {
                PlayerAction::Fold
            } else if equity < CALL_BELOW {
                PlayerAction::Call
            } else {
                PlayerAction::Raise(scaled(0.75))
            }
        } else if equity > BET_ABOVE && chips > min_raise {
            PlayerAction::Bet(scaled(0.5))
        } else {
            PlayerAction::Check
        }
    }
}

impl Default for EquityAI {
    fn default() -> Self {
        Self::with_samples(DEFAULT_SAMPLES)
    }
}

impl HoldemOpponent for EquityAI {
    fn decide(&self, table: &HoldemTable, seat: usize, rng: &mut dyn RngCore) -> PlayerAction {
        let Some(player) = table.players.get(seat) else {
            return PlayerAction::Check;
        };
        let to_call = table.to_call(seat);
        if player.hand.is_empty() {
            return if to_call > 0 { PlayerAction::Fold } else { PlayerAction::Check };
        }
        let opponents = table
            .players
            .iter()
            .filter(|p| p.seat_index != seat && !p.folded)
            .count();
        let equity = estimate_win_probability(
            &player.hand,
            &table.community,
            opponents.saturating_sub(1).max(1),
            self.samples,
            rng,
        );
        Self::choose(equity, to_call, player.chips, table.min_raise)
    }

    fn name(&self) -> &str {
        "EquityAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_a_bet_uses_three_bands() {
        assert_eq!(EquityAI::choose(0.20, 20, 1000, 20), PlayerAction::Fold);
        assert_eq!(EquityAI::choose(0.30, 20, 1000, 20), PlayerAction::Call);
        // round(20 * (0.75 + 0.5)) = 25
        assert_eq!(EquityAI::choose(0.50, 20, 1000, 20), PlayerAction::Raise(25));
    }

    #[test]
    fn unopened_pot_bets_only_when_strong() {
        assert_eq!(EquityAI::choose(0.55, 0, 1000, 20), PlayerAction::Check);
        // round(20 * (0.5 + 0.7)) = 24
        assert_eq!(EquityAI::choose(0.70, 0, 1000, 20), PlayerAction::Bet(24));
        assert_eq!(EquityAI::choose(0.90, 0, 20, 20), PlayerAction::Check);
    }

    #[test]
    fn sizes_are_capped_by_the_stack() {
        assert_eq!(EquityAI::choose(0.99, 40, 30, 100), PlayerAction::Raise(30));
    }

    #[test]
    fn default_uses_table_sample_count() {
        assert_eq!(EquityAI::default().samples(), 80);
    }
}
