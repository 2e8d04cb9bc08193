//! Blackjack AI that plays the dealer's line and wagers by hand total.

use crate::{BetDecision, BlackjackOpponent};
use parlor_engine::blackjack::{BlackjackMove, ai_action, hand_value};
use parlor_engine::cards::Card;
use rand::{Rng, RngCore};

/// Chance of raising regardless of the total.
pub const BLUFF_RATE: f64 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct ThresholdAI;

impl ThresholdAI {
    pub fn new() -> Self {
        Self
    }

    /// Wager attitude for a total, given whether this hand bluffs and, for
    /// middling totals, a coin flip.
    pub fn wager_for(total: u32, bluff: bool, coin: bool) -> BetDecision {
        match total {
            t if t >= 19 => BetDecision::Raise,
            _ if bluff => BetDecision::Raise,
            15..=18 => BetDecision::Call,
            12..=14 if coin => BetDecision::Call,
            _ => BetDecision::Fold,
        }
    }
}

impl BlackjackOpponent for ThresholdAI {
    fn play(&self, hand: &[Card]) -> BlackjackMove {
        ai_action(hand)
    }

    fn wager(&self, hand: &[Card], rng: &mut dyn RngCore) -> BetDecision {
        let bluff = rng.random_bool(BLUFF_RATE);
        let coin = rng.random_bool(0.5);
        Self::wager_for(hand_value(hand), bluff, coin)
    }

    fn name(&self) -> &str {
        "ThresholdAI"
    }
}
