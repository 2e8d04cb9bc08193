//! Rule-based hold'em AI.
//!
//! Preflop it looks only at the two hole-card ranks; postflop it looks at the
//! category of the best hand it can make. No sampling, so it is deterministic
//! and cheap enough for long simulations.

use crate::HoldemOpponent;
use parlor_engine::cards::{Card, Rank};
use parlor_engine::game::HoldemTable;
use parlor_engine::hand::{Category, evaluate_hand};
use parlor_engine::player::PlayerAction;
use rand::RngCore;

/// What the rules recommend before sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Raise,
    Call,
    Check,
    Fold,
}

#[derive(Debug, Clone, Default)]
pub struct RuleAI;

impl RuleAI {
    pub fn new() -> Self {
        Self
    }

    /// Preflop: pairs of jacks or better raise into a bet, queens or better
    /// raise an unopened pot; any pair or a queen-high hand continues.
    pub fn preflop_intent(hole: &[Card], facing_bet: bool) -> Intent {
        let mut ranks: Vec<Rank> = hole.iter().map(|c| c.rank).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let (Some(&high), Some(&low)) = (ranks.first(), ranks.get(1)) else {
            return Intent::Fold;
        };
        let pair = high == low;
        if facing_bet {
            if pair && high >= Rank::Jack {
                Intent::Raise
            } else if high >= Rank::Queen || pair {
                Intent::Call
            } else {
                Intent::Fold
            }
        } else if pair && high >= Rank::Queen {
            Intent::Raise
        } else if high >= Rank::Jack {
            Intent::Check
        } else {
            Intent::Fold
        }
    }

    /// Postflop: flushes or better raise into a bet, two pair or better
    /// calls; straights or better bet an unopened pot, any pair checks.
    pub fn postflop_intent(category: Category, facing_bet: bool) -> Intent {
        if facing_bet {
            if category >= Category::Flush {
                Intent::Raise
            } else if category >= Category::TwoPair {
                Intent::Call
            } else {
                Intent::Fold
            }
        } else if category >= Category::Straight {
            Intent::Raise
        } else if category >= Category::OnePair {
            Intent::Check
        } else {
            Intent::Fold
        }
    }
}

impl HoldemOpponent for RuleAI {
    fn decide(&self, table: &HoldemTable, seat: usize, _rng: &mut dyn RngCore) -> PlayerAction {
        let Some(player) = table.players.get(seat) else {
            return PlayerAction::Check;
        };
        let to_call = table.to_call(seat);
        let facing_bet = to_call > 0;
        let intent = if table.community.len() < 3 {
            Self::preflop_intent(&player.hand, facing_bet)
        } else {
            let mut cards = player.hand.clone();
            cards.extend_from_slice(&table.community);
            Self::postflop_intent(evaluate_hand(&cards).category, facing_bet)
        };
        match intent {
            Intent::Raise if facing_bet => PlayerAction::Raise(table.min_raise),
            Intent::Raise => PlayerAction::Bet(table.min_raise),
            Intent::Call => PlayerAction::Call,
            // never fold when a check is free
            Intent::Fold if facing_bet => PlayerAction::Fold,
            Intent::Fold | Intent::Check => PlayerAction::Check,
        }
    }

    fn name(&self) -> &str {
        "RuleAI"
    }
}
