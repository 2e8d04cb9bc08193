//! # parlor-ai: computer opponents
//!
//! AI seats for both games behind one trait per game, so a table driver can
//! swap strategies by name.
//!
//! ## Core Components
//!
//! - [`HoldemOpponent`] - Decision interface for hold'em seats
//! - [`BlackjackOpponent`] - Play and wager interface for blackjack seats
//! - [`equity`] - Monte-Carlo equity heuristic used at the hold'em table
//! - [`rule`] - Fixed hand-strength rules, no sampling
//! - [`threshold`] - Stand-on-17 blackjack player with a bluffing wager
//! - [`create_holdem_ai`] / [`create_blackjack_ai`] - Factories by name
//!
//! ## Quick Start
//!
//! ```rust
//! use parlor_ai::{create_holdem_ai, perform_ai_action};
//! use parlor_engine::deck::Deck;
//! use parlor_engine::game::{HoldemConfig, HoldemTable};
//! use parlor_engine::player::SeatConfig;
//! use rand::SeedableRng;
//!
//! let ai = create_holdem_ai("equity").expect("known AI");
//! let seats = vec![SeatConfig::ai(0, 1000), SeatConfig::ai(1, 1000)];
//! let mut table = HoldemTable::new(seats, HoldemConfig::default()).unwrap();
//! table.start_hand(Deck::new_with_seed(42)).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let applied = perform_ai_action(&mut table, ai.as_ref(), &mut rng).unwrap();
//! assert!(applied.is_some());
//! ```
//!
//! ## AI Types
//!
//! - `"equity"` - the table heuristic (80-sample equity, fixed thresholds)
//! - `"rule"` - rank and category rules
//! - `"threshold"` - blackjack: hit below 17

use parlor_engine::blackjack::BlackjackMove;
use parlor_engine::blackjack_table::BlackjackTable;
use parlor_engine::cards::Card;
use parlor_engine::errors::GameError;
use parlor_engine::game::HoldemTable;
use parlor_engine::player::PlayerAction;
use parlor_engine::rules::ValidatedAction;
use rand::RngCore;

pub mod equity;
pub mod rule;
pub mod threshold;

/// Interface for AI seats at a hold'em table.
///
/// # Example Implementation
///
/// ```rust
/// use parlor_ai::HoldemOpponent;
/// use parlor_engine::game::HoldemTable;
/// use parlor_engine::player::PlayerAction;
/// use rand::RngCore;
///
/// struct CallingStation;
///
/// impl HoldemOpponent for CallingStation {
///     fn decide(&self, table: &HoldemTable, seat: usize, _rng: &mut dyn RngCore) -> PlayerAction {
///         if table.to_call(seat) == 0 {
///             PlayerAction::Check
///         } else {
///             PlayerAction::Call
///         }
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait HoldemOpponent: Send + Sync {
    /// Chooses an action for `seat`, which is the seat to act on `table`.
    fn decide(&self, table: &HoldemTable, seat: usize, rng: &mut dyn RngCore) -> PlayerAction;

    fn name(&self) -> &str;
}

/// Opening wager attitude for a blackjack hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetDecision {
    Raise,
    Call,
    Fold,
}

/// Interface for AI seats at a blackjack table.
pub trait BlackjackOpponent: Send + Sync {
    fn play(&self, hand: &[Card]) -> BlackjackMove;

    /// How keen the seat is to put chips behind `hand`.
    fn wager(&self, hand: &[Card], rng: &mut dyn RngCore) -> BetDecision;

    fn name(&self) -> &str;
}

/// Hold'em AI by name, or `None` for an unknown name.
///
/// ```rust
/// use parlor_ai::create_holdem_ai;
///
/// let ai = create_holdem_ai("rule").unwrap();
/// assert_eq!(ai.name(), "RuleAI");
/// assert!(create_holdem_ai("gto").is_none());
/// ```
pub fn create_holdem_ai(name: &str) -> Option<Box<dyn HoldemOpponent>> {
    match name {
        "equity" => Some(Box::new(equity::EquityAI::default())),
        "rule" => Some(Box::new(rule::RuleAI::new())),
        _ => None,
    }
}

/// Blackjack AI by name, or `None` for an unknown name.
pub fn create_blackjack_ai(name: &str) -> Option<Box<dyn BlackjackOpponent>> {
    match name {
        "threshold" => Some(Box::new(threshold::ThresholdAI::new())),
        _ => None,
    }
}

/// Lets `ai` act for the seat to act, if that seat is an AI seat.
///
/// Returns `Ok(None)` when no hand is live or a human is to act.
pub fn perform_ai_action(
    table: &mut HoldemTable,
    ai: &dyn HoldemOpponent,
    rng: &mut dyn RngCore,
) -> Result<Option<ValidatedAction>, GameError> {
    let seat = match table.current_player() {
        Some(p) if !p.is_human && p.can_act() => p.seat_index,
        _ => return Ok(None),
    };
    let action = ai.decide(table, seat, rng);
    table.apply_action(action).map(Some)
}

/// Plays one blackjack move for the seat whose turn it is, if that seat is
/// an AI seat.
pub fn perform_blackjack_ai_action(
    table: &mut BlackjackTable,
    ai: &dyn BlackjackOpponent,
) -> Result<Option<BlackjackMove>, GameError> {
    let hand = match table.current_player() {
        Some(p) if !p.is_human => p.hand.clone(),
        _ => return Ok(None),
    };
    let mv = ai.play(&hand);
    table.apply_action(mv)?;
    Ok(Some(mv))
}
