//! # parlor-engine: card-game rule engines
//!
//! Rules for two casual table games, blackjack against a house dealer and
//! no-limit Texas Hold'em, with no rendering attached. Randomness is always
//! injected so every hand can be replayed from a seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Shuffling and dealing from the top of a deck
//! - [`blackjack`] - Blackjack scoring, dealing and the threshold policy
//! - [`blackjack_table`] - Blackjack round state machine
//! - [`hand`] - Poker hand evaluation and comparison
//! - [`equity`] - Monte-Carlo win probability
//! - [`holdem`] - Hold'em dealing with burns
//! - [`game`] - Hold'em betting state machine and showdown
//! - [`player`] - Hold'em seats and actions
//! - [`pot`] - Side pots and pot splitting
//! - [`rules`] - Betting validation
//! - [`logger`] - Hand and round records written as JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use parlor_engine::cards::parse_cards;
//! use parlor_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("AH KH QH JH TH 2C 3D").unwrap();
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use parlor_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let deck1 = Deck::new_with_seed(42);
//! let deck2 = Deck::new_with_seed(42);
//! assert_eq!(deck1.cards(), deck2.cards());
//! ```
//!
//! ## Playing a hand
//!
//! ```rust
//! use parlor_engine::deck::Deck;
//! use parlor_engine::game::{HoldemConfig, HoldemStage, HoldemTable};
//! use parlor_engine::player::{PlayerAction, SeatConfig};
//!
//! let seats = vec![SeatConfig::ai(0, 1000), SeatConfig::ai(1, 1000)];
//! let mut table = HoldemTable::new(seats, HoldemConfig::default()).unwrap();
//! table.start_hand(Deck::new_with_seed(7)).unwrap();
//! table.apply_action(PlayerAction::Fold).unwrap();
//! assert_eq!(table.stage, HoldemStage::Showdown);
//! assert_eq!(table.total_chips(), 2000);
//! ```

pub mod blackjack;
pub mod blackjack_table;
pub mod cards;
pub mod deck;
pub mod equity;
pub mod errors;
pub mod game;
pub mod hand;
pub mod holdem;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
