//! Blackjack hand scoring and dealing primitives.
//!
//! Hands are plain card slices. Scoring counts every ace as 11 and then
//! converts aces to 1, one at a time, while the total is over 21.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::deck::{deal_robin, Deck};
use crate::errors::GameError;

/// Dealer stands on this total or higher; AI seats use the same line.
pub const DEALER_STAND: u32 = 17;
pub const BLACKJACK: u32 = 21;

/// Moves available to a seat on its turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlackjackMove {
    Hit,
    Stand,
}

pub fn card_value(rank: Rank) -> u32 {
    match rank {
        Rank::Ace => 11,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        r => r.value() as u32,
    }
}

fn score<'a, I>(cards: I) -> (u32, u32)
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut total = 0;
    let mut aces = 0;
    for card in cards {
        total += card_value(card.rank);
        if card.rank == Rank::Ace {
            aces += 1;
        }
    }
    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    (total, aces)
}

/// Best total for a hand, with soft aces reduced as needed.
pub fn hand_value(hand: &[Card]) -> u32 {
    score(hand).0
}

/// Same as [`hand_value`] for a hand that is still being laid out, where some
/// slots may not hold a card yet. Empty slots are skipped.
pub fn partial_hand_value(slots: &[Option<Card>]) -> u32 {
    score(slots.iter().flatten()).0
}

pub fn is_bust(hand: &[Card]) -> bool {
    hand_value(hand) > BLACKJACK
}

/// True while at least one ace is still counted as 11.
pub fn is_soft(hand: &[Card]) -> bool {
    score(hand).1 > 0
}

/// A natural: exactly two cards totalling 21.
pub fn is_blackjack(hand: &[Card]) -> bool {
    hand.len() == 2 && hand_value(hand) == BLACKJACK
}

/// Deals two cards to each of `players` seats, one round at a time, from the
/// top (end) of the deck.
pub fn deal_initial(deck: &mut Deck, players: usize) -> Result<Vec<Vec<Card>>, GameError> {
    deal_robin(deck, players, 2)
}

pub fn hit_card(deck: &mut Deck) -> Result<Card, GameError> {
    deck.draw()
}

/// Threshold policy shared by the dealer and AI seats.
pub fn ai_action(hand: &[Card]) -> BlackjackMove {
    if hand_value(hand) < DEALER_STAND {
        BlackjackMove::Hit
    } else {
        BlackjackMove::Stand
    }
}

/// Indices of the hands holding the best non-bust total; ties are all kept.
pub fn evaluate_winners<'a, I>(hands: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a [Card]>,
{
    let mut best = 0;
    let mut winners = Vec::new();
    for (index, hand) in hands.into_iter().enumerate() {
        let value = hand_value(hand);
        if value > BLACKJACK {
            continue;
        }
        if value > best {
            best = value;
            winners.clear();
            winners.push(index);
        } else if value == best {
            winners.push(index);
        }
    }
    winners
}
