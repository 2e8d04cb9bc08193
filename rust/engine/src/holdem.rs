//! Hold'em dealing procedure: hole cards, then burn-and-turn for each street.

use crate::cards::Card;
use crate::deck::{deal_robin, Deck};
use crate::errors::GameError;

/// Deals two hole cards to each of `players` seats, one round at a time,
/// from the top (end) of the deck.
pub fn deal_hole_cards(deck: &mut Deck, players: usize) -> Result<Vec<Vec<Card>>, GameError> {
    deal_robin(deck, players, 2)
}

/// Burns one card and deals the next street onto `community`:
/// three cards on an empty board, one card otherwise.
pub fn deal_street(deck: &mut Deck, community: &mut Vec<Card>) -> Result<(), GameError> {
    if community.len() >= 5 {
        return Err(GameError::HandAlreadyComplete);
    }
    let count = if community.is_empty() { 3 } else { 1 };
    deck.ensure(count + 1)?;
    deck.burn()?;
    community.extend(deck.draw_n(count)?);
    Ok(())
}

/// Deals whatever streets are still missing so the board holds five cards.
pub fn complete_board(deck: &mut Deck, community: &mut Vec<Card>) -> Result<(), GameError> {
    while community.len() < 5 {
        deal_street(deck, community)?;
    }
    Ok(())
}

/// Deals a full board from a fresh position: burn, flop, burn, turn, burn, river.
pub fn deal_community(deck: &mut Deck) -> Result<Vec<Card>, GameError> {
    let mut community = Vec::with_capacity(5);
    complete_board(deck, &mut community)?;
    Ok(community)
}
