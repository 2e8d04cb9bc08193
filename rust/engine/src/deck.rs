use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Returns a uniformly shuffled copy of `cards`; the input is left untouched.
///
/// The permutation is a Fisher–Yates shuffle driven by the injected RNG. Any
/// `Rng` works; the engine itself uses `ChaCha20Rng`, which is fine for casual
/// play but carries no fairness audit trail for real-money tables.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut copy = cards.to_vec();
    copy.shuffle(rng);
    copy
}

/// An ordered stack of cards. The top of the deck is the *end* of the
/// vector, so every draw pops from the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled 52-card deck in canonical order.
    pub fn ordered() -> Self {
        Self { cards: full_deck() }
    }

    /// Deck with an explicit order; the last card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Freshly shuffled 52-card deck.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cards: shuffle(&full_deck(), rng),
        }
    }

    /// Shuffled deck whose order is fully determined by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted {
            needed: 1,
            remaining: 0,
        })
    }

    /// Draws `n` cards, or none at all when fewer than `n` remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        self.ensure(n)?;
        Ok((0..n).filter_map(|_| self.cards.pop()).collect())
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn ensure(&self, needed: usize) -> Result<(), GameError> {
        if self.cards.len() < needed {
            return Err(GameError::DeckExhausted {
                needed,
                remaining: self.cards.len(),
            });
        }
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::ordered()
    }
}

/// Deals `rounds` cards to each of `players` seats, one card per seat per
/// round, popping from the top of the deck. On failure the deck is untouched.
pub fn deal_robin(
    deck: &mut Deck,
    players: usize,
    rounds: usize,
) -> Result<Vec<Vec<Card>>, GameError> {
    deck.ensure(players * rounds)?;
    let mut hands: Vec<Vec<Card>> = (0..players).map(|_| Vec::with_capacity(rounds)).collect();
    for _ in 0..rounds {
        for hand in hands.iter_mut() {
            hand.push(deck.draw()?);
        }
    }
    Ok(hands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_pops_from_the_end() {
        let mut deck = Deck::ordered();
        let last = *deck.cards().last().unwrap();
        assert_eq!(deck.draw().unwrap(), last);
        assert_eq!(deck.remaining(), 51);
    }

    #[test]
    fn draw_n_is_all_or_nothing() {
        let mut deck = Deck::from_cards(full_deck()[..2].to_vec());
        let err = deck.draw_n(3).unwrap_err();
        assert_eq!(
            err,
            GameError::DeckExhausted {
                needed: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn robin_deal_alternates_seats() {
        let cards = full_deck()[..4].to_vec();
        let mut deck = Deck::from_cards(cards.clone());
        let hands = deal_robin(&mut deck, 2, 2).unwrap();
        assert_eq!(hands[0], vec![cards[3], cards[1]]);
        assert_eq!(hands[1], vec![cards[2], cards[0]]);
        assert!(deck.is_empty());
    }
}
