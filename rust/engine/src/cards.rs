use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
/// Declaration order follows the table convention `H, D, C, S`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts (♥)
    Hearts,
    /// Diamonds (♦)
    Diamonds,
    /// Clubs (♣)
    Clubs,
    /// Spades (♠)
    Spades,
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

/// Canonical rank order used for deck construction.
pub const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Canonical suit order used for deck construction.
pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Single-character symbol: `2`-`9`, `T`, `J`, `Q`, `K`, `A`.
    pub fn symbol(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    fn parse(s: &str) -> Option<Rank> {
        let r = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(r)
    }
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    fn parse(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Represents a single playing card with a rank and suit.
/// Cards are plain values; two cards are the same card when rank and suit match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    /// Parses `"AS"`, `"th"` or `"10H"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GameError::InvalidCard(s.to_string());
        let suit_char = s.chars().last().ok_or_else(invalid)?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let rank = Rank::parse(rank_part).ok_or_else(invalid)?;
        let suit = Suit::parse(suit_char).ok_or_else(invalid)?;
        Ok(Card { rank, suit })
    }
}

/// Parses a whitespace or comma separated list of cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Builds the 52-card deck in canonical order: ranks outer, suits inner.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &r in &RANKS {
        for &s in &SUITS {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

/// Alias kept for the table components, which call it by this name.
pub fn create_deck() -> Vec<Card> {
    full_deck()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_ten_spellings() {
        let a: Card = "TH".parse().unwrap();
        let b: Card = "10h".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Card::new(Rank::Ten, Suit::Hearts));
    }

    #[test]
    fn rejects_garbage() {
        assert!("1X".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for c in full_deck() {
            let text = c.to_string();
            assert_eq!(text.parse::<Card>().unwrap(), c);
        }
    }

    #[test]
    fn canonical_order_starts_with_twos() {
        let deck = full_deck();
        assert_eq!(deck[0], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(deck[3], Card::new(Rank::Two, Suit::Spades));
        assert_eq!(deck[51], Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn parse_cards_splits_lists() {
        let cards = parse_cards("AS, kd 10c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
    }
}
