use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_strengths(self, other)
    }
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Evaluates the best five-card hand contained in `cards`.
///
/// Intended for 5 to 7 cards (two hole cards plus the board). Shorter input
/// is scored on what is present, with missing kickers reading as zero, so a
/// preflop pair still beats a preflop high card.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut by_suit: [u16; 4] = [0; 4];
    let mut suit_counts = [0u8; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s] |= 1u16 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let ranks = ranks_from_mask(by_suit[s]);
        return HandStrength {
            category: Category::Flush,
            kickers: top_five(&ranks),
        };
    }

    let rank_mask = rank_counts
        .iter()
        .enumerate()
        .filter(|(_, n)| **n > 0)
        .fold(0u16, |m, (r, _)| m | (1 << r));
    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let rest: Vec<u8> = merged_desc(&[&trips[1..], &pairs[..], &singles[..]]);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: [t, at(&rest, 0), at(&rest, 1), 0, 0],
        };
    }
    if pairs.len() >= 2 {
        // a third pair can still play as the kicker
        let rest = merged_desc(&[&pairs[2..], &singles[..]]);
        return HandStrength {
            category: Category::TwoPair,
            kickers: [pairs[0], pairs[1], at(&rest, 0), 0, 0],
        };
    }
    if let Some(&p) = pairs.first() {
        return HandStrength {
            category: Category::OnePair,
            kickers: [p, at(&singles, 0), at(&singles, 1), at(&singles, 2), 0],
        };
    }

    HandStrength {
        category: Category::HighCard,
        kickers: top_five(&singles),
    }
}

pub fn compare_strengths(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Compares two card sets (hole cards plus board).
/// `Greater` means `a` wins, `Less` means `b` wins, `Equal` is a split.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Ordering {
    compare_strengths(&evaluate_hand(a), &evaluate_hand(b))
}

/// Returns every seat in `indices` holding the best hand with `community`.
pub fn determine_winners<'a, F>(hole: F, community: &[Card], indices: &[usize]) -> Vec<usize>
where
    F: Fn(usize) -> &'a [Card],
{
    let mut best: Option<HandStrength> = None;
    let mut winners = Vec::new();
    for &idx in indices {
        let mut cards = hole(idx).to_vec();
        cards.extend_from_slice(community);
        let strength = evaluate_hand(&cards);
        match best.as_ref().map(|b| compare_strengths(&strength, b)) {
            None | Some(Ordering::Greater) => {
                best = Some(strength);
                winners.clear();
                winners.push(idx);
            }
            Some(Ordering::Equal) => winners.push(idx),
            Some(Ordering::Less) => {}
        }
    }
    winners
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Hearts => 0,
        Suit::Diamonds => 1,
        Suit::Clubs => 2,
        Suit::Spades => 3,
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn ranks_from_mask(mask: u16) -> Vec<u8> {
    (2..=14u8).rev().filter(|&r| mask & (1u16 << r) != 0).collect()
}

fn top_five(desc: &[u8]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = at(desc, i);
    }
    k
}

fn at(v: &[u8], i: usize) -> u8 {
    v.get(i).copied().unwrap_or(0)
}

fn merged_desc(parts: &[&[u8]]) -> Vec<u8> {
    let mut v: Vec<u8> = parts.iter().flat_map(|p| p.iter().copied()).collect();
    v.sort_unstable_by(|a, b| b.cmp(a));
    v
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &t = trips.first()?;
    // second set of trips plays as the pair
    let p = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max()?;
    Some((t, p))
}

/// Ranks grouped by multiplicity, each group ordered high -> low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
