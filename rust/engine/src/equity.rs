//! Monte-Carlo win probability for a hold'em hand.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::hand::{compare_strengths, evaluate_hand};

/// Sample count the table AI uses per decision.
pub const DEFAULT_SAMPLES: usize = 80;

/// Estimates how often `hand` wins against `opponents` random hands once the
/// board is completed.
///
/// Each trial shuffles the unseen cards, deals two to every opponent, fills
/// the board to five, and scores 1 for an outright win or `1/k` for a `k`-way
/// split of the best hand. The result is the mean score, in `[0, 1]`.
/// The opponent count is clamped to at least one and to what the unseen cards
/// can supply. Zero samples yields `0.0`.
pub fn estimate_win_probability<R: Rng + ?Sized>(
    hand: &[Card],
    community: &[Card],
    opponents: usize,
    samples: usize,
    rng: &mut R,
) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let known: Vec<Card> = hand.iter().chain(community.iter()).copied().collect();
    let unseen: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !known.contains(c))
        .collect();
    let board_missing = 5usize.saturating_sub(community.len());
    let opponents = opponents
        .max(1)
        .min(unseen.len().saturating_sub(board_missing) / 2);
    if opponents == 0 {
        return 0.0;
    }
    let needed = opponents * 2 + board_missing;

    let mut pool = unseen;
    let mut mine: Vec<Card> = Vec::with_capacity(7);
    let mut theirs: Vec<Card> = Vec::with_capacity(7);
    let mut total = 0.0;
    for _ in 0..samples {
        let (drawn, _) = pool.partial_shuffle(rng, needed);
        let (holes, extra_board) = drawn.split_at(opponents * 2);

        mine.clear();
        mine.extend_from_slice(hand);
        mine.extend_from_slice(community);
        mine.extend_from_slice(extra_board);
        let my_strength = evaluate_hand(&mine);

        let mut beaten = false;
        let mut tied = 0usize;
        for hole in holes.chunks(2) {
            theirs.clear();
            theirs.extend_from_slice(hole);
            theirs.extend_from_slice(community);
            theirs.extend_from_slice(extra_board);
            match compare_strengths(&evaluate_hand(&theirs), &my_strength) {
                Ordering::Greater => {
                    beaten = true;
                    break;
                }
                Ordering::Equal => tied += 1,
                Ordering::Less => {}
            }
        }
        if !beaten {
            total += 1.0 / (tied + 1) as f64;
        }
    }
    total / samples as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn zero_samples_is_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let hand = parse_cards("AS AD").unwrap();
        assert_eq!(estimate_win_probability(&hand, &[], 1, 0, &mut rng), 0.0);
    }

    #[test]
    fn made_royal_flush_always_wins() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let hand = parse_cards("AS KS").unwrap();
        let board = parse_cards("QS JS TS 2D 3C").unwrap();
        let p = estimate_win_probability(&hand, &board, 3, 200, &mut rng);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn board_plays_for_everyone_splits() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let hand = parse_cards("2C 3D").unwrap();
        let board = parse_cards("AS KS QS JS TS").unwrap();
        let p = estimate_win_probability(&hand, &board, 1, 100, &mut rng);
        assert!((p - 0.5).abs() < 1e-9);
    }

    #[test]
    fn aces_beat_a_random_hand_most_of_the_time() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let hand = parse_cards("AS AD").unwrap();
        let p = estimate_win_probability(&hand, &[], 1, 2000, &mut rng);
        assert!(p > 0.75 && p < 0.92, "p = {}", p);
    }

    #[test]
    fn opponents_are_clamped_to_the_unseen_cards() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let hand = parse_cards("7H 2C").unwrap();
        let p = estimate_win_probability(&hand, &[], 100, 20, &mut rng);
        assert!((0.0..=1.0).contains(&p));
    }
}
