use parlor_engine::cards::parse_cards;
use parlor_engine::equity::estimate_win_probability;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn seeded_estimates_repeat() {
    let hand = parse_cards("KH QH").unwrap();
    let board = parse_cards("JH 2C 7D").unwrap();
    let a = estimate_win_probability(&hand, &board, 2, 80, &mut ChaCha20Rng::seed_from_u64(4));
    let b = estimate_win_probability(&hand, &board, 2, 80, &mut ChaCha20Rng::seed_from_u64(4));
    assert_eq!(a, b);
    assert!((0.0..=1.0).contains(&a));
}

#[test]
fn more_opponents_lower_equity() {
    let hand = parse_cards("AS KS").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(30);
    let one = estimate_win_probability(&hand, &[], 1, 1500, &mut rng);
    let five = estimate_win_probability(&hand, &[], 5, 1500, &mut rng);
    assert!(one > five, "{} vs {}", one, five);
}

#[test]
fn board_that_plays_for_everyone_is_a_split() {
    // quads with an ace kicker on board; no hole cards can improve it
    let hand = parse_cards("2C 3D").unwrap();
    let board = parse_cards("9S 9H 9D 9C AH").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let p = estimate_win_probability(&hand, &board, 1, 200, &mut rng);
    assert!((p - 0.5).abs() < 1e-9);
}
