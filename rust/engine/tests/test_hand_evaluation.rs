use std::cmp::Ordering;

use parlor_engine::cards::{parse_cards, Card};
use parlor_engine::deck::Deck;
use parlor_engine::hand::{compare_hands, determine_winners, evaluate_hand, Category};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid cards")
}

#[test]
fn categories_are_recognised_from_seven_cards() {
    let cases = [
        ("AH KD 9C 7S 5H 3D 2C", Category::HighCard),
        ("AH AD 9C 7S 5H 3D 2C", Category::OnePair),
        ("AH AD 9C 9S 5H 3D 2C", Category::TwoPair),
        ("AH AD AC 9S 5H 3D 2C", Category::ThreeOfAKind),
        ("9H 8D 7C 6S 5H KD 2C", Category::Straight),
        ("AH JH 9H 7H 2H 3D 4C", Category::Flush),
        ("AH AD AC 9S 9H 3D 2C", Category::FullHouse),
        ("AH AD AC AS 9H 3D 2C", Category::FourOfAKind),
        ("9H 8H 7H 6H 5H KD 2C", Category::StraightFlush),
    ];
    for (hand, expected) in cases {
        assert_eq!(evaluate_hand(&cards(hand)).category, expected, "{}", hand);
    }
}

#[test]
fn ranking_ladder_is_strict() {
    let ladder = [
        "AH KD 9C 7S 5H 3D 2C",
        "2H 2D 9C 7S 5H 3D 4C",
        "2H 2D 3C 3S 5H 7D 9C",
        "2H 2D 2C 7S 5H 3D 9C",
        "AH 2D 3C 4S 5H 9D KC",
        "2H 5H 7H 9H JH 3D 4C",
        "2H 2D 2C 3S 3H 9D KC",
        "2H 2D 2C 2S 3H 9D KC",
        "AH 2H 3H 4H 5H 9D KC",
    ];
    for pair in ladder.windows(2) {
        assert_eq!(
            compare_hands(&cards(pair[1]), &cards(pair[0])),
            Ordering::Greater,
            "{} should beat {}",
            pair[1],
            pair[0]
        );
    }
}

#[test]
fn kickers_break_ties() {
    let board = "KH 9D 7C 4S 2H";
    let a = cards(&format!("AS QD {}", board));
    let b = cards(&format!("AD JC {}", board));
    assert_eq!(compare_hands(&a, &b), Ordering::Greater);
    let c = cards(&format!("AC QS {}", board));
    assert_eq!(compare_hands(&a, &c), Ordering::Equal);
}

#[test]
fn comparator_is_antisymmetric_and_reflexive() {
    for seed in 0..300u64 {
        let mut deck = Deck::new_with_seed(seed);
        let a = deck.draw_n(7).unwrap();
        let b = deck.draw_n(7).unwrap();
        assert_eq!(compare_hands(&a, &b), compare_hands(&b, &a).reverse(), "seed {}", seed);
        assert_eq!(compare_hands(&a, &a), Ordering::Equal);
    }
}

#[test]
fn winners_keep_every_tied_seat() {
    let holes = [cards("2C 3D"), cards("4C 5D"), cards("AH AD")];
    let board = cards("KS QS JS TS 9S");
    let winners = determine_winners(|i| holes[i].as_slice(), &board, &[0, 1, 2]);
    assert_eq!(winners, vec![0, 1, 2]);

    let board = cards("AC KC QD JS 9H");
    let winners = determine_winners(|i| holes[i].as_slice(), &board, &[0, 1, 2]);
    assert_eq!(winners, vec![2]);
    let winners = determine_winners(|i| holes[i].as_slice(), &board, &[0, 1]);
    assert_eq!(winners, vec![0, 1]);
}
