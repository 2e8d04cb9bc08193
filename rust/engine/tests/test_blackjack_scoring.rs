use parlor_engine::blackjack::{
    ai_action, deal_initial, evaluate_winners, hand_value, hit_card, is_bust, is_soft,
    partial_hand_value, BlackjackMove,
};
use parlor_engine::cards::{parse_cards, Card, Rank, Suit};
use parlor_engine::deck::Deck;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid cards")
}

#[test]
fn soft_aces_reduce_one_at_a_time() {
    assert_eq!(hand_value(&cards("AS AH 9D")), 21);
    assert_eq!(hand_value(&cards("AS AH AD AC")), 14);
    assert_eq!(hand_value(&cards("AS KH")), 21);
    assert_eq!(hand_value(&cards("AS KH 5C")), 16);
    assert_eq!(hand_value(&cards("10H")), 10);
}

#[test]
fn empty_slots_are_skipped() {
    let slots = [Some(Card::new(Rank::Ace, Suit::Spades)), None, None];
    assert_eq!(partial_hand_value(&slots), 11);
    assert_eq!(partial_hand_value(&[None, None]), 0);
}

#[test]
fn bust_boundary() {
    assert!(is_bust(&cards("KH QD 2C")));
    assert!(!is_bust(&cards("KH QD AC")));
    assert!(!is_bust(&cards("KH AD")));
}

#[test]
fn softness_follows_the_reduction() {
    assert!(is_soft(&cards("AS 6H")));
    assert!(!is_soft(&cards("AS 6H KD")));
}

#[test]
fn threshold_policy_hits_below_seventeen() {
    assert_eq!(ai_action(&cards("TH 6C")), BlackjackMove::Hit);
    assert_eq!(ai_action(&cards("TH 7C")), BlackjackMove::Stand);
    assert_eq!(ai_action(&cards("AS 6C")), BlackjackMove::Stand);
}

#[test]
fn initial_deal_is_robin_from_the_top() {
    let mut deck = Deck::ordered();
    let top: Vec<Card> = deck.cards().iter().rev().take(6).copied().collect();
    let hands = deal_initial(&mut deck, 3).unwrap();
    assert_eq!(deck.remaining(), 46);
    assert_eq!(hands[0], vec![top[0], top[3]]);
    assert_eq!(hands[1], vec![top[1], top[4]]);
    assert_eq!(hands[2], vec![top[2], top[5]]);
    let next = *deck.cards().last().unwrap();
    assert_eq!(hit_card(&mut deck).unwrap(), next);
}

#[test]
fn short_deck_deals_nothing() {
    let mut deck = Deck::from_cards(cards("2C 3C 4C"));
    assert!(deal_initial(&mut deck, 2).is_err());
    assert_eq!(deck.remaining(), 3);
}

#[test]
fn best_non_bust_hands_win() {
    let hands = [cards("TH 9C"), cards("KH QD 5C"), cards("AS 8D"), cards("7C 7D")];
    let winners = evaluate_winners(hands.iter().map(|h| h.as_slice()));
    assert_eq!(winners, vec![0, 2]);
}
