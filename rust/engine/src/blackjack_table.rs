//! Blackjack table: wagers, player turns, dealer play and settlement.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::blackjack::{deal_initial, hand_value, hit_card, is_bust, BlackjackMove, DEALER_STAND};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::SeatConfig;

/// Seat the house sits in on a standard table.
pub const DEALER_SEAT: usize = 3;
pub const MIN_SEATS: usize = DEALER_SEAT + 1;
pub const MAX_SEATS: usize = 6;
/// Floor for the automatic wager.
pub const MIN_WAGER: u32 = 20;

/// What a seat's plate shows for the current round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum SeatResult {
    #[default]
    None,
    Bet(u32),
    Stand(u32),
    Bust,
    Win(u32),
    Push,
    Lose,
    Dealer(u32),
}

impl fmt::Display for SeatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatResult::None => Ok(()),
            SeatResult::Bet(n) => write!(f, "Bet {}", n),
            SeatResult::Stand(n) => write!(f, "Stand {}", n),
            SeatResult::Bust => f.write_str("Bust"),
            SeatResult::Win(n) => write!(f, "Win {}", n),
            SeatResult::Push => f.write_str("Push"),
            SeatResult::Lose => f.write_str("Lose"),
            SeatResult::Dealer(n) => write!(f, "Dealer {}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackPlayer {
    pub id: String,
    pub name: String,
    pub seat_index: usize,
    pub is_dealer: bool,
    pub is_human: bool,
    pub chips: u32,
    pub hand: Vec<Card>,
    pub bet: u32,
    pub result: SeatResult,
    /// Whether the whole hand is face up
    pub revealed: bool,
    pub bust: bool,
    /// Stood or busted this round
    pub turn_complete: bool,
}

impl BlackjackPlayer {
    fn new(seat: SeatConfig, seat_index: usize, is_dealer: bool) -> Self {
        Self {
            id: if is_dealer { "dealer".to_string() } else { seat.id },
            name: if is_dealer { "Dealer".to_string() } else { seat.name },
            seat_index,
            is_dealer,
            is_human: seat.is_human && !is_dealer,
            chips: seat.chips,
            hand: Vec::new(),
            bet: 0,
            result: SeatResult::None,
            revealed: is_dealer,
            bust: false,
            turn_complete: false,
        }
    }

    pub fn value(&self) -> u32 {
        hand_value(&self.hand)
    }

    fn waiting_for_turn(&self) -> bool {
        !self.is_dealer && self.bet > 0 && !self.bust && !self.turn_complete
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlackjackStage {
    Betting,
    PlayerTurns,
    Dealer,
    RoundEnd,
}

impl fmt::Display for BlackjackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlackjackStage::Betting => "betting",
            BlackjackStage::PlayerTurns => "player-turns",
            BlackjackStage::Dealer => "dealer",
            BlackjackStage::RoundEnd => "round-end",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlackjackConfig {
    /// Table stake; the automatic wager is a fifth of it
    pub stake: u32,
    pub dealer_index: usize,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            stake: 100,
            dealer_index: DEALER_SEAT,
        }
    }
}

/// Seat list for a standard table of `count` seats (clamped to
/// `MIN_SEATS..=MAX_SEATS`): the human, if any, in seat 0, AI seats elsewhere
/// and the house in `DEALER_SEAT` with twice the buy-in.
pub fn standard_lineup(count: usize, stake: u32, human: Option<&str>) -> Vec<SeatConfig> {
    let count = count.clamp(MIN_SEATS, MAX_SEATS);
    let buy_in = stake.max(200);
    (0..count)
        .map(|i| match (i, human) {
            (DEALER_SEAT, _) => SeatConfig {
                id: "dealer".to_string(),
                name: "Dealer".to_string(),
                is_human: false,
                chips: buy_in * 2,
            },
            (0, Some(name)) => SeatConfig::human(name, buy_in),
            _ => SeatConfig::ai(i, buy_in),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct BlackjackTable {
    pub players: Vec<BlackjackPlayer>,
    pub deck: Deck,
    pub stage: BlackjackStage,
    pub current_index: usize,
    pub dealer_index: usize,
    pub pot: u32,
    pub winners: Vec<usize>,
    pub round: u64,
    pub stake: u32,
}

impl BlackjackTable {
    pub fn new(seats: Vec<SeatConfig>, config: BlackjackConfig) -> Result<Self, GameError> {
        if config.dealer_index >= seats.len() {
            return Err(GameError::DealerSeat {
                index: config.dealer_index,
                seats: seats.len(),
            });
        }
        if seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let players = seats
            .into_iter()
            .enumerate()
            .map(|(idx, seat)| BlackjackPlayer::new(seat, idx, idx == config.dealer_index))
            .collect();
        Ok(Self {
            players,
            deck: Deck::from_cards(Vec::new()),
            stage: BlackjackStage::Betting,
            current_index: 0,
            dealer_index: config.dealer_index,
            pot: 0,
            winners: Vec::new(),
            round: 0,
            stake: config.stake,
        })
    }

    /// Clears the previous round and opens betting on `deck`. Wagers from a
    /// round that never settled go back to their seats.
    pub fn start_round(&mut self, deck: Deck) {
        if self.pot > 0 {
            for p in self.players.iter_mut() {
                p.chips += p.bet;
            }
            debug!(round = self.round, pot = self.pot, "unsettled wagers returned");
        }
        self.round += 1;
        self.deck = deck;
        self.stage = BlackjackStage::Betting;
        self.current_index = 0;
        self.pot = 0;
        self.winners.clear();
        for p in self.players.iter_mut() {
            p.hand.clear();
            p.bet = 0;
            p.result = SeatResult::None;
            p.revealed = p.is_dealer;
            p.bust = false;
            p.turn_complete = false;
        }
    }

    /// The wager every automatic seat places.
    pub fn base_wager(&self) -> u32 {
        let fifth = (self.stake as f64 * 0.2).round() as u32;
        fifth.max(MIN_WAGER)
    }

    /// Takes a wager from every seat except the dealer. The human seat may
    /// name its own amount, clamped to `1..=chips`. Empty stacks sit out.
    pub fn place_initial_bets(&mut self, human_bet: Option<u32>) -> Result<(), GameError> {
        self.require_stage(BlackjackStage::Betting)?;
        let base = self.base_wager();
        for p in self.players.iter_mut().filter(|p| !p.is_dealer) {
            if p.chips == 0 {
                continue;
            }
            let wager = match human_bet {
                Some(bet) if p.is_human => bet.clamp(1, p.chips),
                _ => base.min(p.chips),
            };
            p.chips -= wager;
            p.bet = wager;
            p.result = SeatResult::Bet(wager);
            self.pot += wager;
        }
        debug!(round = self.round, pot = self.pot, "wagers placed");
        Ok(())
    }

    /// Deals two cards to every seat, dealer hole card down, and hands the
    /// turn to the first seat with a live wager.
    pub fn deal_initial_cards(&mut self) -> Result<(), GameError> {
        self.require_stage(BlackjackStage::Betting)?;
        let hands = deal_initial(&mut self.deck, self.players.len())?;
        for (p, hand) in self.players.iter_mut().zip(hands) {
            p.hand = hand;
            p.bust = false;
            p.revealed = !p.is_dealer;
        }
        self.current_index = self.next_player_index(None);
        self.stage = if self.current_index == self.dealer_index {
            BlackjackStage::Dealer
        } else {
            BlackjackStage::PlayerTurns
        };
        info!(round = self.round, first = self.current_index, "cards dealt");
        Ok(())
    }

    /// Next seat after `from` (circular) still owing a decision, or seat 0
    /// onwards when `from` is `None`. Returns the dealer index when every
    /// wagering seat has stood or busted.
    pub fn next_player_index(&self, from: Option<usize>) -> usize {
        let n = self.players.len();
        let start = from.map_or(0, |f| f + 1);
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&idx| self.players[idx].waiting_for_turn())
            .unwrap_or(self.dealer_index)
    }

    pub fn current_player(&self) -> Option<&BlackjackPlayer> {
        match self.stage {
            BlackjackStage::PlayerTurns => self.players.get(self.current_index),
            _ => None,
        }
    }

    /// Plays `mv` for the seat whose turn it is. Busting or standing ends the
    /// turn; once no seat is left the dealer plays and the round settles.
    ///
    /// On `Err` nothing has changed, including a dealer who ran out of cards.
    pub fn apply_action(&mut self, mv: BlackjackMove) -> Result<(), GameError> {
        self.require_stage(BlackjackStage::PlayerTurns)?;
        let seat = self.current_index;
        match self.players.get(seat) {
            Some(p) if p.waiting_for_turn() => {}
            _ => return Err(GameError::NoActingSeat),
        }
        let mut next = self.clone();
        next.play_move(seat, mv)?;
        *self = next;
        Ok(())
    }

    /// Reveals the hole card and draws until the dealer reaches 17. The
    /// draws are committed only once the dealer stands or busts.
    pub fn play_dealer(&mut self) -> Result<(), GameError> {
        let mut deck = self.deck.clone();
        let mut hand = self.players[self.dealer_index].hand.clone();
        while hand_value(&hand) < DEALER_STAND {
            let card = hit_card(&mut deck)?;
            hand.push(card);
            debug!(card = %card, total = hand_value(&hand), "dealer draws");
        }

        self.deck = deck;
        let dealer = &mut self.players[self.dealer_index];
        dealer.hand = hand;
        dealer.revealed = true;
        dealer.bust = is_bust(&dealer.hand);
        dealer.result = if dealer.bust {
            SeatResult::Bust
        } else {
            SeatResult::Dealer(dealer.value())
        };
        Ok(())
    }

    /// Plays the dealer out and settles every wager: a win pays twice the
    /// bet back, a push returns it, a loss keeps it. Clears the pot.
    pub fn resolve_round(&mut self) -> Result<(), GameError> {
        match self.stage {
            BlackjackStage::PlayerTurns | BlackjackStage::Dealer => {}
            stage => {
                return Err(GameError::WrongStage {
                    stage: stage.to_string(),
                })
            }
        }
        self.play_dealer()?;
        self.current_index = self.dealer_index;

        let dealer = &self.players[self.dealer_index];
        let (dealer_value, dealer_bust) = (dealer.value(), dealer.bust);
        let mut winners = Vec::new();
        for p in self.players.iter_mut().filter(|p| !p.is_dealer && p.bet > 0) {
            let value = p.value();
            if p.bust {
                p.result = SeatResult::Lose;
            } else if dealer_bust || value > dealer_value {
                let payout = p.bet * 2;
                p.chips += payout;
                p.result = SeatResult::Win(payout);
                winners.push(p.seat_index);
            } else if value == dealer_value {
                p.chips += p.bet;
                p.result = SeatResult::Push;
            } else {
                p.result = SeatResult::Lose;
            }
        }
        info!(round = self.round, dealer_value, dealer_bust, ?winners, "round settled");
        self.pot = 0;
        self.winners = winners;
        self.stage = BlackjackStage::RoundEnd;
        Ok(())
    }

    /// Non-dealer chips plus the pot.
    pub fn player_chips(&self) -> u32 {
        self.players
            .iter()
            .filter(|p| !p.is_dealer)
            .map(|p| p.chips)
            .sum::<u32>()
            + self.pot
    }

    fn play_move(&mut self, seat: usize, mv: BlackjackMove) -> Result<(), GameError> {
        match mv {
            BlackjackMove::Hit => {
                let card = hit_card(&mut self.deck)?;
                let p = &mut self.players[seat];
                p.hand.push(card);
                p.revealed = true;
                if is_bust(&p.hand) {
                    p.bust = true;
                    p.result = SeatResult::Bust;
                    p.turn_complete = true;
                }
            }
            BlackjackMove::Stand => {
                let p = &mut self.players[seat];
                p.result = SeatResult::Stand(p.value());
                p.turn_complete = true;
            }
        }
        debug!(seat, ?mv, total = self.players[seat].value(), "blackjack move");
        if self.players[seat].turn_complete {
            self.advance_player()?;
        }
        Ok(())
    }

    fn advance_player(&mut self) -> Result<(), GameError> {
        let next = self.next_player_index(Some(self.current_index));
        if next == self.dealer_index {
            self.resolve_round()
        } else {
            self.current_index = next;
            Ok(())
        }
    }

    fn require_stage(&self, stage: BlackjackStage) -> Result<(), GameError> {
        if self.stage != stage {
            return Err(GameError::WrongStage {
                stage: self.stage.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn lineup() -> Vec<SeatConfig> {
        standard_lineup(4, 100, Some("alice"))
    }

    /// Deck whose draws come out in the order given.
    fn stacked(draws: &str) -> Deck {
        let mut cards = parse_cards(draws).unwrap();
        cards.reverse();
        Deck::from_cards(cards)
    }

    #[test]
    fn seat_results_read_like_the_plates() {
        assert_eq!(SeatResult::Bet(20).to_string(), "Bet 20");
        assert_eq!(SeatResult::Dealer(19).to_string(), "Dealer 19");
        assert_eq!(SeatResult::None.to_string(), "");
    }

    #[test]
    fn lineup_puts_house_in_seat_three() {
        let seats = standard_lineup(2, 100, None);
        assert_eq!(seats.len(), 4);
        assert_eq!(seats[3].id, "dealer");
        assert_eq!(seats[3].chips, 400);
        assert_eq!(seats[0].chips, 200);
    }

    #[test]
    fn dealer_seat_must_be_on_the_table() {
        let err = BlackjackTable::new(lineup(), BlackjackConfig { stake: 100, dealer_index: 7 })
            .unwrap_err();
        assert_eq!(err, GameError::DealerSeat { index: 7, seats: 4 });
        assert_eq!(err.to_string(), "Dealer seat 7 is outside a table of 4 seats");
    }

    #[test]
    fn wagers_use_a_fifth_of_the_stake_with_a_floor() {
        let mut t = BlackjackTable::new(lineup(), BlackjackConfig { stake: 500, dealer_index: 3 }).unwrap();
        t.start_round(Deck::new_with_seed(1));
        t.place_initial_bets(Some(1000)).unwrap();
        assert_eq!(t.players[0].bet, 200);
        assert_eq!(t.players[1].bet, 100);
        assert_eq!(t.players[3].bet, 0);
        assert_eq!(t.pot, 400);

        let mut t = BlackjackTable::new(lineup(), BlackjackConfig::default()).unwrap();
        t.start_round(Deck::new_with_seed(1));
        t.place_initial_bets(None).unwrap();
        assert_eq!(t.players[0].bet, MIN_WAGER);
    }

    #[test]
    fn stand_and_bust_end_turns_and_settle() {
        let mut t = BlackjackTable::new(lineup(), BlackjackConfig::default()).unwrap();
        // seats 0..3 get T,9,T,T then 8,9,6,7; seat 2 hits a K on 16
        t.start_round(stacked("TH 9H TC TS 8D 9D 6C 7S KC"));
        t.place_initial_bets(None).unwrap();
        t.deal_initial_cards().unwrap();
        assert_eq!(t.stage, BlackjackStage::PlayerTurns);
        assert!(!t.players[3].revealed);
        assert_eq!(t.current_index, 0);

        t.apply_action(BlackjackMove::Stand).unwrap();
        assert_eq!(t.current_index, 1);
        t.apply_action(BlackjackMove::Stand).unwrap();
        assert_eq!(t.current_index, 2);
        t.apply_action(BlackjackMove::Hit).unwrap();
        assert!(t.players[2].bust);

        // dealer holds 17 and stands
        assert_eq!(t.stage, BlackjackStage::RoundEnd);
        assert_eq!(t.players[3].result, SeatResult::Dealer(17));
        assert_eq!(t.players[0].result, SeatResult::Win(40));
        assert_eq!(t.players[1].result, SeatResult::Win(40));
        assert_eq!(t.players[2].result, SeatResult::Lose);
        assert_eq!(t.winners, vec![0, 1]);
        assert_eq!(t.pot, 0);
        assert_eq!(t.players[0].chips, 220);
        assert_eq!(t.players[2].chips, 180);
    }

    #[test]
    fn dealer_out_of_cards_leaves_the_round_open() {
        let mut t = BlackjackTable::new(lineup(), BlackjackConfig::default()).unwrap();
        // dealer shows 2 and 3 and the shoe is empty after the deal
        t.start_round(stacked("TH 9H TC 2S 8D 9D 7C 3S"));
        t.place_initial_bets(None).unwrap();
        t.deal_initial_cards().unwrap();
        t.apply_action(BlackjackMove::Stand).unwrap();
        t.apply_action(BlackjackMove::Stand).unwrap();

        let before = format!("{:?}", t);
        assert_eq!(
            t.apply_action(BlackjackMove::Stand),
            Err(GameError::DeckExhausted { needed: 1, remaining: 0 })
        );
        assert_eq!(format!("{:?}", t), before);
        assert!(matches!(t.resolve_round(), Err(GameError::DeckExhausted { .. })));
        assert_eq!(format!("{:?}", t), before);
        assert_eq!(t.stage, BlackjackStage::PlayerTurns);
        assert_eq!(t.current_index, 2);
        assert_eq!(t.players[3].hand.len(), 2);

        // a new shoe voids the round and hands the wagers back
        t.start_round(Deck::new_with_seed(9));
        assert_eq!(t.pot, 0);
        assert!(t.players[..3].iter().all(|p| p.chips == 200));
    }

    #[test]
    fn moves_outside_player_turns_are_rejected() {
        let mut t = BlackjackTable::new(lineup(), BlackjackConfig::default()).unwrap();
        t.start_round(Deck::new_with_seed(2));
        let before = format!("{:?}", t);
        assert!(matches!(
            t.apply_action(BlackjackMove::Hit),
            Err(GameError::WrongStage { .. })
        ));
        assert_eq!(format!("{:?}", t), before);
    }

    #[test]
    fn scan_skips_dealer_and_finished_seats() {
        let mut t = BlackjackTable::new(lineup(), BlackjackConfig::default()).unwrap();
        t.start_round(Deck::new_with_seed(3));
        t.place_initial_bets(None).unwrap();
        t.players[1].turn_complete = true;
        assert_eq!(t.next_player_index(Some(0)), 2);
        assert_eq!(t.next_player_index(Some(2)), 0);
        t.players[0].bust = true;
        t.players[2].turn_complete = true;
        assert_eq!(t.next_player_index(None), 3);
    }

    #[test]
    fn nobody_wagering_goes_straight_to_the_dealer() {
        let mut seats = lineup();
        for s in seats.iter_mut().filter(|s| s.id != "dealer") {
            s.chips = 0;
        }
        let mut t = BlackjackTable::new(seats, BlackjackConfig::default()).unwrap();
        t.start_round(Deck::new_with_seed(4));
        t.place_initial_bets(None).unwrap();
        t.deal_initial_cards().unwrap();
        assert_eq!(t.stage, BlackjackStage::Dealer);
        t.resolve_round().unwrap();
        assert_eq!(t.stage, BlackjackStage::RoundEnd);
        assert!(t.winners.is_empty());
    }
}
