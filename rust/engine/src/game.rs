//! Hold'em table: blinds, betting rounds, street changes and showdown.
//!
//! Every transition is a `&mut self` method. Actions are validated before
//! anything is touched, so a rejected action leaves the table as it was.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::determine_winners;
use crate::holdem::{complete_board, deal_hole_cards, deal_street};
use crate::logger::ActionRecord;
use crate::player::{HoldemPlayer, PlayerAction, SeatConfig};
use crate::pot::{build_side_pots, split_pot, PotAward};
use crate::rules::{validate_action, ValidatedAction};

pub const SMALL_BLIND: u32 = 10;
pub const BIG_BLIND: u32 = 20;

/// Cards a hand can still need after the hole cards: three burns plus five board cards.
const BOARD_CARDS_WITH_BURNS: usize = 8;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldemStage {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl HoldemStage {
    fn next(self) -> Self {
        match self {
            HoldemStage::Preflop => HoldemStage::Flop,
            HoldemStage::Flop => HoldemStage::Turn,
            HoldemStage::Turn => HoldemStage::River,
            HoldemStage::River | HoldemStage::Showdown => HoldemStage::Showdown,
        }
    }
}

impl fmt::Display for HoldemStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HoldemStage::Preflop => "preflop",
            HoldemStage::Flop => "flop",
            HoldemStage::Turn => "turn",
            HoldemStage::River => "river",
            HoldemStage::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct HoldemConfig {
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for HoldemConfig {
    fn default() -> Self {
        Self {
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
        }
    }
}

/// What the seat to act may do right now.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegalActions {
    pub to_call: u32,
    pub can_check: bool,
    pub can_call: bool,
    /// Smallest raise-by size the engine will honour
    pub min_raise: u32,
    /// Largest raise-by size the stack covers after calling; 0 means no raise
    pub max_raise: u32,
}

#[derive(Debug, Clone)]
pub struct HoldemTable {
    pub players: Vec<HoldemPlayer>,
    pub deck: Deck,
    pub community: Vec<Card>,
    pub stage: HoldemStage,
    pub dealer_index: usize,
    pub action_index: usize,
    pub current_bet: u32,
    pub min_raise: u32,
    pub pot: u32,
    pub winners: Vec<PotAward>,
    pub hand_id: u64,
    pub small_blind_index: Option<usize>,
    pub big_blind_index: Option<usize>,
    /// The seat to act is human and the table is waiting on it
    pub awaiting_input: bool,
    pub config: HoldemConfig,
    pub history: Vec<ActionRecord>,
}

impl HoldemTable {
    /// Seats the players in order. The dealer button starts on the last seat
    /// so the first hand deals with seat 0 on the button.
    pub fn new(seats: Vec<SeatConfig>, config: HoldemConfig) -> Result<Self, GameError> {
        if seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let dealer_index = seats.len() - 1;
        let players = seats
            .into_iter()
            .enumerate()
            .map(|(idx, seat)| HoldemPlayer::new(seat, idx))
            .collect();
        Ok(Self {
            players,
            deck: Deck::from_cards(Vec::new()),
            community: Vec::with_capacity(5),
            stage: HoldemStage::Preflop,
            dealer_index,
            action_index: 0,
            current_bet: 0,
            min_raise: config.big_blind,
            pot: 0,
            winners: Vec::new(),
            hand_id: 0,
            small_blind_index: None,
            big_blind_index: None,
            awaiting_input: false,
            config,
            history: Vec::new(),
        })
    }

    /// Starts the next hand with `deck`: rotates the button, benches empty
    /// stacks, deals hole cards, posts blinds and finds the first actor.
    ///
    /// With fewer than two funded seats the table is reset but nothing is
    /// dealt; `is_hand_live` stays false.
    pub fn start_hand(&mut self, deck: Deck) -> Result<(), GameError> {
        let seats = self.players.len();
        let funded = self.players.iter().filter(|p| p.chips > 0).count();
        if funded >= 2 {
            deck.ensure(seats * 2 + BOARD_CARDS_WITH_BURNS)?;
        }

        self.hand_id += 1;
        self.deck = deck;
        self.community.clear();
        self.stage = HoldemStage::Preflop;
        self.winners.clear();
        self.history.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.small_blind_index = None;
        self.big_blind_index = None;
        self.awaiting_input = false;
        self.dealer_index = (self.dealer_index + 1) % seats;
        for p in self.players.iter_mut() {
            let out = p.chips == 0;
            p.bet = 0;
            p.total_bet = 0;
            p.hand.clear();
            p.folded = out;
            p.all_in = out;
            p.acted_in_round = false;
            p.status = if out { "Out".to_string() } else { String::new() };
        }
        if funded < 2 {
            debug!(hand_id = self.hand_id, funded, "not enough funded seats to deal");
            return Ok(());
        }

        let hands = deal_hole_cards(&mut self.deck, seats)?;
        for (p, hand) in self.players.iter_mut().zip(hands) {
            p.hand = hand;
        }
        info!(
            hand_id = self.hand_id,
            dealer = self.dealer_index,
            seats,
            "hand started"
        );
        self.post_blinds()?;
        self.prepare_next_action();
        Ok(())
    }

    /// Posts the small blind on the first funded seat after the button and
    /// the big blind on the next one. Short stacks post what they have.
    pub fn post_blinds(&mut self) -> Result<(), GameError> {
        let sb = self
            .next_active_index(self.dealer_index)
            .ok_or(GameError::NotEnoughPlayers)?;
        let bb = self
            .next_active_index(sb)
            .filter(|&bb| bb != sb)
            .ok_or(GameError::NotEnoughPlayers)?;

        let sb_paid = self.pay(sb, self.config.small_blind);
        self.players[sb].status = format!("SB {}", sb_paid);
        let bb_paid = self.pay(bb, self.config.big_blind);
        self.players[bb].status = format!("BB {}", bb_paid);

        self.current_bet = self.players[bb].bet.max(self.players[sb].bet);
        self.small_blind_index = Some(sb);
        self.big_blind_index = Some(bb);
        self.action_index = self.next_active_index(bb).unwrap_or(bb);
        self.reset_acted_flags();
        debug!(sb, bb, sb_paid, bb_paid, "blinds posted");
        Ok(())
    }

    /// Next seat after `from`, wrapping, that is unfolded, not all-in and has
    /// chips. `from` itself is considered last.
    pub fn next_active_index(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&idx| self.players[idx].can_act())
    }

    /// Every unfolded seat that is not all-in has acted and matched the
    /// current bet. True when no such seat exists.
    pub fn all_active_matched(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.folded && !p.all_in)
            .all(|p| p.acted_in_round && p.bet == self.current_bet)
    }

    /// Closes the current street: deals the next one, or goes to showdown
    /// after the river, then moves on to whoever has to act.
    pub fn advance_stage(&mut self) -> Result<(), GameError> {
        self.require_live()?;
        self.open_next_street()?;
        self.prepare_next_action();
        Ok(())
    }

    /// Chips the seat still owes to stay in.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map_or(0, |p| self.current_bet.saturating_sub(p.bet))
    }

    /// Options for `seat`, or `None` when it is not that seat's turn.
    pub fn legal_actions(&self, seat: usize) -> Option<LegalActions> {
        if !self.is_hand_live() || seat != self.action_index {
            return None;
        }
        let p = self.players.get(seat)?;
        if !p.can_act() {
            return None;
        }
        let to_call = self.to_call(seat);
        Some(LegalActions {
            to_call,
            can_check: to_call == 0,
            can_call: to_call > 0,
            min_raise: self.min_raise,
            max_raise: p.chips.saturating_sub(to_call),
        })
    }

    /// A hand has been dealt and has not reached showdown.
    pub fn is_hand_live(&self) -> bool {
        self.stage != HoldemStage::Showdown && self.players.iter().any(|p| !p.hand.is_empty())
    }

    pub fn current_player(&self) -> Option<&HoldemPlayer> {
        if self.is_hand_live() {
            self.players.get(self.action_index)
        } else {
            None
        }
    }

    /// Applies `action` for the seat whose turn it is.
    ///
    /// On `Err` nothing has changed.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<ValidatedAction, GameError> {
        self.require_live()?;
        let seat = self.action_index;
        let player = self.players.get(seat).ok_or(GameError::NoActingSeat)?;
        if player.folded {
            return Err(GameError::PlayerAlreadyFolded);
        }
        if !player.can_act() {
            return Err(GameError::NoActingSeat);
        }
        let to_call = self.current_bet.saturating_sub(player.bet);
        let validated = validate_action(player.chips, to_call, self.min_raise, action)?;

        let paid = match validated {
            ValidatedAction::Fold => {
                self.players[seat].folded = true;
                self.players[seat].status = "Fold".to_string();
                0
            }
            ValidatedAction::Check => {
                self.players[seat].status = "Check".to_string();
                0
            }
            ValidatedAction::Call(amount) => {
                let paid = self.pay(seat, amount);
                self.players[seat].status = "Call".to_string();
                paid
            }
            ValidatedAction::Bet(amount) | ValidatedAction::Raise(amount) => {
                let paid = self.pay(seat, amount);
                self.players[seat].status = if matches!(validated, ValidatedAction::Bet(_)) {
                    "Bet".to_string()
                } else {
                    "Raise".to_string()
                };
                self.raise_to(seat, paid, to_call);
                paid
            }
            ValidatedAction::AllIn(amount) => {
                let paid = self.pay(seat, amount);
                self.players[seat].status = "All-in".to_string();
                if self.players[seat].bet > self.current_bet {
                    self.raise_to(seat, paid, to_call);
                }
                paid
            }
        };
        self.players[seat].acted_in_round = true;
        self.history.push(ActionRecord {
            seat,
            street: self.stage,
            action,
            paid,
        });
        debug!(seat, street = %self.stage, ?validated, pot = self.pot, "action applied");

        if let Some(next) = self.next_active_index(seat) {
            self.action_index = next;
        }
        self.prepare_next_action();
        Ok(validated)
    }

    /// Moves the action forward until a seat has a decision to make or the
    /// hand is over. Streets that nobody can bet on are run out.
    pub fn prepare_next_action(&mut self) {
        // at most one pass per street plus the showdown
        for _ in 0..=4 {
            if !self.is_hand_live() {
                self.awaiting_input = false;
                return;
            }
            let unfolded = self.players.iter().filter(|p| !p.folded).count();
            if unfolded <= 1 {
                self.finish();
                return;
            }
            let actors: Vec<usize> = (0..self.players.len())
                .filter(|&i| self.players[i].can_act())
                .collect();
            let lone_actor_settled = actors.len() == 1
                && self.players[actors[0]].bet >= self.current_bet;
            if self.all_active_matched() || actors.is_empty() || lone_actor_settled {
                if self.stage == HoldemStage::River {
                    self.finish();
                    return;
                }
                if self.open_next_street().is_err() {
                    self.finish();
                    return;
                }
                continue;
            }
            if !self.players[self.action_index].can_act() {
                if let Some(next) = self.next_active_index(self.action_index) {
                    self.action_index = next;
                }
            }
            let actor = &mut self.players[self.action_index];
            self.awaiting_input = actor.is_human;
            if actor.is_human {
                if self.stage == HoldemStage::Preflop && !actor.acted_in_round {
                    actor.status = "Your move".to_string();
                }
            } else if actor.status.is_empty() {
                actor.status = "Thinking".to_string();
            }
            return;
        }
    }

    /// Completes the board, builds the pots and pays each one to its best
    /// unfolded contributors.
    pub fn go_to_showdown(&mut self) -> Result<(), GameError> {
        self.require_live()?;
        complete_board(&mut self.deck, &mut self.community)?;

        let mut layers: Vec<(u32, Vec<usize>)> = Vec::new();
        let mut carry = 0;
        for pot in build_side_pots(&self.players) {
            let eligible: Vec<usize> = pot
                .contributors
                .iter()
                .copied()
                .filter(|&i| !self.players[i].folded)
                .collect();
            // a dead tier or one with the same live seats joins the layer below
            let joins_previous = layers
                .last()
                .is_some_and(|last| eligible.is_empty() || last.1 == eligible);
            if joins_previous {
                if let Some(last) = layers.last_mut() {
                    last.0 += pot.amount;
                }
            } else if eligible.is_empty() {
                carry += pot.amount;
            } else {
                layers.push((pot.amount + carry, eligible));
                carry = 0;
            }
        }
        if carry > 0 {
            let unfolded: Vec<usize> = (0..self.players.len())
                .filter(|&i| !self.players[i].folded)
                .collect();
            if !unfolded.is_empty() {
                layers.push((carry, unfolded));
            }
        }

        let seats = self.players.len();
        let mut awards = Vec::with_capacity(layers.len());
        for (amount, eligible) in layers {
            let winners = determine_winners(
                |i| self.players[i].hand.as_slice(),
                &self.community,
                &eligible,
            );
            for (seat, share) in split_pot(amount, &winners, self.dealer_index, seats) {
                let p = &mut self.players[seat];
                p.add_chips(share);
                p.status = format!("Win {}", share);
            }
            awards.push(PotAward { amount, winners });
        }

        info!(hand_id = self.hand_id, pot = self.pot, ?awards, "showdown");
        self.pot = 0;
        self.winners = awards;
        self.stage = HoldemStage::Showdown;
        self.awaiting_input = false;
        Ok(())
    }

    /// Chips at the table, stacks plus the pot.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.chips).sum::<u32>() + self.pot
    }

    pub fn reset_acted_flags(&mut self) {
        for p in self.players.iter_mut() {
            p.acted_in_round = p.folded || p.all_in;
        }
    }

    fn require_live(&self) -> Result<(), GameError> {
        if self.stage == HoldemStage::Showdown {
            return Err(GameError::HandAlreadyComplete);
        }
        if !self.is_hand_live() {
            return Err(GameError::WrongStage {
                stage: "no hand dealt".to_string(),
            });
        }
        Ok(())
    }

    fn pay(&mut self, seat: usize, amount: u32) -> u32 {
        let paid = self.players[seat].pay(amount);
        self.pot += paid;
        paid
    }

    fn raise_to(&mut self, seat: usize, paid: u32, to_call: u32) {
        self.current_bet = self.current_bet.max(self.players[seat].bet);
        self.min_raise = self.min_raise.max(paid.saturating_sub(to_call));
        for (idx, p) in self.players.iter_mut().enumerate() {
            if idx != seat && !p.folded && !p.all_in {
                p.acted_in_round = false;
            }
        }
    }

    fn open_next_street(&mut self) -> Result<(), GameError> {
        if self.stage == HoldemStage::River {
            return self.go_to_showdown();
        }
        deal_street(&mut self.deck, &mut self.community)?;
        self.stage = self.stage.next();
        for p in self.players.iter_mut() {
            p.bet = 0;
            p.acted_in_round = p.folded || p.all_in;
            if !p.folded && !p.all_in {
                p.status.clear();
            }
        }
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.action_index = self
            .next_active_index(self.dealer_index)
            .unwrap_or(self.action_index);
        debug!(street = %self.stage, board = self.community.len(), "street dealt");
        Ok(())
    }

    fn finish(&mut self) {
        // the deck was checked for a full board when the hand started
        if let Err(err) = self.go_to_showdown() {
            debug!(%err, "showdown skipped");
        }
    }
}
