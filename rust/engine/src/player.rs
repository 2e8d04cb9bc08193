use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Represents a player action during a hold'em betting round.
/// Bet and raise sizes are the amount added *on top of* the call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if nothing to call)
    Check,
    /// Call the current bet, or go all-in short
    Call,
    /// Open the betting by the given size
    Bet(u32),
    /// Raise the current bet by the given size
    Raise(u32),
    /// Put the whole stack in
    AllIn,
}

/// Seat description handed to a table when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub id: String,
    pub name: String,
    pub is_human: bool,
    pub chips: u32,
}

impl SeatConfig {
    pub fn human(name: &str, chips: u32) -> Self {
        Self {
            id: "player".to_string(),
            name: name.to_string(),
            is_human: true,
            chips,
        }
    }

    pub fn ai(index: usize, chips: u32) -> Self {
        Self {
            id: format!("ai-{}", index),
            name: format!("AI {}", index),
            is_human: false,
            chips,
        }
    }
}

/// One seat at a hold'em table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldemPlayer {
    pub id: String,
    pub name: String,
    /// Stable position at the table
    pub seat_index: usize,
    pub is_human: bool,
    pub chips: u32,
    /// Hole cards for the current hand
    pub hand: Vec<Card>,
    /// Chips put in on the current street
    pub bet: u32,
    /// Chips put in over the whole hand
    pub total_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub acted_in_round: bool,
    /// Short label for the seat plate ("Call", "SB 10", "Win 140")
    pub status: String,
}

impl HoldemPlayer {
    pub fn new(seat: SeatConfig, seat_index: usize) -> Self {
        Self {
            id: seat.id,
            name: seat.name,
            seat_index,
            is_human: seat.is_human,
            chips: seat.chips,
            hand: Vec::with_capacity(2),
            bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            acted_in_round: false,
            status: String::new(),
        }
    }

    /// Unfolded, not all-in and holding chips.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.chips > 0
    }

    /// Moves up to `amount` chips from the stack into the current street's
    /// bet. Returns what was actually paid; an empty stack marks the seat all-in.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let spend = amount.min(self.chips);
        self.chips -= spend;
        self.bet += spend;
        self.total_bet += spend;
        if self.chips == 0 && spend > 0 {
            self.all_in = true;
        }
        spend
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_caps_at_stack_and_flags_all_in() {
        let mut p = HoldemPlayer::new(SeatConfig::ai(1, 15), 1);
        assert_eq!(p.pay(10), 10);
        assert!(!p.all_in);
        assert_eq!(p.pay(20), 5);
        assert!(p.all_in);
        assert_eq!(p.chips, 0);
        assert_eq!(p.bet, 15);
        assert_eq!(p.total_bet, 15);
        assert!(!p.can_act());
    }

    #[test]
    fn zero_payment_leaves_flags_alone() {
        let mut p = HoldemPlayer::new(SeatConfig::ai(2, 0), 2);
        assert_eq!(p.pay(0), 0);
        assert!(!p.all_in);
    }
}
