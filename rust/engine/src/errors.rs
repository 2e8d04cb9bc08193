use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GameError {
    #[error("Deck exhausted: needed {needed} card(s), {remaining} remaining")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("Cannot check facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("At least two funded seats are required")]
    NotEnoughPlayers,
    #[error("Dealer seat {index} is outside a table of {seats} seats")]
    DealerSeat { index: usize, seats: usize },
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Action not allowed during {stage}")]
    WrongStage { stage: String },
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("No seat can act")]
    NoActingSeat,
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}
