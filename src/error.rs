//! Error types

use crate::{Card, Side};

/// A rejected player action. The game state is unchanged, and the player may try again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The side is not expected to take this kind of action right now.
    #[error("not {0}'s turn")]
    NotYourTurn(Side),

    /// The side doesn't actually hold the card it attempted to play.
    #[error("{0} does not hold {1}")]
    CardNotInHand(Side, Card),

    /// The card's rank is not on the table.
    #[error("cannot throw in {0}")]
    IllegalThrowIn(Card),

    /// The defending card does not beat the open attack.
    #[error("{defense} does not beat {attack}")]
    CannotBeat { attack: Card, defense: Card },

    /// The defender already faces as many attacks as allowed.
    #[error("no more than {0} attacks this round")]
    ThrowInLimitExceeded(usize),

    /// There is nothing on the table to finish or take.
    #[error("no cards on the table")]
    NoCardsOnTable,

    /// The game has ended.
    #[error("game over")]
    GameOver,
}

impl Rejection {
    /// A short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::NotYourTurn(_) => "not-your-turn",
            Rejection::CardNotInHand(..) => "card-not-in-hand",
            Rejection::IllegalThrowIn(_) => "illegal-throw-in",
            Rejection::CannotBeat { .. } => "cannot-beat",
            Rejection::ThrowInLimitExceeded(_) => "throw-in-limit-exceeded",
            Rejection::NoCardsOnTable => "no-cards-on-table",
            Rejection::GameOver => "game-over",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("deck is missing cards")]
    IncompleteDeck,
    #[error("deal contains duplicate card {0}")]
    DuplicateCard(Card),
    #[error("invalid card id {0}")]
    InvalidCardId(u8),
    #[error("invalid log index {0}")]
    InvalidLogIndex(usize),
    #[error(transparent)]
    Rejected(#[from] Rejection),
}
