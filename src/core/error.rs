//! Engine error type.
//!
//! Every variant is recoverable: the operation that returned it left the
//! game state untouched.

use thiserror::Error;

use super::player::Seat;
use super::state::Phase;
use crate::cards::CardId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("not {actual}'s turn, waiting on {expected}")]
    InvalidTurn { expected: Seat, actual: Seat },

    #[error("capture selection for {card} matches no valid combination")]
    InvalidCaptureSelection { card: CardId },

    #[error("{card} must capture, dropping it is not allowed")]
    CaptureRequired { card: CardId },

    #[error("{card} is not in hand")]
    CardNotInHand { card: CardId },

    #[error("{seat} has no cards to play")]
    NoMovesAvailable { seat: Seat },

    #[error("expected phase {expected:?}, game is in {actual:?}")]
    PhaseMismatch { expected: Phase, actual: Phase },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
