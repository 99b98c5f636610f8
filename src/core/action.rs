//! Move representation: a played card plus the table cards it takes.
//!
//! A move with no captured cards is a drop. Captured cards are identified
//! by id and compared as a set, so their order carries no meaning.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Seat;
use crate::cards::CardId;

/// A single play.
///
/// ```
/// use chkobba_engine::cards::CardId;
/// use chkobba_engine::core::Move;
///
/// let drop = Move::drop(CardId(4));
/// assert!(drop.is_drop());
///
/// let capture = Move::capture(CardId(6), &[CardId(12), CardId(23)]);
/// assert_eq!(capture.captured.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Card played from hand.
    pub card: CardId,

    /// Table cards taken. Empty for a drop.
    pub captured: SmallVec<[CardId; 4]>,
}

impl Move {
    /// Play a card onto the table.
    #[must_use]
    pub fn drop(card: CardId) -> Self {
        Self {
            card,
            captured: SmallVec::new(),
        }
    }

    /// Play a card and take the given table cards.
    #[must_use]
    pub fn capture(card: CardId, captured: &[CardId]) -> Self {
        Self {
            card,
            captured: SmallVec::from_slice(captured),
        }
    }

    #[must_use]
    pub fn is_drop(&self) -> bool {
        self.captured.is_empty()
    }
}

/// A played move with its context, kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub seat: Seat,
    pub mv: Move,
    pub round: u32,
    /// Position within the round, starting at 1.
    pub sequence: u32,
    pub chkobba: bool,
}
