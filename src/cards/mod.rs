//! Card system: card values and the primitives the engine builds on.
//!
//! ## Key Types
//!
//! - `Card`: Immutable suit/rank record with a deck-unique `CardId`
//! - `CardPrimitives`: Deck construction, shuffling, display and predicates
//! - `StandardCards`: Default primitives with a configurable `ChkobbaRule`

pub mod card;
pub mod primitives;

pub use card::{Card, CardId, Rank, Suit};
pub use primitives::{
    standard_deck, CardPrimitives, ChkobbaRule, ClearContext, StandardCards, DECK_SIZE,
};
