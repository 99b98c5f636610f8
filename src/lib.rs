//! # chkobba-engine
//!
//! Rules engine and computer opponent for Chkobba, the two-player Tunisian
//! fishing card game played with a 40-card deck.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: Every move is checked in full before any
//!    state changes. A rejected move leaves the game exactly as it was.
//!
//! 2. **Deterministic by seed**: All randomness (shuffles, opponent choices,
//!    thinking delays) flows through an explicit `GameRng`. The same seed and
//!    the same inputs replay the same game.
//!
//! 3. **Card identity**: Every card carries a deck-unique `CardId`; selections
//!    and captures are compared by identity, never by value.
//!
//! ## Architecture
//!
//! - **Single owner**: `Chkobba` owns the `GameState`. The opponent reads it
//!   and returns a move; it never mutates.
//!
//! - **Persistent history**: Move records live in an `im::Vector`, so
//!   cloning a state for inspection or replay is cheap.
//!
//! ## Modules
//!
//! - `core`: Seats, player state, moves, RNG, configuration, errors
//! - `cards`: Card values and the primitives the engine builds on
//! - `rules`: Capture search, round scoring and the game state machine
//! - `opponent`: Move scoring, card counting and difficulty tiers

pub mod core;
pub mod cards;
pub mod rules;
pub mod opponent;

// Re-export commonly used types
pub use crate::core::{
    Seat, SeatMap, Hand, PlayerState,
    GameRng, GameRngState,
    GameConfig, EngineError,
    Move, MoveRecord,
    GameState, Phase,
};

pub use crate::cards::{
    Card, CardId, Rank, Suit,
    CardPrimitives, ChkobbaRule, ClearContext, StandardCards,
};

pub use crate::rules::{
    Chkobba, GameResult, MoveOutcome, RoundSummary, RoundScore, Sweep,
    find_valid_captures, has_capture, score_round,
};

pub use crate::opponent::{
    Opponent, OpponentConfig, Difficulty, Candidate, ScoringDepth,
    SelectionPolicy, CardTracker,
};
