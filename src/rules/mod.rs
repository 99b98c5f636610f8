//! Chkobba rules: capture resolution, round scoring and the state machine.
//!
//! - `capture`: which table subsets a played card can take
//! - `scoring`: per-round awards from the captured piles
//! - `engine`: dealing, turn order, move execution and round settlement
//!
//! The opponent depends on `capture` and `scoring` but never mutates
//! state; only `Chkobba` does.

pub mod capture;
pub mod engine;
pub mod scoring;

pub use capture::{find_valid_captures, has_capture, table_value};
pub use engine::{Chkobba, GameResult, MoveOutcome, RoundSummary, Sweep, CLEARABLE_BY_ONE};
pub use scoring::{score_round, PileTally, RoundScore};
