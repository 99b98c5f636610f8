//! Core engine types: seats, state, moves, RNG, configuration, errors.
//!
//! These are the building blocks shared by the rules engine and the
//! opponent.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveRecord};
pub use config::GameConfig;
pub use error::EngineError;
pub use player::{Hand, PlayerState, Seat, SeatMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Phase};
