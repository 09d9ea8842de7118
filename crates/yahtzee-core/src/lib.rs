//! Yahtzee rules: category scoring, score sheets and the turn state machine.
//!
//! Everything here is synchronous and free of I/O. Randomness is injected
//! through [`rand::Rng`] so callers control seeding.

pub mod dice;
pub mod error;
pub mod game;
pub mod history;
pub mod player;
pub mod scoring;
pub mod settings;
