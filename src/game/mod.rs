//! Monty Hall game core: entities, per-stage states, and the engine.

pub mod entities;
pub mod state_machine;
pub mod states;

pub use state_machine::{GameEngine, GameError, GameSettings, Stage};
