//! Serialized call dispatch for the game engine.
//!
//! The engine itself is synchronous and exclusively owned; this module
//! supplies the "one call at a time" execution model the engine relies
//! on, plus the asynchronous half of the payout handshake.

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{EngineActor, EngineCallError, EngineHandle};
pub use config::DispatchConfig;
pub use messages::EngineMessage;
