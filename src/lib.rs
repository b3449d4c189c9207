//! # Monty Hall
//!
//! A turn-based Monty Hall wagering game engine built around an
//! explicitly owned finite state machine.
//!
//! One long-lived [`GameEngine`] holds a shared pot, accepts a single
//! active player at a time, and resolves each session through five
//! phases:
//!
//! - **Idle**: no active session
//! - **Ready**: session started, doors not yet presented
//! - **FirstPick**: winning door drawn and hidden, awaiting the first
//!   choice
//! - **FinalPick**: goat door opened, awaiting the stay-or-switch
//!   decision
//! - **PendingPayout**: a win resolved, transfer scheduled but not yet
//!   confirmed
//!
//! The engine's collaborators are injected at the seams: door draws
//! come from a [`RandomSource`], winning transfers go through an
//! asynchronous [`PayoutService`], and each call carries a
//! [`CallContext`] naming the caller and any attached deposit. The
//! [`dispatch`] module supplies the actor that serializes calls and
//! closes the payout handshake with a self-addressed confirmation.
//!
//! ## Example
//!
//! ```
//! use monty_hall::{
//!     AccountId, CallContext, GameEngine, GameSettings, NearAmount, StdRandomSource,
//! };
//!
//! let mut engine = GameEngine::new(
//!     AccountId::new("owner.near"),
//!     GameSettings::default(),
//!     Box::new(StdRandomSource::new()),
//! );
//! let ctx = CallContext::call(
//!     AccountId::new("alice.near"),
//!     AccountId::new("game.near"),
//!     NearAmount::ONE_NEAR,
//! );
//! engine.start_game(&ctx).unwrap();
//! for event in engine.drain_events() {
//!     println!("{event}");
//! }
//! ```

/// Caller identity and attached value for one external call.
pub mod context;
/// Serialized call dispatch and the payout handshake driver.
pub mod dispatch;
/// Core game logic, entities, and the state machine.
pub mod game;
/// Asynchronous payout seam and the in-memory ledger.
pub mod payout;
/// Injectable randomness.
pub mod rng;

pub use context::CallContext;
pub use dispatch::{DispatchConfig, EngineActor, EngineCallError, EngineHandle, EngineMessage};
pub use game::{
    GameEngine, GameError, GameSettings, Stage,
    entities::{AccountId, Door, GameEvent, GameView, NearAmount, StageName},
    states,
};
pub use payout::{
    LedgerPayoutService, PayoutError, PayoutReceipt, PayoutRequest, PayoutService,
};
pub use rng::{RandomSource, SequenceSource, StdRandomSource};
