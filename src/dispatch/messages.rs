//! Engine actor message types.

use tokio::sync::oneshot;

use crate::context::CallContext;
use crate::game::entities::{Door, GameEvent, GameView};
use crate::game::state_machine::GameError;

/// Messages that can be sent to an [`EngineActor`].
///
/// Every variant that mutates the engine carries the narrative events
/// emitted during the call back to the caller.
///
/// [`EngineActor`]: super::actor::EngineActor
#[derive(Debug)]
pub enum EngineMessage {
    /// Start a session for the caller described by `ctx`.
    StartGame {
        ctx: CallContext,
        response: oneshot::Sender<Result<Vec<GameEvent>, GameError>>,
    },

    /// Advance the active session by one turn.
    MakeTurn {
        choice: Option<Door>,
        response: oneshot::Sender<Vec<GameEvent>>,
    },

    /// Clear the active session.
    Reset {
        response: oneshot::Sender<Vec<GameEvent>>,
    },

    /// Get a read-only snapshot of the engine.
    GetView {
        response: oneshot::Sender<GameView>,
    },

    /// Payout confirmation. The dispatch layer self-addresses these
    /// (`response: None`); external deliveries carry the caller's own
    /// identity in `ctx` and are rejected by the engine.
    PayoutComplete {
        ctx: CallContext,
        response: Option<oneshot::Sender<Result<Vec<GameEvent>, GameError>>>,
    },
}
