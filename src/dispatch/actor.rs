//! Engine actor: owns the game engine and processes one call at a time.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{
    mpsc::{self, WeakSender},
    oneshot,
};

use super::config::DispatchConfig;
use super::messages::EngineMessage;
use crate::context::CallContext;
use crate::game::entities::{AccountId, Door, GameEvent, GameView, NearAmount};
use crate::game::state_machine::{GameEngine, GameError};
use crate::payout::PayoutService;

/// Errors returned by [`EngineHandle`] calls.
#[derive(Debug, Error)]
pub enum EngineCallError {
    /// The engine rejected the call.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The engine actor has shut down.
    #[error("engine is closed")]
    Closed,
}

/// Cloneable front end for sending calls to an [`EngineActor`].
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineMessage>,
    account: AccountId,
}

impl EngineHandle {
    /// The engine's own account identity.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Start a session as `player` with `deposit` attached.
    pub async fn start_game(
        &self,
        player: AccountId,
        deposit: NearAmount,
    ) -> Result<Vec<GameEvent>, EngineCallError> {
        let ctx = CallContext::call(player, self.account.clone(), deposit);
        let (response, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::StartGame { ctx, response })
            .await
            .map_err(|_| EngineCallError::Closed)?;
        rx.await
            .map_err(|_| EngineCallError::Closed)?
            .map_err(Into::into)
    }

    /// Advance the active session by one turn.
    pub async fn make_turn(
        &self,
        choice: Option<Door>,
    ) -> Result<Vec<GameEvent>, EngineCallError> {
        let (response, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::MakeTurn { choice, response })
            .await
            .map_err(|_| EngineCallError::Closed)?;
        rx.await.map_err(|_| EngineCallError::Closed)
    }

    /// Clear the active session.
    pub async fn reset(&self) -> Result<Vec<GameEvent>, EngineCallError> {
        let (response, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::Reset { response })
            .await
            .map_err(|_| EngineCallError::Closed)?;
        rx.await.map_err(|_| EngineCallError::Closed)
    }

    /// Read-only snapshot of the engine.
    pub async fn view(&self) -> Result<GameView, EngineCallError> {
        let (response, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::GetView { response })
            .await
            .map_err(|_| EngineCallError::Closed)?;
        rx.await.map_err(|_| EngineCallError::Closed)
    }

    /// Deliver a payout confirmation as `caller`.
    ///
    /// The engine accepts this only when the predecessor is its own
    /// account, which internal confirmations satisfy via
    /// [`CallContext::self_call`]. Authenticating that `caller` really
    /// is who it claims to be is the transport's job, not this
    /// crate's.
    pub async fn on_payout_complete(
        &self,
        caller: AccountId,
    ) -> Result<Vec<GameEvent>, EngineCallError> {
        let ctx = CallContext::call(caller, self.account.clone(), NearAmount::ZERO);
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::PayoutComplete {
                ctx,
                response: Some(tx),
            })
            .await
            .map_err(|_| EngineCallError::Closed)?;
        rx.await
            .map_err(|_| EngineCallError::Closed)?
            .map_err(Into::into)
    }
}

/// Actor owning a [`GameEngine`] and a payout service.
///
/// Messages are processed strictly one at a time, which is the
/// concurrency model the engine assumes. Winning transfers are fired
/// on a background task; the confirmation comes back through the
/// actor's own mailbox as a self-addressed [`EngineMessage::PayoutComplete`].
pub struct EngineActor {
    engine: GameEngine,
    account: AccountId,
    inbox: mpsc::Receiver<EngineMessage>,
    /// Weak self-sender for payout confirmations, so in-flight payouts
    /// never keep a closed engine alive.
    self_sender: WeakSender<EngineMessage>,
    payouts: Arc<dyn PayoutService>,
}

impl EngineActor {
    /// Build an actor and its handle. The caller decides where the
    /// actor runs; most callers want [`EngineActor::spawn`].
    pub fn new(
        engine: GameEngine,
        account: AccountId,
        payouts: Arc<dyn PayoutService>,
        config: DispatchConfig,
    ) -> (Self, EngineHandle) {
        let (sender, inbox) = mpsc::channel(config.mailbox_capacity);
        let actor = Self {
            engine,
            account: account.clone(),
            inbox,
            self_sender: sender.downgrade(),
            payouts,
        };
        let handle = EngineHandle { sender, account };
        (actor, handle)
    }

    /// Spawn the actor onto the current tokio runtime.
    pub fn spawn(
        engine: GameEngine,
        account: AccountId,
        payouts: Arc<dyn PayoutService>,
        config: DispatchConfig,
    ) -> EngineHandle {
        let (actor, handle) = Self::new(engine, account, payouts, config);
        tokio::spawn(actor.run());
        handle
    }

    /// Run the engine event loop until every handle is dropped.
    pub async fn run(mut self) {
        log::info!("engine {} dispatch starting", self.account);

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
        }

        log::info!("engine {} dispatch closed", self.account);
    }

    fn handle_message(&mut self, message: EngineMessage) {
        match message {
            EngineMessage::StartGame { ctx, response } => {
                let result = self.engine.start_game(&ctx).map(|()| self.drain());
                let _ = response.send(result);
            }
            EngineMessage::MakeTurn { choice, response } => {
                self.engine.make_turn(choice);
                let events = self.drain();
                self.schedule_pending_payout();
                let _ = response.send(events);
            }
            EngineMessage::Reset { response } => {
                self.engine.reset();
                let _ = response.send(self.drain());
            }
            EngineMessage::GetView { response } => {
                let _ = response.send(self.engine.view());
            }
            EngineMessage::PayoutComplete { ctx, response } => {
                let result = self.engine.on_payout_complete(&ctx).map(|()| self.drain());
                match response {
                    Some(tx) => {
                        let _ = tx.send(result);
                    }
                    None => {
                        if let Err(err) = result {
                            log::error!("self-addressed payout confirmation rejected: {err}");
                        }
                    }
                }
            }
        }
    }

    fn drain(&mut self) -> Vec<GameEvent> {
        self.engine.drain_events().into_iter().collect()
    }

    /// Fire the transfer for a freshly scheduled winning payout and
    /// arrange for the confirmation to come back through the mailbox.
    fn schedule_pending_payout(&mut self) {
        let Some(request) = self.engine.take_payout_request() else {
            return;
        };

        let payouts = Arc::clone(&self.payouts);
        let sender = self.self_sender.clone();
        let account = self.account.clone();
        tokio::spawn(async move {
            match payouts.transfer(&request.to, request.amount).await {
                Ok(receipt) => {
                    log::info!(
                        "payout {} of {} to {} confirmed",
                        receipt.id,
                        receipt.amount,
                        receipt.to
                    );
                    let Some(sender) = sender.upgrade() else {
                        log::error!("engine closed before payout confirmation was delivered");
                        return;
                    };
                    let message = EngineMessage::PayoutComplete {
                        ctx: CallContext::self_call(account),
                        response: None,
                    };
                    if sender.send(message).await.is_err() {
                        log::error!("engine closed before payout confirmation was delivered");
                    }
                }
                Err(err) => {
                    // No retry: an unconfirmed payout leaves the pot at
                    // its pre-reset value.
                    log::error!("payout of {} to {} failed: {err}", request.amount, request.to);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::StageName;
    use crate::game::state_machine::GameSettings;
    use crate::payout::LedgerPayoutService;
    use crate::rng::SequenceSource;

    fn spawn_engine(draws: impl IntoIterator<Item = u32>) -> EngineHandle {
        let account = AccountId::new("game.near");
        let engine = GameEngine::new(
            AccountId::new("owner.near"),
            GameSettings::default(),
            Box::new(SequenceSource::new(draws)),
        );
        EngineActor::spawn(
            engine,
            account.clone(),
            Arc::new(LedgerPayoutService::new()),
            DispatchConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_handle_round_trips_view() {
        let handle = spawn_engine([1]);
        let view = handle.view().await.unwrap();
        assert_eq!(view.stage, StageName::Idle);
        assert_eq!(view.owner, AccountId::new("owner.near"));
    }

    #[tokio::test]
    async fn test_start_game_error_propagates() {
        let handle = spawn_engine([1]);
        let err = handle
            .start_game(AccountId::new("alice.near"), NearAmount::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineCallError::Game(GameError::InsufficientDeposit { .. })
        ));
    }

    #[tokio::test]
    async fn test_external_payout_confirmation_rejected() {
        let handle = spawn_engine([1]);
        let err = handle
            .on_payout_complete(AccountId::new("mallory.near"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineCallError::Game(GameError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_start_game_returns_narrative_events() {
        let handle = spawn_engine([3]);
        let events = handle
            .start_game(AccountId::new("alice.near"), NearAmount::ONE_NEAR)
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::DoorsPresented { .. }));
    }
}
