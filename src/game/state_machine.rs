//! Monty Hall game engine: stage transitions, choice validation, and
//! the payout handshake.
//!
//! The engine is a single long-lived state machine. Each external call
//! runs to completion before the next is observed; the only suspending
//! operation is the payout, which is fired by the dispatch layer and
//! finalized later through [`GameEngine::on_payout_complete`].

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use super::entities::{AccountId, Door, GameEvent, GameView, NearAmount, StageName};
use super::states::{FinalPick, FirstPick, PendingPayout, Ready};
use crate::context::CallContext;
use crate::payout::PayoutRequest;
use crate::rng::RandomSource;

/// Errors that abort an engine call with no state change.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("{player} is currently playing")]
    SessionInProgress { player: AccountId },
    #[error("playing costs {fee}")]
    InsufficientDeposit { fee: NearAmount },
    #[error("only this contract may call itself")]
    Unauthorized,
}

/// Engine configuration. The fee doubles as the pot floor.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    pub fee: NearAmount,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(NearAmount::ONE_NEAR)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(fee: NearAmount) -> Self {
        Self { fee }
    }
}

/// The session phase cursor, with the data that is defined in each
/// phase and nowhere else.
#[derive(Debug)]
pub enum Stage {
    /// No active session.
    Idle,
    Ready(Ready),
    FirstPick(FirstPick),
    FinalPick(FinalPick),
    /// Session over, payout scheduled but not yet confirmed. Treated
    /// like [`Stage::Idle`] by `start_game` and `make_turn`.
    PendingPayout(PendingPayout),
}

impl Stage {
    pub fn name(&self) -> StageName {
        match self {
            Stage::Idle => StageName::Idle,
            Stage::Ready(_) => StageName::Ready,
            Stage::FirstPick(_) => StageName::FirstPick,
            Stage::FinalPick(_) => StageName::FinalPick,
            Stage::PendingPayout(_) => StageName::PendingPayout,
        }
    }
}

/// The Monty Hall game engine.
///
/// Owns all mutable game state. Randomness and payouts are injected at
/// the seams: door draws come from a [`RandomSource`], and winning
/// transfers are handed to the dispatch layer as [`PayoutRequest`]s
/// rather than executed inline.
pub struct GameEngine {
    owner: AccountId,
    current_player: Option<AccountId>,
    pot: NearAmount,
    settings: GameSettings,
    stage: Stage,
    rng: Box<dyn RandomSource>,
    events: VecDeque<GameEvent>,
    payout_request: Option<PayoutRequest>,
}

impl GameEngine {
    pub fn new(owner: AccountId, settings: GameSettings, rng: Box<dyn RandomSource>) -> Self {
        Self {
            owner,
            current_player: None,
            // The pot starts at the floor value and only returns to it
            // after a payout is confirmed.
            pot: settings.fee,
            settings,
            stage: Stage::Idle,
            rng,
            events: VecDeque::new(),
            payout_request: None,
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn pot(&self) -> NearAmount {
        self.pot
    }

    pub fn fee(&self) -> NearAmount {
        self.settings.fee
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn current_player(&self) -> Option<&AccountId> {
        self.current_player.as_ref()
    }

    pub fn view(&self) -> GameView {
        GameView {
            owner: self.owner.clone(),
            current_player: self.current_player.clone(),
            pot: self.pot,
            fee: self.settings.fee,
            stage: self.stage.name(),
        }
    }

    /// Narrative events queued since the last drain.
    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// One-shot handoff of a scheduled winning transfer. The dispatch
    /// layer takes this after every mutating call and drives the
    /// asynchronous payout.
    pub fn take_payout_request(&mut self) -> Option<PayoutRequest> {
        self.payout_request.take()
    }

    /// Start a new session for the calling player.
    ///
    /// The attached deposit joins the pot, the caller occupies the
    /// player slot, and the engine immediately advances to the first
    /// pick (the setup turn needs no player input). A pending payout
    /// does not block a new session: deposits stack on the unpaid pot
    /// until the confirmation callback lands.
    pub fn start_game(&mut self, ctx: &CallContext) -> Result<(), GameError> {
        if let Some(player) = &self.current_player {
            return Err(GameError::SessionInProgress {
                player: player.clone(),
            });
        }
        if ctx.attached_deposit < self.settings.fee {
            return Err(GameError::InsufficientDeposit {
                fee: self.settings.fee,
            });
        }

        self.pot = self.pot.saturating_add(ctx.attached_deposit);
        self.current_player = Some(ctx.sender.clone());
        self.stage = Stage::Ready(Ready {});
        log::info!("{} started a session; pot is {}", ctx.sender, self.pot);

        self.make_turn(None);
        Ok(())
    }

    /// Advance the session by one turn.
    ///
    /// Behavior depends on the current stage:
    /// - idle / pending payout: soft no-op, emits a notice;
    /// - ready: draws the winning door and presents the three doors
    ///   (`choice` is ignored);
    /// - first pick: records `choice` (absent is accepted and makes
    ///   the round unwinnable), opens a goat door, and offers the
    ///   switch;
    /// - final pick: resolves win or lose, or rejects a choice that
    ///   matches neither option and leaves the stage unchanged for a
    ///   retry.
    pub fn make_turn(&mut self, choice: Option<Door>) {
        match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Idle => {
                self.events.push_back(GameEvent::NoActiveSession);
            }
            Stage::PendingPayout(pending) => {
                self.events.push_back(GameEvent::NoActiveSession);
                self.stage = Stage::PendingPayout(pending);
            }
            Stage::Ready(_) => {
                let winning_door = self.draw_winning_door();
                self.events
                    .push_back(GameEvent::DoorsPresented { pot: self.pot });
                self.stage = Stage::FirstPick(FirstPick { winning_door });
            }
            Stage::FirstPick(state) => {
                let first_choice = choice;
                let can_open: Vec<Door> = Door::ALL
                    .into_iter()
                    .filter(|door| *door != state.winning_door && Some(*door) != first_choice)
                    .collect();
                let idx = self.rng.next_uniform(0, (can_open.len() - 1) as u32) as usize;
                let opened_door = can_open[idx.min(can_open.len() - 1)];
                let switch_offer =
                    first_choice.map(|first| Door::remaining(first, opened_door));

                self.events.push_back(GameEvent::GoatRevealed {
                    first_choice,
                    opened_door,
                    switch_offer,
                });
                self.stage = Stage::FinalPick(FinalPick {
                    winning_door: state.winning_door,
                    first_choice,
                    opened_door,
                    switch_offer,
                });
            }
            Stage::FinalPick(state) => {
                let accepted = match choice {
                    Some(door)
                        if Some(door) == state.first_choice
                            || Some(door) == state.switch_offer =>
                    {
                        Some(door)
                    }
                    _ => None,
                };
                let Some(final_choice) = accepted else {
                    self.events.push_back(GameEvent::ChoiceRejected {
                        choice,
                        opened_door: state.opened_door,
                    });
                    self.stage = Stage::FinalPick(state);
                    return;
                };

                self.events.push_back(GameEvent::DoorsOpened {
                    winning_door: state.winning_door,
                    final_choice,
                });
                if final_choice == state.winning_door {
                    let pending = self.win();
                    self.reset();
                    if let Some(pending) = pending {
                        self.stage = Stage::PendingPayout(pending);
                    }
                } else {
                    self.lose();
                    self.reset();
                }
            }
        }
    }

    /// Clear all session-scoped fields. Idempotent; never touches the
    /// pot, which survives until a payout is confirmed or the next
    /// session stacks on top of it.
    pub fn reset(&mut self) {
        self.current_player = None;
        self.stage = Stage::Idle;
    }

    /// Payout confirmation callback. Only the engine's own account may
    /// deliver it; anyone else gets [`GameError::Unauthorized`] and no
    /// state changes.
    ///
    /// This is the only operation that shrinks the pot. It forces the
    /// engine idle even if a second session was started inside the
    /// payout window; that session's deposit is absorbed by the floor
    /// reset. Callers relying on the pot as "funds owed" must account
    /// for this window.
    pub fn on_payout_complete(&mut self, ctx: &CallContext) -> Result<(), GameError> {
        if !ctx.is_self_call() {
            return Err(GameError::Unauthorized);
        }

        self.current_player = None;
        self.stage = Stage::Idle;
        self.pot = self.settings.fee;
        self.events.push_back(GameEvent::GameOver);
        log::info!("payout confirmed; pot reset to {}", self.pot);
        Ok(())
    }

    fn draw_winning_door(&mut self) -> Door {
        match Door::from_number(self.rng.next_uniform(1, 3) as u8) {
            Some(door) => door,
            // Out-of-range draws clamp to the first door.
            None => Door::One,
        }
    }

    fn win(&mut self) -> Option<PendingPayout> {
        let player = self.current_player.clone()?;
        self.events.push_back(GameEvent::Won {
            player: player.clone(),
            amount: self.pot,
        });
        self.payout_request = Some(PayoutRequest {
            to: player.clone(),
            amount: self.pot,
        });
        log::info!("scheduling payout of {} to {}", self.pot, player);
        Some(PendingPayout {
            recipient: player,
            amount: self.pot,
        })
    }

    fn lose(&mut self) {
        self.events.push_back(GameEvent::Lost {
            player: self.current_player.clone(),
            pot: self.pot,
        });
    }
}
