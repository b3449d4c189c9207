//! Session state definitions for the Monty Hall FSM.
//!
//! Each struct holds exactly the fields that are defined during its
//! phase, so door and choice fields cannot exist while the engine is
//! idle.

use serde::{Deserialize, Serialize};

use crate::game::entities::{AccountId, Door, NearAmount};

/// Session started, doors not yet presented. Transient: the engine
/// advances out of this state within the same `start_game` call.
#[derive(Clone, Debug)]
pub struct Ready {}

/// Winning door drawn and hidden, waiting on the player's first pick.
#[derive(Clone, Debug)]
pub struct FirstPick {
    pub(crate) winning_door: Door,
}

impl FirstPick {
    pub fn winning_door(&self) -> Door {
        self.winning_door
    }
}

/// Goat door opened, waiting on the stay-or-switch decision.
///
/// `first_choice` and `switch_offer` are both absent when the player
/// declined to pick in stage 2; such a round can only be rejected at
/// this stage.
#[derive(Clone, Debug)]
pub struct FinalPick {
    pub(crate) winning_door: Door,
    pub(crate) first_choice: Option<Door>,
    pub(crate) opened_door: Door,
    pub(crate) switch_offer: Option<Door>,
}

impl FinalPick {
    pub fn winning_door(&self) -> Door {
        self.winning_door
    }

    pub fn first_choice(&self) -> Option<Door> {
        self.first_choice
    }

    pub fn opened_door(&self) -> Door {
        self.opened_door
    }

    pub fn switch_offer(&self) -> Option<Door> {
        self.switch_offer
    }
}

/// Session resolved as a win; the transfer has been scheduled but not
/// yet confirmed. The pot keeps its pre-payout value until the
/// confirmation callback lands.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PendingPayout {
    pub(crate) recipient: AccountId,
    pub(crate) amount: NearAmount,
}

impl PendingPayout {
    pub fn recipient(&self) -> &AccountId {
        &self.recipient
    }

    pub fn amount(&self) -> NearAmount {
        self.amount
    }
}
