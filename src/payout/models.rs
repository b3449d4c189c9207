//! Payout data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::entities::{AccountId, NearAmount};

/// A winning transfer scheduled by the engine, waiting to be driven by
/// the dispatch layer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PayoutRequest {
    pub to: AccountId,
    pub amount: NearAmount,
}

/// Confirmation of a durably completed transfer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PayoutReceipt {
    pub id: Uuid,
    pub to: AccountId,
    pub amount: NearAmount,
    pub completed_at: DateTime<Utc>,
}

/// Entry direction
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Debit,
    Credit,
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryDirection::Debit => write!(f, "debit"),
            EntryDirection::Credit => write!(f, "credit"),
        }
    }
}

/// One ledger line recorded per transfer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub account: AccountId,
    pub amount: NearAmount,
    pub balance_after: NearAmount,
    pub direction: EntryDirection,
    pub created_at: DateTime<Utc>,
}
