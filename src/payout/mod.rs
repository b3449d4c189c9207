//! Asynchronous payout seam and an in-memory ledger implementation.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::{PayoutError, PayoutResult};
pub use models::{EntryDirection, LedgerEntry, PayoutReceipt, PayoutRequest};
pub use service::{LedgerPayoutService, PayoutService};
