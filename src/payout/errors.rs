//! Payout error types.

use thiserror::Error;

use crate::game::entities::{AccountId, NearAmount};

/// Payout errors
#[derive(Debug, Error)]
pub enum PayoutError {
    /// Transfer amount must be positive
    #[error("transfer amount must be positive, got {0}")]
    InvalidAmount(NearAmount),

    /// Crediting the recipient would overflow their balance
    #[error("balance overflow crediting {0}")]
    BalanceOverflow(AccountId),
}

/// Result type for payout operations
pub type PayoutResult<T> = Result<T, PayoutError>;
