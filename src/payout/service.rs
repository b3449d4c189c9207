//! Payout service trait and the in-memory ledger implementation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::errors::{PayoutError, PayoutResult};
use super::models::{EntryDirection, LedgerEntry, PayoutReceipt};
use crate::game::entities::{AccountId, NearAmount};

/// Asynchronous value transfer with completion confirmation.
///
/// The engine never calls this directly; the dispatch layer drives it
/// and delivers the confirmation back to the engine as a self-addressed
/// call. `transfer` resolves only once the credit is durably recorded.
#[async_trait]
pub trait PayoutService: Send + Sync {
    async fn transfer(&self, to: &AccountId, amount: NearAmount) -> PayoutResult<PayoutReceipt>;
}

#[derive(Debug, Default)]
struct Ledger {
    balances: HashMap<AccountId, NearAmount>,
    entries: Vec<LedgerEntry>,
}

/// In-memory credit ledger.
///
/// Keeps a balance per account plus an append-only entry log, so tests
/// and demos can assert exactly what was paid out and when.
#[derive(Debug, Default)]
pub struct LedgerPayoutService {
    inner: Mutex<Ledger>,
}

impl LedgerPayoutService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current credited balance of `account`.
    pub async fn balance_of(&self, account: &AccountId) -> NearAmount {
        let ledger = self.inner.lock().await;
        ledger
            .balances
            .get(account)
            .copied()
            .unwrap_or(NearAmount::ZERO)
    }

    /// All ledger entries recorded for `account`, oldest first.
    pub async fn entries_for(&self, account: &AccountId) -> Vec<LedgerEntry> {
        let ledger = self.inner.lock().await;
        ledger
            .entries
            .iter()
            .filter(|entry| &entry.account == account)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PayoutService for LedgerPayoutService {
    async fn transfer(&self, to: &AccountId, amount: NearAmount) -> PayoutResult<PayoutReceipt> {
        if amount.is_zero() {
            return Err(PayoutError::InvalidAmount(amount));
        }

        let mut ledger = self.inner.lock().await;
        let balance = ledger
            .balances
            .get(to)
            .copied()
            .unwrap_or(NearAmount::ZERO);
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| PayoutError::BalanceOverflow(to.clone()))?;
        ledger.balances.insert(to.clone(), new_balance);

        let receipt = PayoutReceipt {
            id: Uuid::new_v4(),
            to: to.clone(),
            amount,
            completed_at: Utc::now(),
        };
        ledger.entries.push(LedgerEntry {
            id: receipt.id,
            account: to.clone(),
            amount,
            balance_after: new_balance,
            direction: EntryDirection::Credit,
            created_at: receipt.completed_at,
        });

        log::info!("credited {amount} to {to}");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transfer_credits_balance() {
        let service = LedgerPayoutService::new();
        let alice = AccountId::new("alice.near");

        let receipt = service
            .transfer(&alice, NearAmount::from_near(2))
            .await
            .unwrap();
        assert_eq!(receipt.to, alice);
        assert_eq!(receipt.amount, NearAmount::from_near(2));
        assert_eq!(service.balance_of(&alice).await, NearAmount::from_near(2));
    }

    #[tokio::test]
    async fn test_transfers_accumulate() {
        let service = LedgerPayoutService::new();
        let alice = AccountId::new("alice.near");

        service
            .transfer(&alice, NearAmount::from_near(2))
            .await
            .unwrap();
        service
            .transfer(&alice, NearAmount::ONE_NEAR)
            .await
            .unwrap();

        assert_eq!(service.balance_of(&alice).await, NearAmount::from_near(3));
        let entries = service.entries_for(&alice).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].balance_after, NearAmount::from_near(3));
        assert_eq!(entries[0].direction, EntryDirection::Credit);
    }

    #[tokio::test]
    async fn test_zero_transfer_rejected() {
        let service = LedgerPayoutService::new();
        let alice = AccountId::new("alice.near");

        let err = service.transfer(&alice, NearAmount::ZERO).await.unwrap_err();
        assert!(matches!(err, PayoutError::InvalidAmount(_)));
        assert!(service.balance_of(&alice).await.is_zero());
    }

    #[tokio::test]
    async fn test_overflow_rejected() {
        let service = LedgerPayoutService::new();
        let alice = AccountId::new("alice.near");
        let max = NearAmount::from_yocto(u128::MAX);

        service.transfer(&alice, max).await.unwrap();
        let err = service
            .transfer(&alice, NearAmount::ONE_NEAR)
            .await
            .unwrap_err();
        assert!(matches!(err, PayoutError::BalanceOverflow(_)));
        assert_eq!(service.balance_of(&alice).await, max);
    }
}
