//! Caller context: who is calling, on whose behalf, with how much
//! value attached.

use serde::{Deserialize, Serialize};

use crate::game::entities::{AccountId, NearAmount};

/// The identity and attached value of one external call.
///
/// `sender` is the account that signed the call chain, `predecessor`
/// the account the call arrived from directly. They differ only for
/// the payout confirmation, which the dispatch layer addresses to the
/// engine itself.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CallContext {
    pub sender: AccountId,
    pub predecessor: AccountId,
    pub current_contract: AccountId,
    pub attached_deposit: NearAmount,
}

impl CallContext {
    /// Context for a direct call from `sender` into `contract`.
    pub fn call(sender: AccountId, contract: AccountId, attached_deposit: NearAmount) -> Self {
        Self {
            sender: sender.clone(),
            predecessor: sender,
            current_contract: contract,
            attached_deposit,
        }
    }

    /// Context for the engine calling back into itself. Only the
    /// dispatch layer builds these.
    pub fn self_call(contract: AccountId) -> Self {
        Self {
            sender: contract.clone(),
            predecessor: contract.clone(),
            current_contract: contract,
            attached_deposit: NearAmount::ZERO,
        }
    }

    /// Whether this call arrived from the engine's own account.
    pub fn is_self_call(&self) -> bool {
        self.predecessor == self.current_contract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_call_is_not_self_call() {
        let ctx = CallContext::call(
            AccountId::new("alice.near"),
            AccountId::new("game.near"),
            NearAmount::ONE_NEAR,
        );
        assert!(!ctx.is_self_call());
        assert_eq!(ctx.sender, ctx.predecessor);
    }

    #[test]
    fn test_self_call_carries_no_deposit() {
        let ctx = CallContext::self_call(AccountId::new("game.near"));
        assert!(ctx.is_self_call());
        assert!(ctx.attached_deposit.is_zero());
    }
}
