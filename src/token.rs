use fuels::types::{
    AssetId,
    Identity,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("allowance of {available} is below the requested {requested}")]
    InsufficientAllowance { requested: u64, available: u64 },
    #[error("balance of {available} is below the requested {requested}")]
    InsufficientBalance { requested: u64, available: u64 },
    #[error("crediting {amount} would overflow the recipient balance")]
    BalanceOverflow { amount: u64 },
    #[error("token service unavailable: {0}")]
    Unavailable(String),
}

/// The fungible settlement token the ledger takes custody of.
pub trait TokenService {
    fn balance_of(&self, account: &Identity) -> u64;

    /// Moves `amount` out of `from`'s allowance granted to `spender`.
    ///
    /// `Ok(false)` and `Err(_)` are both failures; callers must not assume either one
    /// left balances untouched, only that the transfer did not happen.
    fn transfer_from(
        &mut self,
        spender: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u64,
    ) -> Result<bool, TokenError>;
}

/// What the next `transfer_from` call on an [`InMemoryToken`] should do instead of moving
/// funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectedFailure {
    ReturnFalse,
    Raise(TokenError),
}

/// Allowance-based token held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryToken {
    asset_id: AssetId,
    balances: HashMap<Identity, u64>,
    allowances: HashMap<(Identity, Identity), u64>,
    injected_failure: Option<InjectedFailure>,
}

impl InMemoryToken {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            injected_failure: None,
        }
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    pub fn mint(&mut self, account: &Identity, amount: u64) {
        let balance = self.balances.entry(account.clone()).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn approve(&mut self, owner: &Identity, spender: &Identity, amount: u64) {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    pub fn allowance(&self, owner: &Identity, spender: &Identity) -> u64 {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Makes every following `transfer_from` fail until cleared with `None`.
    pub fn inject_failure(&mut self, failure: Option<InjectedFailure>) {
        self.injected_failure = failure;
    }
}

impl TokenService for InMemoryToken {
    fn balance_of(&self, account: &Identity) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        spender: &Identity,
        from: &Identity,
        to: &Identity,
        amount: u64,
    ) -> Result<bool, TokenError> {
        match &self.injected_failure {
            Some(InjectedFailure::ReturnFalse) => return Ok(false),
            Some(InjectedFailure::Raise(err)) => return Err(err.clone()),
            None => {}
        }

        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                requested: amount,
                available: allowance,
            });
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: from_balance,
            });
        }
        if from != to {
            let to_balance = self.balance_of(to);
            let credited = to_balance
                .checked_add(amount)
                .ok_or(TokenError::BalanceOverflow { amount })?;
            self.balances.insert(from.clone(), from_balance - amount);
            self.balances.insert(to.clone(), credited);
        }
        self.allowances
            .insert((from.clone(), spender.clone()), allowance - amount);
        Ok(true)
    }
}
