use crate::{
    Result,
    error::{
        SafeBetError,
        TransferFailure,
    },
    options::{
        BetOptionRegistry,
        OptionId,
    },
    stop_gate::StopGate,
    token::TokenService,
};
use fuels::types::Identity;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub bettor: Identity,
    pub option_id: OptionId,
    pub amount: u64,
}

/// Append-only wager record with running totals.
///
/// `total_amount` and every per-option total are bumped on each successful append and
/// always equal the corresponding sums over `bets`.
#[derive(Debug, Clone)]
pub struct BetLedger {
    custody: Identity,
    bets: Vec<Bet>,
    total_per_option: HashMap<OptionId, u64>,
    total_amount: u64,
}

impl BetLedger {
    pub fn new(custody: Identity) -> Self {
        Self {
            custody,
            bets: Vec::new(),
            total_per_option: HashMap::new(),
            total_amount: 0,
        }
    }

    /// Account that receives wagered funds.
    pub fn custody(&self) -> &Identity {
        &self.custody
    }

    /// Starts the running total for a freshly registered option at zero.
    pub fn open_option(&mut self, option_id: OptionId) {
        self.total_per_option.entry(option_id).or_insert(0);
    }

    /// Records a wager after pulling `amount` from `bettor` into custody.
    ///
    /// Every check runs before the transfer and the new totals are computed up front, so
    /// a failed transfer leaves the ledger exactly as it was.
    pub fn place_bet<T: TokenService>(
        &mut self,
        gate: &StopGate,
        options: &BetOptionRegistry,
        token: &mut T,
        bettor: &Identity,
        amount: u64,
        option_id: OptionId,
    ) -> Result<usize> {
        gate.require_not_stopped()?;
        if !options.exists_by_id(option_id) {
            return Err(SafeBetError::UnknownOption { option_id });
        }
        if amount == 0 {
            return Err(SafeBetError::NonPositiveAmount);
        }
        let option_total = self
            .total_for_option(option_id)
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or(SafeBetError::AmountOverflow { amount })?;
        let total_amount = self
            .total_amount
            .checked_add(amount)
            .ok_or(SafeBetError::AmountOverflow { amount })?;

        let moved = token
            .transfer_from(&self.custody, bettor, &self.custody, amount)
            .map_err(|err| SafeBetError::TransferFailed {
                amount,
                reason: TransferFailure::from(err),
            })?;
        if !moved {
            return Err(SafeBetError::TransferFailed {
                amount,
                reason: TransferFailure::Rejected,
            });
        }

        self.bets.push(Bet {
            bettor: bettor.clone(),
            option_id,
            amount,
        });
        self.total_per_option.insert(option_id, option_total);
        self.total_amount = total_amount;
        Ok(self.bets.len() - 1)
    }

    pub fn token_balance<T: TokenService>(&self, token: &T) -> u64 {
        token.balance_of(&self.custody)
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    /// `None` when no option with `option_id` was ever opened.
    pub fn total_for_option(&self, option_id: OptionId) -> Option<u64> {
        self.total_per_option.get(&option_id).copied()
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn bets_by<'a>(&'a self, bettor: &'a Identity) -> impl Iterator<Item = &'a Bet> {
        self.bets.iter().filter(move |bet| &bet.bettor == bettor)
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }
}
