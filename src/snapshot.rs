use crate::{
    ledger::BetLedger,
    options::{
        BetOption,
        BetOptionRegistry,
        OptionId,
    },
    stop_gate::Phase,
};
use fuels::types::Identity;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::BTreeMap;

/// Point-in-time view of the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSnapshot {
    pub version: String,
    pub phase: Phase,
    pub has_referee: bool,
    // (option, running total), in id order
    pub options: Vec<(BetOption, u64)>,
    pub bet_count: usize,
    pub total_amount: u64,
    pub custodied_balance: u64,
}

impl OverviewSnapshot {
    pub fn option_total(&self, option_id: OptionId) -> Option<u64> {
        self.options
            .iter()
            .find(|(option, _)| option.id == option_id)
            .map(|(_, total)| *total)
    }
}

/// Everything one bettor has wagered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub total_bet: u64,
    pub bet_count: usize,
    pub option_bets: Vec<(OptionId, u64)>,
}

impl AccountSnapshot {
    pub fn from_ledger(ledger: &BetLedger, account: &Identity) -> Self {
        let mut per_option: BTreeMap<OptionId, u64> = BTreeMap::new();
        let mut snapshot = AccountSnapshot::default();
        for bet in ledger.bets_by(account) {
            // bounded by the ledger totals, which are overflow-checked
            *per_option.entry(bet.option_id).or_default() += bet.amount;
            snapshot.total_bet += bet.amount;
            snapshot.bet_count += 1;
        }
        snapshot.option_bets = per_option.into_iter().collect();
        snapshot
    }
}

pub(crate) fn option_totals(
    options: &BetOptionRegistry,
    ledger: &BetLedger,
) -> Vec<(BetOption, u64)> {
    options
        .list()
        .into_iter()
        .map(|option| {
            let total = ledger.total_for_option(option.id).unwrap_or_default();
            (option, total)
        })
        .collect()
}
