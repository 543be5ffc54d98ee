// Replays a JSON session script against a fresh ledger backed by an in-memory token.
use crate::{
    config::SafeBetConfig,
    controller::SafeBet,
    events::SafeBetEvent,
    options::OptionId,
    roles::Role,
    snapshot::OverviewSnapshot,
    token::InMemoryToken,
};
use anyhow::{
    Context,
    Result,
    anyhow,
};
use fuels::types::{
    Address,
    Identity,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fs,
    path::Path,
    str::FromStr,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Script {
    pub deployer: String,
    /// Accounts minted `amount` and approved to spend it into custody before the first
    /// step.
    #[serde(default)]
    pub funding: Vec<Funding>,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Funding {
    pub account: String,
    pub amount: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Step {
    pub caller: String,
    pub call: Call,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    AddReferee { account: String },
    AddBetOption { name: String },
    MakeBet { amount: u64, option_id: OptionId },
    Stop,
    GrantRole { role: Role, account: String },
    RevokeRole { role: Role, account: String },
    RenounceRole { role: Role },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Accepted { detail: String },
    Rejected { error: String },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: usize,
    pub caller: String,
    pub call: Call,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub steps: Vec<StepOutcome>,
    pub events: Vec<SafeBetEvent>,
    pub overview: OverviewSnapshot,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("Failed to read script at {}", path.display()))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse script at {}", path.display()))
    }
}

pub fn parse_account(raw: &str) -> Result<Identity> {
    let address = Address::from_str(raw.trim())
        .map_err(|e| anyhow!("Failed to parse account '{raw}': {e:?}"))?;
    Ok(Identity::Address(address))
}

/// Runs every step in order. Rejected calls are recorded and the replay carries on, the
/// same way a rejected transaction leaves the ledger usable.
///
/// Only malformed input (bad config, unparsable accounts) aborts the replay.
pub fn run(config: SafeBetConfig, script: &Script) -> Result<Report> {
    config.validate()?;
    let deployer = parse_account(&script.deployer)?;
    let custody = config.custody()?;
    let mut token = InMemoryToken::new(config.asset_id()?);
    for funding in &script.funding {
        let account = parse_account(&funding.account)?;
        token.mint(&account, funding.amount);
        token.approve(&account, &custody, funding.amount);
    }

    let mut safe_bet = SafeBet::deploy(deployer, custody, token, config);
    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let caller = parse_account(&step.caller)
            .with_context(|| format!("step {index}: caller"))?;
        let outcome = apply(&mut safe_bet, &caller, &step.call)
            .with_context(|| format!("step {index}: arguments"))?;
        tracing::info!(step = index, call = ?step.call, ?outcome, "replayed step");
        steps.push(StepOutcome {
            step: index,
            caller: step.caller.clone(),
            call: step.call.clone(),
            outcome,
        });
    }

    Ok(Report {
        steps,
        events: safe_bet.take_events(),
        overview: safe_bet.overview(),
    })
}

fn apply(
    safe_bet: &mut SafeBet<InMemoryToken>,
    caller: &Identity,
    call: &Call,
) -> Result<Outcome> {
    let result = match call {
        Call::AddReferee { account } => safe_bet
            .add_referee(caller, &parse_account(account)?)
            .map(|added| added.to_string()),
        Call::AddBetOption { name } => safe_bet
            .add_bet_option(caller, name)
            .map(|id| format!("option {id}")),
        Call::MakeBet { amount, option_id } => safe_bet
            .make_bet(caller, *amount, *option_id)
            .map(|placed| placed.to_string()),
        Call::Stop => safe_bet.stop(caller).map(|()| "stopped".to_string()),
        Call::GrantRole { role, account } => safe_bet
            .grant_role(caller, *role, &parse_account(account)?)
            .map(|granted| granted.to_string()),
        Call::RevokeRole { role, account } => safe_bet
            .revoke_role(caller, *role, &parse_account(account)?)
            .map(|revoked| revoked.to_string()),
        Call::RenounceRole { role } => safe_bet
            .renounce_role(caller, *role, caller)
            .map(|renounced| renounced.to_string()),
    };
    Ok(match result {
        Ok(detail) => Outcome::Accepted { detail },
        Err(err) => Outcome::Rejected {
            error: err.to_string(),
        },
    })
}
