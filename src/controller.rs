use crate::{
    Result,
    config::SafeBetConfig,
    error::SafeBetError,
    events::{
        BetPlacedEvent,
        RefereeAssignedEvent,
        SafeBetEvent,
        StoppedEvent,
    },
    ledger::{
        Bet,
        BetLedger,
    },
    options::{
        BetOption,
        BetOptionRegistry,
        OptionId,
    },
    roles::{
        Role,
        RoleRegistry,
    },
    snapshot::{
        AccountSnapshot,
        OverviewSnapshot,
        option_totals,
    },
    stop_gate::{
        Phase,
        StopGate,
    },
    token::TokenService,
};
use fuels::types::Identity;

pub const VERSION: &str = "v0";

/// Every state-changing entry point, for the authorization table in
/// [`SafeBet::authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddReferee,
    AddBetOption,
    MakeBet,
    Stop,
    GrantRole(Role),
    RevokeRole(Role),
}

/// The wagering ledger. Owns every store; each `&mut self` method is one all-or-nothing
/// transaction. Checks run as role, then phase, then domain guards, and nothing is
/// mutated until all of them pass.
pub struct SafeBet<T> {
    config: SafeBetConfig,
    roles: RoleRegistry,
    referee_assigned: bool,
    gate: StopGate,
    options: BetOptionRegistry,
    ledger: BetLedger,
    token: T,
    events: Vec<SafeBetEvent>,
}

impl<T: TokenService> SafeBet<T> {
    /// `deployer` becomes the only Owner; wagers are pulled into `custody`.
    pub fn deploy(
        deployer: Identity,
        custody: Identity,
        token: T,
        config: SafeBetConfig,
    ) -> Self {
        tracing::info!(?deployer, ?custody, "deploying safe bet ledger");
        let events = vec![SafeBetEvent::role_granted(
            Role::Owner,
            deployer.clone(),
            deployer.clone(),
        )];
        Self {
            config,
            roles: RoleRegistry::with_owner(deployer),
            referee_assigned: false,
            gate: StopGate::new(),
            options: BetOptionRegistry::new(),
            ledger: BetLedger::new(custody),
            token,
            events,
        }
    }

    pub fn authorize(&self, operation: Operation, caller: &Identity) -> Result<()> {
        let permitted = match operation {
            Operation::AddReferee | Operation::Stop => {
                self.roles.has_role(Role::Owner, caller)
            }
            Operation::AddBetOption => {
                self.config.option_authority.permits(&self.roles, caller)
            }
            Operation::MakeBet => true,
            Operation::GrantRole(role) | Operation::RevokeRole(role) => {
                self.roles.has_role(role.admin_role(), caller)
            }
        };
        if permitted {
            Ok(())
        } else {
            Err(SafeBetError::Unauthorized {
                account: caller.clone(),
            })
        }
    }

    /// Enrols the single referee. Only ever succeeds once per instance.
    pub fn add_referee(&mut self, caller: &Identity, account: &Identity) -> Result<bool> {
        self.try_add_referee(caller, account).inspect_err(|err| {
            tracing::debug!(?caller, ?account, %err, "add_referee rejected");
        })
    }

    fn try_add_referee(&mut self, caller: &Identity, account: &Identity) -> Result<bool> {
        self.authorize(Operation::AddReferee, caller)?;
        self.gate.require_not_stopped()?;
        if self.referee_assigned {
            return Err(SafeBetError::RefereeAlreadyAssigned);
        }
        if self.roles.has_role(Role::Admin, account) {
            return Err(SafeBetError::RefereeIsAdmin {
                account: account.clone(),
            });
        }

        self.roles.grant(Role::Referee, account.clone());
        self.referee_assigned = true;
        self.events.push(SafeBetEvent::role_granted(
            Role::Referee,
            account.clone(),
            caller.clone(),
        ));
        self.events
            .push(SafeBetEvent::RefereeAssigned(RefereeAssignedEvent {
                referee: account.clone(),
                assigned_by: caller.clone(),
            }));
        tracing::info!(referee = ?account, "referee assigned");
        Ok(true)
    }

    pub fn add_bet_option(&mut self, caller: &Identity, name: &str) -> Result<OptionId> {
        self.try_add_bet_option(caller, name).inspect_err(|err| {
            tracing::debug!(?caller, option_name = name, %err, "add_bet_option rejected");
        })
    }

    fn try_add_bet_option(&mut self, caller: &Identity, name: &str) -> Result<OptionId> {
        self.authorize(Operation::AddBetOption, caller)?;
        self.gate.require_not_stopped()?;
        let option_id = self.options.add_option(name)?;
        self.ledger.open_option(option_id);

        let option = BetOption::new(option_id, name);
        self.events.push(SafeBetEvent::bet_option_added(&option));
        tracing::info!(option_id, option_name = name, "bet option added");
        Ok(option_id)
    }

    /// Pulls `amount` from the caller into custody and records the wager on `option_id`.
    pub fn make_bet(
        &mut self,
        caller: &Identity,
        amount: u64,
        option_id: OptionId,
    ) -> Result<bool> {
        self.try_make_bet(caller, amount, option_id)
            .inspect_err(|err| {
                tracing::debug!(?caller, amount, option_id, %err, "make_bet rejected");
            })
    }

    fn try_make_bet(
        &mut self,
        caller: &Identity,
        amount: u64,
        option_id: OptionId,
    ) -> Result<bool> {
        self.authorize(Operation::MakeBet, caller)?;
        let bet_index = self.ledger.place_bet(
            &self.gate,
            &self.options,
            &mut self.token,
            caller,
            amount,
            option_id,
        )?;

        let option_total = self.ledger.total_for_option(option_id).unwrap_or_default();
        let total_amount = self.ledger.total_amount();
        self.events.push(SafeBetEvent::BetPlaced(BetPlacedEvent {
            bet_index,
            bettor: caller.clone(),
            option_id,
            amount,
            option_total,
            total_amount,
        }));
        tracing::info!(bettor = ?caller, amount, option_id, total_amount, "bet placed");
        Ok(true)
    }

    /// Ends wagering for good. Requires an assigned referee.
    pub fn stop(&mut self, caller: &Identity) -> Result<()> {
        self.try_stop(caller).inspect_err(|err| {
            tracing::debug!(?caller, %err, "stop rejected");
        })
    }

    fn try_stop(&mut self, caller: &Identity) -> Result<()> {
        self.authorize(Operation::Stop, caller)?;
        self.gate.require_not_stopped()?;
        if !self.referee_assigned {
            return Err(SafeBetError::RefereeNotAssigned);
        }
        self.gate.stop()?;

        self.events.push(SafeBetEvent::Stopped(StoppedEvent {
            stopped_by: caller.clone(),
            bet_count: self.ledger.len(),
            total_amount: self.ledger.total_amount(),
        }));
        tracing::info!(
            stopped_by = ?caller,
            bets = self.ledger.len(),
            total_amount = self.ledger.total_amount(),
            "wagering stopped"
        );
        Ok(())
    }

    /// Referee grants are routed through [`SafeBet::add_referee`] so the singleton holds.
    pub fn grant_role(
        &mut self,
        caller: &Identity,
        role: Role,
        account: &Identity,
    ) -> Result<bool> {
        if role == Role::Referee {
            return self.add_referee(caller, account);
        }
        self.authorize(Operation::GrantRole(role), caller)
            .inspect_err(|err| {
                tracing::debug!(?caller, ?role, ?account, %err, "grant_role rejected");
            })?;
        let granted = self.roles.grant(role, account.clone());
        if granted {
            self.events.push(SafeBetEvent::role_granted(
                role,
                account.clone(),
                caller.clone(),
            ));
            tracing::info!(?role, ?account, "role granted");
        }
        Ok(granted)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Identity,
        role: Role,
        account: &Identity,
    ) -> Result<bool> {
        self.try_revoke_role(caller, role, account)
            .inspect_err(|err| {
                tracing::debug!(?caller, ?role, ?account, %err, "revoke_role rejected");
            })
    }

    fn try_revoke_role(
        &mut self,
        caller: &Identity,
        role: Role,
        account: &Identity,
    ) -> Result<bool> {
        self.authorize(Operation::RevokeRole(role), caller)?;
        if role == Role::Referee && self.roles.has_role(Role::Referee, account) {
            return Err(SafeBetError::RefereeLocked);
        }
        let revoked = self.roles.revoke(role, account, caller)?;
        if revoked {
            self.events.push(SafeBetEvent::role_revoked(
                role,
                account.clone(),
                caller.clone(),
            ));
            tracing::info!(?role, ?account, "role revoked");
        }
        Ok(revoked)
    }

    pub fn renounce_role(
        &mut self,
        caller: &Identity,
        role: Role,
        account: &Identity,
    ) -> Result<bool> {
        self.try_renounce_role(caller, role, account)
            .inspect_err(|err| {
                tracing::debug!(?caller, ?role, %err, "renounce_role rejected");
            })
    }

    fn try_renounce_role(
        &mut self,
        caller: &Identity,
        role: Role,
        account: &Identity,
    ) -> Result<bool> {
        if account != caller {
            return Err(SafeBetError::NotSelf);
        }
        if role == Role::Referee && self.roles.has_role(Role::Referee, account) {
            return Err(SafeBetError::RefereeLocked);
        }
        let renounced = self.roles.renounce(role, account, caller)?;
        if renounced {
            self.events.push(SafeBetEvent::role_revoked(
                role,
                account.clone(),
                caller.clone(),
            ));
            tracing::info!(?role, ?account, "role renounced");
        }
        Ok(renounced)
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn token_balance(&self) -> u64 {
        self.ledger.token_balance(&self.token)
    }

    pub fn list_bet_options(&self) -> Vec<BetOption> {
        self.options.list()
    }

    pub fn exists_bet_option_name(&self, name: &str) -> bool {
        self.options.exists_by_name(name)
    }

    pub fn exists_bet_option_id(&self, option_id: OptionId) -> bool {
        self.options.exists_by_id(option_id)
    }

    pub fn has_role(&self, role: Role, account: &Identity) -> bool {
        self.roles.has_role(role, account)
    }

    pub fn stopped(&self) -> bool {
        self.gate.is_stopped()
    }

    pub fn phase(&self) -> Phase {
        self.gate.phase()
    }

    pub fn has_referee(&self) -> bool {
        self.referee_assigned
    }

    pub fn referee(&self) -> Option<Identity> {
        self.roles.members(Role::Referee).into_iter().next()
    }

    pub fn total_amount(&self) -> u64 {
        self.ledger.total_amount()
    }

    pub fn total_amount_per_option(&self, option_id: OptionId) -> Option<u64> {
        self.ledger.total_for_option(option_id)
    }

    pub fn bets(&self) -> &[Bet] {
        self.ledger.bets()
    }

    pub fn custody(&self) -> &Identity {
        self.ledger.custody()
    }

    pub fn config(&self) -> &SafeBetConfig {
        &self.config
    }

    pub fn events(&self) -> &[SafeBetEvent] {
        &self.events
    }

    /// Hands the accumulated events to the caller and clears the buffer.
    pub fn take_events(&mut self) -> Vec<SafeBetEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    /// Direct access to the token collaborator, for funding and approving accounts.
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    pub fn overview(&self) -> OverviewSnapshot {
        OverviewSnapshot {
            version: VERSION.to_string(),
            phase: self.gate.phase(),
            has_referee: self.referee_assigned,
            options: option_totals(&self.options, &self.ledger),
            bet_count: self.ledger.len(),
            total_amount: self.ledger.total_amount(),
            custodied_balance: self.token_balance(),
        }
    }

    pub fn account_snapshot(&self, account: &Identity) -> AccountSnapshot {
        AccountSnapshot::from_ledger(&self.ledger, account)
    }
}
