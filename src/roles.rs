use crate::{
    Result,
    error::SafeBetError,
};
use fuels::types::Identity;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashSet;

#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Admin,
    Referee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Owner, Role::Admin, Role::Referee];

    /// The role whose members may grant and revoke `self`.
    pub fn admin_role(self) -> Role {
        // Owner administers every role, itself included.
        Role::Owner
    }
}

/// Membership set keyed by `(role, account)`.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    memberships: HashSet<(Role, Identity)>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a single Owner, the deployer.
    pub fn with_owner(owner: Identity) -> Self {
        let mut registry = Self::new();
        registry.grant(Role::Owner, owner);
        registry
    }

    pub fn has_role(&self, role: Role, account: &Identity) -> bool {
        self.memberships.contains(&(role, account.clone()))
    }

    /// Adds the membership if absent. Returns `true` when it was newly added.
    pub fn grant(&mut self, role: Role, account: Identity) -> bool {
        self.memberships.insert((role, account))
    }

    /// Removes `account` from `role`. Revoking a non-member is a successful no-op.
    pub fn revoke(
        &mut self,
        role: Role,
        account: &Identity,
        caller: &Identity,
    ) -> Result<bool> {
        self.require_admin_of(role, caller)?;
        if role == Role::Owner && account == caller {
            return Err(SafeBetError::SelfRevocationForbidden { role });
        }
        Ok(self.memberships.remove(&(role, account.clone())))
    }

    pub fn renounce(
        &mut self,
        role: Role,
        account: &Identity,
        caller: &Identity,
    ) -> Result<bool> {
        if account != caller {
            return Err(SafeBetError::NotSelf);
        }
        if role == Role::Owner {
            return Err(SafeBetError::CannotRenounceOwner);
        }
        Ok(self.memberships.remove(&(role, account.clone())))
    }

    pub fn require_role(&self, role: Role, caller: &Identity) -> Result<()> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            Err(SafeBetError::Unauthorized { account: caller.clone() })
        }
    }

    pub fn require_admin_of(&self, role: Role, caller: &Identity) -> Result<()> {
        self.require_role(role.admin_role(), caller)
    }

    /// Current members of `role`, in no particular order.
    pub fn members(&self, role: Role) -> Vec<Identity> {
        self.memberships
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, account)| account.clone())
            .collect()
    }

    pub fn member_count(&self, role: Role) -> usize {
        self.memberships.iter().filter(|(r, _)| *r == role).count()
    }
}
