use crate::{
    options::{
        BetOption,
        OptionId,
    },
    roles::Role,
};
use fuels::types::Identity;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub enum SafeBetEvent {
    RoleGranted(RoleGrantedEvent),
    RoleRevoked(RoleRevokedEvent),
    RefereeAssigned(RefereeAssignedEvent),
    BetOptionAdded(BetOptionAddedEvent),
    BetPlaced(BetPlacedEvent),
    Stopped(StoppedEvent),
}

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct RoleGrantedEvent {
    pub role: Role,
    pub account: Identity,
    pub sender: Identity,
}

// Covers both revocation by an admin and self-renunciation; `sender == account` for the
// latter.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct RoleRevokedEvent {
    pub role: Role,
    pub account: Identity,
    pub sender: Identity,
}

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct RefereeAssignedEvent {
    pub referee: Identity,
    pub assigned_by: Identity,
}

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct BetOptionAddedEvent {
    pub option_id: OptionId,
    pub name: String,
    // hex-encoded sha256 of the name bytes
    pub name_digest: String,
}

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct BetPlacedEvent {
    // position of the bet in the ledger
    pub bet_index: usize,
    pub bettor: Identity,
    pub option_id: OptionId,
    pub amount: u64,
    pub option_total: u64,
    pub total_amount: u64,
}

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct StoppedEvent {
    pub stopped_by: Identity,
    pub bet_count: usize,
    pub total_amount: u64,
}

impl SafeBetEvent {
    pub fn role_granted(role: Role, account: Identity, sender: Identity) -> Self {
        SafeBetEvent::RoleGranted(RoleGrantedEvent {
            role,
            account,
            sender,
        })
    }

    pub fn role_revoked(role: Role, account: Identity, sender: Identity) -> Self {
        SafeBetEvent::RoleRevoked(RoleRevokedEvent {
            role,
            account,
            sender,
        })
    }

    pub fn bet_option_added(option: &BetOption) -> Self {
        SafeBetEvent::BetOptionAdded(BetOptionAddedEvent {
            option_id: option.id,
            name: option.name.clone(),
            name_digest: hex::encode(option.name_digest()),
        })
    }
}
