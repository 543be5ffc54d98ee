use crate::{
    options::OptionId,
    roles::Role,
    stop_gate::Phase,
    token::TokenError,
};
use fuels::types::Identity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafeBetError {
    #[error("{account:?} does not hold a role permitted to perform this operation")]
    Unauthorized { account: Identity },
    #[error("operation requires phase {expected:?}, but the ledger is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("a referee has already been assigned")]
    RefereeAlreadyAssigned,
    #[error("a referee must be assigned before stopping")]
    RefereeNotAssigned,
    #[error("{account:?} holds Admin and cannot become referee")]
    RefereeIsAdmin { account: Identity },
    #[error("the assigned referee cannot be revoked or renounced")]
    RefereeLocked,
    #[error("bet option name must not be empty")]
    EmptyOptionName,
    #[error("bet option {name:?} already exists")]
    DuplicateOption { name: String },
    #[error("bet option {option_id} does not exist")]
    UnknownOption { option_id: OptionId },
    #[error("bet amount must be greater than zero")]
    NonPositiveAmount,
    #[error("bet of {amount} would overflow the running totals")]
    AmountOverflow { amount: u64 },
    #[error("{role:?} cannot be revoked from the caller's own account")]
    SelfRevocationForbidden { role: Role },
    #[error("roles can only be renounced by the account holding them")]
    NotSelf,
    #[error("the Owner role cannot be renounced")]
    CannotRenounceOwner,
    #[error("token transfer of {amount} failed: {reason}")]
    TransferFailed { amount: u64, reason: TransferFailure },
}

/// Why the token collaborator refused to move funds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferFailure {
    #[error("transfer returned false")]
    Rejected,
    #[error("{0}")]
    Raised(#[from] TokenError),
}
