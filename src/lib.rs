pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod ledger;
pub mod options;
pub mod replay;
pub mod roles;
pub mod snapshot;
pub mod stop_gate;
pub mod token;

pub mod test_helpers;

pub use crate::{
    config::{
        OptionAuthority,
        SafeBetConfig,
    },
    controller::{
        Operation,
        SafeBet,
        VERSION,
    },
    error::SafeBetError,
    roles::Role,
    token::{
        InMemoryToken,
        TokenService,
    },
};

pub type Result<T, E = SafeBetError> = std::result::Result<T, E>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
