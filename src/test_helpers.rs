use crate::{
    config::SafeBetConfig,
    controller::SafeBet,
    token::InMemoryToken,
};
use fuels::types::{
    Address,
    AssetId,
    ContractId,
    Identity,
};

pub const STARTING_BALANCE: u64 = 1_000_000_000;

/// Named accounts plus a custody contract and settlement asset, mirroring a fresh local
/// deployment.
pub struct TestContext {
    owner: Identity,
    admin: Identity,
    referee: Identity,
    alice: Identity,
    bob: Identity,
    custody: Identity,
    asset_id: AssetId,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            owner: Identity::Address(Address::from([0u8; 32])),
            admin: Identity::Address(Address::from([1u8; 32])),
            referee: Identity::Address(Address::from([2u8; 32])),
            alice: Identity::Address(Address::from([3u8; 32])),
            bob: Identity::Address(Address::from([4u8; 32])),
            custody: Identity::ContractId(ContractId::from([9u8; 32])),
            asset_id: AssetId::from([1u8; 32]),
        }
    }

    pub fn owner(&self) -> Identity {
        self.owner.clone()
    }

    pub fn admin(&self) -> Identity {
        self.admin.clone()
    }

    pub fn referee(&self) -> Identity {
        self.referee.clone()
    }

    pub fn alice(&self) -> Identity {
        self.alice.clone()
    }

    pub fn bob(&self) -> Identity {
        self.bob.clone()
    }

    pub fn custody(&self) -> Identity {
        self.custody.clone()
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    /// Deploys with the default config; alice and bob are funded and have approved the
    /// custody contract for their whole balance.
    pub fn deploy(&self) -> SafeBet<InMemoryToken> {
        self.deploy_with_config(SafeBetConfig::default())
    }

    pub fn deploy_with_config(&self, config: SafeBetConfig) -> SafeBet<InMemoryToken> {
        let mut token = InMemoryToken::new(self.asset_id);
        for bettor in [&self.alice, &self.bob] {
            token.mint(bettor, STARTING_BALANCE);
            token.approve(bettor, &self.custody, STARTING_BALANCE);
        }
        SafeBet::deploy(self.owner(), self.custody(), token, config)
    }

    /// Deploys and registers `names` as bet options, in order, as the owner.
    pub fn deploy_with_options(&self, names: &[&str]) -> SafeBet<InMemoryToken> {
        let mut safe_bet = self.deploy();
        for name in names {
            if let Err(err) = safe_bet.add_bet_option(&self.owner, name) {
                panic!("failed to add bet option {name:?}: {err}");
            }
        }
        safe_bet
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn account(byte: u8) -> Identity {
    Identity::Address(Address::from([byte; 32]))
}
