use crate::roles::{
    Role,
    RoleRegistry,
};
use anyhow::{
    Context,
    Result,
    anyhow,
};
use fuels::types::{
    AssetId,
    ContractId,
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

/// Which role may register new bet options.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum OptionAuthority {
    #[default]
    Owner,
    Admin,
    OwnerOrAdmin,
}

impl OptionAuthority {
    pub fn permits(self, roles: &RoleRegistry, caller: &Identity) -> bool {
        match self {
            OptionAuthority::Owner => roles.has_role(Role::Owner, caller),
            OptionAuthority::Admin => roles.has_role(Role::Admin, caller),
            OptionAuthority::OwnerOrAdmin => {
                roles.has_role(Role::Owner, caller) || roles.has_role(Role::Admin, caller)
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SafeBetConfig {
    /// Hex id of the settlement token. Zeroed when absent.
    #[serde(default)]
    pub token_asset_id: Option<String>,
    /// Hex id of the contract holding wagered funds. Zeroed when absent.
    #[serde(default)]
    pub custody_contract_id: Option<String>,
    #[serde(default)]
    pub option_authority: OptionAuthority,
    /// Declared owner fee. Recorded for reporting only; no fee is ever deducted.
    #[serde(default)]
    pub fee_percentage_owner: u8,
}

impl SafeBetConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: SafeBetConfig = serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json =
            serde_json::to_vec_pretty(self).context("Failed to serialize config")?;
        fs::write(path.as_ref(), json).context("Failed to write config")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.fee_percentage_owner > 100 {
            return Err(anyhow!(
                "fee_percentage_owner must be at most 100, got {}",
                self.fee_percentage_owner
            ));
        }
        self.asset_id()?;
        self.custody()?;
        Ok(())
    }

    pub fn asset_id(&self) -> Result<AssetId> {
        match &self.token_asset_id {
            Some(raw) => parse_hex_id::<AssetId>(raw, "token asset id"),
            None => Ok(AssetId::zeroed()),
        }
    }

    pub fn custody(&self) -> Result<Identity> {
        let contract_id = match &self.custody_contract_id {
            Some(raw) => parse_hex_id::<ContractId>(raw, "custody contract id")?,
            None => ContractId::zeroed(),
        };
        Ok(Identity::ContractId(contract_id))
    }
}

fn parse_hex_id<T>(raw: &str, label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    T::from_str(raw.trim()).map_err(|e| anyhow!("Failed to parse {label} '{raw}': {e:?}"))
}
