use crate::{
    Result,
    error::SafeBetError,
};
use serde::{
    Deserialize,
    Serialize,
};
use sha2::{
    Digest,
    Sha256,
};
use std::collections::HashMap;

pub type OptionId = u64;

pub type NameDigest = [u8; 32];

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct BetOption {
    pub id: OptionId,
    pub name: String,
}

impl BetOption {
    pub fn new(id: OptionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn name_digest(&self) -> NameDigest {
        name_digest(&self.name)
    }
}

/// SHA-256 over the raw name bytes. Two names collide only if they are byte-for-byte equal.
pub fn name_digest(name: &str) -> NameDigest {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

/// Append-only catalog of bet options. Ids are contiguous from 0 in insertion order, so
/// `exists_by_id` is a bounds check.
#[derive(Debug, Clone, Default)]
pub struct BetOptionRegistry {
    options: Vec<BetOption>,
    by_name: HashMap<NameDigest, OptionId>,
}

impl BetOptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase and role checks belong to the caller.
    pub fn add_option(&mut self, name: &str) -> Result<OptionId> {
        self.check_new_name(name)?;
        let id = self.options.len() as OptionId;
        self.by_name.insert(name_digest(name), id);
        self.options.push(BetOption::new(id, name));
        Ok(id)
    }

    pub fn check_new_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(SafeBetError::EmptyOptionName);
        }
        if self.exists_by_name(name) {
            return Err(SafeBetError::DuplicateOption {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn exists_by_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&name_digest(name))
    }

    pub fn exists_by_id(&self, id: OptionId) -> bool {
        id < self.options.len() as OptionId
    }

    pub fn get(&self, id: OptionId) -> Option<&BetOption> {
        usize::try_from(id).ok().and_then(|idx| self.options.get(idx))
    }

    pub fn id_of(&self, name: &str) -> Option<OptionId> {
        self.by_name.get(&name_digest(name)).copied()
    }

    pub fn list(&self) -> Vec<BetOption> {
        self.options.clone()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
