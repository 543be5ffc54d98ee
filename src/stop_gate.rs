use crate::{
    Result,
    error::SafeBetError,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(PartialEq, Eq, Debug, Copy, Clone, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Active,
    Stopped,
}

/// One-way `Active -> Stopped` latch. There is no way back to `Active`.
#[derive(Debug, Clone, Default)]
pub struct StopGate {
    phase: Phase,
}

impl StopGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    pub fn require_not_stopped(&self) -> Result<()> {
        self.require(Phase::Active)
    }

    pub fn require_stopped(&self) -> Result<()> {
        self.require(Phase::Stopped)
    }

    /// Callers authorize the transition; the gate only enforces that it happens once.
    pub fn stop(&mut self) -> Result<()> {
        self.require_not_stopped()?;
        self.phase = Phase::Stopped;
        Ok(())
    }

    fn require(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SafeBetError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}
