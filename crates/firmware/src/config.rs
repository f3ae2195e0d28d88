//! Bring-up configuration: board wiring plus fatality policy.

use platform::BoardConfig;

use crate::bringup::FatalityPolicy;

/// Everything the sequencer needs besides the drivers themselves.
///
/// Both halves are compile-time constants on hardware; the emulator builds
/// a modified copy from its command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringupConfig {
    /// Pin assignments and bus parameters.
    pub board: BoardConfig,
    /// Which device failures abort bring-up.
    pub policy: FatalityPolicy,
}

impl BringupConfig {
    /// Production badge wiring with the default policy.
    pub const fn badge() -> Self {
        Self {
            board: BoardConfig::badge(),
            policy: FatalityPolicy::badge(),
        }
    }

    /// Same wiring, different policy.
    pub const fn with_policy(mut self, policy: FatalityPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self::badge()
    }
}
