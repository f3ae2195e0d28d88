//! Bring-up error taxonomy.

use platform::{DriverError, StoreCorruption, StoreOpenError};
use thiserror_no_std::Error;

use super::step::StepId;

/// Why the one-shot config store recovery did not produce a usable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryFailure {
    /// Erasing the store partition failed.
    Erase(DriverError),
    /// The store still failed to open after the erase.
    Reopen(StoreOpenError),
}

impl core::fmt::Display for RecoveryFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Erase(e) => write!(f, "erase failed: {e}"),
            Self::Reopen(e) => match e.classify() {
                Ok(condition) => write!(f, "reopen failed: {condition}"),
                Err(cause) => write!(f, "reopen failed: {cause}"),
            },
        }
    }
}

/// A failed bring-up step, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringupError {
    /// The store reported a recoverable condition and erase-then-reopen failed.
    #[error("{condition}; recovery {failure}")]
    RecoverableStoreCorruption {
        /// Condition reported by the first open.
        condition: StoreCorruption,
        /// What went wrong during recovery.
        failure: RecoveryFailure,
    },

    /// The store failed to open for a reason erasing cannot fix.
    #[error("config store open failed: {0}")]
    ConfigStore(DriverError),

    /// A bus could not be configured, installed or enabled.
    #[error("{bus} {stage} failed: {cause}")]
    BusConfiguration {
        /// Which bus step.
        bus: StepId,
        /// Which call in the bus sequence failed.
        stage: &'static str,
        /// Driver error.
        cause: DriverError,
    },

    /// A device on an initialized bus failed to initialize.
    #[error("{device} init failed: {cause}")]
    DeviceInit {
        /// Which device step.
        device: StepId,
        /// Driver error.
        cause: DriverError,
    },

    /// The SD card could not be mounted.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(DriverError),

    /// A GPIO pin could not be configured.
    #[error("GPIO{pin} configuration failed: {cause}")]
    GpioConfiguration {
        /// Pin number.
        pin: u8,
        /// Driver error.
        cause: DriverError,
    },

    /// A step ran before the step that produces its input handle.
    #[error("{0} has not been brought up")]
    MissingDependency(StepId),
}

impl BringupError {
    /// The driver error underneath, if the failure came from a driver call.
    pub const fn driver_error(&self) -> Option<DriverError> {
        match *self {
            Self::ConfigStore(e)
            | Self::StorageUnavailable(e)
            | Self::BusConfiguration { cause: e, .. }
            | Self::DeviceInit { cause: e, .. }
            | Self::GpioConfiguration { cause: e, .. }
            | Self::RecoverableStoreCorruption {
                failure: RecoveryFailure::Erase(e),
                ..
            } => Some(e),
            Self::RecoverableStoreCorruption {
                failure: RecoveryFailure::Reopen(StoreOpenError::Other(e)),
                ..
            } => Some(e),
            Self::RecoverableStoreCorruption { .. } | Self::MissingDependency(_) => None,
        }
    }
}

/// Terminal failure report: the first fatal step and its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Aborted {
    /// Step that failed.
    pub step: StepId,
    /// Why it failed.
    pub reason: BringupError,
}

impl core::fmt::Display for Aborted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "bring-up aborted at {}: {}", self.step, self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Aborted {}
