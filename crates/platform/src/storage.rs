//! Removable storage contract
//!
//! A missing or unreadable card is an expected condition on this device, so
//! callers treat a mount failure as "no medium" rather than as a fault.

use crate::board_config::MountConfig;
use crate::error::DriverError;
use crate::handle::{MountHandle, SpiBusHandle};

/// SD-over-SPI card mounter.
pub trait StorageDriver {
    /// Probe the card on `bus` and mount its FAT filesystem.
    fn mount(&mut self, bus: &SpiBusHandle, config: &MountConfig)
        -> Result<MountHandle, DriverError>;
}
