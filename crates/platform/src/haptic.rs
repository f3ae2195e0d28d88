//! Haptic motor driver contract

use crate::board_config::HapticConfig;
use crate::error::DriverError;
use crate::handle::{HapticHandle, I2cBusHandle};

/// Haptic driver (DRV2605 class) on the I2C bus.
pub trait HapticDriver {
    /// Probe and configure the driver at `config.address` on `bus`.
    fn init(&mut self, bus: &I2cBusHandle, config: &HapticConfig)
        -> Result<HapticHandle, DriverError>;
}
