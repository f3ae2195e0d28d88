//! Bus controller contracts (I2C, I2S, SPI).
//!
//! Each controller is brought up by one or two blocking driver calls that
//! configure electrical/timing parameters and install a driver instance bound
//! to a bus identifier. The returned handle is what device drivers attach to.

use crate::board_config::{I2cBusConfig, I2cPort, I2sConfig, SpiBusConfig};
use crate::error::DriverError;
use crate::handle::{I2cBusHandle, I2sChannelHandle, SpiBusHandle};

/// I2C master controller.
///
/// Bring-up calls these in order: [`configure`](Self::configure),
/// [`set_timeout`](Self::set_timeout), [`install`](Self::install).
pub trait I2cController {
    /// Apply pin, pull-up and clock parameters to the port.
    fn configure(&mut self, config: &I2cBusConfig) -> Result<(), DriverError>;

    /// Set the bus timeout in APB clock cycles.
    ///
    /// Optional tuning: the controller keeps its reset-default timeout when
    /// this fails.
    fn set_timeout(&mut self, port: I2cPort, cycles: u32) -> Result<(), DriverError>;

    /// Install the master driver on `port`.
    fn install(&mut self, port: I2cPort) -> Result<I2cBusHandle, DriverError>;
}

/// I2S transmit controller.
pub trait I2sController {
    /// Allocate a master TX channel and configure it for standard mode.
    fn configure(&mut self, config: &I2sConfig) -> Result<I2sChannelHandle, DriverError>;

    /// Start clocks and DMA on a configured channel.
    fn enable(&mut self, channel: &I2sChannelHandle) -> Result<(), DriverError>;
}

/// SPI master controller.
pub trait SpiController {
    /// Initialize the bus (pins, transfer size, DMA channel).
    fn initialize(&mut self, config: &SpiBusConfig) -> Result<SpiBusHandle, DriverError>;
}
