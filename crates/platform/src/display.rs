//! E-paper panel contract

use crate::board_config::EpaperConfig;
use crate::error::DriverError;
use crate::handle::{DisplayHandle, SpiBusHandle};

/// E-paper panel driver on the shared SPI bus.
pub trait EpaperPanel {
    /// Attach the panel to `bus`, configure CS/DC/RESET/BUSY and bring the
    /// controller to a known state.
    fn init(
        &mut self,
        bus: &SpiBusHandle,
        config: &EpaperConfig,
    ) -> Result<DisplayHandle, DriverError>;

    /// Push a full frame to the panel and refresh it.
    ///
    /// `frame` is the packed 2-bit palette framebuffer, row-major, MSB first.
    fn write_frame(&mut self, display: &DisplayHandle, frame: &[u8]) -> Result<(), DriverError>;
}
