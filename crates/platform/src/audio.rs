//! Audio-chip emulator contract
//!
//! The emulator engine renders samples into the I2S channel on its own once
//! bound. Bring-up only needs the bind call.

use crate::error::DriverError;
use crate::handle::{AudioEmulatorHandle, I2sChannelHandle};

/// Software audio-chip emulator feeding an I2S channel.
pub trait AudioEmulator {
    /// Bind the emulator engine to an already-enabled I2S channel.
    fn init(&mut self, channel: &I2sChannelHandle) -> Result<AudioEmulatorHandle, DriverError>;
}
