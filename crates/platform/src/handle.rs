//! Opaque resource handles produced by driver initialization.
//!
//! Every handle type is distinct so a bus handle can never be passed where a
//! device handle is expected. Handles are deliberately neither `Clone` nor
//! `Copy`: each one has exactly one owner, first the bring-up sequencer and
//! then the application.
//!
//! | Handle                  | Produced by                       | Consumed by                 |
//! |-------------------------|-----------------------------------|-----------------------------|
//! | [`ConfigStoreHandle`]   | [`ConfigStore::open`]             | application                 |
//! | [`I2cBusHandle`]        | [`I2cController::install`]        | [`HapticDriver::init`]      |
//! | [`I2sChannelHandle`]    | [`I2sController::configure`]      | [`AudioEmulator::init`]     |
//! | [`SpiBusHandle`]        | [`SpiController::initialize`]     | display + storage           |
//! | [`DisplayHandle`]       | [`EpaperPanel::init`]             | application                 |
//! | [`HapticHandle`]        | [`HapticDriver::init`]            | application                 |
//! | [`AudioEmulatorHandle`] | [`AudioEmulator::init`]           | application                 |
//! | [`MountHandle`]         | [`StorageDriver::mount`]          | application (optional)      |
//!
//! [`ConfigStore::open`]: crate::ConfigStore::open
//! [`I2cController::install`]: crate::I2cController::install
//! [`I2sController::configure`]: crate::I2sController::configure
//! [`SpiController::initialize`]: crate::SpiController::initialize
//! [`EpaperPanel::init`]: crate::EpaperPanel::init
//! [`HapticDriver::init`]: crate::HapticDriver::init
//! [`AudioEmulator::init`]: crate::AudioEmulator::init
//! [`StorageDriver::mount`]: crate::StorageDriver::mount

use crate::board_config::{I2cPort, SpiHost};

/// Open non-volatile configuration store.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigStoreHandle {
    id: u32,
}

impl ConfigStoreHandle {
    /// Wrap a driver-assigned store id.
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Driver-assigned store id.
    pub const fn id(&self) -> u32 {
        self.id
    }
}

/// Installed I2C master bus.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cBusHandle {
    port: I2cPort,
}

impl I2cBusHandle {
    /// Handle for an installed driver on `port`.
    pub const fn new(port: I2cPort) -> Self {
        Self { port }
    }

    /// Controller port the driver is bound to.
    pub const fn port(&self) -> I2cPort {
        self.port
    }
}

/// Allocated and configured I2S transmit channel.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sChannelHandle {
    id: u8,
}

impl I2sChannelHandle {
    /// Wrap a driver-assigned channel id.
    pub const fn new(id: u8) -> Self {
        Self { id }
    }

    /// Driver-assigned channel id.
    pub const fn id(&self) -> u8 {
        self.id
    }
}

/// Initialized SPI bus. Shared by the display and the SD card slot.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBusHandle {
    host: SpiHost,
}

impl SpiBusHandle {
    /// Handle for the bus driven by `host`.
    pub const fn new(host: SpiHost) -> Self {
        Self { host }
    }

    /// SPI host controller.
    pub const fn host(&self) -> SpiHost {
        self.host
    }
}

/// Initialized e-paper panel.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayHandle {
    id: u32,
}

impl DisplayHandle {
    /// Wrap a driver-assigned panel id.
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Driver-assigned panel id.
    pub const fn id(&self) -> u32 {
        self.id
    }
}

/// Initialized haptic motor driver.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HapticHandle {
    address: u8,
}

impl HapticHandle {
    /// Handle for the driver answering at 7-bit `address`.
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// 7-bit I2C address of the driver.
    pub const fn address(&self) -> u8 {
        self.address
    }
}

/// Audio-chip emulator bound to an enabled I2S channel.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioEmulatorHandle {
    channel: u8,
}

impl AudioEmulatorHandle {
    /// Handle for an emulator feeding I2S channel `channel`.
    pub const fn new(channel: u8) -> Self {
        Self { channel }
    }

    /// I2S channel id the emulator writes to.
    pub const fn channel(&self) -> u8 {
        self.channel
    }
}

/// Mounted removable medium.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MountHandle {
    info: CardInfo,
}

impl MountHandle {
    /// Handle for a mounted card described by `info`.
    pub fn new(info: CardInfo) -> Self {
        Self { info }
    }

    /// Card details reported at mount time.
    pub const fn info(&self) -> &CardInfo {
        &self.info
    }
}

/// Card identification reported by the storage driver at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CardInfo {
    /// Product name from the card's CID register.
    pub name: heapless::String<8>,
    /// Number of addressable sectors.
    pub sector_count: u64,
    /// Sector size in bytes.
    pub sector_size: u32,
    /// Negotiated bus clock in kHz.
    pub max_freq_khz: u32,
    /// VFS path the filesystem is mounted at.
    pub mount_point: &'static str,
}

impl CardInfo {
    /// Card capacity in bytes, saturating on overflow.
    pub fn capacity_bytes(&self) -> u64 {
        self.sector_count.saturating_mul(u64::from(self.sector_size))
    }

    /// Card capacity in whole MiB.
    pub fn capacity_mib(&self) -> u64 {
        self.capacity_bytes() >> 20
    }
}
