//! Simulated board for host tests and the desktop emulator.
//!
//! [`SimBoard`] implements every driver contract on one struct, records each
//! driver call in order, and fails any call on request. Bring-up tests drive
//! the real sequencer against it and then assert on the call log.

#![cfg(any(test, feature = "std"))]

use std::collections::VecDeque;
use std::vec::Vec;

use crate::board_config::{
    EpaperConfig, Gpio, HapticConfig, I2cBusConfig, I2cPort, I2sConfig, MountConfig, PinMode,
    SpiBusConfig, SpiHost,
};
use crate::*;

/// One driver call, as seen by the simulated board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// [`ConfigStore::open`]
    StoreOpen,
    /// [`ConfigStore::erase`]
    StoreErase,
    /// [`I2cController::configure`]
    I2cConfigure(I2cPort),
    /// [`I2cController::set_timeout`]
    I2cSetTimeout {
        /// Port.
        port: I2cPort,
        /// Timeout in APB cycles.
        cycles: u32,
    },
    /// [`I2cController::install`]
    I2cInstall(I2cPort),
    /// [`I2sController::configure`]
    I2sConfigure {
        /// Sample rate requested.
        sample_rate_hz: u32,
    },
    /// [`I2sController::enable`]
    I2sEnable(u8),
    /// [`GpioController::set_level`]
    GpioSetLevel {
        /// Pin.
        pin: Gpio,
        /// Level.
        high: bool,
    },
    /// [`GpioController::configure`]
    GpioConfigure {
        /// Pin.
        pin: Gpio,
        /// Mode.
        mode: PinMode,
    },
    /// [`SpiController::initialize`]
    SpiInitialize(SpiHost),
    /// [`EpaperPanel::init`]
    DisplayInit,
    /// [`EpaperPanel::write_frame`]
    DisplayWrite {
        /// Frame length in bytes.
        len: usize,
    },
    /// [`HapticDriver::init`]
    HapticInit {
        /// Address probed.
        address: u8,
    },
    /// [`StorageDriver::mount`]
    StorageMount,
    /// [`AudioEmulator::init`]
    AudioInit {
        /// Channel bound.
        channel: u8,
    },
}

/// A driver call that can be made to fail.
///
/// `ConfigStore::open` is scripted separately with
/// [`SimBoard::with_store_open_results`] because it has its own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    /// Store erase.
    StoreErase,
    /// I2C parameter configuration.
    I2cConfigure,
    /// I2C timeout tuning.
    I2cSetTimeout,
    /// I2C driver install.
    I2cInstall,
    /// I2S channel allocation/configuration.
    I2sConfigure,
    /// I2S channel enable.
    I2sEnable,
    /// GPIO configuration.
    GpioConfigure,
    /// SPI bus initialization.
    SpiInitialize,
    /// E-paper init.
    DisplayInit,
    /// E-paper frame write.
    DisplayWrite,
    /// Haptic init.
    HapticInit,
    /// SD mount.
    StorageMount,
    /// Audio emulator bind.
    AudioInit,
}

impl FaultPoint {
    /// Every fault point, in bring-up call order.
    pub const ALL: [FaultPoint; 13] = [
        Self::StoreErase,
        Self::I2cConfigure,
        Self::I2cSetTimeout,
        Self::I2cInstall,
        Self::I2sConfigure,
        Self::I2sEnable,
        Self::GpioConfigure,
        Self::SpiInitialize,
        Self::DisplayInit,
        Self::HapticInit,
        Self::StorageMount,
        Self::AudioInit,
        Self::DisplayWrite,
    ];

    /// Kebab-case name, as accepted on the emulator command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::StoreErase => "store-erase",
            Self::I2cConfigure => "i2c-configure",
            Self::I2cSetTimeout => "i2c-set-timeout",
            Self::I2cInstall => "i2c-install",
            Self::I2sConfigure => "i2s-configure",
            Self::I2sEnable => "i2s-enable",
            Self::GpioConfigure => "gpio-configure",
            Self::SpiInitialize => "spi-initialize",
            Self::DisplayInit => "display-init",
            Self::DisplayWrite => "display-write",
            Self::HapticInit => "haptic-init",
            Self::StorageMount => "storage-mount",
            Self::AudioInit => "audio-init",
        }
    }

    /// Parse a [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Card the simulated slot reports when one is inserted.
pub fn sim_card_info(mount_point: &'static str) -> CardInfo {
    let mut name = heapless::String::new();
    // "SIM16G" is 6 bytes, within the 8-byte capacity.
    let _ = name.push_str("SIM16G");
    CardInfo {
        name,
        sector_count: 31_116_288,
        sector_size: 512,
        max_freq_khz: 20_000,
        mount_point,
    }
}

/// In-process board: every driver contract, a call log and fault injection.
pub struct SimBoard {
    calls: Vec<Call>,
    faults: Vec<(FaultPoint, DriverError)>,
    store_opens: VecDeque<Result<(), StoreOpenError>>,
    card_inserted: bool,
    frames: Vec<Vec<u8>>,
    next_store_id: u32,
}

impl SimBoard {
    /// A board where every call succeeds and a card is inserted.
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            faults: Vec::new(),
            store_opens: VecDeque::new(),
            card_inserted: true,
            frames: Vec::new(),
            next_store_id: 1,
        }
    }

    /// Make every call at `point` fail with `error`.
    pub fn with_fault(mut self, point: FaultPoint, error: DriverError) -> Self {
        self.faults.push((point, error));
        self
    }

    /// Script the results of successive [`ConfigStore::open`] calls.
    ///
    /// Once the script runs out, `open` succeeds.
    pub fn with_store_open_results<I>(mut self, results: I) -> Self
    where
        I: IntoIterator<Item = Result<(), StoreOpenError>>,
    {
        self.store_opens.extend(results);
        self
    }

    /// Leave the SD slot empty: mount reports `NotFound`.
    pub fn without_card(mut self) -> Self {
        self.card_inserted = false;
        self
    }

    /// Every driver call so far, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Position of the first call matching `pred`.
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(pred)
    }

    /// Number of [`ConfigStore::erase`] calls.
    pub fn erase_count(&self) -> usize {
        self.count(|c| *c == Call::StoreErase)
    }

    /// Frames written to the panel, oldest first.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    fn record(&mut self, call: Call, point: Option<FaultPoint>) -> Result<(), DriverError> {
        self.calls.push(call);
        match point {
            Some(point) => self
                .faults
                .iter()
                .find(|(p, _)| *p == point)
                .map_or(Ok(()), |(_, e)| Err(*e)),
            None => Ok(()),
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for SimBoard {
    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    fn open(&mut self) -> Result<ConfigStoreHandle, StoreOpenError> {
        self.calls.push(Call::StoreOpen);
        self.store_opens.pop_front().unwrap_or(Ok(()))?;
        let id = self.next_store_id;
        self.next_store_id += 1;
        Ok(ConfigStoreHandle::new(id))
    }

    fn erase(&mut self) -> Result<(), DriverError> {
        self.record(Call::StoreErase, Some(FaultPoint::StoreErase))
    }
}

impl I2cController for SimBoard {
    fn configure(&mut self, config: &I2cBusConfig) -> Result<(), DriverError> {
        self.record(Call::I2cConfigure(config.port), Some(FaultPoint::I2cConfigure))
    }

    fn set_timeout(&mut self, port: I2cPort, cycles: u32) -> Result<(), DriverError> {
        self.record(
            Call::I2cSetTimeout { port, cycles },
            Some(FaultPoint::I2cSetTimeout),
        )
    }

    fn install(&mut self, port: I2cPort) -> Result<I2cBusHandle, DriverError> {
        self.record(Call::I2cInstall(port), Some(FaultPoint::I2cInstall))?;
        Ok(I2cBusHandle::new(port))
    }
}

impl I2sController for SimBoard {
    fn configure(&mut self, config: &I2sConfig) -> Result<I2sChannelHandle, DriverError> {
        self.record(
            Call::I2sConfigure {
                sample_rate_hz: config.sample_rate_hz,
            },
            Some(FaultPoint::I2sConfigure),
        )?;
        Ok(I2sChannelHandle::new(0))
    }

    fn enable(&mut self, channel: &I2sChannelHandle) -> Result<(), DriverError> {
        self.record(Call::I2sEnable(channel.id()), Some(FaultPoint::I2sEnable))
    }
}

impl GpioController for SimBoard {
    fn configure(&mut self, pin: Gpio, mode: PinMode) -> Result<(), DriverError> {
        self.record(
            Call::GpioConfigure { pin, mode },
            Some(FaultPoint::GpioConfigure),
        )
    }

    fn set_level(&mut self, pin: Gpio, high: bool) {
        self.calls.push(Call::GpioSetLevel { pin, high });
    }
}

impl SpiController for SimBoard {
    fn initialize(&mut self, config: &SpiBusConfig) -> Result<SpiBusHandle, DriverError> {
        self.record(
            Call::SpiInitialize(config.host),
            Some(FaultPoint::SpiInitialize),
        )?;
        Ok(SpiBusHandle::new(config.host))
    }
}

impl EpaperPanel for SimBoard {
    fn init(
        &mut self,
        _bus: &SpiBusHandle,
        _config: &EpaperConfig,
    ) -> Result<DisplayHandle, DriverError> {
        self.record(Call::DisplayInit, Some(FaultPoint::DisplayInit))?;
        Ok(DisplayHandle::new(0))
    }

    fn write_frame(&mut self, _display: &DisplayHandle, frame: &[u8]) -> Result<(), DriverError> {
        self.record(
            Call::DisplayWrite { len: frame.len() },
            Some(FaultPoint::DisplayWrite),
        )?;
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

impl HapticDriver for SimBoard {
    fn init(
        &mut self,
        _bus: &I2cBusHandle,
        config: &HapticConfig,
    ) -> Result<HapticHandle, DriverError> {
        self.record(
            Call::HapticInit {
                address: config.address,
            },
            Some(FaultPoint::HapticInit),
        )?;
        Ok(HapticHandle::new(config.address))
    }
}

impl StorageDriver for SimBoard {
    fn mount(
        &mut self,
        _bus: &SpiBusHandle,
        config: &MountConfig,
    ) -> Result<MountHandle, DriverError> {
        self.record(Call::StorageMount, Some(FaultPoint::StorageMount))?;
        if !self.card_inserted {
            return Err(DriverError::NotFound);
        }
        Ok(MountHandle::new(sim_card_info(config.mount_point)))
    }
}

impl AudioEmulator for SimBoard {
    fn init(&mut self, channel: &I2sChannelHandle) -> Result<AudioEmulatorHandle, DriverError> {
        self.record(
            Call::AudioInit {
                channel: channel.id(),
            },
            Some(FaultPoint::AudioInit),
        )?;
        Ok(AudioEmulatorHandle::new(channel.id()))
    }
}

impl Board for SimBoard {
    type Store = Self;
    type I2c = Self;
    type I2s = Self;
    type Gpio = Self;
    type Spi = Self;
    type Display = Self;
    type Haptic = Self;
    type Storage = Self;
    type Audio = Self;

    fn config_store(&mut self) -> &mut Self {
        self
    }
    fn i2c(&mut self) -> &mut Self {
        self
    }
    fn i2s(&mut self) -> &mut Self {
        self
    }
    fn gpio(&mut self) -> &mut Self {
        self
    }
    fn spi(&mut self) -> &mut Self {
        self
    }
    fn display(&mut self) -> &mut Self {
        self
    }
    fn haptic(&mut self) -> &mut Self {
        self
    }
    fn storage(&mut self) -> &mut Self {
        self
    }
    fn audio(&mut self) -> &mut Self {
        self
    }
}
