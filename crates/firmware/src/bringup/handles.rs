//! Handles collected during bring-up and the context handed to the application.

use platform::board_config::Gpio;
use platform::{
    AudioEmulatorHandle, CardInfo, ConfigStoreHandle, DisplayHandle, DriverError, HapticHandle,
    I2cBusHandle, I2sChannelHandle, MountHandle, SpiBusHandle, StoreCorruption,
};

use super::error::BringupError;
use super::sequencer::MAX_STEPS;
use super::step::StepId;
use crate::graphics::GraphicsSurface;

/// Something that went wrong but did not stop bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Degradation {
    /// The config store was erased and re-created; previous settings are gone.
    StoreReinitialized(StoreCorruption),
    /// I2C timeout tuning failed; the bus runs with the driver default timeout.
    I2cTimeoutDefault(DriverError),
    /// A tolerable step failed and its subsystem is absent.
    SubsystemAbsent {
        /// Step that failed.
        step: StepId,
        /// Why.
        reason: BringupError,
    },
}

/// Capacity: a step records at most two degradations, a best-effort note
/// and its own absence, and a table holds at most [`MAX_STEPS`] steps.
#[allow(clippy::arithmetic_side_effects)] // const: 16 * 2
pub const MAX_DEGRADATIONS: usize = MAX_STEPS * 2;

/// Degradations in the order they happened.
pub type Degradations = heapless::Vec<Degradation, MAX_DEGRADATIONS>;

/// Handle slots filled in by the steps as they succeed.
///
/// Each step reads the handles it depends on from here and stores the handle
/// it produces. Nothing is ever torn down; on abort the slots are dropped.
#[derive(Debug, Default)]
pub struct Handles {
    pub(crate) config_store: Option<ConfigStoreHandle>,
    pub(crate) i2c: Option<I2cBusHandle>,
    pub(crate) i2s: Option<I2sChannelHandle>,
    pub(crate) amp_power: Option<Gpio>,
    pub(crate) spi: Option<SpiBusHandle>,
    pub(crate) display: Option<DisplayHandle>,
    pub(crate) haptic: Option<HapticHandle>,
    pub(crate) storage: Option<MountHandle>,
    pub(crate) audio: Option<AudioEmulatorHandle>,
    pub(crate) degradations: Degradations,
}

impl Handles {
    /// Empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the slot `step` fills is occupied.
    pub const fn has(&self, step: StepId) -> bool {
        match step {
            StepId::ConfigStore => self.config_store.is_some(),
            StepId::I2cBus => self.i2c.is_some(),
            StepId::I2sBus => self.i2s.is_some(),
            StepId::AmpPower => self.amp_power.is_some(),
            StepId::SpiBus => self.spi.is_some(),
            StepId::Display => self.display.is_some(),
            StepId::Haptic => self.haptic.is_some(),
            StepId::Storage => self.storage.is_some(),
            StepId::AudioEmulator => self.audio.is_some(),
        }
    }

    /// I2C bus handle, once the I2C step has run.
    pub fn i2c(&self) -> Result<&I2cBusHandle, BringupError> {
        self.i2c
            .as_ref()
            .ok_or(BringupError::MissingDependency(StepId::I2cBus))
    }

    /// I2S channel handle, once the I2S step has run.
    pub fn i2s(&self) -> Result<&I2sChannelHandle, BringupError> {
        self.i2s
            .as_ref()
            .ok_or(BringupError::MissingDependency(StepId::I2sBus))
    }

    /// SPI bus handle, once the SPI step has run.
    pub fn spi(&self) -> Result<&SpiBusHandle, BringupError> {
        self.spi
            .as_ref()
            .ok_or(BringupError::MissingDependency(StepId::SpiBus))
    }

    /// Degradations so far.
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    /// Record a degradation.
    ///
    /// Only the built-in steps and the orchestrator note, which keeps the
    /// count within [`MAX_DEGRADATIONS`].
    pub(crate) fn note(&mut self, degradation: Degradation) {
        let _ = self.degradations.push(degradation);
    }

    /// Finish: move the handles into a [`BringupContext`].
    ///
    /// Fails with the first required step whose handle is missing.
    pub fn into_context(self) -> Result<BringupContext, StepId> {
        let Self {
            config_store,
            i2c,
            i2s,
            amp_power,
            spi,
            display,
            haptic,
            storage,
            audio,
            degradations,
        } = self;
        Ok(BringupContext {
            config_store: config_store.ok_or(StepId::ConfigStore)?,
            i2c: i2c.ok_or(StepId::I2cBus)?,
            i2s: i2s.ok_or(StepId::I2sBus)?,
            amp_power: amp_power.ok_or(StepId::AmpPower)?,
            spi: spi.ok_or(StepId::SpiBus)?,
            display,
            haptic,
            storage,
            audio,
            graphics: GraphicsSurface::new(),
            degradations,
        })
    }
}

/// Returned by [`BringupContext::storage`] when no card was mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MediumAbsent;

impl core::fmt::Display for MediumAbsent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("no storage medium mounted")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MediumAbsent {}

/// Everything bring-up produced, owned by the application from here on.
///
/// Core handles are always present. Device handles are `None` only when the
/// fatality policy tolerated their failure; see [`degradations`](Self::degradations).
#[derive(Debug)]
pub struct BringupContext {
    /// Open config store.
    pub config_store: ConfigStoreHandle,
    /// Installed I2C bus.
    pub i2c: I2cBusHandle,
    /// Enabled I2S channel.
    pub i2s: I2sChannelHandle,
    /// Amplifier power-enable pin, driven to its enable level.
    pub amp_power: Gpio,
    /// Initialized SPI bus.
    pub spi: SpiBusHandle,
    /// E-paper panel.
    pub display: Option<DisplayHandle>,
    /// Haptic driver.
    pub haptic: Option<HapticHandle>,
    /// Audio-chip emulator.
    pub audio: Option<AudioEmulatorHandle>,
    /// Drawing surface for the panel.
    pub graphics: GraphicsSurface,
    storage: Option<MountHandle>,
    degradations: Degradations,
}

impl BringupContext {
    /// Mounted SD card.
    pub fn storage(&self) -> Result<&MountHandle, MediumAbsent> {
        self.storage.as_ref().ok_or(MediumAbsent)
    }

    /// Card details, when a card is mounted.
    pub fn card_info(&self) -> Option<&CardInfo> {
        self.storage.as_ref().map(MountHandle::info)
    }

    /// Take ownership of the mount handle.
    pub fn take_storage(&mut self) -> Result<MountHandle, MediumAbsent> {
        self.storage.take().ok_or(MediumAbsent)
    }

    /// Everything tolerated during bring-up, oldest first.
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    /// True when bring-up finished without a single degradation.
    pub fn is_pristine(&self) -> bool {
        self.degradations.is_empty()
    }

    /// Whether `step`'s subsystem is present.
    pub const fn is_present(&self, step: StepId) -> bool {
        match step {
            StepId::Display => self.display.is_some(),
            StepId::Haptic => self.haptic.is_some(),
            StepId::Storage => self.storage.is_some(),
            StepId::AudioEmulator => self.audio.is_some(),
            _ => true,
        }
    }
}
