//! Bring-up step identifiers and the step table entry type.

use platform::{Board, BoardConfig};

use super::error::BringupError;
use super::handles::Handles;

/// Number of steps in the standard bring-up.
pub const STEP_COUNT: usize = 9;

/// One bring-up step.
///
/// Declaration order is the standard execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepId {
    /// Non-volatile configuration store.
    ConfigStore,
    /// I2C master bus.
    I2cBus,
    /// I2S transmit channel.
    I2sBus,
    /// Amplifier power-enable GPIO.
    AmpPower,
    /// SPI bus shared by the panel and the SD card.
    SpiBus,
    /// E-paper panel.
    Display,
    /// Haptic driver.
    Haptic,
    /// SD card mount.
    Storage,
    /// Audio-chip emulator.
    AudioEmulator,
}

impl StepId {
    /// Standard execution order.
    pub const ORDER: [StepId; STEP_COUNT] = [
        Self::ConfigStore,
        Self::I2cBus,
        Self::I2sBus,
        Self::AmpPower,
        Self::SpiBus,
        Self::Display,
        Self::Haptic,
        Self::Storage,
        Self::AudioEmulator,
    ];

    /// Human-readable name used in log lines and abort reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ConfigStore => "Config store",
            Self::I2cBus => "I2C bus",
            Self::I2sBus => "I2S bus",
            Self::AmpPower => "Amplifier power",
            Self::SpiBus => "SPI bus",
            Self::Display => "Display",
            Self::Haptic => "Haptic",
            Self::Storage => "Storage",
            Self::AudioEmulator => "Audio emulator",
        }
    }

    /// True for the steps whose failure is always fatal.
    pub const fn is_core(self) -> bool {
        matches!(
            self,
            Self::ConfigStore | Self::I2cBus | Self::I2sBus | Self::AmpPower | Self::SpiBus
        )
    }

    /// The step whose handle this one consumes, if any.
    pub const fn standard_dependency(self) -> Option<StepId> {
        match self {
            Self::ConfigStore | Self::AmpPower => None,
            Self::I2cBus | Self::I2sBus | Self::SpiBus => Some(Self::ConfigStore),
            Self::Display | Self::Storage => Some(Self::SpiBus),
            Self::Haptic => Some(Self::I2cBus),
            Self::AudioEmulator => Some(Self::I2sBus),
        }
    }
}

impl core::fmt::Display for StepId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a failure of a step does to the bring-up as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fatality {
    /// Failure aborts bring-up; no later step runs.
    Fatal,
    /// Failure is logged, the subsystem is marked absent, bring-up continues.
    Tolerable,
}

/// Step body: initializes one subsystem and stores its handle in `slots`.
pub type StepFn<B> = fn(&mut B, &BoardConfig, &mut Handles) -> Result<(), BringupError>;

/// One entry of a bring-up table.
pub struct Step<B: Board> {
    /// Which step this is.
    pub id: StepId,
    /// Step that must have succeeded before this one may run.
    pub depends_on: Option<StepId>,
    /// Consequence of failure.
    pub fatality: Fatality,
    /// Step body.
    pub run: StepFn<B>,
}

impl<B: Board> Step<B> {
    /// Build a table entry.
    pub const fn new(
        id: StepId,
        depends_on: Option<StepId>,
        fatality: Fatality,
        run: StepFn<B>,
    ) -> Self {
        Self {
            id,
            depends_on,
            fatality,
            run,
        }
    }
}

// Manual impls: `B` itself is neither Clone nor Copy, only the fn pointer is.
impl<B: Board> Clone for Step<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Board> Copy for Step<B> {}

impl<B: Board> core::fmt::Debug for Step<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("depends_on", &self.depends_on)
            .field("fatality", &self.fatality)
            .finish_non_exhaustive()
    }
}
