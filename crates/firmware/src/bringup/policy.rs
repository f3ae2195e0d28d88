//! Which device failures abort bring-up.
//!
//! The config store, the three buses and amplifier power are always fatal.
//! Device steps are configurable; by default only a missing SD card is
//! tolerated, so a badge without a card still boots and draws its screen.

use super::step::{Fatality, StepId};

/// A step whose fatality the policy may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceStep {
    /// E-paper panel.
    Display,
    /// Haptic driver.
    Haptic,
    /// SD card mount.
    Storage,
    /// Audio-chip emulator.
    AudioEmulator,
}

impl DeviceStep {
    /// Every device step.
    pub const ALL: [DeviceStep; 4] = [
        Self::Display,
        Self::Haptic,
        Self::Storage,
        Self::AudioEmulator,
    ];

    /// The bring-up step this device corresponds to.
    pub const fn step(self) -> StepId {
        match self {
            Self::Display => StepId::Display,
            Self::Haptic => StepId::Haptic,
            Self::Storage => StepId::Storage,
            Self::AudioEmulator => StepId::AudioEmulator,
        }
    }

    /// Inverse of [`step`](Self::step); `None` for core steps.
    pub const fn from_step(step: StepId) -> Option<Self> {
        match step {
            StepId::Display => Some(Self::Display),
            StepId::Haptic => Some(Self::Haptic),
            StepId::Storage => Some(Self::Storage),
            StepId::AudioEmulator => Some(Self::AudioEmulator),
            _ => None,
        }
    }
}

/// Per-device fatality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FatalityPolicy {
    display: Fatality,
    haptic: Fatality,
    storage: Fatality,
    audio_emulator: Fatality,
}

impl FatalityPolicy {
    /// Badge default: every device is required except the SD card.
    pub const fn badge() -> Self {
        Self {
            display: Fatality::Fatal,
            haptic: Fatality::Fatal,
            storage: Fatality::Tolerable,
            audio_emulator: Fatality::Fatal,
        }
    }

    /// Every device required, the SD card included.
    pub const fn all_required() -> Self {
        Self {
            storage: Fatality::Fatal,
            ..Self::badge()
        }
    }

    /// Every device optional; only core steps can abort.
    pub const fn degraded() -> Self {
        Self {
            display: Fatality::Tolerable,
            haptic: Fatality::Tolerable,
            storage: Fatality::Tolerable,
            audio_emulator: Fatality::Tolerable,
        }
    }

    /// Copy of this policy with `device` set to `fatality`.
    pub const fn with(mut self, device: DeviceStep, fatality: Fatality) -> Self {
        match device {
            DeviceStep::Display => self.display = fatality,
            DeviceStep::Haptic => self.haptic = fatality,
            DeviceStep::Storage => self.storage = fatality,
            DeviceStep::AudioEmulator => self.audio_emulator = fatality,
        }
        self
    }

    /// Fatality of `step`. Core steps are always [`Fatality::Fatal`].
    pub const fn fatality(&self, step: StepId) -> Fatality {
        match DeviceStep::from_step(step) {
            Some(DeviceStep::Display) => self.display,
            Some(DeviceStep::Haptic) => self.haptic,
            Some(DeviceStep::Storage) => self.storage,
            Some(DeviceStep::AudioEmulator) => self.audio_emulator,
            None => Fatality::Fatal,
        }
    }
}

impl Default for FatalityPolicy {
    fn default() -> Self {
        Self::badge()
    }
}
