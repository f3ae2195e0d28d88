//! Bring-up log lines.
//!
//! Each event logs through `defmt` on hardware builds and through `tracing` in
//! the emulator. Level convention: debug for step start, info for success,
//! warn for anything tolerated, error for the abort.

#![allow(unused_variables)] // arguments are unused when neither log backend is enabled

use platform::{CardInfo, DriverError, StoreCorruption};

use super::error::BringupError;
use super::step::StepId;

pub(crate) fn step_started(step: StepId) {
    #[cfg(feature = "defmt")]
    defmt::debug!("bring-up: {} ...", step);
    #[cfg(feature = "emulator")]
    tracing::debug!(step = step.name(), "bring-up step starting");
}

pub(crate) fn step_succeeded(step: StepId) {
    #[cfg(feature = "defmt")]
    defmt::info!("bring-up: {} ok", step);
    #[cfg(feature = "emulator")]
    tracing::info!(step = step.name(), "bring-up step ok");
}

pub(crate) fn step_tolerated(step: StepId, error: &BringupError) {
    #[cfg(feature = "defmt")]
    defmt::warn!("bring-up: {} unavailable, continuing: {}", step, error);
    #[cfg(feature = "emulator")]
    tracing::warn!(step = step.name(), reason = %error, "subsystem absent, continuing");
}

pub(crate) fn aborted(step: StepId, error: &BringupError) {
    #[cfg(feature = "defmt")]
    defmt::error!("bring-up aborted at {}: {}", step, error);
    #[cfg(feature = "emulator")]
    tracing::error!(step = step.name(), reason = %error, "bring-up aborted");
}

pub(crate) fn completed(degradations: usize) {
    #[cfg(feature = "defmt")]
    defmt::info!("bring-up complete ({=usize} degradations)", degradations);
    #[cfg(feature = "emulator")]
    tracing::info!(degradations, "bring-up complete");
}

pub(crate) fn store_recovering(condition: StoreCorruption) {
    #[cfg(feature = "defmt")]
    defmt::warn!("config store: {}, erasing", condition);
    #[cfg(feature = "emulator")]
    tracing::warn!(condition = condition.as_str(), "config store unusable, erasing");
}

pub(crate) fn store_reinitialized(condition: StoreCorruption) {
    #[cfg(feature = "defmt")]
    defmt::warn!("config store re-initialized after {}; previous settings lost", condition);
    #[cfg(feature = "emulator")]
    tracing::warn!(
        condition = condition.as_str(),
        "config store re-initialized; previous settings lost"
    );
}

pub(crate) fn i2s_clock(bclk_hz: u32) {
    #[cfg(feature = "defmt")]
    defmt::debug!("I2S bit clock {=u32} Hz", bclk_hz);
    #[cfg(feature = "emulator")]
    tracing::debug!(bclk_hz, "I2S channel enabled");
}

pub(crate) fn i2c_timeout_default(cause: DriverError) {
    #[cfg(feature = "defmt")]
    defmt::warn!("I2C timeout tuning failed ({}), keeping driver default", cause);
    #[cfg(feature = "emulator")]
    tracing::warn!(cause = cause.as_str(), "I2C timeout tuning failed, keeping driver default");
}

pub(crate) fn card_info(info: &CardInfo) {
    #[cfg(feature = "defmt")]
    defmt::info!(
        "SD card {=str}: {=u64} MiB, {=u32} B sectors, {=u32} kHz, mounted at {=str}",
        info.name.as_str(),
        info.capacity_mib(),
        info.sector_size,
        info.max_freq_khz,
        info.mount_point
    );
    #[cfg(feature = "emulator")]
    tracing::info!(
        name = info.name.as_str(),
        capacity_mib = info.capacity_mib(),
        sector_size = info.sector_size,
        max_freq_khz = info.max_freq_khz,
        mount_point = info.mount_point,
        "SD card mounted"
    );
}

pub(crate) fn display_skipped() {
    #[cfg(feature = "defmt")]
    defmt::warn!("display absent, demo frame not drawn");
    #[cfg(feature = "emulator")]
    tracing::warn!("display absent, demo frame not drawn");
}

pub(crate) fn frame_written(len: usize) {
    #[cfg(feature = "defmt")]
    defmt::info!("demo frame written ({=usize} bytes)", len);
    #[cfg(feature = "emulator")]
    tracing::info!(bytes = len, "demo frame written");
}
