//! Step bodies and the standard step table.
//!
//! Each body issues its driver calls in the order the vendor drivers require
//! and leaves its handle in the [`Handles`] slots. Bodies never decide
//! fatality; the sequencer does that from the table entry.

use platform::{
    AudioEmulator, Board, BoardConfig, DriverError, EpaperPanel, GpioController, HapticDriver,
    I2cController, I2sController, SpiController, StorageDriver,
};

use super::config_store::open_with_recovery;
use super::error::BringupError;
use super::handles::{Degradation, Handles};
use super::policy::FatalityPolicy;
use super::step::{Step, StepFn, StepId};
use super::trace;

fn bus_error(bus: StepId, stage: &'static str) -> impl Fn(DriverError) -> BringupError {
    move |cause| BringupError::BusConfiguration { bus, stage, cause }
}

fn device_error(device: StepId) -> impl Fn(DriverError) -> BringupError {
    move |cause| BringupError::DeviceInit { device, cause }
}

/// Open the config store, recovering once from a recoverable condition.
pub fn config_store<B: Board>(
    board: &mut B,
    _config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let opened = open_with_recovery(board.config_store())?;
    if let Some(condition) = opened.reinitialized() {
        slots.note(Degradation::StoreReinitialized(condition));
    }
    slots.config_store = Some(opened.into_handle());
    Ok(())
}

/// Configure the I2C master, tune its timeout, install the driver.
///
/// Timeout tuning is best effort: a failure leaves the driver default in
/// place and is recorded as a degradation.
pub fn i2c_bus<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let cfg = &config.i2c;
    let i2c = board.i2c();

    i2c.configure(cfg)
        .map_err(bus_error(StepId::I2cBus, "configure"))?;

    if let Err(cause) = i2c.set_timeout(cfg.port, cfg.timeout_cycles()) {
        trace::i2c_timeout_default(cause);
        slots.note(Degradation::I2cTimeoutDefault(cause));
    }

    let bus = i2c
        .install(cfg.port)
        .map_err(bus_error(StepId::I2cBus, "install"))?;
    slots.i2c = Some(bus);
    Ok(())
}

/// Allocate and configure the I2S transmit channel, then enable it.
pub fn i2s_bus<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let i2s = board.i2s();
    let channel = i2s
        .configure(&config.i2s)
        .map_err(bus_error(StepId::I2sBus, "channel configure"))?;
    i2s.enable(&channel)
        .map_err(bus_error(StepId::I2sBus, "channel enable"))?;
    trace::i2s_clock(config.i2s.bclk_hz());
    slots.i2s = Some(channel);
    Ok(())
}

/// Power the amplifier.
///
/// The level is latched before the pin is switched to an output so the pin
/// comes up driving the enable level.
pub fn amp_power<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let cfg = &config.amp_power;
    let gpio = board.gpio();
    gpio.set_level(cfg.pin, cfg.enable_level);
    gpio.configure(cfg.pin, cfg.mode)
        .map_err(|cause| BringupError::GpioConfiguration {
            pin: cfg.pin.num(),
            cause,
        })?;
    slots.amp_power = Some(cfg.pin);
    Ok(())
}

/// Initialize the SPI bus shared by the panel and the SD card.
pub fn spi_bus<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let bus = board
        .spi()
        .initialize(&config.spi)
        .map_err(bus_error(StepId::SpiBus, "initialize"))?;
    slots.spi = Some(bus);
    Ok(())
}

/// Initialize the e-paper panel on the SPI bus.
pub fn display<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let panel = board
        .display()
        .init(slots.spi()?, &config.epaper)
        .map_err(device_error(StepId::Display))?;
    slots.display = Some(panel);
    Ok(())
}

/// Initialize the haptic driver on the I2C bus.
pub fn haptic<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let haptic = board
        .haptic()
        .init(slots.i2c()?, &config.haptic)
        .map_err(device_error(StepId::Haptic))?;
    slots.haptic = Some(haptic);
    Ok(())
}

/// Mount the SD card on the SPI bus.
pub fn storage<B: Board>(
    board: &mut B,
    config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let mount = board
        .storage()
        .mount(slots.spi()?, &config.mount)
        .map_err(BringupError::StorageUnavailable)?;
    slots.storage = Some(mount);
    Ok(())
}

/// Bind the audio-chip emulator to the I2S channel.
pub fn audio_emulator<B: Board>(
    board: &mut B,
    _config: &BoardConfig,
    slots: &mut Handles,
) -> Result<(), BringupError> {
    let audio = board
        .audio()
        .init(slots.i2s()?)
        .map_err(device_error(StepId::AudioEmulator))?;
    slots.audio = Some(audio);
    Ok(())
}

/// Standard table entry for `id` under `policy`.
pub fn standard_step<B: Board>(id: StepId, policy: &FatalityPolicy) -> Step<B> {
    let run: StepFn<B> = match id {
        StepId::ConfigStore => config_store::<B>,
        StepId::I2cBus => i2c_bus::<B>,
        StepId::I2sBus => i2s_bus::<B>,
        StepId::AmpPower => amp_power::<B>,
        StepId::SpiBus => spi_bus::<B>,
        StepId::Display => display::<B>,
        StepId::Haptic => haptic::<B>,
        StepId::Storage => storage::<B>,
        StepId::AudioEmulator => audio_emulator::<B>,
    };
    Step::new(id, id.standard_dependency(), policy.fatality(id), run)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use platform::board_config::{Gpio, PinMode};
    use platform::mocks::{Call, FaultPoint, SimBoard};

    use super::*;
    use crate::bringup::step::Fatality;

    #[test]
    fn i2c_timeout_failure_is_a_degradation() {
        let mut board = SimBoard::new().with_fault(FaultPoint::I2cSetTimeout, DriverError::Fail);
        let mut slots = Handles::new();
        i2c_bus(&mut board, &BoardConfig::badge(), &mut slots).unwrap();
        assert!(slots.has(StepId::I2cBus));
        assert_eq!(
            slots.degradations(),
            &[Degradation::I2cTimeoutDefault(DriverError::Fail)]
        );
    }

    #[test]
    fn i2c_timeout_uses_apb_cycles() {
        let mut board = SimBoard::new();
        i2c_bus(&mut board, &BoardConfig::badge(), &mut Handles::new()).unwrap();
        assert!(board
            .calls()
            .iter()
            .any(|c| matches!(c, Call::I2cSetTimeout { cycles: 20_000, .. })));
    }

    #[test]
    fn i2s_enable_failure_leaves_slot_empty() {
        let mut board = SimBoard::new().with_fault(FaultPoint::I2sEnable, DriverError::InvalidState);
        let mut slots = Handles::new();
        let err = i2s_bus(&mut board, &BoardConfig::badge(), &mut slots).unwrap_err();
        assert_eq!(
            err,
            BringupError::BusConfiguration {
                bus: StepId::I2sBus,
                stage: "channel enable",
                cause: DriverError::InvalidState,
            }
        );
        assert!(!slots.has(StepId::I2sBus));
    }

    #[test]
    fn amp_level_is_latched_before_configure() {
        let mut board = SimBoard::new();
        amp_power(&mut board, &BoardConfig::badge(), &mut Handles::new()).unwrap();
        assert_eq!(
            board.calls(),
            &[
                Call::GpioSetLevel {
                    pin: Gpio(1),
                    high: true
                },
                Call::GpioConfigure {
                    pin: Gpio(1),
                    mode: PinMode::InputOutput
                },
            ]
        );
    }

    #[test]
    fn device_step_without_bus_reports_dependency() {
        let mut board = SimBoard::new();
        let err = display(&mut board, &BoardConfig::badge(), &mut Handles::new()).unwrap_err();
        assert_eq!(err, BringupError::MissingDependency(StepId::SpiBus));
        assert!(board.calls().is_empty(), "driver must not be called");
    }

    #[test]
    fn empty_slot_is_storage_unavailable() {
        let mut board = SimBoard::new().without_card();
        let mut slots = Handles::new();
        spi_bus(&mut board, &BoardConfig::badge(), &mut slots).unwrap();
        let err = storage(&mut board, &BoardConfig::badge(), &mut slots).unwrap_err();
        assert_eq!(err, BringupError::StorageUnavailable(DriverError::NotFound));
    }

    #[test]
    fn standard_table_takes_fatality_from_policy() {
        let policy = FatalityPolicy::badge();
        let step = standard_step::<SimBoard>(StepId::Storage, &policy);
        assert_eq!(step.fatality, Fatality::Tolerable);
        assert_eq!(step.depends_on, Some(StepId::SpiBus));
    }
}
