//! Integration test: full bring-up against the simulated board.
//!
//! Tests that:
//!   1. Steps run in the fixed order, the I2S channel enabled inside its step
//!   2. A fatal failure stops the run at that step with nothing rolled back
//!   3. A missing SD card is tolerated and everything else is present
//!   4. The config store is erased and reopened only for recoverable conditions
//!   5. I2C timeout tuning failure is a degradation, not a failure
//!   6. The amplifier enable level is latched before the pin is configured
//!   7. The fatality policy governs device steps only
//!   8. A custom table with a misplaced step reports the missing dependency
//!
//! Does NOT require physical hardware.
//!
//! Run with: cargo test -p firmware --test integration_bringup

// Integration test file -- intentional test patterns permitted.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
)]

mod common;

use common::{board_failing_at, step_of, steps_seen};
use firmware::bringup::{
    steps, BringupError, Degradation, DeviceStep, Fatality, FatalityPolicy, MediumAbsent,
    Orchestrator, RecoveryFailure, Sequence, Step, StepId,
};
use firmware::{bring_up, BringupConfig};
use platform::board_config::{Gpio, PinMode};
use platform::mocks::{Call, FaultPoint, SimBoard};
use platform::{DriverError, StoreCorruption, StoreOpenError};

// -- Order ----------------------------------------------------------------

#[test]
fn steps_run_in_fixed_order() {
    let mut board = SimBoard::new();
    bring_up(&mut board, &BringupConfig::badge()).unwrap();
    assert_eq!(steps_seen(&board), StepId::ORDER.to_vec());
}

#[test]
fn full_driver_call_sequence() {
    let mut board = SimBoard::new();
    let cfg = BringupConfig::badge();
    bring_up(&mut board, &cfg).unwrap();

    let i2c = cfg.board.i2c.port;
    assert_eq!(
        board.calls(),
        &[
            Call::StoreOpen,
            Call::I2cConfigure(i2c),
            Call::I2cSetTimeout {
                port: i2c,
                cycles: 20_000
            },
            Call::I2cInstall(i2c),
            Call::I2sConfigure {
                sample_rate_hz: 16_000
            },
            Call::I2sEnable(0),
            Call::GpioSetLevel {
                pin: Gpio(1),
                high: true
            },
            Call::GpioConfigure {
                pin: Gpio(1),
                mode: PinMode::InputOutput
            },
            Call::SpiInitialize(cfg.board.spi.host),
            Call::DisplayInit,
            Call::HapticInit { address: 0x5A },
            Call::StorageMount,
            Call::AudioInit { channel: 0 },
        ]
    );
}

#[test]
fn clean_boot_has_every_handle_and_no_degradations() {
    let mut board = SimBoard::new();
    let ctx = bring_up(&mut board, &BringupConfig::badge()).unwrap();
    assert!(ctx.is_pristine());
    assert!(ctx.display.is_some());
    assert!(ctx.haptic.is_some());
    assert!(ctx.audio.is_some());
    assert_eq!(ctx.storage().unwrap().info().mount_point, "/sdcard");
    assert_eq!(ctx.amp_power, Gpio(1));
}

// -- Fatal failure ----------------------------------------------------------

#[test]
fn spi_failure_aborts_before_devices() {
    let mut board = SimBoard::new().with_fault(FaultPoint::SpiInitialize, DriverError::InvalidArgument);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();

    assert_eq!(aborted.step, StepId::SpiBus);
    assert_eq!(aborted.step.name(), "SPI bus");
    assert_eq!(
        aborted.reason,
        BringupError::BusConfiguration {
            bus: StepId::SpiBus,
            stage: "initialize",
            cause: DriverError::InvalidArgument,
        }
    );

    // Nothing after SPI was attempted.
    for call in [Call::DisplayInit, Call::StorageMount] {
        assert!(!board.calls().contains(&call), "{call:?} attempted");
    }
    assert_eq!(board.count(|c| matches!(c, Call::HapticInit { .. })), 0);
    assert_eq!(board.count(|c| matches!(c, Call::AudioInit { .. })), 0);

    // Earlier buses were not torn down: no extra calls after the failing one.
    assert_eq!(
        board.calls().last(),
        Some(&Call::SpiInitialize(BringupConfig::badge().board.spi.host))
    );
}

#[test]
fn every_step_failure_stops_at_that_step() {
    let cfg = BringupConfig::badge().with_policy(FatalityPolicy::all_required());
    for step in StepId::ORDER {
        let mut board = board_failing_at(step, DriverError::Fail);
        let aborted = bring_up(&mut board, &cfg).unwrap_err();
        assert_eq!(aborted.step, step);
        assert!(
            board.calls().iter().filter_map(step_of).all(|s| s <= step),
            "a step after {step} ran"
        );
    }
}

#[test]
fn gpio_failure_reports_pin() {
    let mut board = SimBoard::new().with_fault(FaultPoint::GpioConfigure, DriverError::InvalidArgument);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();
    assert_eq!(aborted.step, StepId::AmpPower);
    assert_eq!(
        aborted.reason,
        BringupError::GpioConfiguration {
            pin: 1,
            cause: DriverError::InvalidArgument
        }
    );
}

#[test]
fn i2s_enable_failure_is_fatal() {
    let mut board = SimBoard::new().with_fault(FaultPoint::I2sEnable, DriverError::InvalidState);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();
    assert_eq!(aborted.step, StepId::I2sBus);
    assert_eq!(board.count(|c| matches!(c, Call::GpioSetLevel { .. })), 0);
}

#[test]
fn i2c_configure_failure_skips_timeout_and_install() {
    let mut board = SimBoard::new().with_fault(FaultPoint::I2cConfigure, DriverError::InvalidArgument);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();

    assert_eq!(aborted.step, StepId::I2cBus);
    assert_eq!(
        aborted.reason,
        BringupError::BusConfiguration {
            bus: StepId::I2cBus,
            stage: "configure",
            cause: DriverError::InvalidArgument,
        }
    );
    assert_eq!(board.count(|c| matches!(c, Call::I2cSetTimeout { .. })), 0);
    assert_eq!(board.count(|c| matches!(c, Call::I2cInstall(_))), 0);
    assert!(matches!(board.calls().last(), Some(Call::I2cConfigure(_))));
}

// -- Tolerated storage --------------------------------------------------------

#[test]
fn missing_card_is_tolerated() {
    let mut board = SimBoard::new().without_card();
    let ctx = bring_up(&mut board, &BringupConfig::badge()).unwrap();

    assert_eq!(ctx.storage().unwrap_err(), MediumAbsent);
    assert!(ctx.display.is_some());
    assert!(ctx.haptic.is_some());
    assert!(ctx.audio.is_some());
    assert_eq!(
        ctx.degradations(),
        &[Degradation::SubsystemAbsent {
            step: StepId::Storage,
            reason: BringupError::StorageUnavailable(DriverError::NotFound),
        }]
    );
    // Audio emulator still ran after the storage failure.
    assert_eq!(steps_seen(&board).last(), Some(&StepId::AudioEmulator));
}

#[test]
fn missing_card_is_fatal_when_required() {
    let cfg = BringupConfig::badge().with_policy(FatalityPolicy::all_required());
    let mut board = SimBoard::new().without_card();
    let aborted = bring_up(&mut board, &cfg).unwrap_err();
    assert_eq!(aborted.step, StepId::Storage);
    assert_eq!(board.count(|c| matches!(c, Call::AudioInit { .. })), 0);
}

// -- Config store recovery ------------------------------------------------------

#[test]
fn healthy_store_is_never_erased() {
    let mut board = SimBoard::new();
    bring_up(&mut board, &BringupConfig::badge()).unwrap();
    assert_eq!(board.erase_count(), 0);
}

#[test]
fn recoverable_conditions_erase_once_and_continue() {
    for (open_error, condition) in [
        (StoreOpenError::NoFreePages, StoreCorruption::NoFreePages),
        (StoreOpenError::VersionMismatch, StoreCorruption::VersionMismatch),
    ] {
        let mut board = SimBoard::new().with_store_open_results([Err(open_error)]);
        let ctx = bring_up(&mut board, &BringupConfig::badge()).unwrap();
        assert_eq!(board.erase_count(), 1);
        assert_eq!(
            ctx.degradations(),
            &[Degradation::StoreReinitialized(condition)]
        );
        assert_eq!(
            &board.calls()[..3],
            &[Call::StoreOpen, Call::StoreErase, Call::StoreOpen]
        );
    }
}

#[test]
fn failed_reopen_aborts_without_second_erase() {
    let mut board = SimBoard::new().with_store_open_results([
        Err(StoreOpenError::VersionMismatch),
        Err(StoreOpenError::VersionMismatch),
    ]);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();
    assert_eq!(aborted.step, StepId::ConfigStore);
    assert_eq!(
        aborted.reason,
        BringupError::RecoverableStoreCorruption {
            condition: StoreCorruption::VersionMismatch,
            failure: RecoveryFailure::Reopen(StoreOpenError::VersionMismatch),
        }
    );
    assert_eq!(board.erase_count(), 1);
    assert_eq!(steps_seen(&board), vec![StepId::ConfigStore]);
}

#[test]
fn unrecoverable_store_error_skips_erase() {
    let mut board =
        SimBoard::new().with_store_open_results([Err(StoreOpenError::Other(DriverError::Io))]);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();
    assert_eq!(aborted.reason, BringupError::ConfigStore(DriverError::Io));
    assert_eq!(board.erase_count(), 0);
}

// -- I2C timeout ------------------------------------------------------------------

#[test]
fn i2c_timeout_failure_does_not_fail_step() {
    let mut board = SimBoard::new().with_fault(FaultPoint::I2cSetTimeout, DriverError::NotSupported);
    let ctx = bring_up(&mut board, &BringupConfig::badge()).unwrap();
    assert_eq!(
        ctx.degradations(),
        &[Degradation::I2cTimeoutDefault(DriverError::NotSupported)]
    );
    assert_eq!(board.count(|c| matches!(c, Call::I2cInstall(_))), 1);
    assert!(ctx.haptic.is_some(), "haptic still used the installed bus");
}

// -- Amplifier power ------------------------------------------------------------

#[test]
fn amp_level_latched_before_configure() {
    let mut board = SimBoard::new();
    bring_up(&mut board, &BringupConfig::badge()).unwrap();
    let level = board
        .position(|c| matches!(c, Call::GpioSetLevel { high: true, .. }))
        .unwrap();
    let configure = board
        .position(|c| matches!(c, Call::GpioConfigure { .. }))
        .unwrap();
    assert!(level < configure);
}

// -- Policy -------------------------------------------------------------------

#[test]
fn tolerable_devices_become_absences() {
    let cfg = BringupConfig::badge().with_policy(FatalityPolicy::degraded());
    let mut board = SimBoard::new()
        .with_fault(FaultPoint::DisplayInit, DriverError::Timeout)
        .with_fault(FaultPoint::HapticInit, DriverError::NotFound)
        .with_fault(FaultPoint::AudioInit, DriverError::NoMemory);
    let ctx = bring_up(&mut board, &cfg).unwrap();

    assert!(ctx.display.is_none());
    assert!(ctx.haptic.is_none());
    assert!(ctx.audio.is_none());
    assert!(ctx.storage().is_ok());
    let absent: Vec<StepId> = ctx
        .degradations()
        .iter()
        .filter_map(|d| match d {
            Degradation::SubsystemAbsent { step, .. } => Some(*step),
            _ => None,
        })
        .collect();
    assert_eq!(
        absent,
        vec![StepId::Display, StepId::Haptic, StepId::AudioEmulator]
    );
}

#[test]
fn haptic_failure_is_fatal_by_default() {
    let mut board = SimBoard::new().with_fault(FaultPoint::HapticInit, DriverError::NotFound);
    let aborted = bring_up(&mut board, &BringupConfig::badge()).unwrap_err();
    assert_eq!(aborted.step, StepId::Haptic);
    assert_eq!(
        aborted.reason,
        BringupError::DeviceInit {
            device: StepId::Haptic,
            cause: DriverError::NotFound
        }
    );
}

#[test]
fn single_device_override() {
    let policy = FatalityPolicy::badge().with(DeviceStep::Haptic, Fatality::Tolerable);
    let cfg = BringupConfig::badge().with_policy(policy);
    let mut board = SimBoard::new().with_fault(FaultPoint::HapticInit, DriverError::NotFound);
    let ctx = bring_up(&mut board, &cfg).unwrap();
    assert!(ctx.haptic.is_none());
    assert!(ctx.audio.is_some(), "later steps still ran");
}

#[test]
fn core_steps_stay_fatal_under_degraded_policy() {
    let cfg = BringupConfig::badge().with_policy(FatalityPolicy::degraded());
    for step in StepId::ORDER.into_iter().filter(|s| s.is_core()) {
        let mut board = board_failing_at(step, DriverError::Fail);
        assert_eq!(bring_up(&mut board, &cfg).unwrap_err().step, step);
    }
}

// -- Dependencies --------------------------------------------------------------

#[test]
fn misplaced_device_step_reports_missing_dependency() {
    // Display ahead of the SPI bus it needs, tolerated so the run continues.
    let policy = FatalityPolicy::badge();
    let mut sequence = Sequence::<SimBoard>::empty();
    for id in [StepId::ConfigStore, StepId::I2cBus, StepId::I2sBus, StepId::AmpPower] {
        sequence.push(steps::standard_step(id, &policy)).unwrap();
    }
    sequence
        .push(Step::new(
            StepId::Display,
            Some(StepId::SpiBus),
            Fatality::Tolerable,
            steps::display::<SimBoard>,
        ))
        .unwrap();
    sequence
        .push(steps::standard_step(StepId::SpiBus, &policy))
        .unwrap();

    let mut board = SimBoard::new();
    let cfg = BringupConfig::badge();
    let ctx = Orchestrator::new(&mut board, &cfg)
        .with_sequence(sequence)
        .run()
        .unwrap();

    assert_eq!(board.count(|c| *c == Call::DisplayInit), 0);
    assert_eq!(
        ctx.degradations(),
        &[Degradation::SubsystemAbsent {
            step: StepId::Display,
            reason: BringupError::MissingDependency(StepId::SpiBus),
        }]
    );
}

#[test]
fn failed_dependency_blocks_dependent_step() {
    // With both SPI consumers tolerable, a missing SPI bus is still fatal on its own.
    let cfg = BringupConfig::badge().with_policy(FatalityPolicy::degraded());
    let mut board = SimBoard::new().with_fault(FaultPoint::SpiInitialize, DriverError::Fail);
    let aborted = bring_up(&mut board, &cfg).unwrap_err();
    assert_eq!(aborted.step, StepId::SpiBus);
    assert_eq!(board.count(|c| *c == Call::DisplayInit), 0);
}
