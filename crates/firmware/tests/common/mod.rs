//! Shared helpers for the bring-up integration tests.

#![allow(dead_code)] // each test binary uses a different subset

use firmware::StepId;
use platform::mocks::{Call, FaultPoint, SimBoard};
use platform::{DriverError, StoreOpenError};

/// The bring-up step a driver call belongs to; `None` for post-bring-up calls.
pub fn step_of(call: &Call) -> Option<StepId> {
    match call {
        Call::StoreOpen | Call::StoreErase => Some(StepId::ConfigStore),
        Call::I2cConfigure(_) | Call::I2cSetTimeout { .. } | Call::I2cInstall(_) => {
            Some(StepId::I2cBus)
        }
        Call::I2sConfigure { .. } | Call::I2sEnable(_) => Some(StepId::I2sBus),
        Call::GpioSetLevel { .. } | Call::GpioConfigure { .. } => Some(StepId::AmpPower),
        Call::SpiInitialize(_) => Some(StepId::SpiBus),
        Call::DisplayInit => Some(StepId::Display),
        Call::HapticInit { .. } => Some(StepId::Haptic),
        Call::StorageMount => Some(StepId::Storage),
        Call::AudioInit { .. } => Some(StepId::AudioEmulator),
        Call::DisplayWrite { .. } => None,
    }
}

/// Steps in the order the board first saw a call for them, deduplicated.
pub fn steps_seen(board: &SimBoard) -> Vec<StepId> {
    let mut seen: Vec<StepId> = Vec::new();
    for step in board.calls().iter().filter_map(step_of) {
        if seen.last() != Some(&step) {
            seen.push(step);
        }
    }
    seen
}

/// A board on which `step` fails fatally with `error`.
pub fn board_failing_at(step: StepId, error: DriverError) -> SimBoard {
    let board = SimBoard::new();
    match step {
        StepId::ConfigStore => {
            board.with_store_open_results([Err(StoreOpenError::Other(error))])
        }
        StepId::I2cBus => board.with_fault(FaultPoint::I2cInstall, error),
        StepId::I2sBus => board.with_fault(FaultPoint::I2sConfigure, error),
        StepId::AmpPower => board.with_fault(FaultPoint::GpioConfigure, error),
        StepId::SpiBus => board.with_fault(FaultPoint::SpiInitialize, error),
        StepId::Display => board.with_fault(FaultPoint::DisplayInit, error),
        StepId::Haptic => board.with_fault(FaultPoint::HapticInit, error),
        StepId::Storage => board.with_fault(FaultPoint::StorageMount, error),
        StepId::AudioEmulator => board.with_fault(FaultPoint::AudioInit, error),
    }
}

/// Every driver error kind.
pub const DRIVER_ERRORS: [DriverError; 9] = [
    DriverError::Fail,
    DriverError::NoMemory,
    DriverError::InvalidArgument,
    DriverError::InvalidState,
    DriverError::NotFound,
    DriverError::NotSupported,
    DriverError::Timeout,
    DriverError::InvalidResponse,
    DriverError::Io,
];
