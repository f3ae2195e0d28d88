//! Hardware Abstraction Layer (HAL) for the badge
//!
//! This crate defines the narrow driver contracts that boot-time bring-up
//! consumes, the opaque handles those drivers produce, and the board wiring
//! tables. It contains no bring-up policy; that lives in the firmware crate.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: app, demo)
//!         ↓
//! Bring-up sequencer (firmware::bringup)
//!         ↓
//! Platform HAL (this crate - driver contracts + handles)
//!         ↓
//! Vendor peripheral drivers (I2C/I2S/SPI/GPIO, e-paper, DRV2605, SD, emulator)
//! ```
//!
//! # Contracts
//!
//! | Trait              | Produces                   | Needs                 |
//! |--------------------|----------------------------|-----------------------|
//! | [`ConfigStore`]    | [`ConfigStoreHandle`]      | —                     |
//! | [`I2cController`]  | [`I2cBusHandle`]           | —                     |
//! | [`I2sController`]  | [`I2sChannelHandle`]       | —                     |
//! | [`GpioController`] | —                          | —                     |
//! | [`SpiController`]  | [`SpiBusHandle`]           | —                     |
//! | [`EpaperPanel`]    | [`DisplayHandle`]          | [`SpiBusHandle`]      |
//! | [`HapticDriver`]   | [`HapticHandle`]           | [`I2cBusHandle`]      |
//! | [`StorageDriver`]  | [`MountHandle`]            | [`SpiBusHandle`]      |
//! | [`AudioEmulator`]  | [`AudioEmulatorHandle`]    | [`I2sChannelHandle`]  |
//!
//! [`Board`] bundles one implementation of each.
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Derive `defmt::Format` on all platform types

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // pin names and part numbers in doc comments
#![allow(clippy::must_use_candidate)] // accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod board;
pub mod board_config;
pub mod config;
pub mod config_store;
pub mod display;
pub mod error;
pub mod gpio;
pub mod handle;
pub mod haptic;
pub mod mocks;
pub mod peripheral;
pub mod storage;

// Re-export driver contracts
pub use audio::AudioEmulator;
pub use board::Board;
pub use config_store::ConfigStore;
pub use display::EpaperPanel;
pub use gpio::{GpioController, SinglePinGpio};
pub use haptic::HapticDriver;
pub use peripheral::{I2cController, I2sController, SpiController};
pub use storage::StorageDriver;

// Re-export handles and errors
pub use board_config::BoardConfig;
pub use error::{DriverError, StoreCorruption, StoreOpenError};
pub use handle::{
    AudioEmulatorHandle, CardInfo, ConfigStoreHandle, DisplayHandle, HapticHandle,
    I2cBusHandle, I2sChannelHandle, MountHandle, SpiBusHandle,
};
