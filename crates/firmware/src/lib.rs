//! Badge firmware
//!
//! Boot-time bring-up for an e-paper badge: config store, I2C/I2S/SPI buses,
//! amplifier power, e-paper panel, haptic driver, SD card and audio-chip
//! emulator, followed by a one-shot test pattern on the panel.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (app, demo)
//!         ↓
//! Bring-up sequencer (bringup: step table, policy, recovery)
//!         ↓
//! Platform HAL (platform crate: driver contracts + handles)
//!         ↓
//! Vendor drivers / SimBoard
//! ```
//!
//! # Features
//!
//! - `hardware` - defmt logging, defmt derives on platform types
//! - `emulator` - tracing logging, std, the `bringup_emulator` example
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run --example bringup_emulator --features emulator -- --fail spi-initialize
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
// Pedantic lints too noisy for firmware application code:
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

pub mod app;
pub mod bringup;
pub mod config;
pub mod demo;
pub mod graphics;

// Re-export key types
pub use app::{start, StartError};
pub use bringup::{bring_up, Aborted, BringupContext, BringupError, Degradation, StepId};
pub use config::BringupConfig;
pub use graphics::{GraphicsSurface, TriColor, FRAME_BYTES};
