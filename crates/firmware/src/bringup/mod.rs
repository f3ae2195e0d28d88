//! Boot-time peripheral bring-up.
//!
//! Brings the badge from reset to a state where the application can use
//! every peripheral:
//!
//! | # | Step            | Needs       | Fatal            |
//! |---|-----------------|-------------|------------------|
//! | 1 | Config store    | —           | always           |
//! | 2 | I2C bus         | store       | always           |
//! | 3 | I2S bus         | store       | always           |
//! | 4 | Amplifier power | —           | always           |
//! | 5 | SPI bus         | store       | always           |
//! | 6 | Display         | SPI bus     | policy (yes)     |
//! | 7 | Haptic          | I2C bus     | policy (yes)     |
//! | 8 | Storage         | SPI bus     | policy (no)      |
//! | 9 | Audio emulator  | I2S bus     | policy (yes)     |
//!
//! Bring-up runs once, single-threaded, before the application starts. On
//! success the application owns a [`BringupContext`]; on a fatal failure it
//! gets an [`Aborted`] naming the step and the cause.
//!
//! ```rust,ignore
//! let config = BringupConfig::badge();
//! match firmware::bringup::bring_up(&mut board, &config) {
//!     Ok(ctx) => run_application(ctx),
//!     Err(aborted) => halt(aborted),
//! }
//! ```

pub mod config_store;
pub mod error;
pub mod handles;
pub mod observer;
pub mod policy;
pub mod sequencer;
pub mod step;
pub mod steps;
pub(crate) mod trace;

pub use error::{Aborted, BringupError, RecoveryFailure};
pub use handles::{BringupContext, Degradation, Handles, MediumAbsent};
pub use observer::{BringupObserver, NoopObserver};
pub use policy::{DeviceStep, FatalityPolicy};
pub use sequencer::{BringupState, Orchestrator, Sequence};
pub use step::{Fatality, Step, StepFn, StepId};

use platform::Board;

use crate::config::BringupConfig;

/// Run the standard bring-up for `config` on `board`.
pub fn bring_up<B: Board>(board: &mut B, config: &BringupConfig) -> Result<BringupContext, Aborted> {
    Orchestrator::new(board, config).run()
}
