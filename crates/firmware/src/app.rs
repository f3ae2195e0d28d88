//! Application entry: bring-up, card report, demo frame.

use platform::{Board, DriverError, EpaperPanel};

use crate::bringup::{self, trace, Aborted, BringupContext};
use crate::config::BringupConfig;
use crate::demo;

/// Why [`start`] did not return a running context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    /// Bring-up hit a fatal step.
    Bringup(Aborted),
    /// The demo frame could not be written to the panel.
    FrameWrite(DriverError),
}

impl core::fmt::Display for StartError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bringup(aborted) => write!(f, "{aborted}"),
            Self::FrameWrite(e) => write!(f, "demo frame write failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StartError {}

impl From<Aborted> for StartError {
    fn from(aborted: Aborted) -> Self {
        Self::Bringup(aborted)
    }
}

/// Bring the badge up and put the test pattern on the panel.
///
/// Nothing is drawn if bring-up aborts. When the panel was tolerated as
/// absent the frame is rendered into the context's surface but not written.
pub fn start<B: Board>(board: &mut B, config: &BringupConfig) -> Result<BringupContext, StartError> {
    let mut ctx = bringup::bring_up(board, config)?;

    if let Some(info) = ctx.card_info() {
        trace::card_info(info);
    }

    match demo::render(&mut ctx.graphics) {
        Ok(()) => {}
        Err(never) => match never {},
    }

    match ctx.display.as_ref() {
        Some(display) => {
            let frame = ctx.graphics.as_bytes();
            board
                .display()
                .write_frame(display, frame)
                .map_err(StartError::FrameWrite)?;
            trace::frame_written(frame.len());
        }
        None => trace::display_skipped(),
    }

    Ok(ctx)
}
