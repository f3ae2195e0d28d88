//! Bring-up progress hook.

use super::error::BringupError;
use super::sequencer::BringupState;
use super::step::{Fatality, StepId};

/// Receives bring-up progress as it happens.
///
/// Every method defaults to doing nothing. Logging is done by the sequencer
/// itself, so an observer is only needed to watch progress programmatically.
pub trait BringupObserver {
    /// The sequencer moved to `state`.
    fn state_changed(&mut self, state: &BringupState) {
        let _ = state;
    }

    /// `step` failed; `fatality` decides what happens next.
    fn step_failed(&mut self, step: StepId, fatality: Fatality, error: &BringupError) {
        let _ = (step, fatality, error);
    }

    /// `step` completed successfully.
    fn step_succeeded(&mut self, step: StepId) {
        let _ = step;
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BringupObserver for NoopObserver {}

impl<T: BringupObserver + ?Sized> BringupObserver for &mut T {
    fn state_changed(&mut self, state: &BringupState) {
        (**self).state_changed(state);
    }

    fn step_failed(&mut self, step: StepId, fatality: Fatality, error: &BringupError) {
        (**self).step_failed(step, fatality, error);
    }

    fn step_succeeded(&mut self, step: StepId) {
        (**self).step_succeeded(step);
    }
}
