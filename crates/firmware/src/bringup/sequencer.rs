//! Table-driven bring-up sequencer.
//!
//! ```text
//! Pending ──► Running(step) ──► Running(next) ──► … ──► Succeeded
//!                  │
//!                  └─ fatal failure ──► Aborted { step, reason }
//! ```
//!
//! Steps run strictly in table order, one at a time. A step whose dependency
//! has not succeeded fails with [`BringupError::MissingDependency`] without
//! touching its driver. A fatal failure stops the run immediately; a
//! tolerable one is recorded as a [`Degradation`] and the run continues.

use platform::{Board, BoardConfig};

use super::error::{Aborted, BringupError};
use super::handles::{BringupContext, Degradation, Handles};
use super::observer::{BringupObserver, NoopObserver};
use super::policy::FatalityPolicy;
use super::step::{Fatality, Step, StepId};
use super::steps::standard_step;
use super::trace;
use crate::config::BringupConfig;

/// Maximum number of entries in a [`Sequence`].
pub const MAX_STEPS: usize = 16;

/// Where the sequencer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringupState {
    /// Nothing has run yet.
    Pending,
    /// `step` is executing.
    Running(StepId),
    /// Every step ran; the context has been handed out.
    Succeeded,
    /// A fatal step failed; no later step ran.
    Aborted(Aborted),
}

impl BringupState {
    /// True for [`Succeeded`](Self::Succeeded) and [`Aborted`](Self::Aborted).
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Aborted(_))
    }
}

/// An ordered bring-up table.
pub struct Sequence<B: Board> {
    steps: heapless::Vec<Step<B>, MAX_STEPS>,
}

impl<B: Board> Sequence<B> {
    /// An empty table.
    pub const fn empty() -> Self {
        Self {
            steps: heapless::Vec::new(),
        }
    }

    /// The nine badge steps in standard order, fatality taken from `policy`.
    pub fn standard(policy: &FatalityPolicy) -> Self {
        let mut sequence = Self::empty();
        for id in StepId::ORDER {
            // STEP_COUNT < MAX_STEPS
            let _ = sequence.steps.push(standard_step(id, policy));
        }
        sequence
    }

    /// Append `step`. Returns it back when the table is full.
    pub fn push(&mut self, step: Step<B>) -> Result<(), Step<B>> {
        self.steps.push(step)
    }

    /// Replace the entry with the same id as `step`. Returns false if absent.
    pub fn replace(&mut self, step: Step<B>) -> bool {
        match self.steps.iter_mut().find(|s| s.id == step.id) {
            Some(slot) => {
                *slot = step;
                true
            }
            None => false,
        }
    }

    /// Entries in execution order.
    pub fn steps(&self) -> &[Step<B>] {
        &self.steps
    }
}

impl<B: Board> core::fmt::Debug for Sequence<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.steps.iter()).finish()
    }
}

/// Runs a [`Sequence`] against a [`Board`].
pub struct Orchestrator<'a, B: Board, O: BringupObserver = NoopObserver> {
    board: &'a mut B,
    config: &'a BoardConfig,
    sequence: Sequence<B>,
    observer: O,
}

impl<'a, B: Board> Orchestrator<'a, B> {
    /// Standard sequence for `config`, no observer.
    pub fn new(board: &'a mut B, config: &'a BringupConfig) -> Self {
        Self {
            board,
            config: &config.board,
            sequence: Sequence::standard(&config.policy),
            observer: NoopObserver,
        }
    }
}

impl<'a, B: Board, O: BringupObserver> Orchestrator<'a, B, O> {
    /// Run `sequence` instead of the standard one.
    pub fn with_sequence(mut self, sequence: Sequence<B>) -> Self {
        self.sequence = sequence;
        self
    }

    /// Report progress to `observer`.
    pub fn with_observer<P: BringupObserver>(self, observer: P) -> Orchestrator<'a, B, P> {
        Orchestrator {
            board: self.board,
            config: self.config,
            sequence: self.sequence,
            observer,
        }
    }

    /// The table that [`run`](Self::run) will execute.
    pub fn sequence(&self) -> &Sequence<B> {
        &self.sequence
    }

    /// Execute every step once, in order.
    ///
    /// Returns the context on success, or the first fatal failure.
    pub fn run(self) -> Result<BringupContext, Aborted> {
        let Self {
            board,
            config,
            sequence,
            mut observer,
        } = self;
        let mut slots = Handles::new();
        let mut completed: heapless::Vec<StepId, MAX_STEPS> = heapless::Vec::new();

        for step in sequence.steps() {
            observer.state_changed(&BringupState::Running(step.id));
            trace::step_started(step.id);

            let result = match step.depends_on {
                Some(dep) if !completed.contains(&dep) => {
                    Err(BringupError::MissingDependency(dep))
                }
                _ => (step.run)(&mut *board, config, &mut slots),
            };

            match result {
                Ok(()) => {
                    // One entry per table step; the table holds at most MAX_STEPS.
                    let _ = completed.push(step.id);
                    trace::step_succeeded(step.id);
                    observer.step_succeeded(step.id);
                }
                Err(error) => {
                    observer.step_failed(step.id, step.fatality, &error);
                    match step.fatality {
                        Fatality::Fatal => return Err(abort(&mut observer, step.id, error)),
                        Fatality::Tolerable => {
                            trace::step_tolerated(step.id, &error);
                            slots.note(Degradation::SubsystemAbsent {
                                step: step.id,
                                reason: error,
                            });
                        }
                    }
                }
            }
        }

        match slots.into_context() {
            Ok(context) => {
                trace::completed(context.degradations().len());
                observer.state_changed(&BringupState::Succeeded);
                Ok(context)
            }
            Err(missing) => Err(abort(
                &mut observer,
                missing,
                BringupError::MissingDependency(missing),
            )),
        }
    }
}

fn abort<O: BringupObserver>(observer: &mut O, step: StepId, reason: BringupError) -> Aborted {
    trace::aborted(step, &reason);
    let aborted = Aborted { step, reason };
    observer.state_changed(&BringupState::Aborted(aborted));
    aborted
}
