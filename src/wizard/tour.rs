//! Guided-tour progression over the wizard steps.
//!
//! The controller owns only the step pointer. The editing state is passed
//! in on every call, so completing a field outside the tour is picked up
//! on the next [`TourController::sync`].

use tracing::debug;

use crate::draft::EditorState;

use super::steps::{
    can_proceed, first_incomplete, first_visible_incomplete, is_step_complete, StepSpec, STEPS,
    STEP_COUNT,
};

/// Requested movement through the step list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Lifecycle of one tour run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourPhase {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Outcome of an [`TourController::advance`] request.
///
/// `Blocked` is a normal result, not an error: it names the earliest
/// unmet step and what the user must do there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Pointer moved to the given step
    Moved(usize),
    /// Forward move rejected; the named step must be completed first
    Blocked {
        step: usize,
        reason: &'static str,
    },
    /// Forward move off the end of the step list; the tour is done
    Finished,
    /// The tour is not running
    Inactive,
}

/// Drives the guided tour across the wizard steps
#[derive(Debug, Clone, Default)]
pub struct TourController {
    phase: TourPhase,
    current: usize,
}

impl TourController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TourPhase::Running
    }

    /// Step the tour currently points at
    pub fn current_step(&self) -> usize {
        self.current
    }

    /// The ordered step list the tour walks
    pub fn steps(&self) -> &'static [StepSpec] {
        &STEPS
    }

    /// Begin the tour at the first incomplete step
    pub fn start(&mut self, state: &EditorState) -> usize {
        self.current = first_incomplete(state);
        self.phase = TourPhase::Running;
        debug!(step = self.current, "tour started");
        self.current
    }

    /// Move the pointer one step in `direction`.
    ///
    /// A forward move is only allowed when every earlier step is complete;
    /// otherwise the pointer stays put and the earliest unmet step is
    /// reported. Backward moves clamp at step 0.
    pub fn advance(&mut self, direction: Direction, state: &EditorState) -> Advance {
        if self.phase != TourPhase::Running {
            return Advance::Inactive;
        }

        match direction {
            Direction::Forward => {
                let target = self.current + 1;
                // Leaving the submit step is still a forward move and is
                // gated like any other: every earlier step must hold.
                if !can_proceed(target, state) {
                    let step = (0..target)
                        .find(|&i| !is_step_complete(i, state))
                        .unwrap_or(self.current);
                    debug!(step, "forward move blocked");
                    return Advance::Blocked {
                        step,
                        reason: STEPS[step].requirement,
                    };
                }
                if target >= STEP_COUNT {
                    self.finish();
                    return Advance::Finished;
                }
                self.current = target;
                Advance::Moved(target)
            }
            Direction::Backward => {
                self.current = self.current.saturating_sub(1);
                Advance::Moved(self.current)
            }
        }
    }

    /// Re-point the tour after the editing state changed outside it.
    ///
    /// Finds the first visible step that is still incomplete and, if it
    /// lies ahead of the pointer, snaps forward to it. Returns the new
    /// step when the pointer moved.
    pub fn sync(&mut self, state: &EditorState) -> Option<usize> {
        if self.phase != TourPhase::Running {
            return None;
        }
        match first_visible_incomplete(state) {
            Some(next) if next > self.current => {
                debug!(from = self.current, to = next, "tour snapped forward");
                self.current = next;
                Some(next)
            }
            _ => None,
        }
    }

    /// End the tour normally
    pub fn finish(&mut self) {
        self.phase = TourPhase::Finished;
        self.current = 0;
    }

    /// End the tour early at the user's request
    pub fn skip(&mut self) {
        self.finish();
    }
}
