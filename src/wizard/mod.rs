//! Step evaluation and guided-tour progression.

pub mod steps;
pub mod tour;

pub use steps::{
    can_proceed, first_incomplete, first_visible_incomplete, is_step_complete, should_show_step,
    StepSpec, STEPS, STEP_COUNT,
};
pub use tour::{Advance, Direction, TourController, TourPhase};
