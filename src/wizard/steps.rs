//! Step table and evaluators for the authoring wizard.
//!
//! Each step has a pure predicate over [`EditorState`]. Predicates are
//! total: a missing or inconsistent selection is reported as "not
//! satisfied", never as an error.

use crate::draft::{EditorState, Section};

/// Number of wizard steps, including the terminal submit step
pub const STEP_COUNT: usize = 15;

/// Static description of one wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    /// Stable identifier for the step
    pub key: &'static str,
    /// Editor section the step belongs to
    pub section: Section,
    /// What the user must do before moving past this step
    pub requirement: &'static str,
}

/// The canonical step table, in wizard order
pub const STEPS: [StepSpec; STEP_COUNT] = [
    StepSpec {
        key: "lrs-stores",
        section: Section::Filter,
        requirement: "Select at least one LRS store",
    },
    StepSpec {
        key: "platforms",
        section: Section::Filter,
        requirement: "Select at least one platform",
    },
    StepSpec {
        key: "activity-types",
        section: Section::Filter,
        requirement: "Select at least one activity type",
    },
    StepSpec {
        key: "activities",
        section: Section::Filter,
        requirement: "Select at least one activity",
    },
    StepSpec {
        key: "actions",
        section: Section::Filter,
        requirement: "Select at least one action on the chosen activities",
    },
    StepSpec {
        key: "duration",
        section: Section::Filter,
        requirement: "Set both the start and end of the time window",
    },
    StepSpec {
        key: "technique",
        section: Section::Analysis,
        requirement: "Choose an analytics technique",
    },
    StepSpec {
        key: "technique-mapping",
        section: Section::Analysis,
        requirement: "Map the query columns to the technique inputs",
    },
    StepSpec {
        key: "technique-params",
        section: Section::Analysis,
        requirement: "Configure the technique parameters",
    },
    StepSpec {
        key: "analysis-run",
        section: Section::Analysis,
        requirement: "Run the analysis to produce a result",
    },
    StepSpec {
        key: "vis-library",
        section: Section::Visualization,
        requirement: "Choose a visualization library",
    },
    StepSpec {
        key: "vis-type",
        section: Section::Visualization,
        requirement: "Choose a visualization type",
    },
    StepSpec {
        key: "vis-mapping",
        section: Section::Visualization,
        requirement: "Map the analysis outputs to the chart inputs",
    },
    StepSpec {
        key: "preview",
        section: Section::Finalize,
        requirement: "Generate the indicator preview",
    },
    StepSpec {
        key: "submit",
        section: Section::Finalize,
        requirement: "Save the indicator",
    },
];

/// Whether the predicate for `index` holds against the current state.
///
/// Unknown indices are incomplete rather than a panic.
pub fn is_step_complete(index: usize, state: &EditorState) -> bool {
    match index {
        0 => !state.query.lrs_stores.is_empty(),
        1 => !state.query.platforms.is_empty(),
        2 => !state.query.activity_types.is_empty(),
        3 => !state.query.activities.is_empty(),
        4 => !state.query.action_on_activities.is_empty(),
        5 => state.query.duration.is_set(),
        6 => !state.analysis.technique_id.is_empty(),
        7 => !state.analysis.mapping.is_empty(),
        8 => !state.analysis.params.is_empty(),
        9 => !state.analysis.analyzed_data.is_empty(),
        10 => !state.visualization.library_id.is_empty(),
        11 => !state.visualization.type_id.is_empty(),
        12 => !state.visualization.mapping.is_empty(),
        13 => !state.draft.preview.display_code.is_empty(),
        14 => true,
        _ => false,
    }
}

/// Section whose panel must be expanded before `index` can be shown.
///
/// Only the entry step of each collapsible section is gated; the filter
/// section has no gate because it starts the wizard.
fn section_gate(index: usize) -> Option<Section> {
    match index {
        6 => Some(Section::Analysis),
        10 => Some(Section::Visualization),
        14 => Some(Section::Finalize),
        _ => None,
    }
}

/// Whether `index` should currently be presented to the user.
///
/// Step 0 is always visible. Later steps require the previous step to be
/// complete, and section-entry steps additionally require their panel to
/// be unlocked and expanded.
pub fn should_show_step(index: usize, state: &EditorState) -> bool {
    if index == 0 {
        return true;
    }
    if index >= STEP_COUNT || !is_step_complete(index - 1, state) {
        return false;
    }
    match section_gate(index) {
        Some(section) => state.sections.get(section).is_open(),
        None => true,
    }
}

/// First step whose predicate fails, scanning in wizard order.
///
/// Falls back to the terminal step when everything before it is complete.
pub fn first_incomplete(state: &EditorState) -> usize {
    (0..STEP_COUNT)
        .find(|&i| !is_step_complete(i, state))
        .unwrap_or(STEP_COUNT - 1)
}

/// First currently-visible step whose predicate fails, if any
pub fn first_visible_incomplete(state: &EditorState) -> Option<usize> {
    (0..STEP_COUNT).find(|&i| should_show_step(i, state) && !is_step_complete(i, state))
}

/// All steps before `target` are complete
pub fn can_proceed(target: usize, state: &EditorState) -> bool {
    (0..target).all(|i| is_step_complete(i, state))
}
