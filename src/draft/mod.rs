//! In-memory model of the indicator being authored.
//!
//! All aggregates are plain serde values with value equality. They are
//! created fresh at session start, optionally rehydrated from a persisted
//! snapshot, edited through the session, and discarded on submit or reset.

use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod query;
pub mod sections;
pub mod visualization;

pub use analysis::{AnalysisRef, PortMapping, PortPair, TechniqueParam};
pub use query::{DurationFilter, IndicatorQuery, UserQueryCondition};
pub use sections::{Section, SectionState, SectionStates};
pub use visualization::VisRef;

/// Kind of indicator being authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    #[default]
    Basic,
    MultiLevel,
}

/// Generated preview of the finished indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PreviewData {
    /// Embeddable code lines shown to the user for review
    pub display_code: Vec<String>,
    /// Script payload backing the preview
    pub script_data: String,
}

/// Name, type, and preview of the indicator under construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IndicatorDraft {
    pub name: String,
    pub indicator_type: IndicatorType,
    pub preview: PreviewData,
}

/// The full editing state of one authoring session.
///
/// Fields are read freely but written only through the setters, which
/// replace whole values and keep the cached analysis result consistent:
/// any edit to the query or to the technique inputs clears
/// `analysis.analyzed_data`, so a stale result can never survive an
/// upstream change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorState {
    pub draft: IndicatorDraft,
    pub query: IndicatorQuery,
    pub analysis: AnalysisRef,
    pub visualization: VisRef,
    pub sections: SectionStates,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query; invalidates the cached analysis result if
    /// anything actually changed
    pub fn set_query(&mut self, query: IndicatorQuery) {
        if self.query != query {
            self.query = query;
            self.analysis.invalidate();
        }
    }

    /// Replace the analysis selection. The cached result survives only if
    /// the technique inputs are identical to the current ones.
    pub fn set_analysis(&mut self, mut analysis: AnalysisRef) {
        if !analysis.inputs_match(&self.analysis) {
            analysis.invalidate();
        }
        self.analysis = analysis;
    }

    pub fn set_visualization(&mut self, visualization: VisRef) {
        self.visualization = visualization;
    }

    pub fn set_draft(&mut self, draft: IndicatorDraft) {
        self.draft = draft;
    }

    pub fn set_section(&mut self, section: Section, state: SectionState) {
        self.sections.set(section, state);
    }

    /// Discard everything and return to the fresh-session state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_result() -> EditorState {
        let mut state = EditorState::new();
        state.query.lrs_stores.insert("lrs1".to_string());
        state.analysis.technique_id = "count-per-item".to_string();
        state
            .analysis
            .analyzed_data
            .insert("rows".to_string(), serde_json::json!([1, 2]));
        state
    }

    #[test]
    fn test_query_edit_clears_analyzed_data() {
        let mut state = state_with_result();

        let mut query = state.query.clone();
        query.platforms.insert("moodle".to_string());
        state.set_query(query);

        assert!(state.analysis.analyzed_data.is_empty());
    }

    #[test]
    fn test_identical_query_keeps_analyzed_data() {
        let mut state = state_with_result();
        let query = state.query.clone();
        state.set_query(query);
        assert!(!state.analysis.analyzed_data.is_empty());
    }

    #[test]
    fn test_technique_change_clears_analyzed_data() {
        let mut state = state_with_result();

        let mut analysis = state.analysis.clone();
        analysis.technique_id = "heatmap".to_string();
        state.set_analysis(analysis);

        assert!(state.analysis.analyzed_data.is_empty());
        assert_eq!(state.analysis.technique_id, "heatmap");
    }

    #[test]
    fn test_same_inputs_keep_analyzed_data() {
        let mut state = state_with_result();
        let analysis = state.analysis.clone();
        state.set_analysis(analysis);
        assert!(!state.analysis.analyzed_data.is_empty());
    }

    #[test]
    fn test_visualization_edit_keeps_analyzed_data() {
        let mut state = state_with_result();
        state.set_visualization(VisRef {
            library_id: "c3".to_string(),
            ..VisRef::default()
        });
        assert!(!state.analysis.analyzed_data.is_empty());
    }

    #[test]
    fn test_reset_returns_defaults() {
        let mut state = state_with_result();
        state.set_section(Section::Analysis, SectionState::UnlockedOpen);
        state.reset();
        assert_eq!(state, EditorState::default());
    }
}
