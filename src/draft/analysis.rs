//! Analytics technique selection, port mapping, and cached results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One wiring from a query output column to a technique input port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPair {
    pub input_port: String,
    pub output_port: String,
}

/// Port wiring between the query result and a technique (or a technique
/// and a visualization)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PortMapping {
    pub mapping: Vec<PortPair>,
}

impl PortMapping {
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// A named parameter passed to the analytics technique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueParam {
    pub title: String,
    pub value: String,
}

/// The analysis half of an indicator: which technique runs, how it is
/// wired, and the last result it produced.
///
/// `analyzed_data` caches the output of running the technique. It is only
/// valid for the exact inputs it was computed from; `EditorState` clears it
/// whenever the query or any of the technique inputs change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisRef {
    pub technique_id: String,
    pub mapping: PortMapping,
    pub params: Vec<TechniqueParam>,
    pub analyzed_data: BTreeMap<String, serde_json::Value>,
}

impl AnalysisRef {
    /// Whether the technique inputs (not the cached result) are identical
    pub fn inputs_match(&self, other: &AnalysisRef) -> bool {
        self.technique_id == other.technique_id
            && self.mapping == other.mapping
            && self.params == other.params
    }

    /// Drop the cached result, forcing a re-run of the technique
    pub fn invalidate(&mut self) {
        self.analyzed_data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_with_result() -> AnalysisRef {
        let mut analysis = AnalysisRef {
            technique_id: "count-per-item".to_string(),
            ..AnalysisRef::default()
        };
        analysis
            .analyzed_data
            .insert("rows".to_string(), serde_json::json!([1, 2, 3]));
        analysis
    }

    #[test]
    fn test_inputs_match_ignores_cached_result() {
        let a = analysis_with_result();
        let mut b = a.clone();
        b.analyzed_data.clear();
        assert!(a.inputs_match(&b));
    }

    #[test]
    fn test_inputs_match_detects_param_change() {
        let a = analysis_with_result();
        let mut b = a.clone();
        b.params.push(TechniqueParam {
            title: "top_n".to_string(),
            value: "10".to_string(),
        });
        assert!(!a.inputs_match(&b));
    }

    #[test]
    fn test_invalidate_clears_result() {
        let mut analysis = analysis_with_result();
        analysis.invalidate();
        assert!(analysis.analyzed_data.is_empty());
    }
}
