//! Visualization selection for an indicator.

use serde::{Deserialize, Serialize};

use super::analysis::{PortMapping, TechniqueParam};

/// Which chart renders the analyzed data and how it is wired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VisRef {
    /// Charting library providing the visualization (e.g. "c3", "dygraphs")
    pub library_id: String,
    /// Concrete chart type within the library (e.g. "bar", "pie")
    pub type_id: String,
    pub params: Vec<TechniqueParam>,
    /// Wiring from technique output ports to chart inputs
    pub mapping: PortMapping,
}
