//! Export options

use serde::{Deserialize, Serialize};

use crate::axis::AxisConversion;
use crate::mesh::{TriangulationMethod, WeldOptions};

/// Knobs for one export run. Every field has a default, so a partial TOML
/// table or JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Only export objects selected in the host
    pub selection_only: bool,
    pub axis: AxisConversion,
    pub weld: WeldOptions,
    pub triangulation: TriangulationMethod,
    pub export_skeleton: bool,
    /// Ignored when no skeleton is exported
    pub export_animations: bool,
    /// Convert meshes on the rayon thread pool
    pub parallel: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            selection_only: false,
            axis: AxisConversion::default(),
            weld: WeldOptions::default(),
            triangulation: TriangulationMethod::default(),
            export_skeleton: true,
            export_animations: true,
            parallel: true,
        }
    }
}
