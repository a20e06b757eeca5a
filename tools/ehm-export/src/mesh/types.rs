//! Types shared by the mesh pipeline stages

use ehm_common::{EhmMesh, UNBOUND_BONE};

use crate::error::ExportWarning;

/// Maximum bone influences stored per vertex
pub const MAX_INFLUENCES: usize = 4;

/// Up to four (bone id, weight) pairs; unused slots hold the unbound sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Influences {
    pub bones: [u8; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl Default for Influences {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl Influences {
    pub const UNBOUND: Self = Self {
        bones: [UNBOUND_BONE; MAX_INFLUENCES],
        weights: [0.0; MAX_INFLUENCES],
    };
}

/// Attribute tuple evaluated at one polygon corner (loop)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Source UV (not yet flipped)
    pub uv: [f32; 2],
    pub influences: Influences,
}

/// A corner promoted to the output vertex buffer.
///
/// It keeps the normal, UV and influences of the first corner that created
/// its slot.
pub type WeldedVertex = Corner;

/// Result of converting one mesh object
#[derive(Debug, Clone)]
pub struct ConvertedMesh {
    pub mesh: EhmMesh,
    /// Corner count after triangulation (before welding)
    pub corner_count: usize,
    pub warnings: Vec<ExportWarning>,
}
