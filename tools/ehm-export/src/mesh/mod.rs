//! Mesh pipeline (polygons -> welded, indexed triangle mesh)

mod convert;
mod skinning;
mod triangulate;
mod types;
mod weld;

// Re-export public API
pub use convert::convert_mesh;
pub use skinning::GroupBinding;
pub use triangulate::{Triangle, TriangulationMethod, min_angle, triangulate};
pub use types::{ConvertedMesh, Corner, Influences, MAX_INFLUENCES, WeldedVertex};
pub use weld::{WELD_EPSILON, WeldOptions, WeldedMesh, Welder, tolerance_eq, weld};
