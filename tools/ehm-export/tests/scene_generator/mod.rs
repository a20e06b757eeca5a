//! Programmatic scene snapshot generation for integration tests.
//!
//! Provides:
//! - Unit quad and unit cube meshes
//! - A skinned column (3 bones stacked along +Z) with a wave clip

#![allow(dead_code)]

mod column;
mod primitives;

pub use column::{BONE_NAMES, COLUMN_RINGS, RING_SIZE, skinned_column_scene};
pub use primitives::{cube_mesh, mesh_from_polygons, ngon_mesh, quad_mesh};

use ehm_export::scene::{SceneObject, SceneSnapshot};

/// Scene containing the given objects and no animation
pub fn scene_with(objects: Vec<SceneObject>) -> SceneSnapshot {
    SceneSnapshot {
        name: "Test".to_string(),
        objects,
        ..Default::default()
    }
}

/// Single quad, selected
pub fn quad_scene() -> SceneSnapshot {
    scene_with(vec![SceneObject::Mesh(quad_mesh("Quad"))])
}
