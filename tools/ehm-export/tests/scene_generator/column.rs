//! Skinned column: rings of 4 vertices stacked along +Z, bound to a
//! 3-bone chain (Root -> Spine -> Head), with a wave clip.

use glam::{Mat4, Vec3};

use ehm_export::scene::{
    AnimatedProperty, AnimationClipSnapshot, ArmatureObject, BoneSnapshot, ChannelTarget,
    CurveSnapshot, GroupWeight, KeySnapshot, SceneObject, SceneSnapshot, UvLayer,
};

use super::primitives::mesh_from_polygons;

pub const BONE_NAMES: [&str; 3] = ["Root", "Spine", "Head"];
/// Rings of vertices along the column
pub const COLUMN_RINGS: usize = 4;
/// Vertices per ring
pub const RING_SIZE: usize = 4;
const HALF_WIDTH: f32 = 0.25;

fn ring_corner(k: usize) -> (f32, f32) {
    match k {
        0 => (-HALF_WIDTH, -HALF_WIDTH),
        1 => (HALF_WIDTH, -HALF_WIDTH),
        2 => (HALF_WIDTH, HALF_WIDTH),
        _ => (-HALF_WIDTH, HALF_WIDTH),
    }
}

fn column_mesh() -> ehm_export::scene::MeshObject {
    let mut positions = Vec::new();
    for r in 0..COLUMN_RINGS {
        for k in 0..RING_SIZE {
            let (x, y) = ring_corner(k);
            positions.push([x, y, r as f32]);
        }
    }

    let v = |r: usize, k: usize| (r * RING_SIZE + k % RING_SIZE) as u32;
    let mut polygons = Vec::new();
    for r in 0..COLUMN_RINGS - 1 {
        for k in 0..RING_SIZE {
            polygons.push(vec![v(r, k), v(r, k + 1), v(r + 1, k + 1), v(r + 1, k)]);
        }
    }
    // Caps
    polygons.push(vec![v(0, 3), v(0, 2), v(0, 1), v(0, 0)]);
    let top = COLUMN_RINGS - 1;
    polygons.push(vec![v(top, 0), v(top, 1), v(top, 2), v(top, 3)]);

    let mut mesh = mesh_from_polygons("Column", &positions, &polygons);

    // Per-vertex UVs, so UVs never split a vertex
    let uv_of = |vertex: u32| {
        let r = vertex as usize / RING_SIZE;
        let k = vertex as usize % RING_SIZE;
        [k as f32 / RING_SIZE as f32, r as f32 / (COLUMN_RINGS - 1) as f32]
    };
    mesh.uv_layers.push(UvLayer {
        name: "UVMap".to_string(),
        data: mesh.loops.iter().map(|l| uv_of(l.vertex)).collect(),
    });

    // Group 3 names no bone
    mesh.vertex_groups = BONE_NAMES
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once("Cloth".to_string()))
        .collect();
    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        let r = i / RING_SIZE;
        vertex.groups = match r {
            0 => vec![GroupWeight { group: 0, weight: 1.0 }],
            1 => vec![
                GroupWeight { group: 0, weight: 0.5 },
                GroupWeight { group: 1, weight: 0.5 },
            ],
            2 => vec![
                GroupWeight { group: 1, weight: 0.5 },
                GroupWeight { group: 2, weight: 0.5 },
            ],
            _ => vec![
                GroupWeight { group: 2, weight: 0.9 },
                GroupWeight { group: 3, weight: 0.1 },
            ],
        };
    }
    mesh
}

fn column_armature() -> ArmatureObject {
    let bones = BONE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| BoneSnapshot {
            name: name.to_string(),
            parent: i.checked_sub(1).map(|p| BONE_NAMES[p].to_string()),
            matrix: Mat4::from_translation(Vec3::new(0.0, 0.0, i as f32)).to_cols_array_2d(),
        })
        .collect();
    ArmatureObject {
        name: "ColumnRig".to_string(),
        selected: true,
        bones,
    }
}

fn curve(bone: &str, property: AnimatedProperty, index: usize, keys: &[(f32, f32)]) -> CurveSnapshot {
    CurveSnapshot {
        bone: bone.to_string(),
        channel: ChannelTarget { property, index },
        keys: keys
            .iter()
            .map(|&(frame, value)| KeySnapshot { frame, value })
            .collect(),
    }
}

/// Wave: Spine sways about x at frames 0/12/24, Head is positioned once at
/// frame 0, and one curve targets a bone the rig doesn't have
fn wave_clip() -> AnimationClipSnapshot {
    let (s, c) = (0.3f32.sin(), 0.3f32.cos());
    AnimationClipSnapshot {
        name: "Wave".to_string(),
        fps: None,
        curves: vec![
            curve(
                "Spine",
                AnimatedProperty::RotationQuaternion,
                0,
                &[(0.0, 1.0), (12.0, c), (24.0, 1.0)],
            ),
            curve(
                "Spine",
                AnimatedProperty::RotationQuaternion,
                1,
                &[(0.0, 0.0), (12.0, s), (24.0, 0.0)],
            ),
            curve("Head", AnimatedProperty::Location, 2, &[(0.0, 0.1)]),
            curve("Tail", AnimatedProperty::Location, 0, &[(0.0, 1.0)]),
        ],
    }
}

/// Column mesh, its armature, and the wave clip at 24 fps
pub fn skinned_column_scene() -> SceneSnapshot {
    SceneSnapshot {
        name: "Column".to_string(),
        fps: 24.0,
        fps_base: 1.0,
        objects: vec![
            SceneObject::Armature(column_armature()),
            SceneObject::Mesh(column_mesh()),
        ],
        animations: vec![wave_clip()],
    }
}
