//! Scene snapshot: the immutable, host-independent input of an export run
//!
//! The authoring environment captures its live scene into these plain records
//! once (usually as JSON); the pipeline never reaches back into host objects.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ExportError;

fn default_fps() -> f32 {
    24.0
}

fn default_fps_base() -> f32 {
    1.0
}

/// Complete scene captured for one export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub name: String,
    /// Playback frames per second (numerator)
    #[serde(default = "default_fps")]
    pub fps: f32,
    /// Playback rate divisor; the rate is `fps / fps_base`
    #[serde(default = "default_fps_base")]
    pub fps_base: f32,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub animations: Vec<AnimationClipSnapshot>,
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            name: String::new(),
            fps: default_fps(),
            fps_base: default_fps_base(),
            objects: Vec::new(),
            animations: Vec::new(),
        }
    }
}

impl SceneSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Scene playback rate in frames per second
    pub fn playback_rate(&self) -> f32 {
        self.fps / self.fps_base
    }
}

/// An object of the host scene, tagged by `"type"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneObject {
    Mesh(MeshObject),
    Armature(ArmatureObject),
    /// Cameras, lights, empties and anything else the exporter ignores
    #[serde(other)]
    Other,
}

impl SceneObject {
    pub fn name(&self) -> Option<&str> {
        match self {
            SceneObject::Mesh(m) => Some(&m.name),
            SceneObject::Armature(a) => Some(&a.name),
            SceneObject::Other => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            SceneObject::Mesh(m) => m.selected,
            SceneObject::Armature(a) => a.selected,
            SceneObject::Other => false,
        }
    }
}

/// A mesh object with its polygon/loop/vertex arrays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshObject {
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    pub vertices: Vec<VertexSnapshot>,
    /// One loop per polygon corner, listed polygon by polygon
    pub loops: Vec<LoopSnapshot>,
    pub polygons: Vec<PolygonSnapshot>,
    #[serde(default)]
    pub uv_layers: Vec<UvLayer>,
    /// Layer used for export; `None` picks the first layer when any exists
    #[serde(default)]
    pub active_uv_layer: Option<usize>,
    /// Vertex group names, indexed by [`GroupWeight::group`]
    #[serde(default)]
    pub vertex_groups: Vec<String>,
}

impl MeshObject {
    pub fn corner_count(&self) -> usize {
        self.polygons.iter().map(|p| p.vertices.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub co: [f32; 3],
    #[serde(default)]
    pub groups: Vec<GroupWeight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupWeight {
    pub group: u32,
    pub weight: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoopSnapshot {
    pub vertex: u32,
    pub normal: [f32; 3],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolygonSnapshot {
    /// Vertex indices in winding order
    pub vertices: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UvLayer {
    #[serde(default)]
    pub name: String,
    /// One UV per loop
    pub data: Vec<[f32; 2]>,
}

/// An armature object and its bone tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArmatureObject {
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    pub bones: Vec<BoneSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneSnapshot {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// World (armature-space) bind transform, column-major
    pub matrix: [[f32; 4]; 4],
}

/// Named per-bone keyframe curves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationClipSnapshot {
    pub name: String,
    /// Overrides the scene playback rate for this clip
    #[serde(default)]
    pub fps: Option<f32>,
    #[serde(default)]
    pub curves: Vec<CurveSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSnapshot {
    pub bone: String,
    pub channel: ChannelTarget,
    pub keys: Vec<KeySnapshot>,
}

/// Animated property and array index, as the host addresses a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTarget {
    pub property: AnimatedProperty,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedProperty {
    Location,
    /// Quaternion components indexed w, x, y, z
    RotationQuaternion,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeySnapshot {
    pub frame: f32,
    pub value: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_scene() {
        let json = r#"{
            "objects": [
                { "type": "camera" },
                {
                    "type": "mesh",
                    "name": "Tri",
                    "selected": true,
                    "vertices": [ { "co": [0, 0, 0] }, { "co": [1, 0, 0] }, { "co": [0, 1, 0] } ],
                    "loops": [
                        { "vertex": 0, "normal": [0, 0, 1] },
                        { "vertex": 1, "normal": [0, 0, 1] },
                        { "vertex": 2, "normal": [0, 0, 1] }
                    ],
                    "polygons": [ { "vertices": [0, 1, 2] } ]
                }
            ]
        }"#;
        let scene = SceneSnapshot::from_json(json).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert!(matches!(scene.objects[0], SceneObject::Other));
        assert_eq!(scene.objects[1].name(), Some("Tri"));
        assert!(scene.objects[1].is_selected());
        assert_eq!(scene.playback_rate(), 24.0);

        let SceneObject::Mesh(mesh) = &scene.objects[1] else {
            panic!("Expected a mesh object");
        };
        assert_eq!(mesh.corner_count(), 3);
        assert!(mesh.uv_layers.is_empty());
    }

    #[test]
    fn test_parse_clip_channels() {
        let json = r#"{
            "fps": 30, "fps_base": 1.001,
            "animations": [{
                "name": "Walk",
                "curves": [{
                    "bone": "Hip",
                    "channel": { "property": "rotation_quaternion", "index": 0 },
                    "keys": [ { "frame": 1, "value": 1.0 } ]
                }]
            }]
        }"#;
        let scene = SceneSnapshot::from_json(json).unwrap();
        let curve = &scene.animations[0].curves[0];
        assert_eq!(curve.channel.property, AnimatedProperty::RotationQuaternion);
        assert_eq!(curve.channel.index, 0);
        assert!((scene.playback_rate() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_invalid_json_is_a_snapshot_error() {
        let err = SceneSnapshot::from_json("{ \"objects\": 3 }").unwrap_err();
        assert!(matches!(err, ExportError::Snapshot(_)));
    }
}
