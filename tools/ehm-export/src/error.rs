//! Export errors and non-fatal warnings

use ehm_common::Channel;

/// Fatal export failure. Any of these aborts the whole run; no partial
/// output is retained.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Malformed mesh '{mesh}': {reason}")]
    MalformedMesh { mesh: String, reason: String },

    #[error("Clip '{clip}' has two keys for bone '{bone}' channel {channel} at frame {frame}")]
    DuplicateKeyframeChannel {
        clip: String,
        bone: String,
        channel: Channel,
        frame: f32,
    },

    #[error("Invalid animation curve in clip '{clip}' for bone '{bone}': {reason}")]
    InvalidCurve {
        clip: String,
        bone: String,
        reason: String,
    },

    #[error("Clip '{clip}' has invalid playback rate {fps} (must be finite and > 0)")]
    InvalidFrameRate { clip: String, fps: f32 },

    #[error("Skeleton has {bones} bones, but maximum is {max}", max = ehm_common::MAX_BONES)]
    SkeletonTooLarge { bones: usize },

    #[error("Malformed skeleton '{armature}': {reason}")]
    MalformedSkeleton { armature: String, reason: String },

    #[error("Mesh '{mesh}' needs up to {vertices} vertices, which exceeds the u32 index range")]
    MeshTooLarge { mesh: String, vertices: usize },

    #[error("I/O error during export")]
    Io(#[from] std::io::Error),

    #[error("Failed to read scene snapshot")]
    Snapshot(#[from] serde_json::Error),
}

impl ExportError {
    pub(crate) fn malformed_mesh(mesh: &str, reason: impl Into<String>) -> Self {
        ExportError::MalformedMesh {
            mesh: mesh.to_string(),
            reason: reason.into(),
        }
    }
}

/// Non-fatal condition. The export degrades to a documented default and
/// carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportWarning {
    #[error("Mesh '{mesh}' has no UV layer, exporting zero UVs")]
    MissingUvLayer { mesh: String },

    #[error("Mesh '{mesh}' vertex group '{group}' matches no bone, writing unbound influences")]
    UnresolvedVertexGroup { mesh: String, group: String },

    #[error("Mesh '{mesh}' has {vertices} vertices with more than 4 influences, keeping the 4 largest")]
    ExtraInfluencesDropped { mesh: String, vertices: usize },

    #[error("Clip '{clip}' animates unknown bone '{bone}', curve skipped")]
    UnknownAnimatedBone { clip: String, bone: String },

    #[error("No armature with bones found, skeleton and animation export skipped")]
    NoSkeleton,

    #[error("No animation clips found")]
    NoAnimationClips,
}
