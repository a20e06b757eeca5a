//! Shared types for the Event Horizon Mesh (.ehm) asset format
//!
//! This crate is used by:
//! - `ehm-export` (asset pipeline, writes .ehm files)
//! - engine-side loaders and tooling that read .ehm files back
//!
//! # Modules
//!
//! - [`formats`] - EHM records, the byte-exact writer, and the validating reader

pub mod formats;

// Re-export commonly used format items
pub use formats::{
    BinarySerializable,
    // Animation types
    Channel,
    ChannelChange,
    EhmBone,
    EhmClip,
    EhmFile,
    EhmKeyframe,
    EhmMesh,
    EhmTrack,
    EhmVersion,
    EhmVertex,
    // Constants
    EHM_EXT,
    EHM_VERSION,
    FormatError,
    MAX_BONES,
    ROOT_PARENT,
    UNBOUND_BONE,
    VERTEX_RECORD_SIZE,
};
