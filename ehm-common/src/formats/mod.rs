//! Event Horizon Mesh binary format (.ehm)
//!
//! A single .ehm file holds every mesh of an export run, the optional skeleton,
//! and the optional animation clips. POD layout with no padding, no alignment,
//! and no magic bytes: the file starts with the version tuple.
//!
//! # Layout
//! ```text
//! u32 version_major, u32 version_minor, u32 version_patch
//! u64 mesh_count,  mesh_count × mesh record
//! u8  bone_count,  bone_count × bone record
//! u64 clip_count,  clip_count × clip record
//! ```
//!
//! All integers are little-endian, all floats are 32-bit IEEE-754.
//! Strings are `u64 byte_len` followed by UTF-8 bytes (no terminator).
//!
//! Fixed-size records implement the [`BinarySerializable`] trait.

pub mod animation;
mod error;
mod file;
pub mod mesh;
mod reader;
mod serialization;
pub mod skeleton;
mod version;

pub use animation::*;
pub use error::FormatError;
pub use file::EhmFile;
pub use mesh::*;
pub use serialization::BinarySerializable;
pub use skeleton::*;
pub use version::{EHM_VERSION, EhmVersion};

/// File extension for EHM assets (without the dot)
pub const EHM_EXT: &str = "ehm";
