//! EHM skeleton block
//!
//! Bone ids are positions in the linearized bone array.
//!
//! # Layout
//! ```text
//! u8 bone_count                 (0 when no skeleton is exported)
//! bone_count × {
//!   u64 name_len, u8[name_len] name
//!   u8  parent_index            (0xFF = root)
//!   f32 × 16 local_bind_matrix  (column-major, relative to parent)
//!   f32 × 16 inverse_bind_matrix (column-major, inverse of world bind)
//! }
//! ```

/// Parent index written for root bones
pub const ROOT_PARENT: u8 = 0xFF;

/// Largest skeleton the format can address.
///
/// `bone_count` is a u8, and 0xFF is reserved as the root/unbound sentinel,
/// so valid bone ids are 0..=254.
pub const MAX_BONES: usize = 255;

/// Size of one bind matrix in bytes (16 floats × 4 bytes)
pub const BIND_MATRIX_SIZE: usize = 64;

/// One linearized bone
#[derive(Debug, Clone, PartialEq)]
pub struct EhmBone {
    pub name: String,
    /// Index of the parent bone, or [`ROOT_PARENT`]
    pub parent: u8,
    /// Bind transform relative to the parent (column-major)
    pub local_bind: [f32; 16],
    /// Inverse of the bone's world bind transform (column-major)
    pub inverse_bind: [f32; 16],
}

impl EhmBone {
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }

    /// Parent id as an array index, `None` for roots
    pub fn parent_index(&self) -> Option<usize> {
        (!self.is_root()).then_some(self.parent as usize)
    }

    /// Serialized size of this bone record in bytes
    pub fn encoded_size(&self) -> usize {
        8 + self.name.len() + 1 + 2 * BIND_MATRIX_SIZE
    }
}
