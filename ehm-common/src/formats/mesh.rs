//! EHM mesh record
//!
//! # Layout
//! ```text
//! u64 name_len, u8[name_len] name
//! u64 vertex_count
//! vertex_count × vertex record (52 bytes, see below)
//! u64 index_count
//! index_count × u32 index
//! ```
//!
//! # Vertex record (52 bytes)
//! ```text
//! 0x00: position  f32 × 3
//! 0x0C: normal    f32 × 3
//! 0x18: uv        f32 × 2   (v stored as 1.0 - source_v)
//! 0x20: bone_idx  u8  × 4   (0xFF = unbound)
//! 0x24: weights   f32 × 4   (0.0 for unbound slots)
//! ```

/// Bone index written for an influence slot with no bone
pub const UNBOUND_BONE: u8 = 0xFF;

/// Size of one vertex record in bytes
pub const VERTEX_RECORD_SIZE: usize = 52;

/// One vertex of the output vertex buffer, exactly as stored on disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EhmVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Texture coordinate with the v axis already flipped
    pub uv: [f32; 2],
    pub bone_indices: [u8; 4],
    pub bone_weights: [f32; 4],
}

impl Default for EhmVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0; 3],
            uv: [0.0; 2],
            bone_indices: [UNBOUND_BONE; 4],
            bone_weights: [0.0; 4],
        }
    }
}

impl EhmVertex {
    pub const SIZE: usize = VERTEX_RECORD_SIZE;

    /// Write vertex to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let floats = self
            .position
            .iter()
            .chain(self.normal.iter())
            .chain(self.uv.iter());
        for (i, f) in floats.enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&f.to_le_bytes());
        }
        bytes[32..36].copy_from_slice(&self.bone_indices);
        for (i, w) in self.bone_weights.iter().enumerate() {
            let offset = 36 + i * 4;
            bytes[offset..offset + 4].copy_from_slice(&w.to_le_bytes());
        }
        bytes
    }

    /// Read vertex from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let f = |i: usize| {
            f32::from_le_bytes([bytes[i * 4], bytes[i * 4 + 1], bytes[i * 4 + 2], bytes[i * 4 + 3]])
        };
        Some(Self {
            position: [f(0), f(1), f(2)],
            normal: [f(3), f(4), f(5)],
            uv: [f(6), f(7)],
            bone_indices: [bytes[32], bytes[33], bytes[34], bytes[35]],
            bone_weights: [f(9), f(10), f(11), f(12)],
        })
    }

    /// Number of influence slots that reference a bone
    pub fn bound_influences(&self) -> usize {
        self.bone_indices
            .iter()
            .filter(|&&b| b != UNBOUND_BONE)
            .count()
    }
}

/// A welded, indexed mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EhmMesh {
    pub name: String,
    pub vertices: Vec<EhmVertex>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
}

impl EhmMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Serialized size of this mesh record in bytes
    pub fn encoded_size(&self) -> usize {
        8 + self.name.len() + 8 + self.vertices.len() * VERTEX_RECORD_SIZE + 8 + self.indices.len() * 4
    }
}
