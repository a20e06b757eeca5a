//! EHM version tuple (12 bytes, first thing in every file)

/// Format revision written by this crate.
///
/// 1.0.0 was the mesh-only layout (non-indexed corners). 1.1.0 adds index
/// buffers, skinning, the skeleton block, and sparse animation clips.
pub const EHM_VERSION: EhmVersion = EhmVersion::new(1, 1, 0);

/// Three little-endian u32 values: major, minor, patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EhmVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl EhmVersion {
    pub const SIZE: usize = 12;

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Write version to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.major.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.minor.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.patch.to_le_bytes());
        bytes
    }

    /// Read version from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            major: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            minor: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            patch: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }
}

impl std::fmt::Display for EhmVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
