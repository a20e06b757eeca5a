//! Axis conversion between the authoring and engine coordinate conventions
//!
//! A conversion is a signed permutation of the three axes with determinant +1,
//! so it is always a pure rotation. Positions and normals go through
//! [`AxisMap::apply_vec3`], bind matrices through [`AxisMap::apply_mat4`]
//! (conjugation), and quaternions through [`AxisMap::apply_quat`], which
//! reduces to the same signed permutation on the vector part with `w` left
//! alone. Because the quaternion form is a pure relabeling it also applies to
//! sparse animation channels one key at a time.

use ehm_common::Channel;
use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Named axis conversion presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConversion {
    /// Keep authoring coordinates
    Identity,
    /// (x, y, z) → (y, z, x): Z-up authoring space to the engine's Y-up space
    #[default]
    Yzx,
    /// (x, y, z) → (x, z, -y): swaps the vertical and depth axes
    ZUpToYUp,
}

impl AxisConversion {
    pub fn map(self) -> AxisMap {
        match self {
            AxisConversion::Identity => AxisMap::IDENTITY,
            AxisConversion::Yzx => AxisMap {
                source: [1, 2, 0],
                sign: [1.0, 1.0, 1.0],
            },
            AxisConversion::ZUpToYUp => AxisMap {
                source: [0, 2, 1],
                sign: [1.0, 1.0, -1.0],
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AxisConversion::Identity => "identity",
            AxisConversion::Yzx => "yzx",
            AxisConversion::ZUpToYUp => "z_up_to_y_up",
        }
    }
}

impl std::str::FromStr for AxisConversion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "identity" | "none" => Ok(AxisConversion::Identity),
            "yzx" => Ok(AxisConversion::Yzx),
            "z_up_to_y_up" => Ok(AxisConversion::ZUpToYUp),
            other => Err(format!(
                "Unknown axis conversion '{}' (use identity, yzx, or z_up_to_y_up)",
                other
            )),
        }
    }
}

/// Signed axis permutation: `out[i] = sign[i] * in[source[i]]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    source: [usize; 3],
    sign: [f32; 3],
}

impl AxisMap {
    pub const IDENTITY: Self = Self {
        source: [0, 1, 2],
        sign: [1.0, 1.0, 1.0],
    };

    /// Build a map, rejecting anything that is not a proper rotation
    /// (repeated axes, zero signs, or a handedness flip).
    pub fn new(source: [usize; 3], sign: [f32; 3]) -> Option<Self> {
        let mut seen = [false; 3];
        for &s in &source {
            if s > 2 || seen[s] {
                return None;
            }
            seen[s] = true;
        }
        if sign.iter().any(|s| s.abs() != 1.0) {
            return None;
        }
        let map = Self { source, sign };
        (map.determinant() == 1.0).then_some(map)
    }

    fn determinant(&self) -> f32 {
        // Parity of the permutation: count inversions
        let s = self.source;
        let inversions = (s[0] > s[1]) as u32 + (s[0] > s[2]) as u32 + (s[1] > s[2]) as u32;
        let parity = if inversions % 2 == 0 { 1.0 } else { -1.0 };
        parity * self.sign[0] * self.sign[1] * self.sign[2]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn inverse(&self) -> Self {
        let mut inv = Self::IDENTITY;
        for i in 0..3 {
            inv.source[self.source[i]] = i;
            inv.sign[self.source[i]] = self.sign[i];
        }
        inv
    }

    /// Map that applies `self` first, then `next`
    pub fn then(&self, next: &AxisMap) -> Self {
        let mut out = Self::IDENTITY;
        for j in 0..3 {
            out.source[j] = self.source[next.source[j]];
            out.sign[j] = next.sign[j] * self.sign[next.source[j]];
        }
        out
    }

    pub fn matrix(&self) -> Mat3 {
        let mut cols = [[0.0f32; 3]; 3];
        for i in 0..3 {
            cols[self.source[i]][i] = self.sign[i];
        }
        Mat3::from_cols_array_2d(&cols)
    }

    pub fn apply_vec3(&self, v: Vec3) -> Vec3 {
        let v = v.to_array();
        Vec3::new(
            self.sign[0] * v[self.source[0]],
            self.sign[1] * v[self.source[1]],
            self.sign[2] * v[self.source[2]],
        )
    }

    pub fn apply_array(&self, v: [f32; 3]) -> [f32; 3] {
        self.apply_vec3(Vec3::from_array(v)).to_array()
    }

    /// Re-express a transform in the converted frame: `R · M · R⁻¹`
    pub fn apply_mat4(&self, m: Mat4) -> Mat4 {
        let r = Mat4::from_mat3(self.matrix());
        r * m * r.transpose()
    }

    /// Quaternion counterpart of [`apply_mat4`](Self::apply_mat4)
    pub fn apply_quat(&self, q: Quat) -> Quat {
        let v = self.apply_vec3(Vec3::new(q.x, q.y, q.z));
        Quat::from_xyzw(v.x, v.y, v.z, q.w)
    }

    /// Remap one keyed rotation component.
    ///
    /// Returns the output channel and value; non-rotation channels and `w`
    /// pass through unchanged.
    pub fn remap_rotation_channel(&self, channel: Channel, value: f32) -> (Channel, f32) {
        if !channel.is_rotation() {
            return (channel, value);
        }
        let Some(axis) = channel.axis() else {
            return (channel, value);
        };
        // Output component j reads input component source[j]
        let j = self
            .source
            .iter()
            .position(|&s| s == axis)
            .unwrap_or(axis);
        let out = Channel::rotation(j + 1).unwrap_or(channel);
        (out, self.sign[j] * value)
    }
}
