//! Vertex welding
//!
//! Collapses triangle corners that agree on position and UV (and the normal,
//! when requested) into shared vertices. Two scalars agree when
//! `|a - b| <= epsilon * max(|a|, |b|)`, evaluated in f64. Corners are
//! visited in order and each one joins the lowest-indexed existing vertex it
//! agrees with, so the first corner to create a slot decides its remaining
//! attributes.
//!
//! For tolerances below half an f32 ulp the relative predicate only accepts
//! equal values, which lets the search go through a hash of the key bits.
//! Larger tolerances fall back to a linear scan over the emitted vertices.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::types::{Corner, WeldedVertex};

/// Default relative tolerance
pub const WELD_EPSILON: f64 = 1e-9;

/// Largest epsilon for which the predicate degenerates to `a == b` on f32 inputs
const EXACT_EPSILON_LIMIT: f64 = f32::EPSILON as f64 / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldOptions {
    /// Relative tolerance
    pub epsilon: f64,
    /// Also require matching normals (keeps hard edges split)
    pub include_normals: bool,
}

impl Default for WeldOptions {
    fn default() -> Self {
        Self {
            epsilon: WELD_EPSILON,
            include_normals: false,
        }
    }
}

/// Welded vertex buffer plus one index per input corner
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeldedMesh {
    pub vertices: Vec<WeldedVertex>,
    pub indices: Vec<u32>,
}

/// Relative tolerance comparison. NaN never matches anything. A negative or
/// NaN `epsilon` degrades to exact equality.
pub fn tolerance_eq(a: f32, b: f32, epsilon: f64) -> bool {
    let (a, b) = (a as f64, b as f64);
    (a - b).abs() <= (epsilon * a.abs().max(b.abs())).max(0.0)
}

/// Weld a corner list in order
pub fn weld(corners: &[Corner], options: &WeldOptions) -> WeldedMesh {
    let mut welder = Welder::new(*options);
    for corner in corners {
        welder.push(corner);
    }
    welder.finish()
}

type WeldKey = [u32; 8];

/// Incremental welder
pub struct Welder {
    options: WeldOptions,
    vertices: Vec<WeldedVertex>,
    indices: Vec<u32>,
    buckets: Option<HashMap<WeldKey, SmallVec<[u32; 2]>>>,
}

impl Welder {
    pub fn new(options: WeldOptions) -> Self {
        let buckets = (options.epsilon < EXACT_EPSILON_LIMIT).then(HashMap::new);
        Self {
            options,
            vertices: Vec::new(),
            indices: Vec::new(),
            buckets,
        }
    }

    /// Add one corner and return the index of the vertex it maps to
    pub fn push(&mut self, corner: &Corner) -> u32 {
        let found = match &self.buckets {
            Some(buckets) => buckets.get(&self.key(corner)).and_then(|slots| {
                slots
                    .iter()
                    .copied()
                    .find(|&i| self.matches(&self.vertices[i as usize], corner))
            }),
            None => self
                .vertices
                .iter()
                .position(|v| self.matches(v, corner))
                .map(|i| i as u32),
        };

        let index = match found {
            Some(index) => index,
            None => {
                let index = self.vertices.len() as u32;
                if let Some(buckets) = &mut self.buckets {
                    let key = Self::key_with(&self.options, corner);
                    buckets.entry(key).or_default().push(index);
                }
                self.vertices.push(*corner);
                index
            }
        };
        self.indices.push(index);
        index
    }

    pub fn finish(self) -> WeldedMesh {
        WeldedMesh {
            vertices: self.vertices,
            indices: self.indices,
        }
    }

    fn matches(&self, v: &WeldedVertex, c: &Corner) -> bool {
        let eps = self.options.epsilon;
        let close = |a: &[f32], b: &[f32]| a.iter().zip(b).all(|(&x, &y)| tolerance_eq(x, y, eps));
        close(&v.position, &c.position)
            && close(&v.uv, &c.uv)
            && (!self.options.include_normals || close(&v.normal, &c.normal))
    }

    fn key(&self, corner: &Corner) -> WeldKey {
        Self::key_with(&self.options, corner)
    }

    fn key_with(options: &WeldOptions, c: &Corner) -> WeldKey {
        // +0.0 and -0.0 compare equal and must share a bucket
        let bits = |f: f32| if f == 0.0 { 0 } else { f.to_bits() };
        let mut key = [0u32; 8];
        key[0] = bits(c.position[0]);
        key[1] = bits(c.position[1]);
        key[2] = bits(c.position[2]);
        key[3] = bits(c.uv[0]);
        key[4] = bits(c.uv[1]);
        if options.include_normals {
            key[5] = bits(c.normal[0]);
            key[6] = bits(c.normal[1]);
            key[7] = bits(c.normal[2]);
        }
        key
    }
}
