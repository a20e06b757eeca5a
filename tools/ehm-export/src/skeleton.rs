//! Skeleton linearizer (armature -> parent-indexed bone array)
//!
//! Bones are emitted depth-first, pre-order, starting from the roots in
//! input order. Array index is the exported bone id, so every parent id is
//! smaller than the ids of its children.

use ehm_common::{EhmBone, MAX_BONES, ROOT_PARENT};
use glam::Mat4;
use hashbrown::HashMap;

use crate::axis::AxisMap;
use crate::error::ExportError;
use crate::scene::ArmatureObject;

/// One bone of a linearized skeleton, in output space
#[derive(Debug, Clone, PartialEq)]
pub struct LinearBone {
    pub name: String,
    pub parent: Option<u8>,
    /// World bind transform after axis conversion
    pub world_bind: Mat4,
    /// `parent_world⁻¹ · world` (world itself for roots)
    pub local_bind: Mat4,
    pub inverse_bind: Mat4,
}

impl LinearBone {
    pub fn to_ehm(&self) -> EhmBone {
        EhmBone {
            name: self.name.clone(),
            parent: self.parent.unwrap_or(ROOT_PARENT),
            local_bind: self.local_bind.to_cols_array(),
            inverse_bind: self.inverse_bind.to_cols_array(),
        }
    }
}

/// Linearized skeleton with a bone name lookup
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub name: String,
    pub bones: Vec<LinearBone>,
    ids: HashMap<String, u8>,
}

impl Skeleton {
    /// Exported id of the bone called `name`
    pub fn bone_id(&self, name: &str) -> Option<u8> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn to_ehm(&self) -> Vec<EhmBone> {
        self.bones.iter().map(LinearBone::to_ehm).collect()
    }
}

/// Flatten an armature's bone tree
pub fn linearize(armature: &ArmatureObject, axis: &AxisMap) -> Result<Skeleton, ExportError> {
    let malformed = |reason: String| ExportError::MalformedSkeleton {
        armature: armature.name.clone(),
        reason,
    };

    let bones = &armature.bones;
    if bones.len() > MAX_BONES {
        return Err(ExportError::SkeletonTooLarge { bones: bones.len() });
    }

    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(bones.len());
    for (i, bone) in bones.iter().enumerate() {
        if by_name.insert(bone.name.as_str(), i).is_some() {
            return Err(malformed(format!("duplicate bone name '{}'", bone.name)));
        }
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); bones.len()];
    for (i, bone) in bones.iter().enumerate() {
        match &bone.parent {
            None => roots.push(i),
            Some(parent) => {
                let p = by_name.get(parent.as_str()).copied().ok_or_else(|| {
                    malformed(format!("bone '{}' has unknown parent '{}'", bone.name, parent))
                })?;
                children[p].push(i);
            }
        }
    }

    // Depth-first pre-order; children pushed in reverse so they pop in input order
    let mut order = Vec::with_capacity(bones.len());
    let mut stack: Vec<(usize, Option<u8>)> = roots.iter().rev().map(|&r| (r, None)).collect();
    while let Some((i, parent)) = stack.pop() {
        let id = order.len() as u8;
        order.push((i, parent));
        stack.extend(children[i].iter().rev().map(|&c| (c, Some(id))));
    }
    if order.len() != bones.len() {
        return Err(malformed(format!(
            "{} bones are unreachable from a root (parent cycle)",
            bones.len() - order.len()
        )));
    }

    let mut out: Vec<LinearBone> = Vec::with_capacity(order.len());
    for (i, parent) in order {
        let bone = &bones[i];
        let world = axis.apply_mat4(Mat4::from_cols_array_2d(&bone.matrix));
        let det = world.determinant();
        if !det.is_finite() || det == 0.0 {
            return Err(malformed(format!(
                "bone '{}' has a singular bind matrix",
                bone.name
            )));
        }
        let local_bind = match parent {
            Some(p) => out[p as usize].inverse_bind * world,
            None => world,
        };
        out.push(LinearBone {
            name: bone.name.clone(),
            parent,
            world_bind: world,
            local_bind,
            inverse_bind: world.inverse(),
        });
    }

    let ids = out
        .iter()
        .enumerate()
        .map(|(id, b)| (b.name.clone(), id as u8))
        .collect();

    tracing::debug!(
        "Linearized armature '{}': {} bones, {} roots",
        armature.name,
        out.len(),
        roots.len()
    );

    Ok(Skeleton {
        name: armature.name.clone(),
        bones: out,
        ids,
    })
}
