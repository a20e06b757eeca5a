//! Vertex group -> bone binding

use hashbrown::HashSet;

use super::types::{Influences, MAX_INFLUENCES};
use crate::scene::GroupWeight;
use crate::skeleton::Skeleton;

/// Per-mesh lookup from vertex group index to exported bone id
pub struct GroupBinding {
    bones: Vec<Option<u8>>,
}

impl GroupBinding {
    /// Resolve each group name against the skeleton. Without a skeleton
    /// every group is unresolved.
    pub fn new(groups: &[String], skeleton: Option<&Skeleton>) -> Self {
        let bones = groups
            .iter()
            .map(|name| skeleton.and_then(|s| s.bone_id(name)))
            .collect();
        Self { bones }
    }

    /// Indices of groups that match no bone
    pub fn unresolved(&self) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_none())
            .map(|(i, _)| i)
    }

    pub fn bone(&self, group: u32) -> Option<u8> {
        self.bones.get(group as usize).copied().flatten()
    }

    /// Bind one vertex. Returns the influences and whether weights beyond
    /// the first four had to be dropped.
    ///
    /// `used` collects the group indices actually referenced, so warnings
    /// can be limited to groups that matter.
    pub fn bind(&self, weights: &[GroupWeight], used: &mut HashSet<u32>) -> (Influences, bool) {
        let mut selected: Vec<&GroupWeight> = weights.iter().collect();
        let dropped = selected.len() > MAX_INFLUENCES;
        if dropped {
            // Stable, so equal weights keep their authored order
            selected.sort_by(|a, b| b.weight.total_cmp(&a.weight));
            selected.truncate(MAX_INFLUENCES);
        }

        let mut out = Influences::UNBOUND;
        for (slot, gw) in selected.into_iter().enumerate() {
            used.insert(gw.group);
            if let Some(bone) = self.bone(gw.group) {
                out.bones[slot] = bone;
                out.weights[slot] = gw.weight;
            }
        }
        (out, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisMap;
    use crate::scene::{ArmatureObject, BoneSnapshot};
    use crate::skeleton::linearize;
    use ehm_common::UNBOUND_BONE;

    fn skeleton() -> Skeleton {
        let bones = ["Root", "Upper", "Lower"]
            .iter()
            .enumerate()
            .map(|(i, name)| BoneSnapshot {
                name: name.to_string(),
                parent: (i > 0).then(|| "Root".to_string()),
                matrix: glam::Mat4::IDENTITY.to_cols_array_2d(),
            })
            .collect();
        let rig = ArmatureObject {
            name: "Rig".to_string(),
            selected: false,
            bones,
        };
        linearize(&rig, &AxisMap::IDENTITY).unwrap()
    }

    fn gw(group: u32, weight: f32) -> GroupWeight {
        GroupWeight { group, weight }
    }

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_groups_resolve_by_name() {
        let skeleton = skeleton();
        let binding = GroupBinding::new(&groups(&["Lower", "Cloth", "Root"]), Some(&skeleton));
        assert_eq!(binding.bone(0), Some(2));
        assert_eq!(binding.bone(1), None);
        assert_eq!(binding.bone(2), Some(0));
        assert_eq!(binding.bone(9), None);
        assert_eq!(binding.unresolved().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_unresolved_group_is_unbound() {
        let skeleton = skeleton();
        let binding = GroupBinding::new(&groups(&["Lower", "Cloth"]), Some(&skeleton));
        let mut used = HashSet::new();
        let (inf, dropped) = binding.bind(&[gw(1, 0.4), gw(0, 0.6)], &mut used);
        assert!(!dropped);
        assert_eq!(inf.bones, [UNBOUND_BONE, 2, UNBOUND_BONE, UNBOUND_BONE]);
        assert_eq!(inf.weights, [0.0, 0.6, 0.0, 0.0]);
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn test_keeps_four_largest() {
        let skeleton = skeleton();
        let names = groups(&["Root", "Upper", "Lower", "Root", "Upper"]);
        let binding = GroupBinding::new(&names, Some(&skeleton));
        let weights = [gw(0, 0.1), gw(1, 0.3), gw(2, 0.2), gw(3, 0.3), gw(4, 0.1)];
        let (inf, dropped) = binding.bind(&weights, &mut HashSet::new());
        assert!(dropped);
        // Ties keep authored order: group 1 before 3, group 0 before 4
        assert_eq!(inf.bones, [1, 0, 2, 0]);
        assert_eq!(inf.weights, [0.3, 0.3, 0.2, 0.1]);
    }

    #[test]
    fn test_without_skeleton_everything_is_unbound() {
        let binding = GroupBinding::new(&groups(&["Root"]), None);
        let (inf, _) = binding.bind(&[gw(0, 1.0)], &mut HashSet::new());
        assert_eq!(inf, Influences::UNBOUND);
    }
}
