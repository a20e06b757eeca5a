//! Scene collector: picks what an export run will write

use crate::error::ExportWarning;
use crate::options::ExportOptions;
use crate::scene::{AnimationClipSnapshot, ArmatureObject, MeshObject, SceneObject, SceneSnapshot};

/// Objects chosen for export, borrowed from the snapshot
#[derive(Debug, Default)]
pub struct CollectedScene<'a> {
    /// Scene order
    pub meshes: Vec<&'a MeshObject>,
    /// First eligible armature with bones; further armatures are ignored
    pub armature: Option<&'a ArmatureObject>,
    pub clips: Vec<&'a AnimationClipSnapshot>,
    pub warnings: Vec<ExportWarning>,
}

pub fn collect<'a>(scene: &'a SceneSnapshot, options: &ExportOptions) -> CollectedScene<'a> {
    let eligible = |object: &&SceneObject| !options.selection_only || object.is_selected();

    let mut collected = CollectedScene::default();
    let mut armatures = 0usize;
    for object in scene.objects.iter().filter(eligible) {
        match object {
            SceneObject::Mesh(mesh) => collected.meshes.push(mesh),
            SceneObject::Armature(armature) if armature.bones.is_empty() => {
                tracing::debug!("Armature '{}' has no bones, skipped", armature.name);
            }
            SceneObject::Armature(armature) => {
                armatures += 1;
                if collected.armature.is_none() {
                    collected.armature = Some(armature);
                }
            }
            SceneObject::Other => {}
        }
    }
    if armatures > 1 {
        tracing::debug!("{} armatures found, exporting only the first", armatures);
    }

    if !options.export_skeleton {
        collected.armature = None;
    } else if collected.armature.is_none() {
        collected.warnings.push(ExportWarning::NoSkeleton);
    }

    // Clips are only meaningful against an exported skeleton
    if collected.armature.is_some() && options.export_animations {
        collected.clips = scene.animations.iter().collect();
        if collected.clips.is_empty() {
            collected.warnings.push(ExportWarning::NoAnimationClips);
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BoneSnapshot;

    fn mesh(name: &str, selected: bool) -> SceneObject {
        SceneObject::Mesh(MeshObject {
            name: name.to_string(),
            selected,
            ..Default::default()
        })
    }

    fn armature(name: &str, selected: bool) -> SceneObject {
        SceneObject::Armature(ArmatureObject {
            name: name.to_string(),
            selected,
            bones: vec![BoneSnapshot {
                name: "Root".to_string(),
                parent: None,
                matrix: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }],
        })
    }

    fn empty_armature(name: &str) -> SceneObject {
        SceneObject::Armature(ArmatureObject {
            name: name.to_string(),
            selected: true,
            bones: Vec::new(),
        })
    }

    fn scene() -> SceneSnapshot {
        SceneSnapshot {
            objects: vec![
                mesh("A", false),
                SceneObject::Other,
                armature("RigA", false),
                mesh("B", true),
                armature("RigB", true),
            ],
            animations: vec![AnimationClipSnapshot {
                name: "Idle".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn names<'a>(meshes: &[&'a MeshObject]) -> Vec<&'a str> {
        meshes.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_collect_all_objects() {
        let scene = scene();
        let collected = collect(&scene, &ExportOptions::default());
        assert_eq!(names(&collected.meshes), vec!["A", "B"]);
        assert_eq!(collected.armature.map(|a| a.name.as_str()), Some("RigA"));
        assert_eq!(collected.clips.len(), 1);
        assert!(collected.warnings.is_empty());
    }

    #[test]
    fn test_collect_selection_only() {
        let scene = scene();
        let options = ExportOptions {
            selection_only: true,
            ..Default::default()
        };
        let collected = collect(&scene, &options);
        assert_eq!(names(&collected.meshes), vec!["B"]);
        assert_eq!(collected.armature.map(|a| a.name.as_str()), Some("RigB"));
    }

    #[test]
    fn test_no_armature_skips_clips() {
        let mut scene = scene();
        scene.objects.retain(|o| matches!(o, SceneObject::Mesh(_)));
        let collected = collect(&scene, &ExportOptions::default());
        assert!(collected.armature.is_none());
        assert!(collected.clips.is_empty());
        assert_eq!(collected.warnings, vec![ExportWarning::NoSkeleton]);
    }

    #[test]
    fn test_no_clips_warns() {
        let mut scene = scene();
        scene.animations.clear();
        let collected = collect(&scene, &ExportOptions::default());
        assert_eq!(collected.warnings, vec![ExportWarning::NoAnimationClips]);
    }

    #[test]
    fn test_skeleton_disabled() {
        let scene = scene();
        let options = ExportOptions {
            export_skeleton: false,
            ..Default::default()
        };
        let collected = collect(&scene, &options);
        assert!(collected.armature.is_none());
        assert!(collected.clips.is_empty());
        assert!(collected.warnings.is_empty());
    }

    #[test]
    fn test_animations_disabled() {
        let scene = scene();
        let options = ExportOptions {
            export_animations: false,
            ..Default::default()
        };
        let collected = collect(&scene, &options);
        assert!(collected.armature.is_some());
        assert!(collected.clips.is_empty());
    }

    #[test]
    fn test_boneless_armature_is_not_a_skeleton() {
        let mut scene = scene();
        scene.objects = vec![mesh("A", true), empty_armature("Empty")];
        let collected = collect(&scene, &ExportOptions::default());
        assert!(collected.armature.is_none());
        assert!(collected.clips.is_empty());
        assert_eq!(collected.warnings, vec![ExportWarning::NoSkeleton]);
    }

    #[test]
    fn test_boneless_armature_yields_to_next() {
        let mut scene = scene();
        scene.objects.insert(0, empty_armature("Empty"));
        let collected = collect(&scene, &ExportOptions::default());
        assert_eq!(collected.armature.map(|a| a.name.as_str()), Some("RigA"));
        assert_eq!(collected.clips.len(), 1);
    }
}
