//! Mesh object -> EHM mesh (triangulate, convert axes, weld, bind)

use ehm_common::{EhmMesh, EhmVertex};
use glam::Vec3;
use hashbrown::HashSet;

use super::skinning::GroupBinding;
use super::triangulate::triangulate;
use super::types::{ConvertedMesh, Corner, Influences, WeldedVertex};
use super::weld::Welder;
use crate::error::{ExportError, ExportWarning};
use crate::options::ExportOptions;
use crate::scene::MeshObject;
use crate::skeleton::Skeleton;

/// Convert one mesh object. The skeleton, when present, resolves vertex
/// groups to bone ids.
pub fn convert_mesh(
    mesh: &MeshObject,
    skeleton: Option<&Skeleton>,
    options: &ExportOptions,
) -> Result<ConvertedMesh, ExportError> {
    validate(mesh)?;

    let mut warnings = Vec::new();
    let uvs = select_uv_layer(mesh)?;
    if uvs.is_none() {
        warnings.push(ExportWarning::MissingUvLayer {
            mesh: mesh.name.clone(),
        });
    }

    let binding = GroupBinding::new(&mesh.vertex_groups, skeleton);
    let mut used_groups = HashSet::new();
    let mut dropped = 0usize;
    let influences: Vec<Influences> = mesh
        .vertices
        .iter()
        .map(|v| {
            let (inf, truncated) = binding.bind(&v.groups, &mut used_groups);
            dropped += truncated as usize;
            inf
        })
        .collect();

    if dropped > 0 {
        warnings.push(ExportWarning::ExtraInfluencesDropped {
            mesh: mesh.name.clone(),
            vertices: dropped,
        });
    }
    if skeleton.is_some() {
        for group in binding.unresolved() {
            if used_groups.contains(&(group as u32)) {
                warnings.push(ExportWarning::UnresolvedVertexGroup {
                    mesh: mesh.name.clone(),
                    group: mesh.vertex_groups[group].clone(),
                });
            }
        }
    }

    let axis = options.axis.map();
    let mut welder = Welder::new(options.weld);
    let mut positions: Vec<Vec3> = Vec::new();
    let mut loop_start = 0usize;
    let mut corner_count = 0usize;

    for polygon in &mesh.polygons {
        positions.clear();
        positions.extend(
            polygon
                .vertices
                .iter()
                .map(|&v| Vec3::from_array(mesh.vertices[v as usize].co)),
        );

        for tri in triangulate(&positions, options.triangulation) {
            for k in tri {
                let l = loop_start + k;
                let v = polygon.vertices[k] as usize;
                welder.push(&Corner {
                    position: axis.apply_array(mesh.vertices[v].co),
                    normal: axis.apply_array(mesh.loops[l].normal),
                    uv: uvs.map_or([0.0, 0.0], |data| data[l]),
                    influences: influences[v],
                });
                corner_count += 1;
            }
        }
        loop_start += polygon.vertices.len();
    }

    let welded = welder.finish();
    tracing::debug!(
        "Mesh '{}': {} polygons -> {} corners -> {} vertices",
        mesh.name,
        mesh.polygons.len(),
        corner_count,
        welded.vertices.len()
    );

    Ok(ConvertedMesh {
        mesh: EhmMesh {
            name: mesh.name.clone(),
            vertices: welded.vertices.iter().map(to_ehm_vertex).collect(),
            indices: welded.indices,
        },
        corner_count,
        warnings,
    })
}

/// Output vertex record; the v coordinate is flipped here
fn to_ehm_vertex(v: &WeldedVertex) -> EhmVertex {
    EhmVertex {
        position: v.position,
        normal: v.normal,
        uv: [v.uv[0], 1.0 - v.uv[1]],
        bone_indices: v.influences.bones,
        bone_weights: v.influences.weights,
    }
}

fn validate(mesh: &MeshObject) -> Result<(), ExportError> {
    let malformed = |reason: String| ExportError::malformed_mesh(&mesh.name, reason);

    let corners = mesh.corner_count();
    if corners != mesh.loops.len() {
        return Err(malformed(format!(
            "{} loops for {} polygon corners",
            mesh.loops.len(),
            corners
        )));
    }
    // Triangulation never emits more than three corners per loop
    if corners.saturating_mul(3) > u32::MAX as usize {
        return Err(ExportError::MeshTooLarge {
            mesh: mesh.name.clone(),
            vertices: corners.saturating_mul(3),
        });
    }

    let mut l = 0;
    for (p, polygon) in mesh.polygons.iter().enumerate() {
        if polygon.vertices.len() < 3 {
            return Err(malformed(format!(
                "polygon {} has {} corners",
                p,
                polygon.vertices.len()
            )));
        }
        for &v in &polygon.vertices {
            if v as usize >= mesh.vertices.len() {
                return Err(malformed(format!(
                    "polygon {} references vertex {} of {}",
                    p,
                    v,
                    mesh.vertices.len()
                )));
            }
            if mesh.loops[l].vertex != v {
                return Err(malformed(format!(
                    "loop {} points at vertex {} but polygon {} expects {}",
                    l, mesh.loops[l].vertex, p, v
                )));
            }
            l += 1;
        }
    }
    Ok(())
}

/// UV data of the active layer (first layer if none is marked), or `None`
/// when the mesh has no UV layers
fn select_uv_layer(mesh: &MeshObject) -> Result<Option<&[[f32; 2]]>, ExportError> {
    if mesh.uv_layers.is_empty() {
        return Ok(None);
    }
    let index = mesh.active_uv_layer.unwrap_or(0);
    let layer = mesh.uv_layers.get(index).ok_or_else(|| {
        ExportError::malformed_mesh(
            &mesh.name,
            format!(
                "active UV layer {} of {}",
                index,
                mesh.uv_layers.len()
            ),
        )
    })?;
    if layer.data.len() != mesh.loops.len() {
        return Err(ExportError::malformed_mesh(
            &mesh.name,
            format!(
                "UV layer '{}' has {} entries for {} loops",
                layer.name,
                layer.data.len(),
                mesh.loops.len()
            ),
        ));
    }
    Ok(Some(&layer.data))
}
