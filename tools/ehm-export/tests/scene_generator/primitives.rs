//! Static mesh primitives.

use std::f32::consts::TAU;

use ehm_export::scene::{LoopSnapshot, MeshObject, PolygonSnapshot, UvLayer, VertexSnapshot};

/// Build a mesh from positions and polygons, with flat per-polygon normals
/// (Newell) on every loop and no UVs
pub fn mesh_from_polygons(name: &str, positions: &[[f32; 3]], polygons: &[Vec<u32>]) -> MeshObject {
    let mut loops = Vec::new();
    for poly in polygons {
        let normal = polygon_normal(positions, poly);
        loops.extend(poly.iter().map(|&vertex| LoopSnapshot { vertex, normal }));
    }
    MeshObject {
        name: name.to_string(),
        selected: true,
        vertices: positions
            .iter()
            .map(|&co| VertexSnapshot {
                co,
                groups: Vec::new(),
            })
            .collect(),
        loops,
        polygons: polygons
            .iter()
            .map(|p| PolygonSnapshot { vertices: p.clone() })
            .collect(),
        ..Default::default()
    }
}

fn polygon_normal(positions: &[[f32; 3]], poly: &[u32]) -> [f32; 3] {
    let mut n = [0.0f32; 3];
    for i in 0..poly.len() {
        let a = positions[poly[i] as usize];
        let b = positions[poly[(i + 1) % poly.len()] as usize];
        n[0] += (a[1] - b[1]) * (a[2] + b[2]);
        n[1] += (a[2] - b[2]) * (a[0] + b[0]);
        n[2] += (a[0] - b[0]) * (a[1] + b[1]);
    }
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 0.0 {
        n.map(|c| c / len)
    } else {
        n
    }
}

/// Unit quad in the XY plane with a full 0..1 UV layer
pub fn quad_mesh(name: &str) -> MeshObject {
    let mut mesh = mesh_from_polygons(
        name,
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        &[vec![0, 1, 2, 3]],
    );
    mesh.uv_layers.push(UvLayer {
        name: "UVMap".to_string(),
        data: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
    });
    mesh
}

/// Unit cube, outward-facing quads, no UVs
pub fn cube_mesh(name: &str) -> MeshObject {
    let positions = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![1, 2, 6, 5],
        vec![2, 3, 7, 6],
        vec![3, 0, 4, 7],
    ];
    mesh_from_polygons(name, &positions, &faces)
}

/// Regular N-gon of radius 1 in the XY plane
pub fn ngon_mesh(name: &str, n: usize) -> MeshObject {
    let positions: Vec<[f32; 3]> = (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * TAU;
            [a.cos(), a.sin(), 0.0]
        })
        .collect();
    mesh_from_polygons(name, &positions, &[(0..n as u32).collect()])
}
