//! Polygon triangulation
//!
//! N-gons are split into N-2 triangles over the original corners; no vertices
//! are added. Every triangle lists its corners in the polygon's cyclic order,
//! so the winding (and with it the face normal) is preserved.
//!
//! The beauty heuristic scores every fan, every zig-zag strip, and one
//! greedy ear-clipping pass, and keeps the valid candidate whose smallest
//! interior angle is largest. Quads take the shorter diagonal when both
//! diagonals are inside the quad. When nothing valid is found (degenerate
//! input) a fan from corner 0 is returned.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Triangle as three polygon-local corner indices
pub type Triangle = [usize; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangulationMethod {
    /// Maximize the minimum interior angle
    #[default]
    Beauty,
    /// Plain fan from the first corner; quads still take the shorter diagonal
    Fan,
}

/// Triangulate one polygon given its corner positions in winding order
pub fn triangulate(positions: &[Vec3], method: TriangulationMethod) -> Vec<Triangle> {
    let n = positions.len();
    match n {
        0..=2 => Vec::new(),
        3 => vec![[0, 1, 2]],
        4 => triangulate_quad(positions),
        _ if method == TriangulationMethod::Fan => fan(n, 0),
        _ => triangulate_beauty(positions),
    }
}

/// Fan from `apex`: (apex, apex+i, apex+i+1)
fn fan(n: usize, apex: usize) -> Vec<Triangle> {
    (1..n - 1)
        .map(|i| cyclic([apex, (apex + i) % n, (apex + i + 1) % n]))
        .collect()
}

/// Strip that alternately advances forward from `start + 1` and backward from `start`
fn zigzag(n: usize, start: usize) -> Vec<Triangle> {
    let mut lo = start;
    let mut hi = (start + 1) % n;
    let mut forward = true;
    let mut tris = Vec::with_capacity(n - 2);
    for _ in 0..n - 2 {
        if forward {
            let next = (hi + 1) % n;
            tris.push(cyclic([lo, hi, next]));
            hi = next;
        } else {
            let prev = (lo + n - 1) % n;
            tris.push(cyclic([prev, lo, hi]));
            lo = prev;
        }
        forward = !forward;
    }
    tris
}

/// Ascending corner order is a rotation of the polygon's cyclic order
fn cyclic(mut t: Triangle) -> Triangle {
    t.sort_unstable();
    t
}

fn newell_normal(positions: &[Vec3]) -> Vec3 {
    let n = positions.len();
    let mut normal = Vec3::ZERO;
    for i in 0..n {
        let a = positions[i];
        let b = positions[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Project onto the polygon plane. The projected polygon winds counter-clockwise.
fn project(positions: &[Vec3]) -> Option<Vec<Vec2>> {
    let normal = newell_normal(positions);
    let len = normal.length();
    if !len.is_finite() || len <= f32::MIN_POSITIVE {
        return None;
    }
    let n = normal / len;
    let u = n.any_orthonormal_vector();
    let v = n.cross(u);
    let centroid = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
    Some(
        positions
            .iter()
            .map(|&p| {
                let d = p - centroid;
                Vec2::new(d.dot(u), d.dot(v))
            })
            .collect(),
    )
}

fn signed_area(p: &[Vec2], t: Triangle) -> f32 {
    (p[t[1]] - p[t[0]]).perp_dot(p[t[2]] - p[t[0]]) * 0.5
}

fn polygon_area(p: &[Vec2]) -> f32 {
    let n = p.len();
    (0..n).map(|i| p[i].perp_dot(p[(i + 1) % n])).sum::<f32>() * 0.5
}

/// Smallest interior angle of a triangle, in radians (0 for degenerate triangles)
pub fn min_angle(positions: &[Vec3], t: Triangle) -> f32 {
    let mut smallest = std::f32::consts::PI;
    for k in 0..3 {
        let o = positions[t[k]];
        let a = positions[t[(k + 1) % 3]] - o;
        let b = positions[t[(k + 2) % 3]] - o;
        let (la, lb) = (a.length(), b.length());
        if la <= f32::MIN_POSITIVE || lb <= f32::MIN_POSITIVE {
            return 0.0;
        }
        let angle = (a.dot(b) / (la * lb)).clamp(-1.0, 1.0).acos();
        smallest = smallest.min(angle);
    }
    smallest
}

fn triangulate_quad(positions: &[Vec3]) -> Vec<Triangle> {
    const SPLIT_02: [Triangle; 2] = [[0, 1, 2], [0, 2, 3]];
    const SPLIT_13: [Triangle; 2] = [[0, 1, 3], [1, 2, 3]];

    let Some(p) = project(positions) else {
        return SPLIT_02.to_vec();
    };
    let eps = polygon_area(&p).abs() * 1e-6;
    let inside = |split: &[Triangle; 2]| split.iter().all(|&t| signed_area(&p, t) > eps);

    let split = match (inside(&SPLIT_02), inside(&SPLIT_13)) {
        (true, true) => {
            let d02 = positions[0].distance_squared(positions[2]);
            let d13 = positions[1].distance_squared(positions[3]);
            if d13 < d02 { SPLIT_13 } else { SPLIT_02 }
        }
        (false, true) => SPLIT_13,
        _ => SPLIT_02,
    };
    split.to_vec()
}

fn triangulate_beauty(positions: &[Vec3]) -> Vec<Triangle> {
    let n = positions.len();
    let Some(p) = project(positions) else {
        return fan(n, 0);
    };
    let area = polygon_area(&p);
    if area <= 0.0 {
        return fan(n, 0);
    }
    let eps = area * 1e-6;

    let candidates = (0..n)
        .map(|apex| fan(n, apex))
        .chain((0..n).map(|start| zigzag(n, start)))
        .chain(ear_clip(positions, &p, eps));

    let mut best: Option<(f32, Vec<Triangle>)> = None;
    for tris in candidates {
        let Some(score) = score(positions, &p, &tris, area, eps) else {
            continue;
        };
        if best.as_ref().is_none_or(|(s, _)| score > *s) {
            best = Some((score, tris));
        }
    }

    match best {
        Some((_, tris)) => tris,
        None => {
            tracing::trace!("No valid triangulation for {}-gon, using fan", n);
            fan(n, 0)
        }
    }
}

/// Minimum interior angle if the candidate tiles the polygon exactly
/// (every triangle positively oriented and the areas summing to the
/// polygon's area), `None` otherwise.
fn score(positions: &[Vec3], p: &[Vec2], tris: &[Triangle], area: f32, eps: f32) -> Option<f32> {
    let mut total = 0.0f32;
    let mut smallest = f32::MAX;
    for &t in tris {
        let a = signed_area(p, t);
        if a <= eps {
            return None;
        }
        total += a;
        smallest = smallest.min(min_angle(positions, t));
    }
    ((total - area).abs() <= area * 1e-4).then_some(smallest)
}

fn point_in_triangle(q: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(q - a);
    let d2 = (c - b).perp_dot(q - b);
    let d3 = (a - c).perp_dot(q - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

/// Greedy ear clipping that always cuts the ear with the best minimum angle
fn ear_clip(positions: &[Vec3], p: &[Vec2], eps: f32) -> Option<Vec<Triangle>> {
    let n = p.len();
    let mut remaining: SmallVec<[usize; 16]> = (0..n).collect();
    let mut tris = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut best: Option<(usize, f32)> = None;
        for k in 0..m {
            let t = [remaining[(k + m - 1) % m], remaining[k], remaining[(k + 1) % m]];
            if signed_area(p, t) <= eps {
                continue;
            }
            let blocked = remaining
                .iter()
                .filter(|&&o| !t.contains(&o))
                .any(|&o| point_in_triangle(p[o], p[t[0]], p[t[1]], p[t[2]]));
            if blocked {
                continue;
            }
            let angle = min_angle(positions, t);
            if best.is_none_or(|(_, s)| angle > s) {
                best = Some((k, angle));
            }
        }
        let (k, _) = best?;
        tris.push(cyclic([
            remaining[(k + m - 1) % m],
            remaining[k],
            remaining[(k + 1) % m],
        ]));
        remaining.remove(k);
    }
    tris.push(cyclic([remaining[0], remaining[1], remaining[2]]));
    Some(tris)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular_polygon(n: usize, radius: f32) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
            })
            .collect()
    }

    fn area_3d(positions: &[Vec3], t: Triangle) -> Vec3 {
        (positions[t[1]] - positions[t[0]]).cross(positions[t[2]] - positions[t[0]]) * 0.5
    }

    fn assert_covers(positions: &[Vec3], tris: &[Triangle]) {
        let n = positions.len();
        assert_eq!(tris.len(), n - 2, "Expected N-2 triangles");

        let polygon_normal = newell_normal(positions) * 0.5;
        let polygon_area = polygon_normal.length();
        let mut total = 0.0;
        for &t in tris {
            assert!(t.iter().all(|&i| i < n), "Corner out of range: {:?}", t);
            let a = area_3d(positions, t);
            // Same winding as the polygon
            assert!(a.dot(polygon_normal) > 0.0, "Flipped triangle {:?}", t);
            total += a.length();
        }
        let rel = (total - polygon_area).abs() / polygon_area;
        assert!(rel <= 1e-5, "Area mismatch: {} vs {}", total, polygon_area);
    }

    #[test]
    fn test_triangle_passthrough() {
        let p = regular_polygon(3, 1.0);
        assert_eq!(triangulate(&p, TriangulationMethod::Beauty), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_too_few_corners() {
        assert!(triangulate(&[Vec3::ZERO, Vec3::X], TriangulationMethod::Beauty).is_empty());
    }

    #[test]
    fn test_convex_ngons_cover_area() {
        for n in 3..=16 {
            let p = regular_polygon(n, 2.5);
            assert_covers(&p, &triangulate(&p, TriangulationMethod::Beauty));
            assert_covers(&p, &triangulate(&p, TriangulationMethod::Fan));
        }
    }

    #[test]
    fn test_tilted_polygon_covers_area() {
        let rot = glam::Quat::from_euler(glam::EulerRot::XYZ, 0.4, -1.1, 0.3);
        let p: Vec<Vec3> = regular_polygon(7, 1.0)
            .into_iter()
            .map(|v| rot * v + Vec3::new(10.0, -3.0, 2.0))
            .collect();
        assert_covers(&p, &triangulate(&p, TriangulationMethod::Beauty));
    }

    #[test]
    fn test_clockwise_polygon_keeps_winding() {
        let mut p = regular_polygon(6, 1.0);
        p.reverse();
        assert_covers(&p, &triangulate(&p, TriangulationMethod::Beauty));
    }

    #[test]
    fn test_quad_uses_shorter_diagonal() {
        // Kite: diagonal 1-3 is much shorter than 0-2
        let p = vec![
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let tris = triangulate(&p, TriangulationMethod::Beauty);
        assert_eq!(tris, vec![[0, 1, 3], [1, 2, 3]]);
        assert_covers(&p, &tris);

        // Rotated so 0-2 is the short one
        let p = vec![p[1], p[2], p[3], p[0]];
        assert_eq!(triangulate(&p, TriangulationMethod::Beauty), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_fan_mode_quad_uses_shorter_diagonal() {
        let p = vec![
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(triangulate(&p, TriangulationMethod::Fan), vec![[0, 1, 3], [1, 2, 3]]);
    }

    #[test]
    fn test_square_quad_ties_to_first_diagonal() {
        let p = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(triangulate(&p, TriangulationMethod::Beauty), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_concave_quad_uses_inside_diagonal() {
        // Dart with the reflex corner at 3; only diagonal 1-3 is inside
        let p = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, -2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
        ];
        let tris = triangulate(&p, TriangulationMethod::Beauty);
        assert_eq!(tris, vec![[0, 1, 3], [1, 2, 3]]);
        assert_covers(&p, &tris);
    }

    #[test]
    fn test_concave_polygon_avoids_outside_triangles() {
        // Arrow / chevron shape, reflex at corner 4
        let p = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(4.0, 3.0, 0.0),
            Vec3::new(2.0, 3.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert_covers(&p, &triangulate(&p, TriangulationMethod::Beauty));
    }

    #[test]
    fn test_beauty_beats_fan_on_long_polygon() {
        // Long thin hexagon: a fan from corner 0 yields slivers
        let p = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, -0.5, 0.0),
            Vec3::new(9.0, -0.5, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(9.0, 0.5, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
        ];
        let worst = |tris: &[Triangle]| {
            tris.iter()
                .map(|&t| min_angle(&p, t))
                .fold(f32::MAX, f32::min)
        };
        let beauty = triangulate(&p, TriangulationMethod::Beauty);
        let fan = triangulate(&p, TriangulationMethod::Fan);
        assert_covers(&p, &beauty);
        assert!(worst(&beauty) >= worst(&fan));
    }

    #[test]
    fn test_degenerate_polygon_falls_back_to_fan() {
        let p = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0, Vec3::X * 4.0];
        assert_eq!(triangulate(&p, TriangulationMethod::Beauty), fan(5, 0));
    }

    #[test]
    fn test_zigzag_visits_every_corner() {
        for n in 4..10 {
            for start in 0..n {
                let tris = zigzag(n, start);
                assert_eq!(tris.len(), n - 2);
                let mut seen = vec![false; n];
                tris.iter().flatten().for_each(|&i| seen[i] = true);
                assert!(seen.iter().all(|&s| s));
            }
        }
    }
}
