use std::collections::HashMap;

use glam::Vec3;

use crate::{Error, Result};

use super::Mesh;

/// Deepest supported geodesic subdivision.
///
/// Depth 10 already yields ~10M vertices; deeper levels would overflow `u32`
/// indices soon after.
pub const MAX_GEODESIC_DEPTH: u32 = 10;

// Golden ratio; icosahedron corners sit on the three orthogonal golden rectangles.
const T: f32 = 1.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];

// Counter-clockwise when viewed from outside the sphere.
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Number of triangles produced by [`geodesic`] at `depth`, or `None` past
/// [`MAX_GEODESIC_DEPTH`].
#[inline]
pub const fn geodesic_triangle_count(depth: u32) -> Option<usize> {
    if depth > MAX_GEODESIC_DEPTH {
        return None;
    }
    Some(20 << (2 * depth))
}

/// Number of vertices produced by [`geodesic`] at `depth`, or `None` past
/// [`MAX_GEODESIC_DEPTH`].
///
/// Euler: `V = E - F + 2` with `E = 3F / 2`.
#[inline]
pub const fn geodesic_vertex_count(depth: u32) -> Option<usize> {
    match geodesic_triangle_count(depth) {
        Some(triangles) => Some(triangles / 2 + 2),
        None => None,
    }
}

/// Builds a unit icosphere by subdividing an icosahedron `depth` times.
///
/// Every round splits each triangle into four through its edge midpoints,
/// which are pushed back onto the unit sphere. A midpoint shared by two
/// triangles is created once, keyed by its (unordered) parent edge.
pub fn geodesic(depth: u32) -> Result<Mesh> {
    if depth > MAX_GEODESIC_DEPTH {
        return Err(Error::DepthTooLarge {
            requested: depth,
            max: MAX_GEODESIC_DEPTH,
        });
    }

    let mut vertices: Vec<Vec3> =
        Vec::with_capacity(geodesic_vertex_count(depth).unwrap_or_default());
    vertices.extend(
        ICOSAHEDRON_VERTICES
            .iter()
            .map(|&v| Vec3::from_array(v).normalize()),
    );
    let mut faces: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..depth {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);
        let mut next = Vec::with_capacity(faces.len() * 4);

        for &[a, b, c] in &faces {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a);

            next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }

        faces = next;
    }

    let mut mesh = Mesh::with_capacity(3, vertices.len(), faces.len() * 3);
    mesh.positions.extend(vertices.iter().flat_map(|v| v.to_array()));
    mesh.indices.extend(faces.iter().flatten());

    log::debug!(
        "geodesic mesh: depth={depth} vertices={} triangles={}",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let m = (vertices[a as usize] + vertices[b as usize]) * 0.5;
        vertices.push(m.normalize());
        (vertices.len() - 1) as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        mesh.vertices().map(Vec3::from_slice).collect()
    }

    #[test]
    fn depth_zero_is_the_icosahedron() {
        let mesh = geodesic(0).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
    }

    #[test]
    fn triangle_count_quadruples_per_level() {
        for depth in 0..=5 {
            let mesh = geodesic(depth).unwrap();
            assert_eq!(mesh.triangle_count(), 20 * 4usize.pow(depth), "depth {depth}");
            assert_eq!(Some(mesh.vertex_count()), geodesic_vertex_count(depth), "depth {depth}");
            assert_eq!(Some(mesh.triangle_count()), geodesic_triangle_count(depth));
        }
    }

    #[test]
    fn counts_past_the_depth_cap_are_none() {
        assert_eq!(geodesic_triangle_count(MAX_GEODESIC_DEPTH), Some(20 << 20));
        for depth in [MAX_GEODESIC_DEPTH + 1, 30, 31, 32, 40, u32::MAX] {
            assert_eq!(geodesic_triangle_count(depth), None, "depth {depth}");
            assert_eq!(geodesic_vertex_count(depth), None, "depth {depth}");
        }
    }

    #[test]
    fn vertices_lie_on_the_unit_sphere() {
        for depth in 0..=5 {
            let mesh = geodesic(depth).unwrap();
            for v in positions(&mesh) {
                assert!((v.length() - 1.0).abs() < 1e-5, "|{v}| at depth {depth}");
            }
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        for depth in 0..=5 {
            assert!(geodesic(depth).unwrap().indices_in_bounds(), "depth {depth}");
        }
    }

    #[test]
    fn depth_two_has_320_triangles_and_no_duplicate_vertices() {
        let mesh = geodesic(2).unwrap();
        assert_eq!(mesh.triangle_count(), 320);

        let verts = positions(&mesh);
        for (i, a) in verts.iter().enumerate() {
            for b in &verts[i + 1..] {
                assert!(a.distance(*b) > 1e-4, "duplicate vertex {a}");
            }
        }
    }

    #[test]
    fn faces_wind_counter_clockwise_from_outside() {
        let mesh = geodesic(3).unwrap();
        let verts = positions(&mesh);
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (verts[a as usize], verts[b as usize], verts[c as usize]);
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn every_edge_is_shared_by_exactly_two_triangles() {
        let mesh = geodesic(2).unwrap();
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for [a, b, c] in mesh.triangles() {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                *edges.entry((p.min(q), p.max(q))).or_default() += 1;
            }
        }
        assert!(edges.values().all(|&n| n == 2));
    }

    #[test]
    fn excessive_depth_is_rejected() {
        assert_eq!(
            geodesic(MAX_GEODESIC_DEPTH + 1),
            Err(Error::DepthTooLarge {
                requested: MAX_GEODESIC_DEPTH + 1,
                max: MAX_GEODESIC_DEPTH,
            })
        );
    }
}
