use crate::{Error, Result};

use super::quadtree::{Cell, QuadKey, leaf_capacity, split};
use super::Mesh;

/// Deepest supported planar subdivision (16.7M quads).
pub const MAX_PLANAR_DEPTH: u32 = 12;

/// Tiles the unit square with `4^depth` quads from a quad-tree split.
///
/// Vertices are 2D. Each leaf contributes four corners (bottom-left,
/// bottom-right, top-right, top-left) and the triangles
/// `(TR, BR, BL)`, `(TR, BL, TL)`, which face the viewer in the +Y-down
/// convention of the screen and texture space this mesh is drawn in.
///
/// With `flip` set, every `y` becomes `1 - y` after generation; indices are
/// left untouched.
pub fn planar(depth: u32, flip: bool) -> Result<Mesh> {
    if depth > MAX_PLANAR_DEPTH {
        return Err(Error::DepthTooLarge {
            requested: depth,
            max: MAX_PLANAR_DEPTH,
        });
    }

    let mut leaves = Vec::with_capacity(leaf_capacity(depth).unwrap_or_default());
    split(QuadKey::ROOT, depth, &mut leaves)?;

    let mut mesh = Mesh::with_capacity(2, leaves.len() * 4, leaves.len() * 6);
    for key in leaves {
        let [bl, br, tr, tl] = append_quad(&mut mesh, key.cell());
        mesh.indices.extend_from_slice(&[tr, br, bl, tr, bl, tl]);
    }

    if flip {
        flip_y(&mut mesh.positions, mesh.components);
    }

    log::debug!(
        "planar mesh: depth={depth} flip={flip} vertices={} triangles={}",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Appends the corners of `cell` to a 2-component mesh and returns their
/// indices as `[bottom-left, bottom-right, top-right, top-left]`.
pub fn append_quad(mesh: &mut Mesh, cell: Cell) -> [u32; 4] {
    debug_assert_eq!(mesh.components, 2, "append_quad writes 2D vertices");

    let base = mesh.vertex_count() as u32;
    let Cell { x, y, size } = cell;
    mesh.positions.extend_from_slice(&[
        x,
        y,
        x + size,
        y,
        x + size,
        y + size,
        x,
        y + size,
    ]);
    [base, base + 1, base + 2, base + 3]
}

/// Mirrors every vertex vertically (`y -> 1 - y`) in place.
///
/// `positions` is a packed vertex array with `components` floats per vertex;
/// the second component is treated as `y`.
pub fn flip_y(positions: &mut [f32], components: u32) {
    for vertex in positions.chunks_exact_mut(components as usize) {
        vertex[1] = 1.0 - vertex[1];
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn depth_zero_is_one_quad() {
        let mesh = planar(0, false).unwrap();
        assert_eq!(mesh.positions, vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(mesh.indices, vec![2, 1, 0, 2, 0, 3]);
    }

    #[test]
    fn indices_are_relative_to_the_running_vertex_count() {
        let mesh = planar(1, false).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(&mesh.indices[6..12], &[6, 5, 4, 6, 4, 7]);
        assert_eq!(&mesh.indices[18..24], &[14, 13, 12, 14, 12, 15]);
    }

    #[test]
    fn quad_and_index_counts() {
        for depth in 0..=5 {
            let mesh = planar(depth, false).unwrap();
            let quads = 4usize.pow(depth);
            assert_eq!(mesh.vertex_count(), quads * 4);
            assert_eq!(mesh.indices.len(), quads * 6);
            assert!(mesh.indices_in_bounds(), "depth {depth}");
        }
    }

    #[test]
    fn quads_cover_the_unit_square() {
        for depth in 0..=5 {
            let mesh = planar(depth, false).unwrap();
            let area: f32 = mesh
                .positions
                .chunks_exact(8)
                .map(|q| (q[2] - q[0]) * (q[5] - q[3]))
                .sum();
            assert!((area - 1.0).abs() < 1e-6, "depth {depth} area {area}");
            assert!(mesh.positions.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn flip_mirrors_y_and_keeps_indices() {
        let plain = planar(2, false).unwrap();
        let flipped = planar(2, true).unwrap();
        assert_eq!(plain.indices, flipped.indices);
        for (a, b) in plain.vertices().zip(flipped.vertices()) {
            assert_eq!(a[0], b[0]);
            assert_eq!(a[1], 1.0 - b[1]);
        }
    }

    #[test]
    fn double_flip_restores_grid_vertices_exactly() {
        let plain = planar(3, false).unwrap();
        let mut twice = plain.positions.clone();
        flip_y(&mut twice, 2);
        flip_y(&mut twice, 2);
        assert_eq!(plain.positions, twice);
    }

    #[test]
    fn excessive_depth_is_rejected() {
        assert!(matches!(
            planar(MAX_PLANAR_DEPTH + 1, false),
            Err(Error::DepthTooLarge { .. })
        ));
    }

    proptest! {
        #[test]
        fn flip_y_is_an_involution(ys in prop::collection::vec(0.0f32..=1.0, 1..64)) {
            let original: Vec<f32> = ys.iter().flat_map(|&y| [0.25, y]).collect();
            let mut positions = original.clone();
            flip_y(&mut positions, 2);
            flip_y(&mut positions, 2);
            for (a, b) in original.iter().zip(&positions) {
                prop_assert!((a - b).abs() <= 1e-6);
            }
        }
    }
}
