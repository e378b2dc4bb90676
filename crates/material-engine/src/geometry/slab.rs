use super::Mesh;

/// Unit footprint, one unit deep: front face at `z = 0`, back face at `z = -1`.
///
/// Width, height and position are applied by the owner's world transform;
/// the geometry itself never changes.
const SLAB_VERTICES: [f32; 24] = [
    0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    1.0, 1.0, 0.0, //
    1.0, 0.0, 0.0, //
    0.0, 0.0, -1.0, //
    0.0, 1.0, -1.0, //
    1.0, 1.0, -1.0, //
    1.0, 0.0, -1.0, //
];

const SLAB_INDICES: [u32; 36] = [
    0, 2, 1, 0, 3, 2, // front
    2, 7, 6, 2, 3, 7, // right
    7, 3, 0, 7, 0, 4, // bottom
    4, 6, 7, 4, 5, 6, // back
    6, 1, 2, 6, 5, 1, // top
    1, 5, 4, 1, 4, 0, // left
];

/// Returns the box mesh drawn by every material surface: 8 vertices, 12 triangles.
pub fn slab() -> Mesh {
    Mesh {
        positions: SLAB_VERTICES.to_vec(),
        components: 3,
        indices: SLAB_INDICES.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn eight_vertices_twelve_triangles() {
        let mesh = slab();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn triangles_are_not_degenerate() {
        let mesh = slab();
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (
                Vec3::from_slice(mesh.vertex(a as usize)),
                Vec3::from_slice(mesh.vertex(b as usize)),
                Vec3::from_slice(mesh.vertex(c as usize)),
            );
            assert!((b - a).cross(c - a).length() > 0.5);
        }
    }

    #[test]
    fn front_face_points_towards_positive_z() {
        let mesh = slab();
        let [a, b, c] = mesh.triangles().next().unwrap();
        let (a, b, c) = (
            Vec3::from_slice(mesh.vertex(a as usize)),
            Vec3::from_slice(mesh.vertex(b as usize)),
            Vec3::from_slice(mesh.vertex(c as usize)),
        );
        assert!((b - a).cross(c - a).z > 0.0);
    }
}
