/// Indexed triangle mesh with interleaved-free, tightly packed positions.
///
/// `positions` holds `components` floats per vertex (2 for planar meshes,
/// 3 for spatial ones). `indices` holds triangle triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub components: u32,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn new(components: u32) -> Self {
        Self::with_capacity(components, 0, 0)
    }

    /// Creates an empty mesh with room for `vertices` vertices and `indices` indices.
    pub fn with_capacity(components: u32, vertices: usize, indices: usize) -> Self {
        debug_assert!(components > 0, "a vertex needs at least one component");
        Self {
            positions: Vec::with_capacity(vertices * components as usize),
            components,
            indices: Vec::with_capacity(indices),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / self.components as usize
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the components of vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> &[f32] {
        let n = self.components as usize;
        &self.positions[i * n..(i + 1) * n]
    }

    pub fn vertices(&self) -> impl Iterator<Item = &[f32]> {
        self.positions.chunks_exact(self.components as usize)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns true when every index refers to an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertex_count();
        self.indices.iter().all(|&i| (i as usize) < n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_component_width() {
        let mesh = Mesh {
            positions: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            components: 2,
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex(1), &[1.0, 0.0]);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn out_of_range_index_is_detected() {
        let mesh = Mesh {
            positions: vec![0.0; 6],
            components: 3,
            indices: vec![0, 1, 2],
        };
        assert!(!mesh.indices_in_bounds());
    }
}
