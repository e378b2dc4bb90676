use glam::Mat4;

use material_engine::Result;
use material_engine::coords::{Color, Rect};
use material_engine::geometry::{geodesic, planar};
use material_engine::gpu::{GpuContext, MeshBuffers, Primitive};

use crate::material::MaterialProgram;
use crate::theme::Theme;

/// Procedural surface drawn behind the widgets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BackdropShape {
    /// Unit geodesic sphere subdivided `depth` times.
    Sphere { depth: u32 },
    /// Unit square tiled by a quad-tree of `depth` levels.
    Plane { depth: u32, flip_y: bool },
}

/// Flat-colored procedural mesh drawn with the material program.
///
/// The mesh is generated and uploaded once at construction. It casts no
/// shadow and carries no icon or texture.
pub struct Backdrop {
    shape: BackdropShape,
    world: Mat4,
    color: Color,
    mesh: MeshBuffers,
    program: MaterialProgram,
}

impl Backdrop {
    pub fn new<G>(gpu: &mut G, shape: BackdropShape, color: Color, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        // Depth is checked before anything reaches the GPU, and the program
        // links before the upload.
        let (label, mesh) = match shape {
            BackdropShape::Sphere { depth } => ("geodesic sphere", geodesic(depth)?),
            BackdropShape::Plane { depth, flip_y } => ("planar grid", planar(depth, flip_y)?),
        };
        let program = MaterialProgram::link(gpu, theme)?;
        let mesh = MeshBuffers::upload(gpu, label, &mesh)?;

        log::debug!(
            "backdrop {shape:?}: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.indices.count / 3
        );

        Ok(Self {
            shape,
            world: Mat4::IDENTITY,
            color,
            mesh,
            program,
        })
    }

    pub fn draw<G>(&self, gpu: &mut G, view: &Mat4, proj: &Mat4)
    where
        G: GpuContext + ?Sized,
    {
        let p = &self.program;
        p.begin(gpu, &self.world, view, proj);
        gpu.set_vec4(p.color, self.color.to_array());
        gpu.set_vec2(p.icon, [-1.0, -1.0]);
        gpu.set_int(p.circle, 0);
        gpu.set_int(p.tex0, -1);

        gpu.bind_vertex_buffer(&self.mesh.vertices);
        gpu.bind_index_buffer(&self.mesh.indices);
        gpu.vertex_pointer(p.position, self.mesh.components);
        gpu.draw_indexed(&self.mesh.indices, Primitive::Triangles);
    }

    #[inline]
    pub fn shape(&self) -> BackdropShape {
        self.shape
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut Mat4 {
        &mut self.world
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    /// Maps the unit square (or the sphere's bounding square) onto `rect`.
    pub fn set_bounds(&mut self, rect: Rect, z: f32) {
        self.world = match self.shape {
            BackdropShape::Plane { .. } => {
                Mat4::from_translation(rect.origin.extend(z))
                    * Mat4::from_scale(rect.size.extend(1.0))
            }
            // Sphere spans [-1, 1]: center it in `rect`.
            BackdropShape::Sphere { .. } => {
                let half = rect.size / 2.0;
                Mat4::from_translation((rect.origin + half).extend(z))
                    * Mat4::from_scale(half.extend(half.min_element()))
            }
        };
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
