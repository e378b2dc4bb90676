use glam::{Mat4, Vec2, vec3};

use material_engine::Result;
use material_engine::coords::{Color, Rect};
use material_engine::geometry::slab;
use material_engine::gpu::{
    AttribSlot, BufferUsage, FloatBuffer, GpuContext, MeshBuffers, Primitive, ProgramId,
    TextureFilter, TextureId, TextureWrap, UniformSlot,
};

use crate::behavior::Behavior;
use crate::icon::{Icon, IconAtlas};
use crate::theme::Theme;

/// Shadow scale at elevation 0.
const SHADOW_BASE_SCALE: f32 = 1.25;
/// Extra shadow scale per unit of elevation.
const SHADOW_ELEVATION_SCALE: f32 = 0.01414;

/// Uniform sent for "no icon".
const NO_ICON: [f32; 2] = [-1.0, -1.0];
/// Uniform sent for "no texture".
const NO_TEXTURE: i32 = -1;

/// Resolved slots of the material program.
pub(crate) struct MaterialProgram {
    pub(crate) id: ProgramId,
    pub(crate) world: UniformSlot,
    pub(crate) view: UniformSlot,
    pub(crate) proj: UniformSlot,
    pub(crate) color: UniformSlot,
    pub(crate) icon: UniformSlot,
    pub(crate) circle: UniformSlot,
    pub(crate) tex0: UniformSlot,
    pub(crate) position: AttribSlot,
    pub(crate) tc0: AttribSlot,
}

impl MaterialProgram {
    pub(crate) fn link<G>(gpu: &mut G, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        let id = gpu.create_program("material", &theme.material_vertex, &theme.material_fragment)?;
        Ok(Self {
            id,
            world: gpu.uniform(id, "world")?,
            view: gpu.uniform(id, "view")?,
            proj: gpu.uniform(id, "proj")?,
            color: gpu.uniform(id, "color")?,
            icon: gpu.uniform(id, "icon")?,
            circle: gpu.uniform(id, "circle")?,
            tex0: gpu.uniform(id, "tex0")?,
            position: gpu.attrib(id, "position")?,
            tc0: gpu.attrib(id, "tc0")?,
        })
    }

    /// Binds the program and uploads the per-draw transform.
    pub(crate) fn begin<G>(&self, gpu: &mut G, world: &Mat4, view: &Mat4, proj: &Mat4)
    where
        G: GpuContext + ?Sized,
    {
        gpu.use_program(self.id);
        gpu.set_mat4(self.world, world);
        gpu.set_mat4(self.view, view);
        gpu.set_mat4(self.proj, proj);
    }
}

struct ShadowProgram {
    id: ProgramId,
    world: UniformSlot,
    view: UniformSlot,
    proj: UniformSlot,
    color: UniformSlot,
    position: AttribSlot,
}

impl ShadowProgram {
    fn link<G>(gpu: &mut G, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        let id =
            gpu.create_program("material shadow", &theme.shadow_vertex, &theme.shadow_fragment)?;
        Ok(Self {
            id,
            world: gpu.uniform(id, "world")?,
            view: gpu.uniform(id, "view")?,
            proj: gpu.uniform(id, "proj")?,
            color: gpu.uniform(id, "color")?,
            position: gpu.attrib(id, "position")?,
        })
    }
}

/// Per-vertex icon-cell coordinates for the 8 box vertices.
fn icon_uvs(n: f32) -> [f32; 16] {
    [
        0.0, n, 0.0, 0.0, n, 0.0, n, n, //
        0.0, n, 0.0, 0.0, n, 0.0, n, n,
    ]
}

/// A sheet of material: the renderable unit every widget is built from.
///
/// Geometry is a unit box (1×1 footprint, 1 unit deep) scaled and placed by
/// the world transform:
/// - `x_axis.x` / `y_axis.y` hold width and height
/// - `w_axis.x` / `w_axis.y` hold the top-left position
/// - `w_axis.z` holds the elevation (`z`)
///
/// Each draw issues up to two draw calls: the shadow (only when
/// [`Behavior::Raised`]) and then the material itself.
pub struct Material {
    world: Mat4,
    color: Color,
    behavior: Behavior,
    texture: Option<TextureId>,
    icon: Option<Vec2>,
    circle: bool,

    shadow_color: Color,
    texture_filter: TextureFilter,
    texture_wrap: TextureWrap,

    mesh: MeshBuffers,
    icon_uv: FloatBuffer,
    program: MaterialProgram,
    shadow: ShadowProgram,
}

impl Material {
    /// Links both programs, then uploads the box and icon buffers.
    ///
    /// Fails if a program does not link or lacks one of the names the draw
    /// passes use, or if a buffer cannot be created. Programs are linked
    /// first so a shader failure leaves no buffers behind.
    pub fn new<G>(gpu: &mut G, color: Color, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        let program = MaterialProgram::link(gpu, theme)?;
        let shadow = ShadowProgram::link(gpu, theme)?;
        let mesh = MeshBuffers::upload(gpu, "material box", &slab())?;
        let icon_uv = gpu.create_float_buffer(
            "material icon uv",
            &icon_uvs(theme.icon_cell),
            BufferUsage::Static,
        )?;

        Ok(Self {
            world: Mat4::IDENTITY,
            color,
            behavior: Behavior::Raised,
            texture: None,
            icon: None,
            circle: false,
            shadow_color: theme.shadow_color,
            texture_filter: theme.texture_filter,
            texture_wrap: theme.texture_wrap,
            mesh,
            icon_uv,
            program,
            shadow,
        })
    }

    /// Issues the shadow pass (if raised) followed by the material pass.
    pub fn draw<G>(&self, gpu: &mut G, view: &Mat4, proj: &Mat4)
    where
        G: GpuContext + ?Sized,
    {
        if self.behavior.casts_shadow() {
            self.draw_shadow(gpu, view, proj);
        }

        let p = &self.program;
        p.begin(gpu, &self.world, view, proj);

        let alpha = if self.behavior.suppresses_fill() { 0.0 } else { self.color.a };
        gpu.set_vec4(p.color, self.color.with_alpha(alpha).to_array());
        gpu.set_vec2(p.icon, self.icon.map_or(NO_ICON, |uv| uv.to_array()));
        gpu.set_int(p.circle, self.circle as i32);

        gpu.bind_vertex_buffer(&self.mesh.vertices);
        gpu.bind_index_buffer(&self.mesh.indices);
        gpu.vertex_pointer(p.position, 3);

        match self.texture {
            Some(texture) => {
                gpu.bind_texture(texture, self.texture_filter, self.texture_wrap);
                gpu.set_int(p.tex0, texture.unit() as i32);
                gpu.bind_vertex_buffer(&self.icon_uv);
                gpu.vertex_pointer(p.tc0, 2);
            }
            None => gpu.set_int(p.tex0, NO_TEXTURE),
        }

        gpu.draw_indexed(&self.mesh.indices, Primitive::Triangles);
    }

    fn draw_shadow<G>(&self, gpu: &mut G, view: &Mat4, proj: &Mat4)
    where
        G: GpuContext + ?Sized,
    {
        let s = &self.shadow;
        gpu.use_program(s.id);
        gpu.set_mat4(s.world, &self.shadow_world());
        gpu.set_mat4(s.view, view);
        gpu.set_mat4(s.proj, proj);
        gpu.set_vec4(s.color, self.shadow_color.to_array());
        gpu.bind_vertex_buffer(&self.mesh.vertices);
        gpu.bind_index_buffer(&self.mesh.indices);
        gpu.vertex_pointer(s.position, 3);
        gpu.draw_indexed(&self.mesh.indices, Primitive::Triangles);
    }

    /// World transform of the shadow: the box grown by
    /// `1.25 + z * 0.01414` in x and y, re-centered on the original footprint.
    pub fn shadow_world(&self) -> Mat4 {
        let (w, h) = (self.world.x_axis.x, self.world.y_axis.y);
        let s = SHADOW_BASE_SCALE + self.z() * SHADOW_ELEVATION_SCALE;

        let mut m = self.world * Mat4::from_scale(vec3(s, s, 1.0));
        m.w_axis.x -= (m.x_axis.x - w) / 2.0;
        m.w_axis.y -= (m.y_axis.y - h) / 2.0;
        m
    }

    /// Axis-aligned hit test against `[x, x+w] × [y, y+h]`, edges included.
    ///
    /// Only translation and the x/y scale are read; a rotated transform gives
    /// wrong answers.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(Vec2::new(x, y))
    }

    /// Position and size as read from the world transform.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.world.w_axis.x,
            self.world.w_axis.y,
            self.world.x_axis.x,
            self.world.y_axis.y,
        )
    }

    /// Places the box at `rect`, keeping its elevation.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.world.x_axis.x = rect.size.x;
        self.world.y_axis.y = rect.size.y;
        self.world.w_axis.x = rect.origin.x;
        self.world.w_axis.y = rect.origin.y;
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.world.w_axis.z
    }

    #[inline]
    pub fn set_z(&mut self, z: f32) {
        self.world.w_axis.z = z;
    }

    #[inline]
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut Mat4 {
        &mut self.world
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: Behavior) {
        self.behavior = behavior;
    }

    /// Atlas offset of the current icon, if any.
    #[inline]
    pub fn icon(&self) -> Option<Vec2> {
        self.icon
    }

    pub fn set_icon<A>(&mut self, icon: Icon, atlas: &A)
    where
        A: IconAtlas + ?Sized,
    {
        self.icon = Some(atlas.texcoords(icon));
    }

    pub fn clear_icon(&mut self) {
        self.icon = None;
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn set_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        self.circle
    }

    /// Renders the box as its inscribed circle.
    pub fn set_circle(&mut self, circle: bool) {
        self.circle = circle;
    }

    /// Convenience for building a placed material in one expression.
    pub fn at(mut self, rect: Rect, z: f32) -> Self {
        self.set_bounds(rect);
        self.set_z(z);
        self
    }
}

impl std::fmt::Debug for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("bounds", &self.bounds())
            .field("z", &self.z())
            .field("color", &self.color)
            .field("behavior", &self.behavior)
            .field("texture", &self.texture)
            .field("icon", &self.icon)
            .field("circle", &self.circle)
            .finish_non_exhaustive()
    }
}
