use std::collections::HashMap;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::{
    BufferData, BufferId, CommandRecorder, DrawCall, FilterMode, ProgramId,
    TextureFilter, TextureId, TextureWrap, UniformValue, WrapMode,
};
use crate::render::{RenderCtx, RenderTarget};

/// Per-draw uniform block shared by every program (group 0, binding 0).
///
/// WGSL layout:
/// ```wgsl
/// struct Uniforms {
///     world: mat4x4<f32>,
///     view: mat4x4<f32>,
///     proj: mat4x4<f32>,
///     color: vec4<f32>,
///     icon: vec2<f32>,
///     circle: i32,
///     tex0: i32,
/// }
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub icon: [f32; 2],
    pub circle: i32,
    pub tex0: i32,
}

impl Default for DrawUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            world: identity,
            view: identity,
            proj: identity,
            color: [1.0; 4],
            icon: [-1.0, -1.0],
            circle: 0,
            tex0: -1,
        }
    }
}

impl DrawUniforms {
    /// Collects the uniform values of `call` into the shared block.
    ///
    /// Uniforms the call never set keep their defaults.
    pub fn from_draw(call: &DrawCall) -> Self {
        let mut u = Self::default();
        for (name, value) in &call.uniforms {
            match (name.as_str(), *value) {
                ("world", UniformValue::Mat4(m)) => u.world = m,
                ("view", UniformValue::Mat4(m)) => u.view = m,
                ("proj", UniformValue::Mat4(m)) => u.proj = m,
                ("color", UniformValue::Vec4(v)) => u.color = v,
                ("icon", UniformValue::Vec2(v)) => u.icon = v,
                ("circle", UniformValue::Int(v)) => u.circle = v,
                ("tex0", UniformValue::Int(v)) => u.tex0 = v,
                _ => log::trace!("uniform `{name}` has no slot in the draw block"),
            }
        }
        u
    }
}

const UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniforms>() as u64;
const UV_STRIDE: u64 = 2 * std::mem::size_of::<f32>() as u64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PipelineKey {
    program: ProgramId,
    components: u32,
}

type TextureKey = (Option<TextureId>, TextureFilter, TextureWrap);

struct PlannedDraw {
    pipeline: PipelineKey,
    position: BufferId,
    uv: Option<BufferId>,
    index_buffer: BufferId,
    index_count: u32,
    texture: TextureKey,
    uniforms: DrawUniforms,
}

/// Replays a [`CommandRecorder`] frame with wgpu.
///
/// GPU resources are created lazily and cached:
/// - one pipeline per (program, position width)
/// - one wgpu buffer per recorded buffer, uploaded the first time it is drawn
/// - one bind group per (texture, filter, wrap)
///
/// Buffer and program ids are only meaningful for the recorder that issued
/// them, so a renderer must always be fed by the same recorder.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    pipeline_layout: Option<wgpu::PipelineLayout>,

    uniform_layout: Option<wgpu::BindGroupLayout>,
    uniform_ubo: Option<wgpu::Buffer>,
    uniform_group: Option<wgpu::BindGroup>,
    uniform_capacity: usize,
    uniform_stride: u64,

    texture_layout: Option<wgpu::BindGroupLayout>,
    default_texture: Option<wgpu::TextureView>,
    textures: HashMap<TextureId, wgpu::TextureView>,
    samplers: HashMap<(TextureFilter, TextureWrap), wgpu::Sampler>,
    texture_groups: HashMap<TextureKey, wgpu::BindGroup>,

    buffers: HashMap<BufferId, wgpu::Buffer>,
    zero_uv: Option<wgpu::Buffer>,
    zero_uv_capacity: u32,

    warned_position: bool,
    warned_texture: bool,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `view` as the texture for atlas unit `id`.
    pub fn insert_texture(&mut self, id: TextureId, view: wgpu::TextureView) {
        self.texture_groups.retain(|(t, _, _), _| *t != Some(id));
        self.textures.insert(id, view);
    }

    /// Uploads tightly packed RGBA8 pixels and registers them under `id`.
    pub fn upload_rgba8(
        &mut self,
        ctx: &RenderCtx<'_>,
        id: TextureId,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        let view = create_rgba8_texture(ctx, "material texture", width, height, pixels);
        self.insert_texture(id, view);
    }

    /// Replays every draw recorded in `recorder` into `target`, in issue order.
    ///
    /// Draws need a `position` pointer of 2 or 3 components and may add a
    /// 2-component `tc0`. Anything else is skipped (one-time debug message).
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        recorder: &CommandRecorder,
    ) {
        if recorder.draws().is_empty() {
            return;
        }

        self.ensure_layouts(ctx);
        self.ensure_default_texture(ctx);

        let mut planned = Vec::with_capacity(recorder.draws().len());
        for call in recorder.draws() {
            if let Some(draw) = self.plan(ctx, recorder, call) {
                planned.push(draw);
            }
        }
        if planned.is_empty() {
            return;
        }

        let untextured_vertices = planned
            .iter()
            .filter(|d| d.uv.is_none())
            .filter_map(|d| {
                let components = d.pipeline.components as usize;
                recorder
                    .float_data(d.position)
                    .map(|data| (data.len() / components) as u32)
            })
            .max()
            .unwrap_or(0);

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        self.ensure_zero_uv_capacity(ctx, untextured_vertices);
        self.ensure_uniform_capacity(ctx, planned.len());
        self.write_uniforms(ctx, &planned);

        let Some(uniform_group) = self.uniform_group.as_ref() else { return };
        let Some(zero_uv) = self.zero_uv.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("material mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for (i, draw) in planned.iter().enumerate() {
            let Some(pipeline) = self.pipelines.get(&draw.pipeline) else { continue };
            let Some(texture_group) = self.texture_groups.get(&draw.texture) else { continue };
            let Some(position) = self.buffers.get(&draw.position) else { continue };
            let Some(indices) = self.buffers.get(&draw.index_buffer) else { continue };
            let uv = match draw.uv {
                Some(id) => match self.buffers.get(&id) {
                    Some(buffer) => buffer,
                    None => continue,
                },
                None => zero_uv,
            };

            let offset = (i as u64 * self.uniform_stride) as u32;
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, uniform_group, &[offset]);
            rpass.set_bind_group(1, texture_group, &[]);
            rpass.set_vertex_buffer(0, position.slice(..));
            rpass.set_vertex_buffer(1, uv.slice(..));
            rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }

    /// Resolves every resource `call` needs, creating what is missing.
    fn plan(
        &mut self,
        ctx: &RenderCtx<'_>,
        recorder: &CommandRecorder,
        call: &DrawCall,
    ) -> Option<PlannedDraw> {
        let position = call
            .pointer("position")
            .filter(|p| matches!(p.components, 2 | 3));
        let Some(position) = position else {
            if !self.warned_position {
                log::debug!(
                    "MeshRenderer: draw of `{}` lacks a 2- or 3-component position; skipped",
                    call.program_label
                );
                self.warned_position = true;
            }
            return None;
        };
        let uv = call
            .pointer("tc0")
            .filter(|p| p.components == 2)
            .map(|p| p.buffer);

        let pipeline = PipelineKey {
            program: call.program,
            components: position.components,
        };
        self.ensure_pipeline(ctx, recorder, pipeline)?;

        self.ensure_buffer(ctx, recorder, position.buffer)?;
        if let Some(uv) = uv {
            self.ensure_buffer(ctx, recorder, uv)?;
        }
        self.ensure_buffer(ctx, recorder, call.index_buffer)?;

        let texture = match call.texture {
            Some(bound) => (Some(bound.texture), bound.filter, bound.wrap),
            None => (None, TextureFilter::default(), TextureWrap::default()),
        };
        self.ensure_texture_group(ctx, texture)?;

        Some(PlannedDraw {
            pipeline,
            position: position.buffer,
            uv,
            index_buffer: call.index_buffer,
            index_count: call.index_count,
            texture,
            uniforms: DrawUniforms::from_draw(call),
        })
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format != Some(ctx.surface_format) {
            self.pipelines.clear();
            self.pipeline_format = Some(ctx.surface_format);
        }
        if self.pipeline_layout.is_some() {
            return;
        }

        let uniform_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let texture_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("material pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            immediate_size: 0,
        });

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        self.uniform_stride = UNIFORM_SIZE.div_ceil(alignment) * alignment;

        self.uniform_layout = Some(uniform_layout);
        self.texture_layout = Some(texture_layout);
        self.pipeline_layout = Some(pipeline_layout);

        self.uniform_group = None;
        self.uniform_ubo = None;
        self.uniform_capacity = 0;
        self.texture_groups.clear();
    }

    fn ensure_pipeline(
        &mut self,
        ctx: &RenderCtx<'_>,
        recorder: &CommandRecorder,
        key: PipelineKey,
    ) -> Option<()> {
        if self.pipelines.contains_key(&key) {
            return Some(());
        }
        let layout = self.pipeline_layout.as_ref()?;
        let (label, vertex, fragment) = recorder.program_sources(key.program)?;

        let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&vertex.name),
            source: wgpu::ShaderSource::Wgsl(vertex.code.clone()),
        });
        let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&fragment.name),
            source: wgpu::ShaderSource::Wgsl(fragment.code.clone()),
        });

        let position_format = match key.components {
            2 => wgpu::VertexFormat::Float32x2,
            _ => wgpu::VertexFormat::Float32x3,
        };
        let position_attrs = [wgpu::VertexAttribute {
            format: position_format,
            offset: 0,
            shader_location: 0,
        }];
        let uv_attrs = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 1,
        }];
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: key.components as u64 * std::mem::size_of::<f32>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &position_attrs,
            },
            wgpu::VertexBufferLayout {
                array_stride: UV_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &uv_attrs,
            },
        ];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Widgets are drawn back to front without depth testing; the
            // y-down projection flips winding, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("MeshRenderer: built pipeline for `{label}` ({} components)", key.components);
        self.pipelines.insert(key, pipeline);
        Some(())
    }

    fn ensure_buffer(
        &mut self,
        ctx: &RenderCtx<'_>,
        recorder: &CommandRecorder,
        id: BufferId,
    ) -> Option<()> {
        if self.buffers.contains_key(&id) {
            return Some(());
        }
        let (label, data) = recorder.buffer(id)?;
        let (contents, usage): (&[u8], _) = match data {
            BufferData::Float(v) => (bytemuck::cast_slice(v), wgpu::BufferUsages::VERTEX),
            BufferData::Index(v) => (bytemuck::cast_slice(v), wgpu::BufferUsages::INDEX),
        };

        let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        });
        self.buffers.insert(id, buffer);
        Some(())
    }

    fn ensure_default_texture(&mut self, ctx: &RenderCtx<'_>) {
        if self.default_texture.is_some() {
            return;
        }
        self.default_texture = Some(create_rgba8_texture(
            ctx,
            "material default texture",
            1,
            1,
            &[255; 4],
        ));
    }

    fn ensure_texture_group(&mut self, ctx: &RenderCtx<'_>, key: TextureKey) -> Option<()> {
        if self.texture_groups.contains_key(&key) {
            return Some(());
        }
        let (texture, filter, wrap) = key;

        let sampler = self.samplers.entry((filter, wrap)).or_insert_with(|| {
            ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("material sampler"),
                address_mode_u: address_mode(wrap.s),
                address_mode_v: address_mode(wrap.t),
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: filter_mode(filter.mag),
                min_filter: filter_mode(filter.min),
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            })
        });

        let view = match texture.and_then(|id| self.textures.get(&id)) {
            Some(view) => view,
            None => {
                if texture.is_some() && !self.warned_texture {
                    log::debug!("MeshRenderer: {texture:?} is not registered; using white");
                    self.warned_texture = true;
                }
                self.default_texture.as_ref()?
            }
        };
        let layout = self.texture_layout.as_ref()?;

        let group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        self.texture_groups.insert(key, group);
        Some(())
    }

    fn ensure_zero_uv_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: u32) {
        if vertices <= self.zero_uv_capacity && self.zero_uv.is_some() {
            return;
        }

        let new_cap = vertices.next_power_of_two().max(64);
        // Buffers are zero-initialized.
        self.zero_uv = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material zero uv vbo"),
            size: new_cap as u64 * UV_STRIDE,
            usage: wgpu::BufferUsages::VERTEX,
            mapped_at_creation: false,
        }));
        self.zero_uv_capacity = new_cap;
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, draws: usize) {
        if draws <= self.uniform_capacity && self.uniform_group.is_some() {
            return;
        }
        let Some(layout) = self.uniform_layout.as_ref() else { return };

        let new_cap = draws.next_power_of_two().max(64);
        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material uniforms ubo"),
            size: new_cap as u64 * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material uniforms bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: NonZeroU64::new(UNIFORM_SIZE),
                }),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.uniform_group = Some(group);
        self.uniform_capacity = new_cap;
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, planned: &[PlannedDraw]) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let stride = self.uniform_stride as usize;

        let mut bytes = vec![0u8; planned.len() * stride];
        for (chunk, draw) in bytes.chunks_exact_mut(stride).zip(planned) {
            chunk[..UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&draw.uniforms));
        }
        ctx.queue.write_buffer(ubo, 0, &bytes);
    }
}

fn create_rgba8_texture(
    ctx: &RenderCtx<'_>,
    label: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn filter_mode(mode: FilterMode) -> wgpu::FilterMode {
    match mode {
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
        FilterMode::Linear => wgpu::FilterMode::Linear,
    }
}

fn address_mode(mode: WrapMode) -> wgpu::AddressMode {
    match mode {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{BufferUsage, GpuContext, Primitive, ShaderSource};

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // 3 × mat4 + vec4 + vec2 + 2 × i32, already 16-byte aligned.
        assert_eq!(UNIFORM_SIZE, 224);
        assert_eq!(UNIFORM_SIZE % 16, 0);
    }

    #[test]
    fn unset_uniforms_keep_sentinels() {
        let u = DrawUniforms::default();
        assert_eq!(u.icon, [-1.0, -1.0]);
        assert_eq!(u.tex0, -1);
        assert_eq!(u.world, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn draw_values_land_in_their_slots() {
        let mut gpu = CommandRecorder::new();
        let prg = gpu
            .create_program(
                "t",
                &ShaderSource::vertex("v", "u.world u.color"),
                &ShaderSource::fragment("f", "u.tex0"),
            )
            .unwrap();
        let world = gpu.uniform(prg, "world").unwrap();
        let color = gpu.uniform(prg, "color").unwrap();
        let tex0 = gpu.uniform(prg, "tex0").unwrap();
        let ibuf = gpu
            .create_index_buffer("i", &[0, 0, 0], BufferUsage::Static)
            .unwrap();

        let m = Mat4::from_translation(glam::vec3(3.0, 4.0, 5.0));
        gpu.use_program(prg);
        gpu.set_mat4(world, &m);
        gpu.set_vec4(color, [0.1, 0.2, 0.3, 0.4]);
        gpu.set_int(tex0, 2);
        gpu.bind_index_buffer(&ibuf);
        gpu.draw_indexed(&ibuf, Primitive::Triangles);

        let u = DrawUniforms::from_draw(&gpu.draws()[0]);
        assert_eq!(u.world, m.to_cols_array_2d());
        assert_eq!(u.color, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(u.tex0, 2);
        assert_eq!(u.view, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn wrap_and_filter_modes_map_to_wgpu() {
        assert_eq!(address_mode(WrapMode::MirrorRepeat), wgpu::AddressMode::MirrorRepeat);
        assert_eq!(filter_mode(FilterMode::Nearest), wgpu::FilterMode::Nearest);
    }
}
