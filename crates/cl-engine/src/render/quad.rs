use anyhow::{Context, Result};

use crate::camera::{Camera2D, CameraUniform};
use crate::render::{RenderCtx, RenderTarget, ShaderSource};

/// Draws one full-screen quad with the camera bound as a uniform.
///
/// The quad has no vertex buffer: the vertex shader derives the four corners
/// of a triangle strip from `vertex_index`. The camera uniform sits at
/// group 0, binding 0, visible to both stages.
pub struct QuadRenderer {
    shader: ShaderSource,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,
}

impl QuadRenderer {
    pub const VERTEX_COUNT: u32 = 4;

    /// Checks that `shader` only binds the camera uniform at group 0,
    /// binding 0, and that the uniform fits in a [`CameraUniform`].
    pub fn new(shader: ShaderSource) -> Result<Self> {
        check_camera_binding(&shader).with_context(|| {
            format!("shader {} does not fit the quad renderer", shader.label())
        })?;

        Ok(Self {
            shader,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            camera_ubo: None,
        })
    }

    /// Uploads the camera matrices and draws the quad into `target`.
    ///
    /// The target is loaded, not cleared. Fails if the GPU rejects the
    /// pipeline built from the shader.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera2D,
    ) -> Result<()> {
        self.ensure_pipeline(ctx)?;
        self.ensure_bindings(ctx);

        let Some(ubo) = self.camera_ubo.as_ref() else { return Ok(()) };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&camera.uniform()));

        let Some(pipeline) = self.pipeline.as_ref() else { return Ok(()) };
        let Some(bind_group) = self.bind_group.as_ref() else { return Ok(()) };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cl quad pass"),
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

        let vp = ctx.viewport;
        rpass.set_viewport(0.0, 0.0, vp.width() as f32, vp.height() as f32, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..Self::VERTEX_COUNT, 0..1);
        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return Ok(());
        }

        log::debug!(
            "building quad pipeline for {:?} from {}",
            ctx.surface_format,
            self.shader.label()
        );

        // Device limits or features can still reject a naga-valid module.
        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = self.shader.create_module(ctx.device);

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cl camera bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(CameraUniform::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("cl quad pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cl quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(ShaderSource::VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(ShaderSource::FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
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

        if let Some(err) = pollster::block_on(scope.pop()) {
            anyhow::bail!("GPU rejected quad pipeline for {}: {err}", self.shader.label());
        }

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings were created against the old layout.
        self.bind_group = None;
        self.camera_ubo = None;
        Ok(())
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cl camera ubo"),
            size: CameraUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cl camera bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }
}

fn check_camera_binding(shader: &ShaderSource) -> Result<()> {
    let mut camera = None;
    for b in shader.bindings() {
        anyhow::ensure!(
            (b.group, b.binding) == (0, 0),
            "unexpected resource at @group({}) @binding({})",
            b.group,
            b.binding
        );
        camera = Some(b);
    }

    let camera = camera.context("no camera uniform at @group(0) @binding(0)")?;
    let size = camera
        .uniform_size
        .context("@group(0) @binding(0) must be a var<uniform>")?;
    anyhow::ensure!(
        u64::from(size) <= CameraUniform::SIZE,
        "camera uniform is {size} bytes, larger than the {} bytes uploaded",
        CameraUniform::SIZE
    );
    Ok(())
}
