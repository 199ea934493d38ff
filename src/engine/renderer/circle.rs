// Circle rendering: pipeline, mesh buffers and transform uniforms

use glam::{Mat4, Vec3};
use log::{debug, error, info};
use wgpu::util::DeviceExt;

use super::camera::MatrixUniform;
use super::mesh::CircleMesh;
use super::shader::{
    compile_module, ShaderError, ShaderPaths, ShaderSources, ShaderStage, UniformSlots,
};
use super::Vertex;

/// Draws the circle mesh with a projection and a model transform
pub struct CircleRenderer {
    /// `None` when the shaders failed to load or compile; nothing is drawn then
    render_pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    projection_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    uniforms: UniformSlots,
}

impl CircleRenderer {
    /// Create the renderer, loading shaders from `paths`
    ///
    /// Shader problems are logged and leave the renderer without a pipeline;
    /// they never fail construction.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        mesh: &CircleMesh,
        paths: &ShaderPaths,
    ) -> Self {
        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[uniform_layout_entry(0), uniform_layout_entry(1)],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Circle Pipeline Layout"),
            bind_group_layouts: &[&transform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let sources = match ShaderSources::load(paths) {
            Ok(sources) => Some(sources),
            Err(e) => {
                error!("{}", e);
                None
            }
        };

        let uniforms = UniformSlots::from_sources(sources.as_ref());
        uniforms.warn_missing();

        let render_pipeline = sources.as_ref().and_then(|sources| {
            match build_pipeline(device, &pipeline_layout, sources, format) {
                Ok(pipeline) => Some(pipeline),
                Err(e) => {
                    error!("{}", e);
                    None
                }
            }
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Circle Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Circle Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let identity = MatrixUniform::new(Mat4::IDENTITY);

        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Projection Buffer"),
            contents: bytemuck::cast_slice(&[identity]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Buffer"),
            contents: bytemuck::cast_slice(&[identity]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: projection_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: model_buffer.as_entire_binding(),
                },
            ],
        });

        info!(
            "Circle renderer ready: {} vertices, pipeline {}",
            mesh.vertex_count(),
            if render_pipeline.is_some() { "ok" } else { "unavailable" }
        );

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            projection_buffer,
            model_buffer,
            transform_bind_group,
            uniforms,
        }
    }

    /// Upload this frame's transforms, skipping uniforms the shader lacks
    pub fn update_transforms(&self, queue: &wgpu::Queue, projection: Mat4, position: Vec3) {
        if self.uniforms.projection {
            queue.write_buffer(
                &self.projection_buffer,
                0,
                bytemuck::cast_slice(&[MatrixUniform::new(projection)]),
            );
        }
        if self.uniforms.model {
            queue.write_buffer(
                &self.model_buffer,
                0,
                bytemuck::cast_slice(&[MatrixUniform::model(position)]),
            );
        }
    }

    /// Record the draw call
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(pipeline) = &self.render_pipeline else {
            return;
        };

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl Drop for CircleRenderer {
    fn drop(&mut self) {
        debug!("Releasing circle GPU resources");
    }
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    sources: &ShaderSources,
    format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, ShaderError> {
    let vertex_module = compile_module(device, sources, ShaderStage::Vertex)?;
    let fragment_module = compile_module(device, sources, ShaderStage::Fragment)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Circle Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: ShaderStage::Vertex.entry_point(),
            buffers: &[Vertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: ShaderStage::Fragment.entry_point(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
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
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(ShaderError::Link(error.to_string())),
        None => Ok(pipeline),
    }
}
