//! Immediate-mode 2D shape drawing.
//!
//! [`Painter`] records colored shapes on the CPU during a frame.
//! [`PainterPass`] owns the GPU resources and replays the recorded batch in a
//! single draw at the end of the frame.

use crate::gpu::GpuContext;

/// RGBA color with straight alpha, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl From<Color> for wgpu::Color {
    fn from(color: Color) -> Self {
        wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        }
    }
}

/// Vertex for 2D shape rendering.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2d {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex2d {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex2d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

/// Uniforms for 2D rendering.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PainterUniforms {
    resolution: [f32; 2],
    _padding: [f32; 2],
}

const MAX_VERTICES: usize = 16384;

/// CPU-side shape recorder for one frame.
///
/// Coordinates are pixels with the origin at the top left. All shapes are
/// batched and drawn in submission order by [`PainterPass::render`].
pub struct Painter {
    /// Color the frame clears to before shapes draw.
    pub(crate) clear_color: Color,

    /// Shape batch for the current frame.
    pub(crate) vertices: Vec<Vertex2d>,
}

impl Painter {
    pub fn new() -> Self {
        Self {
            clear_color: Color::BLACK,
            vertices: Vec::with_capacity(1024),
        }
    }

    /// Reset the batch and clear color for a new frame.
    pub fn begin_frame(&mut self) {
        self.clear_color = Color::BLACK;
        self.vertices.clear();
    }

    /// Set the color the frame is cleared to.
    pub fn clear_background(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Draw a colored rectangle.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let c = [color.r, color.g, color.b, color.a];

        self.vertices.extend_from_slice(&[
            Vertex2d {
                position: [x, y],
                color: c,
            },
            Vertex2d {
                position: [x + w, y],
                color: c,
            },
            Vertex2d {
                position: [x, y + h],
                color: c,
            },
            Vertex2d {
                position: [x + w, y],
                color: c,
            },
            Vertex2d {
                position: [x + w, y + h],
                color: c,
            },
            Vertex2d {
                position: [x, y + h],
                color: c,
            },
        ]);
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU resources for replaying a [`Painter`] batch.
pub struct PainterPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl PainterPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Painter Shader"),
            source: wgpu::ShaderSource::Wgsl(PAINTER_SHADER.into()),
        });

        // Uniform buffer
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Painter Uniforms"),
            size: std::mem::size_of::<PainterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Painter Uniform Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Painter Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Painter Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Blend state for alpha blending
        let blend_state = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Painter Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex2d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(blend_state),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Vertex buffer
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Painter Vertex Buffer"),
            size: (MAX_VERTICES * std::mem::size_of::<Vertex2d>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            uniform_bind_group,
        }
    }

    /// Replay the recorded batch into an open render pass.
    pub fn render(&self, gpu: &GpuContext, render_pass: &mut wgpu::RenderPass, painter: &Painter) {
        if painter.vertices.is_empty() {
            return;
        }

        let uniforms = PainterUniforms {
            resolution: [gpu.width() as f32, gpu.height() as f32],
            _padding: [0.0, 0.0],
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let count = painter.vertices.len().min(MAX_VERTICES);
        gpu.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&painter.vertices[..count]),
        );

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..count as u32, 0..1);
    }
}

/// Shape shader. Converts pixel coordinates to clip space and passes color.
const PAINTER_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2f,
    _padding: vec2f,
}

@group(0) @binding(0) var<uniform> u: Uniforms;

struct VertexOut {
    @builtin(position) position: vec4f,
    @location(0) color: vec4f,
}

@vertex
fn vs(@location(0) position: vec2f, @location(1) color: vec4f) -> VertexOut {
    let ndc = position / u.resolution * 2.0 - 1.0;

    var out: VertexOut;
    out.position = vec4f(ndc.x, -ndc.y, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs(in: VertexOut) -> @location(0) vec4f {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_records_two_triangles() {
        let mut painter = Painter::new();
        painter.rect(10.0, 20.0, 100.0, 50.0, Color::WHITE);

        assert_eq!(painter.vertices.len(), 6);
        assert_eq!(painter.vertices[0].position, [10.0, 20.0]);
        assert_eq!(painter.vertices[4].position, [110.0, 70.0]);
    }

    #[test]
    fn begin_frame_resets_batch_and_clear_color() {
        let mut painter = Painter::new();
        painter.clear_background(Color::WHITE);
        painter.rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);

        painter.begin_frame();

        assert!(painter.vertices.is_empty());
        assert_eq!(painter.clear_color, Color::BLACK);
    }
}
