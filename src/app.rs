use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use glam::UVec2;
use log::{info, warn};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::canvas::Canvas;
use crate::config::AppConfig;
use crate::frame::Frame;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::painter::{Painter, PainterPass};
use crate::stage::{Director, StageError};

/// Errors that can stop a run before the window ever closes normally.
#[derive(Debug)]
pub enum RunError {
    /// No starting scene could be resolved from the configuration.
    Stage(StageError),
    /// The platform event loop could not be created or driven.
    EventLoop(EventLoopError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Stage(err) => err.fmt(f),
            RunError::EventLoop(err) => write!(f, "event loop failed: {}", err),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Stage(err) => Some(err),
            RunError::EventLoop(err) => Some(err),
        }
    }
}

impl From<StageError> for RunError {
    fn from(err: StageError) -> Self {
        RunError::Stage(err)
    }
}

impl From<EventLoopError> for RunError {
    fn from(err: EventLoopError) -> Self {
        RunError::EventLoop(err)
    }
}

/// Run a Skene application.
///
/// `setup` receives the stage once, before the window opens, and registers
/// scenes, transitions, popups and listeners on it. The call then resolves
/// the starting scene, opens the window and drives frames until the window
/// is closed.
///
/// # Example
/// ```ignore
/// let config = AppConfig::new()
///     .title("Jukebox")
///     .size(960, 540)
///     .start_scene("menu");
///
/// skene::run(config, |stage| {
///     stage.define_scene("menu", SceneDef::new().on_draw(|frame| {
///         frame.clear_background(Color::rgb(0.08, 0.08, 0.1));
///     }));
/// })
/// .unwrap();
/// ```
pub fn run<S>(config: AppConfig, setup: S) -> Result<(), RunError>
where
    S: FnOnce(&mut Director),
{
    let mut director = Director::new();
    setup(&mut director);
    director.start(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SkeneApp::Pending {
        config,
        director: Some(director),
    };
    event_loop.run_app(&mut app)?;

    if let SkeneApp::Running { director, .. } = &mut app {
        director.finish();
    }
    Ok(())
}

enum SkeneApp {
    Pending {
        config: AppConfig,
        director: Option<Director>,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        canvas: Canvas,
        painter: Painter,
        painter_pass: PainterPass,
        input: Input,
        director: Director,
        start_time: Instant,
        last_frame: Instant,
        resized: bool,
    },
}

impl ApplicationHandler for SkeneApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let SkeneApp::Pending { config, director } = self {
            let window_attrs = WindowAttributes::default()
                .with_title(&config.title)
                .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

            let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
            let gpu = GpuContext::new(window.clone());
            let canvas = Canvas::new(&gpu);
            let painter_pass = PainterPass::new(&gpu);

            let mut director = director.take().unwrap();
            info!("Opened '{}' at {}x{}", config.title, config.width, config.height);
            director.open();

            *self = SkeneApp::Running {
                window,
                gpu,
                canvas,
                painter: Painter::new(),
                painter_pass,
                input: Input::new(),
                director,
                start_time: Instant::now(),
                last_frame: Instant::now(),
                resized: false,
            };
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let SkeneApp::Running {
            window,
            gpu,
            canvas,
            painter,
            painter_pass,
            input,
            director,
            start_time,
            last_frame,
            resized,
        } = self
        else {
            return;
        };

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
                *resized = true;
            }
            WindowEvent::Focused(focused) => {
                director.notify_focus(focused);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let time = start_time.elapsed().as_secs_f32();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                canvas.ensure_size(gpu);
                painter.begin_frame();

                let size = UVec2::new(gpu.width(), gpu.height());
                let mut frame = Frame::new(painter, input, time, dt, size, director.scale());
                let script = director.tick(&mut frame, std::mem::take(resized));
                director.perform(&script, &mut frame);
                drop(frame);

                present(gpu, canvas, painter_pass, painter);

                input.begin_frame();
                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Draw the batched frame onto the canvas, then blit the canvas to the window.
fn present(gpu: &GpuContext, canvas: &Canvas, painter_pass: &PainterPass, painter: &Painter) {
    let output = match gpu.surface.get_current_texture() {
        Ok(output) => output,
        Err(err) => {
            warn!("Skipped a frame, the surface was unavailable: {}", err);
            return;
        }
    };
    let surface_view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Stage Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &canvas.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(painter.clear_color.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        painter_pass.render(gpu, &mut render_pass, painter);
    }

    canvas.blit(gpu, &mut encoder, &surface_view);

    gpu.queue.submit(std::iter::once(encoder.finish()));
    output.present();
}
