use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Mat4, Vec2};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use material_engine::device::{Gpu, SurfaceErrorAction};
use material_engine::gpu::CommandRecorder;
use material_engine::render::{MeshRenderer, RenderTarget};
use material_ui::Theme;
use material_ui::icon::GridIconAtlas;

use crate::atlas::{SHEET_SIZE, icon_sheet};
use crate::config::StudioConfig;
use crate::scene::{ICON_SHEET, Scene};

/// Runs the studio until the window closes.
pub fn run(config: StudioConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut studio = Studio {
        config,
        theme: Theme::default(),
        running: None,
        exit_requested: false,
    };

    event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error")?;
    Ok(())
}

struct Studio {
    config: StudioConfig,
    theme: Theme,
    running: Option<Running>,
    exit_requested: bool,
}

/// Everything that exists only while a window is open.
struct Running {
    window: Arc<Window>,
    gpu: Gpu,
    recorder: CommandRecorder,
    renderer: MeshRenderer,
    scene: Scene,
    cursor: PhysicalPosition<f64>,
}

impl Studio {
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.config.gpu.clone()))
            .context("GPU initialization failed")?;

        let mut recorder = CommandRecorder::new();
        let mut scene = Scene::new(&mut recorder, &self.config, &self.theme)?;
        let size = gpu.size();
        scene.layout(
            Vec2::new(size.width as f32, size.height as f32),
            window.scale_factor() as f32,
        );

        let mut renderer = MeshRenderer::new();
        let atlas = GridIconAtlas::new(self.theme.icon_cell);
        renderer.upload_rgba8(
            &gpu.render_ctx(),
            ICON_SHEET,
            SHEET_SIZE,
            SHEET_SIZE,
            &icon_sheet(&atlas),
        );

        Ok(Running {
            window,
            gpu,
            recorder,
            renderer,
            scene,
            cursor: PhysicalPosition::new(0.0, 0.0),
        })
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl Running {
    fn relayout(&mut self) {
        let size = self.gpu.size();
        self.scene.layout(
            Vec2::new(size.width as f32, size.height as f32),
            self.window.scale_factor() as f32,
        );
    }

    /// Records and submits one frame. Returns false on a fatal surface error.
    fn redraw(&mut self, config: &StudioConfig) -> bool {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => return self.gpu.handle_surface_error(err) != SurfaceErrorAction::Fatal,
        };

        let size = self.gpu.size();
        let proj = Mat4::orthographic_rh(
            0.0,
            size.width.max(1) as f32,
            size.height.max(1) as f32,
            0.0,
            -100.0,
            100.0,
        );

        self.recorder.begin_frame();
        self.scene.draw(&mut self.recorder, &Mat4::IDENTITY, &proj);

        {
            let ctx = self.gpu.render_ctx();
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            target.clear(config.clear_color);
            self.renderer.render(&ctx, &mut target, &self.recorder);
        }

        self.gpu.submit(frame);
        true
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("failed to start studio: {e:#}");
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.request_exit(event_loop),

            WindowEvent::Resized(size) => {
                running.gpu.resize(size);
                running.relayout();
            }
            WindowEvent::ScaleFactorChanged { .. } => running.relayout(),

            WindowEvent::CursorMoved { position, .. } => running.cursor = position,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let PhysicalPosition { x, y } = running.cursor;
                running.scene.click(x as f32, y as f32);
            }

            WindowEvent::RedrawRequested => {
                if !running.redraw(&self.config) {
                    self.request_exit(event_loop);
                }
            }
            _ => {}
        }
    }
}
