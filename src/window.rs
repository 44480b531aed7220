//! Window runner for the particle field.
//!
//! Pointer events are applied to [`PointerState`] as they arrive; each redraw
//! ticks the clock, updates the field, draws it and requests the next frame.
//! Space pauses the float, Escape closes the window.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::clock::FrameClock;
use crate::config::Config;
use crate::error::AppError;
use crate::field::ParticleField;
use crate::gpu::QuadRenderer;
use crate::input::PointerState;
use crate::spawn::entropy_seed;
use crate::textures::{load_icons, FoodTexture};

/// Open the field window and block until it closes.
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = FieldApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub struct FieldApp {
    config: Config,
    textures: Vec<FoodTexture>,
    field: ParticleField,
    pointer: PointerState,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    renderer: Option<QuadRenderer>,
    error: Option<AppError>,
}

impl FieldApp {
    pub fn new(config: Config) -> Self {
        let textures = load_icons(&config.assets.dir, &config.assets.icons);
        let field = ParticleField::new(config.field.clone(), textures.len(), entropy_seed());
        Self {
            config,
            textures,
            field,
            pointer: PointerState::new(),
            clock: FrameClock::new(),
            window: None,
            renderer: None,
            error: None,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.pointer.set_window_size(size.width, size.height);

        let renderer = pollster::block_on(QuadRenderer::new(
            window.clone(),
            &self.textures,
            self.field.config().half_extents(),
            self.field.config().quad_size * 0.5,
            self.config.window.clear_color,
        ))?;
        self.field.set_view_projection(renderer.view_projection());

        tracing::info!(
            particles = self.field.len(),
            textures = self.textures.len(),
            width = size.width,
            height = size.height,
            "field window open"
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();
        self.field.update(&self.pointer, frame);
        self.pointer.begin_frame();

        if let Some(renderer) = &mut self.renderer {
            match renderer.render(&self.field.render_items()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.resize(renderer.size());
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("gpu out of memory, closing");
                    event_loop.exit();
                }
                Err(e) => tracing::warn!(error = ?e, "frame skipped"),
            }
        }

        if self.clock.frame() % 600 == 0 {
            tracing::trace!(fps = self.clock.fps(), "field");
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for FieldApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!(error = %e, "failed to open field window");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.pointer.handle_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                    self.field.set_view_projection(renderer.view_projection());
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => self.clock.toggle_pause(),
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
