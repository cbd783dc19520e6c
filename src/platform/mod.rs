//! Platform layer (winit 0.30)
//!
//! Owns the window and feeds OS events into a [`QueuedInput`]. Ticks are
//! driven from `about_to_wait` against a [`TickClock`] deadline, so the loop
//! sleeps in the event loop rather than in a busy wait.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::game_loop::{GameLoop, LoopPhase, RunSummary, TickClock};
use crate::input::{Direction, InputEvent, QueuedInput};
use crate::renderer::{RenderError, RenderState};
use crate::settings::Settings;

/// Fatal failures while bringing up or running the window
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Movement key bindings (WASD plus arrows)
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Direction::Up),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Direction::Down),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}

struct App {
    settings: Settings,
    game: GameLoop,
    input: QueuedInput,
    window: Option<Arc<Window>>,
    renderer: Option<RenderState>,
    /// Started once the window is up
    clock: Option<TickClock>,
    error: Option<PlatformError>,
}

impl App {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            game: GameLoop::new(settings.clone(), seed),
            settings,
            input: QueuedInput::new(),
            window: None,
            renderer: None,
            clock: None,
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attributes = WindowAttributes::default()
            .with_title(self.settings.window_title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(self.settings.width),
                f64::from(self.settings.height),
            ))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let renderer = pollster::block_on(RenderState::new(
            window.clone(),
            self.settings.arena_size(),
        ))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock = Some(TickClock::for_settings(&self.settings));
        log::info!(
            "Window ready ({}x{} at {} Hz)",
            self.settings.width,
            self.settings.height,
            self.settings.tick_rate
        );
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlatformError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = &self.window else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.input.push(InputEvent::Quit),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if let Some(dir) = direction_for_key(code) {
                    match event.state {
                        ElementState::Pressed => self.input.press(dir),
                        ElementState::Released => self.input.release(dir),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                // Physical pixels -> playfield units
                let logical = position.to_logical::<f32>(window.scale_factor());
                self.input
                    .push(InputEvent::PointerMoved(Vec2::new(logical.x, logical.y)));
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.input.push(InputEvent::PrimaryPressed),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(clock)) = (&mut self.renderer, &mut self.clock) else {
            return;
        };

        match self
            .game
            .step_when_due(&mut self.input, renderer, clock, Instant::now())
        {
            Ok(LoopPhase::Running) => {}
            Ok(LoopPhase::Terminated) => {
                event_loop.exit();
                return;
            }
            Err(err) => {
                self.fail(event_loop, err.into());
                return;
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(clock.deadline()));
    }
}

/// Open the window and play until quit or defeat.
///
/// The window and GPU resources are released before this returns.
pub fn run(settings: Settings, seed: u64) -> Result<RunSummary, PlatformError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, seed);
    log::info!("Starting arena (seed {seed})");

    event_loop.run_app(&mut app)?;

    if let Some(err) = app.error.take() {
        return Err(err);
    }

    let summary = app.game.summary();
    drop(app);
    summary.log();
    Ok(summary)
}
