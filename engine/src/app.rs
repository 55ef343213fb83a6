use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use tracing::{error, info};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::{Renderer2d, SurfaceSize};
use crate::pixels_renderer::PixelsRenderer2d;
use crate::render::draw_view;
use crate::view_tree::{UiInput, ViewTree, hit_test};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to set up pixel surface: {0}")]
    Surface(#[from] pixels::Error),
}

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: bool,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// Input gathered between two redraws.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub mouse_pos: Option<(u32, u32)>,
    pub mouse_up: bool,
    pub typed: Vec<char>,
}

impl InputFrame {
    fn ui_input(&self) -> UiInput {
        UiInput {
            mouse_pos: self.mouse_pos,
            mouse_up: self.mouse_up,
        }
    }

    fn end_frame(&mut self) {
        self.mouse_up = false;
        self.typed.clear();
    }
}

pub trait GameApp {
    type State;
    type Action: Clone;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn build_view(&self, state: &Self::State, size: SurfaceSize) -> ViewTree<Self::Action>;

    /// Maps typed characters to actions. Defaults to ignoring the keyboard.
    fn typed_actions(&self, _typed: &[char]) -> Vec<Self::Action> {
        Vec::new()
    }

    /// Called once after `init_state` and again whenever the window changes size.
    fn on_resize(&mut self, _state: &mut Self::State, _size: SurfaceSize) {}

    fn update_state(&mut self, state: &mut Self::State, actions: &[Self::Action], dt: Duration);

    fn render(&mut self, view: &ViewTree<Self::Action>, gfx: &mut dyn Renderer2d) {
        draw_view(gfx, view);
    }

    /// Called exactly once when the window closes.
    fn shutdown(&mut self, _state: &mut Self::State) {}
}

fn open_window(config: AppConfig, event_loop: &EventLoop<()>) -> Result<AppContext, AppError> {
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = match monitor_size {
        Some(monitor) => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        None => config.desired_size,
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    Ok(AppContext {
        window,
        renderer,
        surface_size,
    })
}

/// Opens the window and runs `game` until the window is closed.
///
/// Each redraw: clicks are hit-tested against the current view, typed characters are mapped to
/// actions, both are handed to `update_state` together with the elapsed time, and the rebuilt
/// view is drawn and presented. Frame failures are logged and the loop keeps going.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let mut ctx = open_window(config, &event_loop)?;
    info!(
        width = ctx.surface_size.width,
        height = ctx.surface_size.height,
        "window opened"
    );

    let mut state = game.init_state(&mut ctx);
    game.on_resize(&mut state, ctx.surface_size);

    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();
    let mut shut_down = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let new_size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = ctx.renderer.resize(new_size) {
                        error!("resize failed: {err}");
                    }
                    if !new_size.is_empty() {
                        ctx.surface_size = new_size;
                        game.on_resize(&mut state, new_size);
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.mouse_pos = Some((position.x.max(0.0) as u32, position.y.max(0.0) as u32));
                }
                WindowEvent::CursorLeft { .. } => {
                    input.mouse_pos = None;
                }
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button: MouseButton::Left,
                    ..
                } => {
                    input.mouse_up = true;
                }
                WindowEvent::ReceivedCharacter(ch) => {
                    input.typed.push(ch);
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let view_for_input = game.build_view(&state, ctx.surface_size);
                let mut actions: Vec<G::Action> =
                    hit_test(&view_for_input, input.ui_input()).into_iter().collect();
                actions.extend(game.typed_actions(&input.typed));
                game.update_state(&mut state, &actions, dt);

                let view = game.build_view(&state, ctx.surface_size);
                ctx.renderer.draw_frame(|gfx| game.render(&view, gfx));
                if let Err(err) = ctx.renderer.present() {
                    error!("present failed: {err}");
                }
                input.end_frame();
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            Event::LoopDestroyed => {
                if !shut_down {
                    shut_down = true;
                    game.shutdown(&mut state);
                    info!("window closed");
                }
            }
            _ => {}
        }
    });
}
