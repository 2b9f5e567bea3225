//! Platformer demo -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Every `RedrawRequested`
//! is one tick of a **variable-timestep** loop:
//!
//!   1. `FrameClock::tick()` -- wait for the next 60 Hz slot, measure dt
//!   2. act on discrete key presses drained since the last tick (quit, F3)
//!   3. `Player::update()` -- poll held keys, then the physics/collision step
//!   4. rebuild the quad mesh, draw it, draw the debug text, present
//!
//! There is no accumulator: whatever time the frame took is fed to physics
//! as-is.

mod collision;
mod config;
mod level;
mod player;
mod render;
#[cfg(test)]
mod replay;
mod run_state;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use collision::Rect;
use config::GameConfig;
use hop_core::input::{InputState, Key};
use hop_core::time::FrameClock;
use hop_devtools::DebugOverlay;
use hop_platform::window::{create_window, PlatformConfig};
use hop_render::{GpuContext, RectPipeline, RectVertex, ScreenCamera};
use level::build_level;
use player::{Player, PlayerInput};
use render::{build_frame_mesh, hud_line, Palette};
use run_state::{LoopEvent, RunState};

/// Everything owned by the running game. Built in `ApplicationHandler::resumed`
/// once a window exists.
struct GameState {
    window: Arc<Window>,
    gpu: GpuContext,
    clock: FrameClock,
    input: InputState,
    pipeline: RectPipeline,
    debug_overlay: DebugOverlay,
    palette: Palette,

    platforms: Vec<Rect>,
    player: Player,

    // The mesh is rebuilt on the CPU every tick and streamed into these
    // buffers. They grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    index_count: u32,
}

impl GameState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let pipeline = RectPipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        // The play field never scrolls, so the camera uniform is written once.
        let camera = ScreenCamera::new(config.width, config.height);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let platforms = build_level(config);
        log::info!("Level built: {} platforms", platforms.len());
        let player = Player::spawn(config);

        let quads = platforms.len() + 1;
        let vertex_buffer = create_vertex_buffer(&gpu.device, quads * 4);
        let index_buffer = create_index_buffer(&gpu.device, quads * 6);

        let mut state = Self {
            window,
            gpu,
            clock: FrameClock::new(config.target_fps),
            input: InputState::new(),
            pipeline,
            debug_overlay,
            palette: Palette::default(),
            platforms,
            player,
            vertex_buffer,
            index_buffer,
            camera_bind_group,
            mesh_vertex_capacity: quads * 4,
            mesh_index_capacity: quads * 6,
            index_count: 0,
        };

        // Start-up time must not reach physics as the first dt.
        state.clock.reset();
        Ok(state)
    }

    fn tick(&mut self, config: &GameConfig) {
        let dt = self.clock.tick();

        if self.input.is_just_pressed(Key::F3) {
            self.debug_overlay.toggle();
        }

        let input = PlayerInput::from_input_state(&self.input);
        let events = self.player.update(input, dt, &self.platforms, config);
        if events.jumped {
            log::debug!(
                "Jump from ({:.1}, {:.1})",
                self.player.position.x,
                self.player.position.y
            );
        }
        if events.landed {
            log::debug!(
                "Landed at ({:.1}, {:.1})",
                self.player.position.x,
                self.player.position.y
            );
        }

        self.render(config);
        self.input.end_frame();
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        if vertex_count > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = vertex_count.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }
        if index_count > self.mesh_index_capacity {
            self.mesh_index_capacity = index_count.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn upload_mesh(&mut self) {
        let mesh = build_frame_mesh(&self.platforms, self.player.bounding_box(), &self.palette);
        self.ensure_mesh_capacity(mesh.vertices.len(), mesh.indices.len());
        self.index_count = mesh.indices.len() as u32;

        if !mesh.vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        }
        if !mesh.indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        }
    }

    fn render(&mut self, config: &GameConfig) {
        self.upload_mesh();

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let hud = hud_line(&self.player, config, &self.palette);
        let (egui_primitives, egui_textures_delta) =
            self.debug_overlay
                .prepare(&self.window, &self.clock, &hud);

        let (width, height) = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.palette.clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            render_pass.set_pipeline(&self.pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.debug_overlay.cleanup(&egui_textures_delta);
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: GameConfig,
    run_state: RunState,
    state: Option<GameState>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            run_state: RunState::default(),
            state: None,
        }
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop, event: LoopEvent) {
        self.run_state = self.run_state.apply(event);
        if !self.run_state.is_running() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let platform = PlatformConfig {
            title: self.config.title.clone(),
            width: self.config.width,
            height: self.config.height,
            resizable: false,
        };
        let window = create_window(event_loop, &platform).unwrap_or_else(|err| fatal(&err));
        let state = GameState::new(window, &self.config).unwrap_or_else(|err| fatal(&err));
        self.state = Some(state);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.run_state.is_running() {
            return;
        }
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                self.stop(event_loop, LoopEvent::CloseRequested);
            }
            WindowEvent::Resized(physical_size) => {
                state.gpu.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::Focused(false) => {
                state.input.release_all();
            }
            ref other if is_return_to_foreground(other) => {
                state.clock.reset();
            }
            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if !self.run_state.is_running() {
                    return;
                }
                if state.input.is_just_pressed(Key::Escape) {
                    self.stop(event_loop, LoopEvent::EscapePressed);
                    return;
                }
                state.tick(&self.config);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Shutting down");
        self.state = None;
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<RectVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Some platforms stop redrawing while the window is hidden or minimized;
/// the gap must not reach physics as one huge dt when it comes back.
fn is_return_to_foreground(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::Focused(true) | WindowEvent::Occluded(false))
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

/// Unrecoverable start-up failure: log and abort without retrying.
fn fatal(message: &str) -> ! {
    log::error!("{message}");
    std::process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Platformer starting...");

    let event_loop = EventLoop::new()
        .unwrap_or_else(|err| fatal(&format!("Failed to create event loop: {err}")));
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(GameConfig::default());
    if let Err(err) = event_loop.run_app(&mut app) {
        fatal(&format!("Event loop error: {err}"));
    }
}
