//! Debug text and timing panel rendered via egui on top of the game scene.
//!
//! egui requires a split render because `egui_wgpu::Renderer::render()` needs a
//! `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The HUD line is painted every frame. The timing panel is only built while
//! `panel_visible` is true (toggled by F3).

use hop_core::time::FrameClock;
use winit::window::Window;

/// One line of fixed-width text anchored at its top-left corner.
#[derive(Debug, Clone)]
pub struct HudLine {
    pub text: String,
    pub position: (f32, f32),
    pub font_size: f32,
    pub color: [u8; 3],
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub panel_visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            panel_visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.panel_visible = !self.panel_visible;
        log::debug!(
            "Timing panel: {}",
            if self.panel_visible { "ON" } else { "OFF" }
        );
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        clock: &FrameClock,
        hud: &HudLine,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let panel_visible = self.panel_visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let [r, g, b] = hud.color;
            egui::Area::new(egui::Id::new("hud_line"))
                .fixed_pos(egui::pos2(hud.position.0, hud.position.1))
                .order(egui::Order::Foreground)
                .interactable(false)
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(&hud.text)
                            .monospace()
                            .size(hud.font_size)
                            .color(egui::Color32::from_rgb(r, g, b)),
                    );
                });

            if panel_visible {
                egui::Window::new("Timing")
                    .default_pos([10.0, 40.0])
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                        ui.label(format!("dt: {:.3} s", clock.dt));
                        ui.label(format!("Frame: {}", clock.frame_count));
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
