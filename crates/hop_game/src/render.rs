//! CPU side of the render step: turns the platform list and the player into
//! a quad mesh plus one line of debug text. The GPU submission lives in
//! `main.rs`.

use hop_devtools::HudLine;
use hop_render::RectVertex;

use crate::collision::Rect;
use crate::config::GameConfig;
use crate::player::Player;

const HUD_POSITION: (f32, f32) = (10.0, 10.0);
const HUD_FONT_SIZE: f32 = 18.0;

/// sRGB colours of everything on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 3],
    pub platform: [u8; 3],
    pub player: [u8; 3],
    pub text: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [255, 192, 203],
            platform: [0, 0, 0],
            player: [255, 255, 255],
            text: [255, 255, 255],
        }
    }
}

impl Palette {
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = srgb_to_linear(self.background);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

#[derive(Debug, Default)]
pub struct FrameMesh {
    pub vertices: Vec<RectVertex>,
    pub indices: Vec<u32>,
}

/// Platforms first, in list order, then the player on top.
pub fn build_frame_mesh(platforms: &[Rect], player_box: Rect, palette: &Palette) -> FrameMesh {
    let quads = platforms.len() + 1;
    let mut mesh = FrameMesh {
        vertices: Vec::with_capacity(quads * 4),
        indices: Vec::with_capacity(quads * 6),
    };

    let platform_color = srgb_to_linear(palette.platform);
    for platform in platforms {
        push_quad(&mut mesh, *platform, platform_color);
    }
    push_quad(&mut mesh, player_box, srgb_to_linear(palette.player));
    mesh
}

fn push_quad(mesh: &mut FrameMesh, rect: Rect, color: [f32; 4]) {
    let left = rect.left() as f32;
    let right = rect.right() as f32;
    let top = rect.top() as f32;
    let bottom = rect.bottom() as f32;
    let base_index = mesh.vertices.len() as u32;

    for position in [[left, top], [right, top], [right, bottom], [left, bottom]] {
        mesh.vertices.push(RectVertex { position, color });
    }
    mesh.indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);
}

/// `vx=... px/s  vy=... px/s  ground=True  gravity=2000`
pub fn debug_line(player: &Player, config: &GameConfig) -> String {
    format!(
        "vx={:.1} px/s  vy={:.1} px/s  ground={}  gravity={:.0}",
        player.velocity.x,
        player.velocity.y,
        if player.on_ground { "True" } else { "False" },
        config.gravity
    )
}

pub fn hud_line(player: &Player, config: &GameConfig, palette: &Palette) -> HudLine {
    HudLine {
        text: debug_line(player, config),
        position: HUD_POSITION,
        font_size: HUD_FONT_SIZE,
        color: palette.text,
    }
}

/// Exact sRGB decode so an sRGB swapchain writes the palette bytes back out.
fn srgb_to_linear(rgb: [u8; 3]) -> [f32; 4] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::build_level;
    use glam::DVec2;

    #[test]
    fn mesh_has_one_quad_per_platform_plus_player() {
        let config = GameConfig::default();
        let platforms = build_level(&config);
        let player = Player::spawn(&config);
        let mesh = build_frame_mesh(&platforms, player.bounding_box(), &Palette::default());
        assert_eq!(mesh.vertices.len(), (platforms.len() + 1) * 4);
        assert_eq!(mesh.indices.len(), (platforms.len() + 1) * 6);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn player_quad_is_drawn_last_at_its_box() {
        let player_box = Rect::new(60, 240, 40, 40);
        let mesh = build_frame_mesh(
            &[Rect::new(0, 490, 960, 50)],
            player_box,
            &Palette::default(),
        );
        let player_quad = &mesh.vertices[4..8];
        assert_eq!(player_quad[0].position, [60.0, 240.0]);
        assert_eq!(player_quad[2].position, [100.0, 280.0]);
        assert_eq!(player_quad[0].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(mesh.vertices[0].color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn srgb_endpoints_are_exact() {
        assert_eq!(srgb_to_linear([0, 0, 0]), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(srgb_to_linear([255, 255, 255]), [1.0, 1.0, 1.0, 1.0]);
        let [r, g, b, _] = srgb_to_linear([255, 192, 203]);
        assert_eq!(r, 1.0);
        assert!(g > 0.5 && g < 0.53);
        assert!(b > 0.58 && b < 0.6);
    }

    #[test]
    fn debug_line_formats_one_decimal_and_capitalized_bool() {
        let config = GameConfig::default();
        let mut player = Player::spawn(&config);
        player.velocity = DVec2::new(-260.0, 33.333_333);
        assert_eq!(
            debug_line(&player, &config),
            "vx=-260.0 px/s  vy=33.3 px/s  ground=False  gravity=2000"
        );

        player.velocity = DVec2::ZERO;
        player.on_ground = true;
        assert_eq!(
            debug_line(&player, &config),
            "vx=0.0 px/s  vy=0.0 px/s  ground=True  gravity=2000"
        );
    }

    #[test]
    fn hud_line_sits_at_top_left_in_text_color() {
        let config = GameConfig::default();
        let player = Player::spawn(&config);
        let hud = hud_line(&player, &config, &Palette::default());
        assert_eq!(hud.position, (10.0, 10.0));
        assert_eq!(hud.color, [255, 255, 255]);
        assert!(hud.text.starts_with("vx=0.0 px/s"));
    }
}
