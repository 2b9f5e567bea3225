//! The single dynamic entity and its per-frame physics step.
//!
//! Position is kept in floating point and is authoritative; the whole-pixel
//! bounding box is derived from it by rounding whenever collision needs it.
//! After any collision or bounds correction the floating position is resynced
//! from the corrected box on that axis.

use glam::DVec2;
use hop_core::input::{InputState, Key};

use crate::collision::{clamp_to_bounds, resolve_horizontal, resolve_vertical, Rect};
use crate::config::GameConfig;

/// Keyboard snapshot the player reads once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl PlayerInput {
    pub fn from_input_state(input: &InputState) -> Self {
        Self {
            left: input.is_held(Key::Left) || input.is_held(Key::A),
            right: input.is_held(Key::Right) || input.is_held(Key::D),
            jump: input.is_held(Key::Space),
        }
    }
}

/// What happened during one `update`, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    pub jumped: bool,
    pub landed: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: DVec2,
    pub velocity: DVec2,
    pub width: i32,
    pub height: i32,
    pub on_ground: bool,
    jump_prev: bool,
}

impl Player {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: DVec2::new(x as f64, y as f64),
            velocity: DVec2::ZERO,
            width,
            height,
            on_ground: false,
            jump_prev: false,
        }
    }

    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(
            config.spawn_x,
            config.spawn_y,
            config.player_width,
            config.player_height,
        )
    }

    /// Whole-pixel box at the rounded position. Ties round to even.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            self.position.x.round_ties_even() as i32,
            self.position.y.round_ties_even() as i32,
            self.width,
            self.height,
        )
    }

    pub fn update(
        &mut self,
        input: PlayerInput,
        dt: f64,
        platforms: &[Rect],
        config: &GameConfig,
    ) -> StepEvents {
        let jumped = self.handle_input(input, config);
        let landed = self.move_and_collide(dt, platforms, config);
        StepEvents { jumped, landed }
    }

    /// Set horizontal velocity from the held direction (left wins over right)
    /// and fire a jump on the released-to-pressed edge of the jump key.
    /// Returns whether a jump happened.
    pub fn handle_input(&mut self, input: PlayerInput, config: &GameConfig) -> bool {
        self.velocity.x = if input.left {
            -config.player_speed
        } else if input.right {
            config.player_speed
        } else {
            0.0
        };

        let jumped = input.jump && !self.jump_prev && self.jump(config);
        self.jump_prev = input.jump;
        jumped
    }

    /// Launch upward if standing on something. Returns whether it did.
    pub fn jump(&mut self, config: &GameConfig) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity.y = -config.jump_velocity;
        self.on_ground = false;
        true
    }

    pub fn apply_gravity(&mut self, dt: f64, config: &GameConfig) {
        self.velocity.y = (self.velocity.y + config.gravity * dt).min(config.terminal_velocity);
    }

    /// Horizontal move and resolve, gravity, vertical move and resolve, then
    /// the field bounds. Returns true when the player touched down this step.
    pub fn move_and_collide(&mut self, dt: f64, platforms: &[Rect], config: &GameConfig) -> bool {
        let was_on_ground = self.on_ground;

        self.position.x += self.velocity.x * dt;
        let horizontal = resolve_horizontal(self.bounding_box(), self.velocity.x, platforms);
        if horizontal.touched {
            self.position.x = horizontal.body.x as f64;
        }

        self.apply_gravity(dt, config);
        self.position.y += self.velocity.y * dt;
        let vertical = resolve_vertical(self.bounding_box(), self.velocity.y, platforms);
        self.velocity.y = vertical.velocity_y;
        self.on_ground = vertical.landed;
        if vertical.touched {
            self.position.y = vertical.body.y as f64;
        }

        let bounds = clamp_to_bounds(
            self.bounding_box(),
            config.width as i32,
            config.height as i32,
        );
        if bounds.hit_left || bounds.hit_right {
            self.position.x = bounds.body.x as f64;
        }
        if bounds.hit_top {
            self.velocity.y = 0.0;
        }
        if bounds.hit_bottom {
            self.velocity.y = 0.0;
            self.on_ground = true;
        }
        if bounds.hit_top || bounds.hit_bottom {
            self.position.y = bounds.body.y as f64;
        }

        self.on_ground && !was_on_ground
    }
}
