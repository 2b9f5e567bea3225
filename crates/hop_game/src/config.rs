use serde::Deserialize;

/// Every tunable of the demo in one immutable value. Built once at start-up
/// and handed by reference to the level builder, the physics step and the
/// renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    /// px/s², positive is downward.
    pub gravity: f64,
    /// Hard cap on downward speed, px/s.
    pub terminal_velocity: f64,
    /// Upward launch speed, px/s. Applied as a negative vertical velocity.
    pub jump_velocity: f64,
    /// Horizontal speed while a direction key is held, px/s.
    pub player_speed: f64,
    pub player_width: i32,
    pub player_height: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,
}

impl GameConfig {
    pub const DEFAULT_WIDTH: u32 = 960;
    pub const DEFAULT_HEIGHT: u32 = 540;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Platformer: gravity + jump (SPACE)".to_string(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            target_fps: 60,
            gravity: 2000.0,
            terminal_velocity: 2400.0,
            jump_velocity: 900.0,
            player_speed: 260.0,
            player_width: 40,
            player_height: 40,
            spawn_x: 60,
            spawn_y: Self::DEFAULT_HEIGHT as i32 - 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_tuning() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (960, 540));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.gravity, 2000.0);
        assert_eq!(config.terminal_velocity, 2400.0);
        assert_eq!(config.jump_velocity, 900.0);
        assert_eq!(config.player_speed, 260.0);
        assert_eq!((config.player_width, config.player_height), (40, 40));
        assert_eq!((config.spawn_x, config.spawn_y), (60, 240));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "gravity": 1000.0, "spawn_x": 300 }"#).expect("parse");
        assert_eq!(config.gravity, 1000.0);
        assert_eq!(config.spawn_x, 300);
        assert_eq!(config.terminal_velocity, 2400.0);
        assert_eq!(config.width, 960);
    }
}
