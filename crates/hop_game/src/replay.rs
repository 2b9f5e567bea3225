//! Scripted input sequences for deterministic scenario tests.

use crate::config::GameConfig;
use crate::level::GROUND_HEIGHT;
use crate::player::PlayerInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default)]
    pub config: GameConfig,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<PlayerInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(PlayerInput {
                    left: frame.left,
                    right: frame.right,
                    jump: frame.jump,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.dt.is_nan() || replay.dt < 0.0 {
        return Err("Replay validation failed: dt must be >= 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    validate_config(&replay.config)
}

/// Sizes that would build degenerate rects for the level or the player.
fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.player_width <= 0 || config.player_height <= 0 {
        return Err(format!(
            "Replay validation failed: player size must be positive, got {}x{}",
            config.player_width, config.player_height
        ));
    }
    if config.width == 0 || config.height <= GROUND_HEIGHT as u32 {
        return Err(format!(
            "Replay validation failed: field {}x{} cannot hold the {GROUND_HEIGHT} px ground",
            config.width, config.height
        ));
    }
    Ok(())
}

const fn default_dt() -> f64 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::build_level;
    use crate::player::{Player, StepEvents};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "hop_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn load_fixture(name_hint: &str, json: &str) -> ReplaySequence {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    fn run(replay: &ReplaySequence) -> (Player, Vec<StepEvents>) {
        let platforms = build_level(&replay.config);
        let mut player = Player::spawn(&replay.config);
        let events = replay
            .expanded_inputs()
            .into_iter()
            .map(|input| player.update(input, replay.dt, &platforms, &replay.config))
            .collect();
        (player, events)
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let replay = load_fixture(
            "parse",
            r#"{
              "frames": [
                { "right": true, "repeat": 3 },
                { "jump": true }
              ]
            }"#,
        );
        assert_eq!(replay.dt, 1.0 / 60.0);
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].right && !expanded[0].jump);
        assert!(expanded[3].jump);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_negative_dt() {
        let path = temp_file_path("negative_dt");
        fs::write(&path, r#"{ "dt": -0.1, "frames": [{}] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("negative dt should fail");
        assert!(err.contains("dt must be >= 0"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_degenerate_sizes() {
        let cases = [
            (r#"{ "player_width": 0 }"#, "player size must be positive"),
            (r#"{ "player_height": -40 }"#, "player size must be positive"),
            (r#"{ "width": 0 }"#, "cannot hold"),
            (r#"{ "height": 50 }"#, "cannot hold"),
        ];
        for (config, expected) in cases {
            let path = temp_file_path("degenerate");
            let json = format!(r#"{{ "config": {config}, "frames": [{{}}] }}"#);
            fs::write(&path, json).expect("write replay file");
            let err = load_replay_from_path(&path).expect_err("degenerate config should fail");
            assert!(err.contains(expected), "{config}: {err}");
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn jump_across_stairs_is_deterministic() {
        let json = r#"{
          "frames": [
            { "repeat": 40 },
            { "right": true, "repeat": 20 },
            { "right": true, "jump": true, "repeat": 1 },
            { "right": true, "repeat": 60 },
            { "repeat": 30 }
          ]
        }"#;
        let replay = load_fixture("stairs", json);
        let (run_a, events_a) = run(&replay);
        let (run_b, events_b) = run(&replay);

        assert_eq!(events_a, events_b);
        assert_eq!(run_a.position, run_b.position);
        assert_eq!(run_a.velocity, run_b.velocity);
        assert_eq!(run_a.on_ground, run_b.on_ground);

        assert_eq!(events_a.iter().filter(|e| e.jumped).count(), 1);
        assert!(run_a.on_ground);
        assert_eq!(run_a.velocity.y, 0.0);
    }

    #[test]
    fn config_override_changes_the_fall() {
        let replay = load_fixture(
            "low_gravity",
            r#"{
              "config": { "gravity": 500.0, "spawn_x": 10, "spawn_y": 100 },
              "frames": [{ "repeat": 10 }]
            }"#,
        );
        let (player, _) = run(&replay);
        assert!((player.velocity.y - 500.0 * 10.0 / 60.0).abs() < 1e-2);
        assert!(!player.on_ground);
    }
}
