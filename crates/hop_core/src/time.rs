//! Frame pacing for a variable-timestep loop.
//!
//! `tick()` blocks until the target frame interval has elapsed since the
//! previous tick, then reports the real elapsed time as `dt`. There is no
//! accumulator and no cap: a slow frame simply produces a large `dt`.

use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;
const SLOW_FRAME_FACTOR: u32 = 4;

pub struct FrameClock {
    target_interval: Option<Duration>,
    last_instant: Instant,
    pub dt: f64,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    /// A `target_fps` of zero disables pacing.
    pub fn new(target_fps: u32) -> Self {
        let target_interval =
            (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64));
        let nominal_dt = if target_fps > 0 {
            1.0 / target_fps as f64
        } else {
            1.0 / 60.0
        };
        Self {
            target_interval,
            last_instant: Instant::now(),
            dt: 0.0,
            frame_count: 0,
            fps_samples: [nominal_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / nominal_dt,
            smoothed_frame_time_ms: nominal_dt * 1000.0,
        }
    }

    /// Restart the interval from now. Called once start-up work is done so it
    /// does not show up as the first frame's dt.
    pub fn reset(&mut self) {
        self.last_instant = Instant::now();
    }

    /// Wait for the next frame slot and return the elapsed time in seconds.
    pub fn tick(&mut self) -> f64 {
        if let Some(interval) = self.target_interval {
            let deadline = self.last_instant + interval;
            let now = Instant::now();
            if now < deadline {
                std::thread::sleep(deadline - now);
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant);
        self.last_instant = now;

        if let Some(interval) = self.target_interval {
            if elapsed > interval * SLOW_FRAME_FACTOR {
                log::warn!(
                    "Frame took {:.1}ms (target {:.1}ms), dt is not capped",
                    elapsed.as_secs_f64() * 1000.0,
                    interval.as_secs_f64() * 1000.0
                );
            }
        }

        let dt = Self::dt_from_elapsed(elapsed);
        self.record_frame(dt);
        dt
    }

    /// Whole elapsed milliseconds, expressed in seconds.
    pub fn dt_from_elapsed(elapsed: Duration) -> f64 {
        elapsed.as_millis() as f64 / 1000.0
    }

    pub fn record_frame(&mut self, dt: f64) {
        self.dt = dt;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}
