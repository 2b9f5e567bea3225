use crate::collision::Rect;
use crate::config::GameConfig;

pub const GROUND_HEIGHT: i32 = 50;

/// Platforms as `(x, distance of top edge above the field bottom, w, h)`.
const PLATFORMS: [(i32, i32, i32, i32); 6] = [
    (80, 140, 180, 20),
    (300, 220, 180, 20),
    (540, 300, 160, 20),
    (760, 220, 160, 20),
    (880, 140, 80, 20),
    (360, 120, 160, 20),
];

/// The fixed level: a full-width ground strip followed by six staggered
/// platforms, in collision order.
pub fn build_level(config: &GameConfig) -> Vec<Rect> {
    let width = config.width as i32;
    let height = config.height as i32;

    let mut platforms = Vec::with_capacity(PLATFORMS.len() + 1);
    platforms.push(Rect::new(0, height - GROUND_HEIGHT, width, GROUND_HEIGHT));
    platforms.extend(
        PLATFORMS
            .iter()
            .map(|&(x, rise, w, h)| Rect::new(x, height - rise, w, h)),
    );
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_ground_plus_six_platforms() {
        let level = build_level(&GameConfig::default());
        assert_eq!(level.len(), 7);
        assert_eq!(level[0], Rect::new(0, 490, 960, 50));
        assert_eq!(
            &level[1..],
            &[
                Rect::new(80, 400, 180, 20),
                Rect::new(300, 320, 180, 20),
                Rect::new(540, 240, 160, 20),
                Rect::new(760, 320, 160, 20),
                Rect::new(880, 400, 80, 20),
                Rect::new(360, 420, 160, 20),
            ]
        );
    }

    #[test]
    fn level_is_deterministic() {
        let config = GameConfig::default();
        assert_eq!(build_level(&config), build_level(&config));
    }

    #[test]
    fn every_platform_fits_inside_the_field() {
        let config = GameConfig::default();
        for p in build_level(&config) {
            assert!(p.w > 0 && p.h > 0);
            assert!(p.left() >= 0 && p.right() <= config.width as i32);
            assert!(p.top() >= 0 && p.bottom() <= config.height as i32);
        }
    }
}
