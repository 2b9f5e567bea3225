//! Whole-pixel rectangles and the axis-separated resolvers used by the
//! player's physics step.
//!
//! Resolution is **axis-separable**: the caller moves along X and resolves X
//! overlaps, then moves along Y and resolves Y overlaps. Each resolver walks
//! the platform list in order and every overlapping platform snaps the body
//! in turn, so when several platforms overlap at once the last one tested
//! wins. Platforms that overlap or abut each other therefore resolve in list
//! order with no further guarantee.

/// Axis-aligned box in screen pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        debug_assert!(w > 0 && h > 0, "rect must have positive size ({w}x{h})");
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Strict overlap: shared edges do not count and empty rects never overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalResolution {
    pub body: Rect,
    /// At least one platform overlapped, so the caller must resync its
    /// floating position from `body`.
    pub touched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalResolution {
    pub body: Rect,
    pub velocity_y: f64,
    pub touched: bool,
    /// Came down onto a platform top.
    pub landed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsClamp {
    pub body: Rect,
    pub hit_left: bool,
    pub hit_right: bool,
    pub hit_top: bool,
    pub hit_bottom: bool,
}

/// Push `body` out of every overlapping platform along X. The push direction
/// comes from the sign of `velocity_x`; with zero velocity nothing moves.
/// Velocity is never changed here.
pub fn resolve_horizontal(body: Rect, velocity_x: f64, platforms: &[Rect]) -> HorizontalResolution {
    let mut result = HorizontalResolution {
        body,
        touched: false,
    };

    for platform in platforms {
        if !result.body.overlaps(platform) {
            continue;
        }
        result.touched = true;
        if velocity_x > 0.0 {
            result.body.set_right(platform.left());
        } else if velocity_x < 0.0 {
            result.body.set_left(platform.right());
        }
    }

    result
}

/// Push `body` out of every overlapping platform along Y. Falling bodies land
/// on the platform top, rising bodies stop under its bottom; either way the
/// vertical velocity drops to zero, so later overlaps in the same pass only
/// resync position.
pub fn resolve_vertical(body: Rect, velocity_y: f64, platforms: &[Rect]) -> VerticalResolution {
    let mut result = VerticalResolution {
        body,
        velocity_y,
        touched: false,
        landed: false,
    };

    for platform in platforms {
        if !result.body.overlaps(platform) {
            continue;
        }
        result.touched = true;
        if result.velocity_y > 0.0 {
            result.body.set_bottom(platform.top());
            result.velocity_y = 0.0;
            result.landed = true;
        } else if result.velocity_y < 0.0 {
            result.body.set_top(platform.bottom());
            result.velocity_y = 0.0;
        }
    }

    result
}

/// Keep `body` inside `[0, width] x [0, height]`.
pub fn clamp_to_bounds(body: Rect, width: i32, height: i32) -> BoundsClamp {
    let mut result = BoundsClamp {
        body,
        hit_left: false,
        hit_right: false,
        hit_top: false,
        hit_bottom: false,
    };

    if result.body.left() < 0 {
        result.body.set_left(0);
        result.hit_left = true;
    }
    if result.body.right() > width {
        result.body.set_right(width);
        result.hit_right = true;
    }
    if result.body.top() < 0 {
        result.body.set_top(0);
        result.hit_top = true;
    }
    if result.body.bottom() > height {
        result.body.set_bottom(height);
        result.hit_bottom = true;
    }

    result
}
