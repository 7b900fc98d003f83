//! Ten-pin rack formation
//!
//! Four rows of 1-2-3-4 pins in equilateral-triangle packing. The head pin
//! sits at the rack center facing the bowler (+y); each further row is set
//! back toward -y.
//!
//! ```text
//!   7   8   9   10     <- row 4 (back)
//!     4   5   6
//!       2   3
//!         1            <- head pin, at center
//!
//!         o            <- ball
//! ```

use glam::Vec2;

use super::body::Pin;

/// Number of pins in a rack
pub const PIN_COUNT: usize = 10;
/// Number of rows in a rack
pub const ROW_COUNT: usize = 4;
/// Row depth as a fraction of spacing (sin 60°)
pub const ROW_DEPTH_RATIO: f32 = 0.866;
/// Pin radius as a fraction of spacing
pub const PIN_RADIUS_RATIO: f32 = 0.3;

/// Build a fresh rack of standing pins, ordered front row first, left to right
pub fn build_rack(center: Vec2, spacing: f32) -> [Pin; PIN_COUNT] {
    let radius = spacing * PIN_RADIUS_RATIO;
    let row_depth = spacing * ROW_DEPTH_RATIO;

    let mut pins = [Pin::standing(center, radius); PIN_COUNT];
    let mut slot = 0;
    for row in 0..ROW_COUNT {
        let y = center.y - row_depth * row as f32;
        // Row n holds n + 1 pins, centered on the head pin's column
        let half_width = row as f32 / 2.0;
        for col in 0..=row {
            let x = center.x + (col as f32 - half_width) * spacing;
            pins[slot] = Pin::standing(Vec2::new(x, y), radius);
            slot += 1;
        }
    }
    pins
}

/// Row index (0 = head pin) of a rack slot
pub fn row_of(slot: usize) -> usize {
    match slot {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        _ => 3,
    }
}
