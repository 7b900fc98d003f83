//! Melon Bowl - A watermelon bowling mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, pin rack, round state machine)
//! - `audio`: Audio cue interface (fire-and-forget notifications)
//! - `highscores`: Local points ledger
//! - `settings`: Player preferences
//! - `platform`: Browser bindings

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{AudioCues, NullCues, SoundEffect};
pub use error::{Error, Result};
pub use highscores::{HighScores, ScoreSink};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration (60 Hz). One frame of this length is a normalized step of 1.0.
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest normalized step a single frame may advance (a stalled tab must not teleport pins)
    pub const MAX_NORMALIZED_DT: f32 = 2.0;

    /// Arena dimensions (canvas units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Lane occupies this fraction of the arena width, centered
    pub const LANE_WIDTH_RATIO: f32 = 0.4;
    /// How far past the top/bottom edge the ball may travel before it counts as gone
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    /// Ball launch spot, as a fraction of arena height
    pub const BALL_START_Y_RATIO: f32 = 0.9;

    /// Pin rack defaults
    pub const PIN_SPACING: f32 = 40.0;
    pub const RACK_CENTER_Y: f32 = 150.0;
    pub const POINTS_PER_PIN: u32 = 10;
}

/// Convert wall-clock frame time to a normalized step (1.0 at the reference frame rate)
#[inline]
pub fn normalized_dt(elapsed_ms: f64) -> f32 {
    if !(elapsed_ms > 0.0) {
        return 0.0;
    }
    ((elapsed_ms / consts::REFERENCE_FRAME_MS) as f32).min(consts::MAX_NORMALIZED_DT)
}
