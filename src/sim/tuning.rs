//! Data-driven physics and game balance
//!
//! Every number the simulation depends on lives here, so tests can pin down
//! behavior with overridden values (e.g. zero friction). Loaded from JSON;
//! omitted fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::formation::PIN_COUNT;
use crate::consts::*;
use crate::error::{Error, Result};

/// Largest per-pin score for which a full rack still fits a round's `u32` score
pub const MAX_POINTS_PER_PIN: u32 = u32::MAX / PIN_COUNT as u32;

/// Simulation tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Kinematics ===
    /// Per-tick velocity retention in (0, 1]; applied as `friction^dt`
    pub friction: f32,
    /// Ball spin per unit of speed
    pub ball_rotation_gain: f32,
    /// Pin spin per unit of speed (pins tumble faster than the ball rolls)
    pub pin_rotation_gain: f32,

    // === Collisions ===
    pub ball_mass: f32,
    pub pin_mass: f32,
    pub ball_pin_restitution: f32,
    pub pin_pin_restitution: f32,
    /// Post-impulse pin speed above which a ball strike knocks it over
    pub ball_pin_fall_speed: f32,
    /// Post-impulse pin speed above which a pin-on-pin hit knocks it over
    pub pin_pin_fall_speed: f32,

    // === Round flow ===
    /// Ball speed below which it counts as stopped
    pub stop_speed: f32,
    /// Grace period after the ball stops, in normalized ticks
    pub settle_ticks: f32,
    /// Outcome message lifetime, in normalized ticks
    pub message_ticks: f32,
    /// Drag length is divided by this to get launch speed
    pub launch_scale: f32,
    pub max_launch_speed: f32,
    pub points_per_pin: u32,
    /// Upper bound on substeps per tick
    pub max_substeps: u32,

    // === Geometry ===
    pub ball_radius: f32,
    pub pin_spacing: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    pub lane_width_ratio: f32,
    pub out_of_bounds_margin: f32,
    pub ball_start: Vec2,
    pub rack_center: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.98,
            ball_rotation_gain: 0.1,
            pin_rotation_gain: 0.2,

            ball_mass: 2.0,
            pin_mass: 0.5,
            ball_pin_restitution: 0.8,
            pin_pin_restitution: 0.6,
            ball_pin_fall_speed: 0.5,
            pin_pin_fall_speed: 0.3,

            stop_speed: 0.1,
            settle_ticks: 120.0, // 2 seconds at 60 Hz
            message_ticks: 120.0,
            launch_scale: 10.0,
            max_launch_speed: 20.0,
            points_per_pin: POINTS_PER_PIN,
            max_substeps: 16,

            ball_radius: BALL_RADIUS,
            pin_spacing: PIN_SPACING,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            lane_width_ratio: LANE_WIDTH_RATIO,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,
            ball_start: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT * BALL_START_Y_RATIO),
            rack_center: Vec2::new(ARENA_WIDTH / 2.0, RACK_CENTER_Y),
        }
    }
}

impl Tuning {
    /// Default tuning with friction disabled
    pub fn frictionless() -> Self {
        Self {
            friction: 1.0,
            ..Self::default()
        }
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)
            .inspect_err(|e| log::warn!("Rejected tuning in {}: {e}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Left and right lane edges (x)
    pub fn lane_bounds(&self) -> (f32, f32) {
        let lane_width = self.arena_width * self.lane_width_ratio;
        let left = (self.arena_width - lane_width) / 2.0;
        (left, left + lane_width)
    }

    /// True while the ball center is on the lane and within the vertical margin
    pub fn in_play(&self, pos: Vec2) -> bool {
        let (left, right) = self.lane_bounds();
        pos.x >= left
            && pos.x <= right
            && pos.y >= -self.out_of_bounds_margin
            && pos.y <= self.arena_height + self.out_of_bounds_margin
    }

    /// Check every value is in its physical range
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, message: impl Into<String>) -> Error {
            Error::InvalidConfig {
                field,
                message: message.into(),
            }
        }

        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction", format!("{} not in (0, 1]", self.friction)));
        }

        let positive = [
            ("ball_mass", self.ball_mass),
            ("pin_mass", self.pin_mass),
            ("ball_radius", self.ball_radius),
            ("pin_spacing", self.pin_spacing),
            ("launch_scale", self.launch_scale),
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("{value} must be > 0")));
            }
        }

        for (field, value) in [
            ("ball_pin_restitution", self.ball_pin_restitution),
            ("pin_pin_restitution", self.pin_pin_restitution),
            ("lane_width_ratio", self.lane_width_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} not in [0, 1]")));
            }
        }

        let non_negative = [
            ("ball_rotation_gain", self.ball_rotation_gain),
            ("pin_rotation_gain", self.pin_rotation_gain),
            ("ball_pin_fall_speed", self.ball_pin_fall_speed),
            ("pin_pin_fall_speed", self.pin_pin_fall_speed),
            ("stop_speed", self.stop_speed),
            ("settle_ticks", self.settle_ticks),
            ("message_ticks", self.message_ticks),
            ("max_launch_speed", self.max_launch_speed),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(field, format!("{value} must be >= 0")));
            }
        }

        if self.points_per_pin > MAX_POINTS_PER_PIN {
            return Err(invalid(
                "points_per_pin",
                format!("{} exceeds {MAX_POINTS_PER_PIN}", self.points_per_pin),
            ));
        }

        if self.max_substeps == 0 {
            return Err(invalid("max_substeps", "must be at least 1"));
        }

        Ok(())
    }
}
