//! Circular bodies: the ball and the pins
//!
//! Ball and pins share the same kinematic core (`Body`); a pin adds the
//! one-way `fallen` flag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shared kinematic state of any circular body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position (arena units)
    pub pos: Vec2,
    /// Velocity (arena units per reference tick)
    pub vel: Vec2,
    /// Collision radius
    pub radius: f32,
    /// Visual spin angle (radians). Cosmetic only, never read by collision code.
    pub rotation: f32,
}

impl Body {
    /// A body at rest
    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kinetic energy for a given assigned mass
    #[inline]
    pub fn kinetic_energy(&self, mass: f32) -> f32 {
        0.5 * mass * self.vel.length_squared()
    }
}

/// The bowling ball is a plain body
pub type Ball = Body;

/// A pin entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub body: Body,
    /// Knocked over. Only ever goes false -> true within a round.
    pub fallen: bool,
}

impl Pin {
    pub fn standing(pos: Vec2, radius: f32) -> Self {
        Self {
            body: Body::at_rest(pos, radius),
            fallen: false,
        }
    }

    #[inline]
    pub fn is_standing(&self) -> bool {
        !self.fallen
    }

    /// Apply the outcome of an impulse: latch `fallen` if the pin is moving
    /// faster than `threshold`, otherwise it absorbs the hit and stays put
    #[inline]
    pub(crate) fn take_hit(&mut self, threshold: f32) {
        self.fallen = self.fallen || self.body.speed() > threshold;
        if !self.fallen {
            self.body.vel = Vec2::ZERO;
        }
    }
}
