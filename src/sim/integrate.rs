//! Kinematic integration under friction
//!
//! Friction is continuous exponential decay: over a normalized step `dt` the
//! velocity is scaled by `friction^dt`, so one step of 1.0 decays exactly as
//! much as two steps of 0.5.

use super::body::{Body, Pin};
use super::tuning::Tuning;

/// Advance a free body by `dt` normalized ticks
pub fn integrate(body: Body, dt: f32, friction: f32, rotation_gain: f32) -> Body {
    let vel = body.vel * friction.powf(dt);
    let pos = body.pos + vel * dt;
    let rotation = body.rotation + vel.length() * rotation_gain * dt;

    Body {
        pos,
        vel,
        rotation,
        ..body
    }
}

/// Advance the ball
#[inline]
pub fn integrate_ball(ball: Body, dt: f32, tuning: &Tuning) -> Body {
    integrate(ball, dt, tuning.friction, tuning.ball_rotation_gain)
}

/// Advance a pin. Standing pins are fixed obstacles and stay put.
pub fn integrate_pin(pin: Pin, dt: f32, tuning: &Tuning) -> Pin {
    if pin.is_standing() {
        return pin;
    }
    Pin {
        body: integrate(pin.body, dt, tuning.friction, tuning.pin_rotation_gain),
        ..pin
    }
}
