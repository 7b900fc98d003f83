//! Collision detection and impulse response for circular bodies
//!
//! Response is inverse-mass weighted along the contact normal:
//! overlapping bodies are first pushed apart (heavier body moves less),
//! then, if they are still approaching, an impulse scaled by restitution
//! is exchanged.

use glam::Vec2;

use super::body::{Body, Pin};
use super::tuning::Tuning;

/// Centers closer than this are treated as coincident (no usable normal)
const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Overlap test between two circles
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// Mass and bounciness of one colliding pair
#[derive(Debug, Clone, Copy)]
pub struct ImpulseParams {
    pub mass_a: f32,
    pub mass_b: f32,
    pub restitution: f32,
}

/// Result of resolving a pair
#[derive(Debug, Clone, Copy)]
pub struct PairResolution {
    pub a: Body,
    pub b: Body,
    /// An impulse was exchanged (bodies were approaching)
    pub impulse_applied: bool,
}

/// Resolve contact between two bodies
///
/// Coincident centers come back unchanged. Separating bodies are only
/// de-penetrated, never given an impulse.
pub fn resolve_pair(a: Body, b: Body, params: ImpulseParams) -> PairResolution {
    let unchanged = PairResolution {
        a,
        b,
        impulse_applied: false,
    };

    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance < DEGENERATE_DISTANCE {
        return unchanged;
    }
    let normal = delta / distance;

    let inv_a = 1.0 / params.mass_a;
    let inv_b = 1.0 / params.mass_b;
    let inv_total = inv_a + inv_b;

    let (mut a, mut b) = (a, b);

    // Positional correction
    let penetration = a.radius + b.radius - distance;
    if penetration > 0.0 {
        a.pos -= normal * (penetration * inv_a / inv_total);
        b.pos += normal * (penetration * inv_b / inv_total);
    }

    // Closing speed along the normal; <= 0 means separating or resting
    let approach = (a.vel - b.vel).dot(normal);
    if approach <= 0.0 {
        return PairResolution {
            a,
            b,
            impulse_applied: false,
        };
    }

    let impulse = (1.0 + params.restitution) * approach / inv_total;
    a.vel -= normal * (impulse * inv_a);
    b.vel += normal * (impulse * inv_b);

    PairResolution {
        a,
        b,
        impulse_applied: true,
    }
}

/// Outcome of a ball striking a pin
#[derive(Debug, Clone, Copy)]
pub struct BallPinHit {
    pub ball: Body,
    pub pin: Pin,
    /// The ball actually transferred momentum to the pin
    pub impact: bool,
}

/// Resolve ball vs pin (heavy ball, light pin)
pub fn resolve_ball_pin(ball: Body, pin: Pin, tuning: &Tuning) -> BallPinHit {
    let params = ImpulseParams {
        mass_a: tuning.ball_mass,
        mass_b: tuning.pin_mass,
        restitution: tuning.ball_pin_restitution,
    };
    let res = resolve_pair(ball, pin.body, params);

    let mut pin = Pin {
        body: res.b,
        ..pin
    };
    if res.impulse_applied {
        pin.take_hit(tuning.ball_pin_fall_speed);
    }

    BallPinHit {
        ball: res.a,
        pin,
        impact: res.impulse_applied,
    }
}

/// Resolve pin vs pin (equal masses, softer bounce, lower fall threshold)
pub fn resolve_pin_pin(a: Pin, b: Pin, tuning: &Tuning) -> (Pin, Pin) {
    let params = ImpulseParams {
        mass_a: tuning.pin_mass,
        mass_b: tuning.pin_mass,
        restitution: tuning.pin_pin_restitution,
    };
    let res = resolve_pair(a.body, b.body, params);

    let mut a = Pin { body: res.a, ..a };
    let mut b = Pin { body: res.b, ..b };
    if res.impulse_applied {
        a.take_hit(tuning.pin_pin_fall_speed);
        b.take_hit(tuning.pin_pin_fall_speed);
    }
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Body {
        Body {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius,
            rotation: 0.0,
        }
    }

    fn pin_at(x: f32, y: f32) -> Pin {
        Pin::standing(Vec2::new(x, y), 12.0)
    }

    #[test]
    fn test_overlap() {
        let a = body(0.0, 0.0, 0.0, 0.0, 20.0);
        assert!(overlaps(&a, &body(31.0, 0.0, 0.0, 0.0, 12.0)));
        assert!(!overlaps(&a, &body(32.0, 0.0, 0.0, 0.0, 12.0)));
        // Coincident centers still overlap; the resolver guards the division
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_coincident_centers_unchanged() {
        let tuning = Tuning::default();
        let ball = body(100.0, 100.0, 0.0, -10.0, 20.0);
        let pin = Pin {
            body: body(100.0, 100.0, 0.0, 0.0, 12.0),
            fallen: false,
        };
        let hit = resolve_ball_pin(ball, pin, &tuning);
        assert_eq!(hit.ball, ball);
        assert_eq!(hit.pin, pin);
        assert!(!hit.impact);
    }

    #[test]
    fn test_head_on_strike_knocks_pin() {
        let tuning = Tuning::default();
        let ball = body(400.0, 180.0, 0.0, -20.0, 20.0);
        let pin = pin_at(400.0, 150.0);
        let hit = resolve_ball_pin(ball, pin, &tuning);
        assert!(hit.impact);
        assert!(hit.pin.fallen);

        // Inverse-mass impulse: pin gets (1+e) * m_b / (m_b + m_p) * v
        let expected_pin = (1.0 + 0.8) * 2.0 / 2.5 * 20.0;
        assert!((hit.pin.body.vel.y - (-expected_pin)).abs() < 1e-3);
        // Heavy ball keeps rolling forward
        assert!(hit.ball.vel.y < 0.0);
        assert!(hit.ball.vel.y > -20.0);
        assert!(hit.ball.vel.x.abs() < 1e-5);
    }

    #[test]
    fn test_positional_correction_splits_by_mass() {
        let tuning = Tuning::default();
        // 2 units of penetration; ball (mass 2) takes 1/5, pin (mass 0.5) takes 4/5
        let ball = body(0.0, 0.0, 0.0, 0.0, 20.0);
        let pin = Pin {
            body: body(30.0, 0.0, 0.0, 0.0, 12.0),
            fallen: false,
        };
        let hit = resolve_ball_pin(ball, pin, &tuning);
        assert!((hit.ball.pos.x - (-0.4)).abs() < 1e-4);
        assert!((hit.pin.body.pos.x - 31.6).abs() < 1e-4);
        assert!((hit.ball.pos.distance(hit.pin.body.pos) - 32.0).abs() < 1e-4);
        // Both at rest: no impulse, pin stays up
        assert!(!hit.impact);
        assert!(!hit.pin.fallen);
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let tuning = Tuning::default();
        let ball = body(0.0, 0.0, -5.0, 0.0, 20.0);
        let pin = Pin {
            body: body(30.0, 0.0, 5.0, 0.0, 12.0),
            fallen: false,
        };
        let hit = resolve_ball_pin(ball, pin, &tuning);
        assert!(!hit.impact);
        assert_eq!(hit.ball.vel, ball.vel);
        assert_eq!(hit.pin.body.vel, pin.body.vel);
        assert!(!hit.pin.fallen);
    }

    #[test]
    fn test_gentle_nudge_leaves_pin_standing() {
        let tuning = Tuning::default();
        let ball = body(0.0, 0.0, 0.1, 0.0, 20.0);
        let hit = resolve_ball_pin(ball, pin_at(31.0, 0.0), &tuning);
        assert!(hit.impact);
        assert!(!hit.pin.fallen);
        // A standing pin absorbs the hit instead of creeping
        assert_eq!(hit.pin.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_gently_hit_pin_stays_put_across_ticks() {
        use crate::sim::integrate::integrate_pin;

        let tuning = Tuning::default();
        let ball = body(400.0, 181.0, 0.0, -0.15, 20.0);
        let mut pin = resolve_ball_pin(ball, pin_at(400.0, 150.0), &tuning).pin;
        assert!(!pin.fallen);
        let rest = pin.body.pos;
        for _ in 0..1000 {
            pin = integrate_pin(pin, 1.0, &tuning);
        }
        assert_eq!(pin.body.vel, Vec2::ZERO);
        assert_eq!(pin.body.pos, rest);
    }

    #[test]
    fn test_standing_pin_hit_by_slow_pin_keeps_no_velocity() {
        let tuning = Tuning::default();
        let mut a = pin_at(0.0, 0.0);
        a.body.vel = Vec2::new(0.2, 0.0);
        a.fallen = true;
        let (a, b) = resolve_pin_pin(a, pin_at(23.0, 0.0), &tuning);
        assert!(a.fallen);
        assert!(!b.fallen);
        assert_eq!(b.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_inelastic_contact_removes_normal_motion() {
        let params = ImpulseParams {
            mass_a: 2.0,
            mass_b: 0.5,
            restitution: 0.0,
        };
        let a = body(0.0, 0.0, 6.0, 3.0, 20.0);
        let b = body(30.0, 0.0, -2.0, 1.0, 12.0);
        let res = resolve_pair(a, b, params);
        assert!(res.impulse_applied);
        // Closing speed along the normal (x) is gone; tangential motion is untouched
        assert!((res.a.vel.x - res.b.vel.x).abs() < 1e-5);
        assert_eq!(res.a.vel.y, 3.0);
        assert_eq!(res.b.vel.y, 1.0);
        // Momentum along the normal is conserved: 2*6 + 0.5*(-2) = 11 over 2.5
        assert!((res.a.vel.x - 4.4).abs() < 1e-5);

        let before = a.kinetic_energy(2.0) + b.kinetic_energy(0.5);
        let after = res.a.kinetic_energy(2.0) + res.b.kinetic_energy(0.5);
        assert!(after < before);
    }

    #[test]
    fn test_pin_pin_equal_mass_transfer() {
        let tuning = Tuning::default();
        let mut a = pin_at(0.0, 0.0);
        a.body.vel = Vec2::new(10.0, 0.0);
        a.fallen = true;
        let b = pin_at(23.0, 0.0);

        let (a, b) = resolve_pin_pin(a, b, &tuning);
        // Equal masses, e = 0.6: a keeps 0.2 of its speed, b gets 0.8
        assert!((a.body.vel.x - 2.0).abs() < 1e-4);
        assert!((b.body.vel.x - 8.0).abs() < 1e-4);
        assert!(a.fallen);
        assert!(b.fallen);
    }

    fn arb_body(max_radius: f32) -> impl Strategy<Value = Body> {
        (
            -50.0f32..50.0,
            -50.0f32..50.0,
            -25.0f32..25.0,
            -25.0f32..25.0,
            1.0f32..max_radius,
        )
            .prop_map(|(x, y, vx, vy, r)| body(x, y, vx, vy, r))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_body(30.0), b in arb_body(30.0)) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn ball_pin_never_creates_energy(ball in arb_body(25.0), pin in arb_body(15.0)) {
            let tuning = Tuning::default();
            let before = ball.kinetic_energy(tuning.ball_mass) + pin.kinetic_energy(tuning.pin_mass);
            let hit = resolve_ball_pin(ball, Pin { body: pin, fallen: false }, &tuning);
            let after = hit.ball.kinetic_energy(tuning.ball_mass)
                + hit.pin.body.kinetic_energy(tuning.pin_mass);
            prop_assert!(after <= before * (1.0 + 1e-4) + 1e-3);
        }

        #[test]
        fn pin_pin_never_creates_energy(a in arb_body(15.0), b in arb_body(15.0)) {
            let tuning = Tuning::default();
            let m = tuning.pin_mass;
            let before = a.kinetic_energy(m) + b.kinetic_energy(m);
            let (ra, rb) = resolve_pin_pin(
                Pin { body: a, fallen: false },
                Pin { body: b, fallen: false },
                &tuning,
            );
            let after = ra.body.kinetic_energy(m) + rb.body.kinetic_energy(m);
            prop_assert!(after <= before * (1.0 + 1e-4) + 1e-3);
        }

        #[test]
        fn normal_speed_scales_by_restitution(
            a in arb_body(25.0),
            b in arb_body(15.0),
            restitution in 0.0f32..=1.0,
        ) {
            let delta = b.pos - a.pos;
            prop_assume!(delta.length() > 1e-3);
            let normal = delta.normalize();
            let approach = (a.vel - b.vel).dot(normal);
            prop_assume!(approach > 0.0);

            let params = ImpulseParams { mass_a: 2.0, mass_b: 0.5, restitution };
            let res = resolve_pair(a, b, params);
            prop_assert!(res.impulse_applied);
            let separation = (res.b.vel - res.a.vel).dot(normal);
            prop_assert!((separation - restitution * approach).abs() < 1e-3 * (1.0 + approach));
        }

        #[test]
        fn fallen_never_reverts(
            ball in arb_body(25.0),
            others in proptest::collection::vec(arb_body(15.0), 1..8),
            start in arb_body(15.0),
        ) {
            let tuning = Tuning::default();
            let mut pin = Pin { body: start, fallen: true };
            pin = resolve_ball_pin(ball, pin, &tuning).pin;
            prop_assert!(pin.fallen);
            for other in others {
                let (p, _) = resolve_pin_pin(pin, Pin { body: other, fallen: false }, &tuning);
                pin = p;
                prop_assert!(pin.fallen);
            }
        }
    }
}
