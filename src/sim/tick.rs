//! Variable-step simulation tick
//!
//! Advances the round by a normalized time step. Large steps are split into
//! substeps so fast bodies can't tunnel through pins; friction is applied per
//! substep as `friction^(dt/n)`, which keeps the total decay per tick fixed.

use super::collision::{overlaps, resolve_ball_pin, resolve_pin_pin};
use super::formation::row_of;
use super::integrate::{integrate_ball, integrate_pin};
use super::scoring::{RoundScore, score_round};
use super::state::{GamePhase, GameState};
use super::tuning::Tuning;
use crate::audio::{AudioCues, SoundEffect};

/// Fraction of the smallest radius a body may travel in one substep
const MAX_TRAVEL_PER_SUBSTEP: f32 = 0.5;

/// Advance the game by `dt` normalized ticks
///
/// Returns the round's score on the tick the round finishes.
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    dt: f32,
    cues: &mut dyn AudioCues,
) -> Option<RoundScore> {
    if !(dt > 0.0) {
        return None;
    }

    state.decay_message(dt);

    match state.phase {
        GamePhase::Aiming | GamePhase::Finished => None,

        GamePhase::Rolling => {
            step_physics(state, tuning, dt, cues);

            let stopped = state.ball.speed() < tuning.stop_speed;
            if stopped || !state.ball_in_play {
                log::debug!(
                    "Ball done after {:.1} ticks ({}), settling",
                    state.round_time,
                    if stopped { "stopped" } else { "left the lane" }
                );
                state.settle_remaining = tuning.settle_ticks;
                state.phase = GamePhase::Settling;
            }
            None
        }

        GamePhase::Settling => {
            step_physics(state, tuning, dt, cues);

            state.settle_remaining -= dt;
            if state.settle_remaining > 0.0 {
                return None;
            }
            Some(finish_round(state, tuning, cues))
        }
    }
}

/// Score the round and move to `Finished`
fn finish_round(state: &mut GameState, tuning: &Tuning, cues: &mut dyn AudioCues) -> RoundScore {
    let result = score_round(&state.pins, tuning.points_per_pin);

    state.score += u64::from(result.score_delta);
    state.rounds_played += 1;
    state.last_result = Some(result);
    state.settle_remaining = 0.0;
    state.phase = GamePhase::Finished;
    state.show_message(result.outcome.message(), tuning.message_ticks);
    cues.play(result.outcome.cue());

    log::info!(
        "Round {}: {} ({} pins, +{}) total {}",
        state.rounds_played,
        result.outcome.label(),
        result.fallen_count,
        result.score_delta,
        state.score
    );
    result
}

/// Step ball and pins through one tick of physics
fn step_physics(state: &mut GameState, tuning: &Tuning, dt: f32, cues: &mut dyn AudioCues) {
    let substeps = substep_count(state, tuning, dt);
    let step_dt = dt / substeps as f32;

    for _ in 0..substeps {
        // Move free bodies
        state.ball = integrate_ball(state.ball, step_dt, tuning);
        for pin in state.pins.iter_mut() {
            *pin = integrate_pin(*pin, step_dt, tuning);
        }

        if state.ball_in_play && !tuning.in_play(state.ball.pos) {
            state.ball_in_play = false;
            log::debug!(
                "Ball out of play at ({:.1}, {:.1})",
                state.ball.pos.x,
                state.ball.pos.y
            );
        }

        // Ball vs pins
        if state.ball_in_play {
            for (slot, pin) in state.pins.iter_mut().enumerate() {
                if !overlaps(&state.ball, &pin.body) {
                    continue;
                }
                let hit = resolve_ball_pin(state.ball, *pin, tuning);
                state.ball = hit.ball;
                *pin = hit.pin;
                if hit.impact {
                    log::trace!(
                        "Ball hit pin {} in row {} (fallen={})",
                        slot + 1,
                        row_of(slot) + 1,
                        pin.fallen
                    );
                    cues.play(SoundEffect::PinHit);
                }
            }
        }

        // Pin vs pin
        for i in 0..state.pins.len() {
            let (head, tail) = state.pins.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if overlaps(&a.body, &b.body) {
                    (*a, *b) = resolve_pin_pin(*a, *b, tuning);
                }
            }
        }
    }

    state.round_time += dt;
}

/// Substeps needed so nothing moves more than a fraction of the smallest radius
fn substep_count(state: &GameState, tuning: &Tuning, dt: f32) -> u32 {
    let fastest = state
        .pins
        .iter()
        .filter(|p| p.fallen)
        .map(|p| p.body.speed())
        .fold(state.ball.speed(), f32::max);

    let smallest_radius = state
        .pins
        .iter()
        .map(|p| p.body.radius)
        .fold(state.ball.radius, f32::min);

    let max_travel = smallest_radius * MAX_TRAVEL_PER_SUBSTEP;
    let needed = (fastest * dt / max_travel).ceil();
    if !needed.is_finite() || needed < 1.0 {
        return 1;
    }
    (needed as u32).clamp(1, tuning.max_substeps.max(1))
}
