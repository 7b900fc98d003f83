//! Game state and round lifecycle
//!
//! Everything a renderer needs to draw a frame lives here, and all of it is
//! owned by the current round. Input is only honored while aiming.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Ball, Body, Pin};
use super::formation::{PIN_COUNT, build_rack};
use super::scoring::RoundScore;
use super::tuning::Tuning;

/// Drags shorter than this are treated as a tap, not a throw
const MIN_DRAG_LENGTH: f32 = 1e-3;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at the foul line, waiting for a drag
    Aiming,
    /// Ball in motion
    Rolling,
    /// Ball done; pins get a grace period to stop moving
    Settling,
    /// Round scored, waiting for reset
    Finished,
}

/// An in-progress drag gesture (arena coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    pub start: Vec2,
    pub current: Vec2,
}

impl Aim {
    #[inline]
    pub fn drag(&self) -> Vec2 {
        self.current - self.start
    }

    /// Launch velocity for this drag, or `None` for a zero-length drag
    pub fn launch_velocity(&self, tuning: &Tuning) -> Option<Vec2> {
        let drag = self.drag();
        let length = drag.length();
        if length < MIN_DRAG_LENGTH {
            return None;
        }
        let speed = (length / tuning.launch_scale).clamp(0.0, tuning.max_launch_speed);
        if speed <= 0.0 {
            return None;
        }
        Some(drag / length * speed)
    }
}

/// Timed on-screen message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    /// Normalized ticks left before it disappears
    pub remaining: f32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub ball: Ball,
    pub pins: [Pin; PIN_COUNT],
    /// Drag in progress (aiming only)
    pub aim: Option<Aim>,
    /// False once the ball has left the lane; it then no longer touches pins
    pub ball_in_play: bool,
    /// Normalized ticks left in the settling grace period
    pub settle_remaining: f32,
    /// Simulated normalized ticks since launch
    pub round_time: f32,
    /// Running total across rounds
    pub score: u64,
    pub rounds_played: u32,
    /// Score of the most recently finished round
    pub last_result: Option<RoundScore>,
    pub message: Option<Message>,
}

impl GameState {
    /// Create a new game with a fresh rack and the ball at the foul line
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Aiming,
            ball: Self::ball_at_start(tuning),
            pins: build_rack(tuning.rack_center, tuning.pin_spacing),
            aim: None,
            ball_in_play: true,
            settle_remaining: 0.0,
            round_time: 0.0,
            score: 0,
            rounds_played: 0,
            last_result: None,
            message: None,
        }
    }

    fn ball_at_start(tuning: &Tuning) -> Ball {
        Body::at_rest(tuning.ball_start, tuning.ball_radius)
    }

    /// Re-rack, return the ball and go back to aiming. Running score is kept.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.ball = Self::ball_at_start(tuning);
        self.pins = build_rack(tuning.rack_center, tuning.pin_spacing);
        self.aim = None;
        self.ball_in_play = true;
        self.settle_remaining = 0.0;
        self.round_time = 0.0;
        self.message = None;
        self.phase = GamePhase::Aiming;
        log::debug!("Round reset ({} played, score {})", self.rounds_played, self.score);
    }

    /// Begin a drag. Ignored outside aiming.
    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        if self.phase != GamePhase::Aiming {
            log::warn!("Ignoring pointer down while {:?}", self.phase);
            return false;
        }
        self.aim = Some(Aim {
            start: pos,
            current: pos,
        });
        true
    }

    /// Update the drag. Ignored outside aiming or without a drag.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.phase != GamePhase::Aiming {
            return;
        }
        if let Some(aim) = self.aim.as_mut() {
            aim.current = pos;
        }
    }

    /// Abandon the drag without throwing
    pub fn pointer_cancel(&mut self) {
        if self.phase == GamePhase::Aiming {
            self.aim = None;
        }
    }

    /// Finish the drag and launch the ball
    ///
    /// Returns the launch velocity, or `None` if nothing was thrown (not
    /// aiming, no drag, or a zero-length drag). A rejected throw stays in
    /// aiming with the drag cleared.
    pub fn pointer_up(&mut self, tuning: &Tuning) -> Option<Vec2> {
        if self.phase != GamePhase::Aiming {
            return None;
        }
        let aim = self.aim.take()?;
        let Some(vel) = aim.launch_velocity(tuning) else {
            log::warn!("Ignoring zero-length drag");
            return None;
        };

        self.ball.vel = vel;
        self.round_time = 0.0;
        self.phase = GamePhase::Rolling;
        log::debug!("Launch: vel=({:.2}, {:.2}) speed={:.2}", vel.x, vel.y, vel.length());
        Some(vel)
    }

    /// Aim line for the renderer: from the ball toward where the drag points
    pub fn aim_line(&self) -> Option<(Vec2, Vec2)> {
        if self.phase != GamePhase::Aiming {
            return None;
        }
        self.aim.map(|aim| (self.ball.pos, self.ball.pos + aim.drag()))
    }

    pub fn standing_count(&self) -> usize {
        self.pins.iter().filter(|p| p.is_standing()).count()
    }

    pub fn fallen_count(&self) -> usize {
        PIN_COUNT - self.standing_count()
    }

    /// Show a message for `ticks` normalized ticks
    pub fn show_message(&mut self, text: String, ticks: f32) {
        self.message = Some(Message {
            text,
            remaining: ticks,
        });
    }

    /// Age the message, dropping it when it expires
    pub fn decay_message(&mut self, dt: f32) {
        if let Some(message) = self.message.as_mut() {
            message.remaining -= dt;
            if message.remaining <= 0.0 {
                self.message = None;
            }
        }
    }
}
