//! Deterministic simulation module
//!
//! All bowling physics and round logic lives here. This module must be pure and deterministic:
//! - Normalized time steps only (wall-clock time never leaks in)
//! - No randomness
//! - Stable iteration order (rack slot order)
//! - No rendering, audio or platform dependencies beyond the `AudioCues` trait

pub mod body;
pub mod collision;
pub mod formation;
pub mod integrate;
pub mod scoring;
pub mod session;
pub mod state;
pub mod tick;
pub mod tuning;

pub use body::{Ball, Body, Pin};
pub use collision::{BallPinHit, ImpulseParams, overlaps, resolve_ball_pin, resolve_pair, resolve_pin_pin};
pub use formation::{PIN_COUNT, ROW_DEPTH_RATIO, PIN_RADIUS_RATIO, build_rack};
pub use integrate::{integrate, integrate_ball, integrate_pin};
pub use scoring::{Outcome, RoundScore, score_round};
pub use session::Session;
pub use state::{Aim, GamePhase, GameState, Message};
pub use tick::tick;
pub use tuning::{MAX_POINTS_PER_PIN, Tuning};
