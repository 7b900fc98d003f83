//! A bowling session: game state, tuning and the injected cue sink
//!
//! This is the surface platforms drive: pointer events in, wall-clock
//! frames in, read-only state out.

use glam::Vec2;

use super::scoring::RoundScore;
use super::state::{GamePhase, GameState};
use super::tick::tick;
use super::tuning::Tuning;
use crate::audio::{AudioCues, NullCues, SoundEffect};
use crate::normalized_dt;
use crate::settings::Settings;

/// Forwards cues only while sound is enabled
struct Gate<'a, A: AudioCues> {
    inner: &'a mut A,
    enabled: bool,
}

impl<A: AudioCues> AudioCues for Gate<'_, A> {
    fn play(&mut self, effect: SoundEffect) {
        if self.enabled {
            self.inner.play(effect);
        }
    }
}

fn gate<'a, A: AudioCues>(cues: &'a mut A, settings: &Settings) -> Gate<'a, A> {
    Gate {
        inner: cues,
        enabled: settings.sound_enabled,
    }
}

/// One player's bowling session
pub struct Session<A: AudioCues = NullCues> {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    cues: A,
}

impl Session<NullCues> {
    /// Session without audio
    pub fn silent(tuning: Tuning) -> Self {
        Self::new(tuning, NullCues)
    }
}

impl<A: AudioCues> Session<A> {
    pub fn new(tuning: Tuning, cues: A) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning: {tuning:?}");
        let state = GameState::new(&tuning);
        log::info!("New session: rack at {:?}, ball at {:?}", tuning.rack_center, tuning.ball_start);
        let mut session = Self {
            state,
            tuning,
            settings: Settings::default(),
            cues,
        };
        session.sync_volume();
        session
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.set_settings(settings);
        self
    }

    /// Replace the player's preferences; the cue sink picks up the new volume
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.sync_volume();
    }

    fn sync_volume(&mut self) {
        self.cues.set_volume(self.settings.effective_volume());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn cues(&self) -> &A {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut A {
        &mut self.cues
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.sync_volume();
    }

    /// Aim line to draw, if the player wants one
    pub fn aim_line(&self) -> Option<(Vec2, Vec2)> {
        if !self.settings.show_aim_line {
            return None;
        }
        self.state.aim_line()
    }

    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        self.state.pointer_down(pos)
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.state.pointer_move(pos);
    }

    pub fn pointer_cancel(&mut self) {
        self.state.pointer_cancel();
    }

    /// Release the drag; returns true if the ball was launched
    pub fn pointer_up(&mut self) -> bool {
        let launched = self.state.pointer_up(&self.tuning).is_some();
        if launched {
            gate(&mut self.cues, &self.settings).play(SoundEffect::Roll);
        }
        launched
    }

    /// Start a new round
    pub fn reset(&mut self) {
        self.state.reset(&self.tuning);
    }

    /// Advance by a normalized step
    pub fn step(&mut self, dt: f32) -> Option<RoundScore> {
        let mut cues = gate(&mut self.cues, &self.settings);
        tick(&mut self.state, &self.tuning, dt, &mut cues)
    }

    /// Advance by a wall-clock frame duration
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<RoundScore> {
        self.step(normalized_dt(elapsed_ms))
    }
}
