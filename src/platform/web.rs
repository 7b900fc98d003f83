//! Browser bindings
//!
//! JS owns the canvas, the animation frame loop and storage. It forwards
//! pointer events and frame timestamps here and reads state back for drawing.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioCues, SoundEffect};
use crate::highscores::{HighScores, ScoreSink};
use crate::settings::Settings;
use crate::sim::{GamePhase, Session, Tuning};

/// Forwards cues to a JS callback as `(name, volume)`
#[derive(Default)]
pub struct JsCues {
    callback: Option<js_sys::Function>,
    volume: f32,
}

impl AudioCues for JsCues {
    fn play(&mut self, effect: SoundEffect) {
        let Some(callback) = self.callback.as_ref() else {
            return;
        };
        let name = JsValue::from_str(effect.as_str());
        let volume = JsValue::from_f64(f64::from(self.volume));
        if let Err(e) = callback.call2(&JsValue::NULL, &name, &volume) {
            log::warn!("Cue callback failed for {}: {:?}", effect.as_str(), e);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install the panic hook and console logger (idempotent)
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized on repeat calls
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A bowling session driven from JS
#[wasm_bindgen]
pub struct WebBowling {
    session: Session<JsCues>,
    scores: HighScores,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebBowling {
    /// Create a session. Both arguments are optional JSON overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>, settings_json: Option<String>) -> Result<WebBowling, JsValue> {
        init_logging();
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| {
                log::warn!("Rejected tuning: {e}");
                to_js(e)
            })?,
            None => Tuning::default(),
        };
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(|e| {
                log::warn!("Rejected settings: {e}");
                to_js(e)
            })?,
            None => Settings::default(),
        };
        log::info!("Melon Bowl starting...");
        Ok(Self {
            session: Session::new(tuning, JsCues::default()).with_settings(settings),
            scores: HighScores::new(),
            last_time: None,
        })
    }

    /// Register the cue callback; it receives a name like "roll" or "strike"
    /// and the volume (0-1) to play it at
    #[wasm_bindgen(js_name = setCueCallback)]
    pub fn set_cue_callback(&mut self, callback: Option<js_sys::Function>) {
        self.session.cues_mut().callback = callback;
    }

    #[wasm_bindgen(js_name = setSoundEnabled)]
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.session.set_sound_enabled(enabled);
    }

    /// Current preferences as JSON, for JS to persist
    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.settings()).map_err(to_js)
    }

    /// Replace preferences from JSON (missing fields take defaults)
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| {
            log::warn!("Rejected settings: {e}");
            to_js(e)
        })?;
        self.session.set_settings(settings);
        Ok(())
    }

    #[wasm_bindgen(js_name = showFps)]
    pub fn show_fps(&self) -> bool {
        self.session.settings().show_fps
    }

    /// Volume cues currently play at (0 when muted)
    #[wasm_bindgen(js_name = cueVolume)]
    pub fn cue_volume(&self) -> f32 {
        self.session.settings().effective_volume()
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.session.pointer_down(Vec2::new(x, y))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.pointer_move(Vec2::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        self.session.pointer_up()
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) {
        self.session.pointer_cancel();
    }

    /// Advance to the animation frame timestamp `time` (ms)
    ///
    /// Returns the round's points on the frame it finishes, otherwise undefined.
    pub fn frame(&mut self, time: f64) -> Option<u32> {
        let elapsed = self.last_time.map_or(0.0, |last| time - last);
        self.last_time = Some(time);
        self.advance(elapsed)
    }

    /// Advance by `elapsed_ms` of wall-clock time
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<u32> {
        let result = self.session.advance(elapsed_ms)?;
        self.scores.record_round(result.score_delta);
        Some(result.score_delta)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Forget the frame clock, e.g. after the tab was hidden
    #[wasm_bindgen(js_name = resetClock)]
    pub fn reset_clock(&mut self) {
        self.last_time = None;
    }

    pub fn phase(&self) -> String {
        match self.session.phase() {
            GamePhase::Aiming => "aiming",
            GamePhase::Rolling => "rolling",
            GamePhase::Settling => "settling",
            GamePhase::Finished => "finished",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.session.state().score as f64
    }

    #[wasm_bindgen(js_name = standingCount)]
    pub fn standing_count(&self) -> usize {
        self.session.state().standing_count()
    }

    /// Ball as [x, y, radius, rotation]
    pub fn ball(&self) -> Vec<f32> {
        let ball = &self.session.state().ball;
        vec![ball.pos.x, ball.pos.y, ball.radius, ball.rotation]
    }

    /// Pins as flat [x, y, radius, rotation, fallen] records in rack order
    pub fn pins(&self) -> Vec<f32> {
        self.session
            .state()
            .pins
            .iter()
            .flat_map(|p| {
                let b = &p.body;
                [b.pos.x, b.pos.y, b.radius, b.rotation, if p.fallen { 1.0 } else { 0.0 }]
            })
            .collect()
    }

    /// Aim line as [x0, y0, x1, y1], empty when not dragging or hidden
    #[wasm_bindgen(js_name = aimLine)]
    pub fn aim_line(&self) -> Vec<f32> {
        self.session
            .aim_line()
            .map(|(from, to)| vec![from.x, from.y, to.x, to.y])
            .unwrap_or_default()
    }

    pub fn message(&self) -> Option<String> {
        self.session.state().message.as_ref().map(|m| m.text.clone())
    }

    /// Full state snapshot as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.state()).map_err(to_js)
    }

    /// Ledger as JSON, for JS to persist
    #[wasm_bindgen(js_name = scoresJson)]
    pub fn scores_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.scores).map_err(to_js)
    }

    /// Restore a ledger previously returned by `scoresJson`
    #[wasm_bindgen(js_name = loadScores)]
    pub fn load_scores(&mut self, json: &str) -> Result<(), JsValue> {
        self.scores = serde_json::from_str(json).map_err(to_js)?;
        log::info!("Loaded {} high scores", self.scores.entries.len());
        Ok(())
    }
}
