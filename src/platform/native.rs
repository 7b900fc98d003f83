//! Native cue sink

use std::collections::HashMap;

use crate::audio::{AudioCues, SoundEffect};

/// Logs each cue and keeps per-effect counts
#[derive(Debug, Default)]
pub struct LogCues {
    counts: HashMap<SoundEffect, u32>,
    volume: f32,
}

impl LogCues {
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn count(&self, effect: SoundEffect) -> u32 {
        self.counts.get(&effect).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl AudioCues for LogCues {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("cue: {} (volume {:.2})", effect.as_str(), self.volume);
        *self.counts.entry(effect).or_default() += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}
