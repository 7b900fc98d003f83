//! Audio cue interface
//!
//! The simulation never plays sound itself. It notifies an injected cue sink
//! on discrete events; what the sink does with them (Web Audio, logging,
//! nothing) is up to the platform.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball released down the lane
    Roll,
    /// Ball struck a pin
    PinHit,
    /// All ten pins down
    Strike,
    /// Some pins down
    Spare,
    /// No pins down
    Gutter,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Roll => "roll",
            SoundEffect::PinHit => "pin-hit",
            SoundEffect::Strike => "strike",
            SoundEffect::Spare => "spare",
            SoundEffect::Gutter => "gutter",
        }
    }
}

/// Receiver for fire-and-forget audio cues
pub trait AudioCues {
    fn play(&mut self, effect: SoundEffect);

    /// Volume (0.0 - 1.0) for subsequent cues; sinks without a mixer ignore it
    fn set_volume(&mut self, _volume: f32) {}
}

/// Cue sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCues;

impl AudioCues for NullCues {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Recording sink, handy for tests and replays
impl AudioCues for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

impl<A: AudioCues + ?Sized> AudioCues for &mut A {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }
}

impl<A: AudioCues + ?Sized> AudioCues for Box<A> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }
}
