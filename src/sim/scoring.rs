//! Round scoring

use serde::{Deserialize, Serialize};

use super::body::Pin;
use super::formation::PIN_COUNT;
use crate::audio::SoundEffect;

/// How a round turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every pin down
    Strike,
    /// Some pins down
    Partial { fallen: u8 },
    /// Nothing down
    Gutter,
}

impl Outcome {
    pub fn from_fallen(fallen: usize) -> Self {
        match fallen {
            0 => Outcome::Gutter,
            n if n >= PIN_COUNT => Outcome::Strike,
            n => Outcome::Partial { fallen: n as u8 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Strike => "strike",
            Outcome::Partial { .. } => "partial",
            Outcome::Gutter => "gutter",
        }
    }

    /// Player-facing message
    pub fn message(&self) -> String {
        match self {
            Outcome::Strike => "STRIKE!".to_string(),
            Outcome::Partial { fallen: 1 } => "1 pin!".to_string(),
            Outcome::Partial { fallen } => format!("{fallen} pins!"),
            Outcome::Gutter => "Gutter ball!".to_string(),
        }
    }

    /// Audio cue announcing this outcome
    pub fn cue(&self) -> SoundEffect {
        match self {
            Outcome::Strike => SoundEffect::Strike,
            Outcome::Partial { .. } => SoundEffect::Spare,
            Outcome::Gutter => SoundEffect::Gutter,
        }
    }
}

/// Score of one completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub score_delta: u32,
    pub outcome: Outcome,
    pub fallen_count: usize,
}

/// Count fallen pins and classify the round
pub fn score_round(pins: &[Pin], points_per_pin: u32) -> RoundScore {
    let fallen_count = pins.iter().filter(|p| p.fallen).count();
    RoundScore {
        score_delta: (fallen_count as u32).saturating_mul(points_per_pin),
        outcome: Outcome::from_fallen(fallen_count),
        fallen_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::formation::build_rack;
    use glam::Vec2;

    fn rack_with_fallen(n: usize) -> [Pin; PIN_COUNT] {
        let mut pins = build_rack(Vec2::new(400.0, 150.0), 40.0);
        for pin in pins.iter_mut().take(n) {
            pin.fallen = true;
        }
        pins
    }

    #[test]
    fn test_strike() {
        let score = score_round(&rack_with_fallen(10), 10);
        assert_eq!(score.outcome, Outcome::Strike);
        assert_eq!(score.fallen_count, 10);
        assert_eq!(score.score_delta, 100);
        assert_eq!(score.outcome.cue(), SoundEffect::Strike);
    }

    #[test]
    fn test_partial_reports_count() {
        let score = score_round(&rack_with_fallen(7), 10);
        assert_eq!(score.outcome, Outcome::Partial { fallen: 7 });
        assert_eq!(score.score_delta, 70);
        assert_eq!(score.outcome.message(), "7 pins!");
        assert_eq!(score.outcome.label(), "partial");
        assert_eq!(Outcome::from_fallen(1).message(), "1 pin!");
    }

    #[test]
    fn test_gutter() {
        let score = score_round(&rack_with_fallen(0), 10);
        assert_eq!(score.outcome, Outcome::Gutter);
        assert_eq!(score.score_delta, 0);
        assert_eq!(score.outcome.message(), "Gutter ball!");
        assert_eq!(score.outcome.cue(), SoundEffect::Gutter);
    }

    #[test]
    fn test_points_per_pin_scales() {
        assert_eq!(score_round(&rack_with_fallen(3), 25).score_delta, 75);
    }

    #[test]
    fn test_huge_points_per_pin_saturates() {
        let score = score_round(&rack_with_fallen(10), 500_000_000);
        assert_eq!(score.score_delta, u32::MAX);
        assert_eq!(score.outcome, Outcome::Strike);
    }
}
