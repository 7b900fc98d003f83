//! Melon Bowl entry point
//!
//! Native builds run a headless demo bowler: it throws a number of rounds at
//! the rack with seeded aim jitter, logs each result and records them in the
//! local points ledger. The browser build is driven through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, bail};
    use clap::Parser;
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use melon_bowl::platform::LogCues;
    use melon_bowl::sim::{RoundScore, Session, Tuning};
    use melon_bowl::{HighScores, ScoreSink, Settings, SoundEffect};

    /// Frames a single round may take before the demo gives up on it
    const MAX_FRAMES_PER_ROUND: u32 = 100_000;

    #[derive(Debug, Parser)]
    #[command(name = "melon-bowl", version, about = "Headless watermelon bowling demo")]
    pub struct Args {
        /// Rounds to bowl
        #[arg(short, long, default_value_t = 5)]
        pub rounds: u32,
        /// Seed for aim jitter
        #[arg(short, long, default_value_t = 0)]
        pub seed: u64,
        /// Max sideways aim error in arena units
        #[arg(long, default_value_t = 30.0)]
        pub jitter: f32,
        /// Simulated display refresh rate
        #[arg(long, default_value_t = 60.0)]
        pub fps: f64,
        /// Tuning overrides (JSON)
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Player settings (JSON)
        #[arg(long)]
        pub settings: Option<PathBuf>,
        /// Points ledger to update (JSON, created if missing)
        #[arg(long)]
        pub scores: Option<PathBuf>,
    }

    /// Throw one ball at `target` and play the round out
    fn bowl(session: &mut Session<LogCues>, target: Vec2, frame_ms: f64) -> anyhow::Result<RoundScore> {
        let start = session.state().ball.pos;
        session.pointer_down(start);
        session.pointer_move(target);
        if !session.pointer_up() {
            bail!("throw at {target:?} was rejected");
        }
        for _ in 0..MAX_FRAMES_PER_ROUND {
            if let Some(result) = session.advance(frame_ms) {
                return Ok(result);
            }
        }
        bail!("round did not finish within {MAX_FRAMES_PER_ROUND} frames")
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        if !(args.fps > 0.0) {
            bail!("--fps must be positive, got {}", args.fps);
        }

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let settings = match &args.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        let mut ledger = match &args.scores {
            Some(path) => HighScores::load(path)
                .with_context(|| format!("loading scores from {}", path.display()))?,
            None => HighScores::new(),
        };

        log::info!(
            "Bowling {} rounds (seed {}, {:.0} fps)",
            args.rounds,
            args.seed,
            args.fps
        );

        let frame_ms = 1000.0 / args.fps;
        let target_base = tuning.rack_center;
        let mut rng = Pcg32::seed_from_u64(args.seed);
        let mut session = Session::new(tuning, LogCues::default()).with_settings(settings);

        for round in 1..=args.rounds {
            let jitter = if args.jitter > 0.0 {
                rng.random_range(-args.jitter..=args.jitter)
            } else {
                0.0
            };
            let target = target_base + Vec2::new(jitter, 0.0);
            let result = bowl(&mut session, target, frame_ms)?;
            ledger.record_round(result.score_delta);
            println!(
                "round {round:>3}: aim {jitter:+6.1}  {:<12} +{:<4} total {}",
                result.outcome.message(),
                result.score_delta,
                session.state().score
            );
            session.reset();
        }

        let cues = session.cues();
        log::info!(
            "Cues played: {} ({} pin hits, {} strikes)",
            cues.total(),
            cues.count(SoundEffect::PinHit),
            cues.count(SoundEffect::Strike)
        );
        if let Some(top) = ledger.top_score() {
            println!("best round: {top}  ledger total: {}", ledger.total);
        }

        if let Some(path) = &args.scores {
            ledger
                .save(path)
                .with_context(|| format!("saving scores to {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `platform::web::WebBowling`, this is just to satisfy the compiler
}
