//! Streep Fighter simulation core
//!
//! Headless 1v1 combat on Bevy 0.16: fighters, specials, projectiles, the
//! CPU opponent and the round/match flow. Rendering, audio playback and
//! input mapping belong to the host, which reads [`SimEvent`]s and writes
//! [`PlayerInputs`].
//!
//! Everything advances on a fixed 60 Hz step. With the same seed and the
//! same inputs two runs produce the same match, tick for tick.

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod round;

pub use ai::{AiChoice, AiConfig, AiController};
pub use combat::{Combatant, DamageOutcome, Facing, FighterState, FighterView, Projectile, SpecialKind};
pub use components::*;
pub use config::{ArenaBounds, GameMode, MatchConfig, RoundRules};
pub use error::SetupError;
pub use events::{AudioCue, HitSource, SimEvent, TickOutput};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use round::{Announcement, FightMatch, RoundEndReason, RoundPhase, RoundPlugin, RoundState};

/// Physics rate of the whole simulation
pub const TICK_RATE_HZ: f64 = 60.0;

/// Main simulation plugin
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed 60 Hz step for every combat rule
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_plugins(RoundPlugin);
    }
}

/// Seeded match RNG. Only the AI draws from it.
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl fmt::Debug for DeterministicRng {
    // Stream position stands in for the full generator state in snapshots
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeterministicRng")
            .field("seed", &self.seed)
            .field("word_pos", &self.rng.get_word_pos())
            .finish()
    }
}

/// Minimal headless Bevy app running `config`'s match.
///
/// Virtual time advances exactly one fixed step per `app.update()`, so the
/// match is driven by update count, not wall clock.
pub fn create_headless_app(config: MatchConfig) -> Result<App, SetupError> {
    init_logger();
    let fight = FightMatch::new(config)?;

    let step = Duration::from_secs_f64(1.0 / TICK_RATE_HZ);
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(fight);

    Ok(app)
}

/// Snapshot of the whole match for determinism comparisons.
pub fn match_snapshot(fight: &FightMatch) -> Vec<u8> {
    format!("{:?}", fight).into_bytes()
}
