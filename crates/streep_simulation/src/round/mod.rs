//! Round/match orchestration.
//!
//! [`RoundState`] is the bookkeeping (wins, clock, phase), [`FightMatch`]
//! drives both fighters through the phases, and [`RoundPlugin`] runs it on
//! the fixed timestep.

use bevy::prelude::*;

pub mod orchestrator;
pub mod state;
pub mod systems;


pub use orchestrator::{FightMatch, MatchSetup};
pub use state::{AnnounceStep, Announcement, ResolveStep, RoundEndReason, RoundPhase, RoundState};
pub use systems::advance_match;

use crate::components::PlayerInputs;
use crate::events::SimEvent;

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SimEvent>()
            .init_resource::<PlayerInputs>();

        app.add_systems(FixedUpdate, advance_match);
    }
}
