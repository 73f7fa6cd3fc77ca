//! Bevy glue: the match advances once per FixedUpdate step.

use bevy::prelude::*;

use super::orchestrator::FightMatch;
use crate::components::PlayerInputs;
use crate::events::SimEvent;

/// Ticks the match resource and forwards everything it reported.
///
/// No-op until a [`FightMatch`] has been inserted.
pub fn advance_match(
    time: Res<Time<Fixed>>,
    inputs: Res<PlayerInputs>,
    fight: Option<ResMut<FightMatch>>,
    mut events: EventWriter<SimEvent>,
) {
    let Some(mut fight) = fight else {
        return;
    };

    for event in fight.tick(time.delta_secs(), inputs.held) {
        events.write(event);
    }
}
