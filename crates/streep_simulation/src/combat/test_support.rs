//! Helpers shared by the combat unit tests.

use bevy::prelude::*;

use super::Combatant;
use crate::components::{CharacterId, InputFrame, Intent, PlayerSlot};
use crate::config::ArenaBounds;
use crate::events::{AudioCue, SimEvent, TickOutput};

pub const DT: f32 = 1.0 / 60.0;

/// Two grounded fighters facing each other, opponents bound.
pub fn fighters(p1: CharacterId, p1_x: f32, p2: CharacterId, p2_x: f32) -> [Combatant; 2] {
    let arena = ArenaBounds::default();
    let mut first = Combatant::new(PlayerSlot::P1, p1.profile(), Vec2::new(p1_x, arena.ground_y), arena);
    let mut second = Combatant::new(PlayerSlot::P2, p2.profile(), Vec2::new(p2_x, arena.ground_y), arena);
    first.bind_opponent(PlayerSlot::P2);
    second.bind_opponent(PlayerSlot::P1);
    [first, second]
}

/// One physics tick for both fighters, P1 first.
pub fn step(fighters: &mut [Combatant; 2], inputs: [InputFrame; 2], out: &mut TickOutput) {
    let [p1, p2] = fighters;
    p1.tick(DT, inputs[0], Some(&mut *p2), out);
    p2.tick(DT, inputs[1], Some(&mut *p1), out);
}

pub fn run(fighters: &mut [Combatant; 2], ticks: usize, inputs: [InputFrame; 2], out: &mut TickOutput) {
    for _ in 0..ticks {
        step(fighters, inputs, out);
    }
}

/// Channel pressed this tick (and held).
pub fn press(channel: Intent) -> InputFrame {
    InputFrame::from_intent(channel)
}

/// Channel held from an earlier tick, no new edge.
pub fn hold(channel: Intent) -> InputFrame {
    InputFrame {
        held: channel,
        pressed: Intent::empty(),
    }
}

pub fn neutral() -> [InputFrame; 2] {
    [InputFrame::NEUTRAL; 2]
}

pub fn count_cues(out: &TickOutput, cue: AudioCue) -> usize {
    out.events
        .iter()
        .filter(|event| matches!(event, SimEvent::Cue { cue: c, .. } if *c == cue))
        .count()
}

pub fn count_hits(out: &TickOutput) -> usize {
    out.events
        .iter()
        .filter(|event| matches!(event, SimEvent::Hit { .. }))
        .count()
}

pub fn count_deaths(out: &TickOutput) -> usize {
    out.events
        .iter()
        .filter(|event| matches!(event, SimEvent::Died { .. }))
        .count()
}
