//! Simulation output: everything the HUD, audio and render collaborators observe.
//!
//! The core never calls out to collaborators directly. Each tick pushes
//! [`SimEvent`]s into a [`TickOutput`] buffer which the orchestrator drains
//! and the ECS layer forwards through `EventWriter<SimEvent>`.

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Projectile, ProjectileKind};
use crate::components::PlayerSlot;
use crate::round::{Announcement, RoundEndReason};

/// What delivered a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Punch,
    Kick,
    Special,
    Projectile,
}

/// Named audio triggers. Fire-and-forget; a missing sample is the audio host's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Jump,
    Land,
    KickSwing,
    /// Punch that closed its window without landing
    PunchWhiff,
    KickWhiff,
    Block,
    Special,
    PunchHit,
    KickHit,
    SpecialHit,
    ProjectileHit,
    BlockHit,
    Hurt,
    Ko,
    RoundCall,
    FightCall,
    KoAnnounce,
    TimeUp,
    Victory,
}

impl AudioCue {
    /// Sample name looked up by the audio host.
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Jump => "jump",
            AudioCue::Land => "land",
            AudioCue::KickSwing => "kick_swing",
            AudioCue::PunchWhiff => "punch_swing",
            AudioCue::KickWhiff => "kick_whiff",
            AudioCue::Block => "block",
            AudioCue::Special => "special",
            AudioCue::PunchHit => "punch_hit",
            AudioCue::KickHit => "kick_hit",
            AudioCue::SpecialHit => "special_hit",
            AudioCue::ProjectileHit => "projectile_hit",
            AudioCue::BlockHit => "block_hit",
            AudioCue::Hurt => "hurt",
            AudioCue::Ko => "ko",
            AudioCue::RoundCall => "round",
            AudioCue::FightCall => "fight",
            AudioCue::KoAnnounce => "ko_announce",
            AudioCue::TimeUp => "time",
            AudioCue::Victory => "victory",
        }
    }

    pub fn for_hit(source: HitSource) -> Self {
        match source {
            HitSource::Punch => AudioCue::PunchHit,
            HitSource::Kick => AudioCue::KickHit,
            HitSource::Special => AudioCue::SpecialHit,
            HitSource::Projectile => AudioCue::ProjectileHit,
        }
    }
}

/// One observable thing that happened during a tick.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Emitted on every health mutation, resets included
    HealthChanged {
        slot: PlayerSlot,
        current: u32,
        max: u32,
    },
    /// Emitted exactly once per round per fighter, when health first reaches 0
    Died { slot: PlayerSlot },
    Hit {
        attacker: PlayerSlot,
        target: PlayerSlot,
        source: HitSource,
        outcome: DamageOutcome,
    },
    ProjectileLaunched {
        owner: PlayerSlot,
        kind: ProjectileKind,
    },
    Cue {
        slot: Option<PlayerSlot>,
        cue: AudioCue,
    },
    Announcement(Announcement),
    RoundStarted { round: u32 },
    RoundEnded {
        round: u32,
        winner: PlayerSlot,
        reason: RoundEndReason,
        p1_wins: u32,
        p2_wins: u32,
    },
    MatchOver {
        winner: PlayerSlot,
        winner_name: String,
    },
}

/// Per-tick output buffer shared by both fighters and their projectiles.
#[derive(Debug, Default)]
pub struct TickOutput {
    pub events: Vec<SimEvent>,
    /// Projectiles spawned this tick; the orchestrator takes ownership
    pub launched: Vec<Projectile>,
}

impl TickOutput {
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, slot: PlayerSlot, cue: AudioCue) {
        self.events.push(SimEvent::Cue {
            slot: Some(slot),
            cue,
        });
    }

    pub fn announce(&mut self, announcement: Announcement, cue: AudioCue) {
        self.events.push(SimEvent::Announcement(announcement));
        self.events.push(SimEvent::Cue { slot: None, cue });
    }

    pub fn launch(&mut self, projectile: Projectile) {
        self.events.push(SimEvent::ProjectileLaunched {
            owner: projectile.owner,
            kind: projectile.kind,
        });
        self.launched.push(projectile);
    }

    /// Slot of the first fighter that died in this buffer, if any.
    pub fn first_death(&self) -> Option<PlayerSlot> {
        self.events.iter().find_map(|event| match event {
            SimEvent::Died { slot } => Some(*slot),
            _ => None,
        })
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        assert_eq!(AudioCue::PunchWhiff.name(), "punch_swing");
        assert_eq!(AudioCue::KoAnnounce.name(), "ko_announce");
        assert_eq!(AudioCue::TimeUp.name(), "time");
        assert_eq!(AudioCue::for_hit(HitSource::Projectile), AudioCue::ProjectileHit);
    }

    #[test]
    fn test_first_death_picks_earliest() {
        let mut out = TickOutput::default();
        out.cue(PlayerSlot::P1, AudioCue::Hurt);
        out.push(SimEvent::Died { slot: PlayerSlot::P2 });
        out.push(SimEvent::Died { slot: PlayerSlot::P1 });

        assert_eq!(out.first_death(), Some(PlayerSlot::P2));
        assert_eq!(out.drain_events().len(), 3);
        assert_eq!(out.first_death(), None);
    }
}
