//! Match orchestrator.
//!
//! `FightMatch` owns both combatants (the registry their opponent slots point
//! into), their input sources, live projectiles, the round state and the
//! match RNG. One call to [`FightMatch::tick`] advances everything by one
//! physics step and returns what happened.
//!
//! Timed announcements are phases with an elapsed clock, not sleeps: a test
//! can drive the whole match tick by tick and assert the phase at any point.

use std::sync::Arc;

use bevy::prelude::*;

use super::state::{
    AnnounceStep, Announcement, ResolveStep, RoundEndReason, RoundPhase, RoundState,
};
use crate::ai::AiController;
use crate::combat::{Combatant, FighterView, Projectile, ProjectileStep};
use crate::components::{InputFrame, InputTracker, Intent, PlayerSlot, StatsProfile};
use crate::config::{GameMode, MatchConfig};
use crate::error::SetupError;
use crate::events::{AudioCue, SimEvent, TickOutput};
use crate::DeterministicRng;

/// What match setup needs to bind two combatants.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub profiles: [Arc<StatsProfile>; 2],
    pub spawns: [Vec2; 2],
    pub mode: GameMode,
}

impl MatchSetup {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            profiles: [config.p1.profile(), config.p2.profile()],
            spawns: [config.spawn(PlayerSlot::P1), config.spawn(PlayerSlot::P2)],
            mode: config.mode,
        }
    }
}

#[derive(Resource, Debug)]
pub struct FightMatch {
    config: MatchConfig,
    fighters: [Combatant; 2],
    spawns: [Vec2; 2],
    ai: [Option<AiController>; 2],
    trackers: [InputTracker; 2],
    projectiles: Vec<Projectile>,
    round: RoundState,
    rng: DeterministicRng,
    output: TickOutput,
    tick_count: u64,
}

impl FightMatch {
    /// Builds a match from the roster entries and spawns named in `config`.
    pub fn new(config: MatchConfig) -> Result<Self, SetupError> {
        let setup = MatchSetup::from_config(&config);
        Self::from_setup(setup, config)
    }

    /// Builds a match from explicit profiles. Nothing is bound if any check fails.
    pub fn from_setup(setup: MatchSetup, config: MatchConfig) -> Result<Self, SetupError> {
        Self::build(setup, config).map_err(|err| {
            crate::log_error(&format!("Match setup rejected: {}", err));
            err
        })
    }

    fn build(setup: MatchSetup, config: MatchConfig) -> Result<Self, SetupError> {
        config.validate()?;
        for profile in &setup.profiles {
            profile.validate()?;
        }
        for slot in PlayerSlot::BOTH {
            let x = setup.spawns[slot.index()].x;
            if !config.arena.contains_x(x) {
                return Err(SetupError::SpawnOutOfBounds { slot, x });
            }
        }

        let [p1_stats, p2_stats] = setup.profiles;
        let mut p1 = Combatant::new(PlayerSlot::P1, p1_stats, setup.spawns[0], config.arena);
        let mut p2 = Combatant::new(PlayerSlot::P2, p2_stats, setup.spawns[1], config.arena);
        p1.bind_opponent(PlayerSlot::P2);
        p2.bind_opponent(PlayerSlot::P1);

        let mut ai = [None, None];
        if setup.mode == GameMode::VsCpu {
            p2.set_ai_controlled(true);
            ai[PlayerSlot::P2.index()] = Some(AiController::new(config.ai.clone()));
        }

        crate::log_info(&format!(
            "Match: {} vs {} ({:?}, first to {}, seed {})",
            p1.stats().name,
            p2.stats().name,
            setup.mode,
            config.rules.rounds_to_win,
            config.seed
        ));

        Ok(Self {
            round: RoundState::new(config.rules.rounds_to_win, config.rules.round_time),
            rng: DeterministicRng::new(config.seed),
            fighters: [p1, p2],
            spawns: setup.spawns,
            ai,
            trackers: [InputTracker::default(); 2],
            projectiles: Vec::new(),
            output: TickOutput::default(),
            tick_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn fighter(&self, slot: PlayerSlot) -> &Combatant {
        &self.fighters[slot.index()]
    }

    pub fn view(&self, slot: PlayerSlot) -> FighterView {
        self.fighters[slot.index()].view()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_ai_controlled(&self, slot: PlayerSlot) -> bool {
        self.ai[slot.index()].is_some()
    }

    /// Overall winner, once the match is over.
    pub fn winner(&self) -> Option<PlayerSlot> {
        match self.round.phase() {
            RoundPhase::MatchOver => self.round.match_winner(),
            _ => None,
        }
    }

    /// Advances the match by one physics step.
    ///
    /// `raw` are the held channels of each human input source; slots driven
    /// by the AI ignore theirs.
    pub fn tick(&mut self, dt: f32, raw: [Intent; 2]) -> Vec<SimEvent> {
        self.tick_count += 1;

        // Edges are tracked even while frozen so a button held through the
        // announcements does not fire on the first fighting tick.
        let human = [self.trackers[0].frame(raw[0]), self.trackers[1].frame(raw[1])];

        self.round.advance_clock(dt);
        let rules = self.config.rules;
        let elapsed = self.round.phase_elapsed();

        match self.round.phase() {
            RoundPhase::Setup => self.begin_round(),
            RoundPhase::Announcing(AnnounceStep::RoundCall) => {
                if elapsed >= rules.round_call
                    && self.round.enter(RoundPhase::Announcing(AnnounceStep::FightCall))
                {
                    self.output.announce(Announcement::Fight, AudioCue::FightCall);
                }
            }
            RoundPhase::Announcing(AnnounceStep::FightCall) => {
                if elapsed >= rules.fight_call && self.round.enter(RoundPhase::Fighting) {
                    crate::log(&format!("Round {}: fight", self.round.round_number()));
                }
            }
            RoundPhase::Fighting => self.tick_fighting(dt, human),
            RoundPhase::Resolving(step) => {
                // Fighters keep moving under the result banner; deaths no longer count
                self.step_fighters(dt, human);
                self.tick_resolving(step, elapsed);
            }
            RoundPhase::MatchOver => {}
        }

        self.output.drain_events()
    }

    /// Clears the win tally and starts over from round 1.
    pub fn reset_match(&mut self) {
        self.round.reset(self.config.rules.round_time);
        self.projectiles.clear();
        self.output = TickOutput::default();
        self.trackers = [InputTracker::default(); 2];
        for ai in self.ai.iter_mut().flatten() {
            ai.reset();
        }
        crate::log_info("Match reset");
    }

    // ========================================================================
    // Phases
    // ========================================================================

    fn begin_round(&mut self) {
        self.projectiles.clear();
        self.output.launched.clear();

        for slot in PlayerSlot::BOTH {
            let spawn = self.spawns[slot.index()];
            self.fighters[slot.index()].reset_for_round(spawn, &mut self.output);
        }
        let [p1, p2] = &mut self.fighters;
        let p1_x = p1.position().x;
        p1.face_toward(p2.position().x);
        p2.face_toward(p1_x);

        for ai in self.ai.iter_mut().flatten() {
            ai.reset();
        }

        self.round.round_timer = self.config.rules.round_time;
        let round = self.round.round_number();
        self.output.push(SimEvent::RoundStarted { round });
        self.output.announce(Announcement::Round(round), AudioCue::RoundCall);
        crate::log_info(&format!(
            "Round {} ({}-{})",
            round, self.round.p1_wins, self.round.p2_wins
        ));

        self.round.enter(RoundPhase::Announcing(AnnounceStep::RoundCall));
    }

    fn tick_fighting(&mut self, dt: f32, human: [InputFrame; 2]) {
        self.round.round_timer -= dt;
        if self.round.round_timer <= 0.0 {
            self.round.round_timer = 0.0;
            self.end_round(RoundEndReason::Timeout);
            return;
        }

        self.step_fighters(dt, human);

        if let Some(loser) = self.output.first_death() {
            self.end_round(RoundEndReason::Knockout { loser });
        }
    }

    fn end_round(&mut self, reason: RoundEndReason) {
        let winner = match reason {
            RoundEndReason::Knockout { loser } => loser.other(),
            RoundEndReason::Timeout => {
                let p1 = self.fighters[0].health().fraction();
                let p2 = self.fighters[1].health().fraction();
                crate::log_info(&format!("Time up: P1 {:.3} vs P2 {:.3}", p1, p2));
                if p1 >= p2 {
                    PlayerSlot::P1
                } else {
                    PlayerSlot::P2
                }
            }
        };

        let round = self.round.round_number();
        self.round.award(winner);

        match reason {
            RoundEndReason::Knockout { .. } => {
                self.output.announce(Announcement::Ko, AudioCue::KoAnnounce)
            }
            RoundEndReason::Timeout => self.output.announce(Announcement::Time, AudioCue::TimeUp),
        }
        self.output.push(SimEvent::RoundEnded {
            round,
            winner,
            reason,
            p1_wins: self.round.p1_wins,
            p2_wins: self.round.p2_wins,
        });
        crate::log_info(&format!(
            "Round {} to {} by {:?} ({}-{})",
            round, winner, reason, self.round.p1_wins, self.round.p2_wins
        ));

        self.round.enter(RoundPhase::Resolving(ResolveStep::Result));
    }

    fn tick_resolving(&mut self, step: ResolveStep, elapsed: f32) {
        let rules = self.config.rules;

        match step {
            ResolveStep::Result if elapsed >= rules.result_hold => {
                let next = if self.round.match_winner().is_some() {
                    ResolveStep::Victory
                } else {
                    ResolveStep::Intermission
                };
                self.round.enter(RoundPhase::Resolving(next));
            }
            ResolveStep::Victory if elapsed >= rules.victory_hold => self.finish_match(),
            ResolveStep::Intermission if elapsed >= rules.intermission => {
                if self.round.enter(RoundPhase::Setup) {
                    self.begin_round();
                }
            }
            _ => {}
        }
    }

    fn finish_match(&mut self) {
        let Some(winner) = self.round.match_winner() else {
            return;
        };
        if !self.round.enter(RoundPhase::MatchOver) {
            return;
        }

        let winner_name = self.fighters[winner.index()].stats().name.clone();
        self.output
            .announce(Announcement::Victory { winner }, AudioCue::Victory);
        crate::log_info(&format!(
            "Match over: {} ({}) wins {}-{}",
            winner, winner_name, self.round.p1_wins, self.round.p2_wins
        ));
        self.output.push(SimEvent::MatchOver {
            winner,
            winner_name,
        });
    }

    // ========================================================================
    // Simulation step
    // ========================================================================

    fn step_fighters(&mut self, dt: f32, human: [InputFrame; 2]) {
        if !self.round.phase().fighters_active() {
            return;
        }

        for slot in PlayerSlot::BOTH {
            let index = slot.index();

            let input = match self.ai[index].as_mut() {
                Some(ai) => {
                    let me = &self.fighters[index];
                    let opponent = me.opponent().map(|other| &self.fighters[other.index()]);
                    ai.tick(dt, me, opponent, &mut self.rng.rng)
                        .unwrap_or(InputFrame::NEUTRAL)
                }
                None => human[index],
            };

            let (me, other) = pair_mut(&mut self.fighters, slot);
            let opponent = me.opponent().map(|_| other);
            me.tick(dt, input, opponent, &mut self.output);
        }

        self.step_projectiles(dt);
    }

    fn step_projectiles(&mut self, dt: f32) {
        self.projectiles.append(&mut self.output.launched);

        let arena = self.config.arena;
        let fighters = &mut self.fighters;
        let output = &mut self.output;
        self.projectiles.retain_mut(|projectile| {
            let owner_x = fighters[projectile.owner.index()].position().x;
            let target = &mut fighters[projectile.owner.other().index()];
            match projectile.tick(dt, target, owner_x, &arena, output) {
                ProjectileStep::Flying => true,
                ProjectileStep::Expired | ProjectileStep::Hit(_) => false,
            }
        });
    }

    #[cfg(test)]
    pub(crate) fn fighter_mut(&mut self, slot: PlayerSlot) -> &mut Combatant {
        &mut self.fighters[slot.index()]
    }

    #[cfg(test)]
    pub(crate) fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }
}

/// `slot`'s combatant and its opponent, both mutable.
fn pair_mut(fighters: &mut [Combatant; 2], slot: PlayerSlot) -> (&mut Combatant, &mut Combatant) {
    let [p1, p2] = fighters;
    match slot {
        PlayerSlot::P1 => (p1, p2),
        PlayerSlot::P2 => (p2, p1),
    }
}
