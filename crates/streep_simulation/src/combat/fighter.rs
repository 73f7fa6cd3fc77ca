//! Combatant state machine.
//!
//! One `Combatant` per player slot. Each physics tick it reads an
//! [`InputFrame`], runs the rules of its current [`FighterState`], then
//! integrates gravity and position. Hits it lands are resolved immediately
//! on the opponent (see `damage.rs`); the per-character special is driven by
//! `special.rs`.

use std::sync::Arc;

use bevy::prelude::*;

use super::damage::DamageOutcome;
use super::special::SpecialActivation;
use super::{
    in_reach, ACTIVE_END, ACTIVE_START, AIR_CONTROL, GRAVITY, HURT_DURATION, HURT_FRICTION,
    INVINCIBILITY_DURATION, JUMP_VELOCITY, KICK_DURATION, KICK_REACH, PUNCH_DURATION, PUNCH_REACH,
};
use crate::components::{Health, InputFrame, Intent, PlayerSlot, StatsProfile};
use crate::config::ArenaBounds;
use crate::events::{AudioCue, HitSource, SimEvent, TickOutput};

// ============================================================================
// States
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum FighterState {
    Idle,
    WalkForward,
    WalkBackward,
    Jump,
    Crouch,
    Punch,
    Kick,
    Block,
    Special,
    Hurt,
    /// Terminal until the next round reset
    Ko,
}

impl FighterState {
    /// States that accept new commands (attacks, block, jump, walking).
    pub fn is_free(self) -> bool {
        matches!(
            self,
            FighterState::Idle
                | FighterState::WalkForward
                | FighterState::WalkBackward
                | FighterState::Crouch
        )
    }

    pub fn is_attacking(self) -> bool {
        matches!(
            self,
            FighterState::Punch | FighterState::Kick | FighterState::Special
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            FighterState::Idle => "Idle",
            FighterState::WalkForward => "WalkForward",
            FighterState::WalkBackward => "WalkBackward",
            FighterState::Jump => "Jump",
            FighterState::Crouch => "Crouch",
            FighterState::Punch => "Punch",
            FighterState::Kick => "Kick",
            FighterState::Block => "Block",
            FighterState::Special => "Special",
            FighterState::Hurt => "Hurt",
            FighterState::Ko => "KO",
        }
    }
}

/// Horizontal facing. Derived from the opponent's side every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    pub fn duration(self) -> f32 {
        match self {
            AttackKind::Punch => PUNCH_DURATION,
            AttackKind::Kick => KICK_DURATION,
        }
    }

    pub fn reach(self) -> f32 {
        match self {
            AttackKind::Punch => PUNCH_REACH,
            AttackKind::Kick => KICK_REACH,
        }
    }

    pub fn damage(self, stats: &StatsProfile) -> u32 {
        match self {
            AttackKind::Punch => stats.punch_damage,
            AttackKind::Kick => stats.kick_damage,
        }
    }

    fn source(self) -> HitSource {
        match self {
            AttackKind::Punch => HitSource::Punch,
            AttackKind::Kick => HitSource::Kick,
        }
    }

    fn whiff_cue(self) -> AudioCue {
        match self {
            AttackKind::Punch => AudioCue::PunchWhiff,
            AttackKind::Kick => AudioCue::KickWhiff,
        }
    }
}

/// Per-activation flags of a punch/kick. Cleared on every state entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackActivation {
    pub window_open: bool,
    pub landed: bool,
}

/// Read-only snapshot for the rendering and HUD collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterView {
    pub slot: PlayerSlot,
    pub state: FighterState,
    pub state_timer: f32,
    pub facing: Facing,
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub invincible: bool,
    /// 0 right after a special, 1 when it can be used again
    pub special_readiness: f32,
}

// ============================================================================
// Combatant
// ============================================================================

#[derive(Debug, Clone)]
pub struct Combatant {
    pub(crate) slot: PlayerSlot,
    pub(crate) stats: Arc<StatsProfile>,
    pub(crate) health: Health,
    pub(crate) state: FighterState,
    /// Seconds since the current state was entered
    pub(crate) state_timer: f32,
    pub(crate) facing: Facing,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) special_cooldown: f32,
    pub(crate) invincibility: f32,
    pub(crate) opponent: Option<PlayerSlot>,
    pub(crate) ai_controlled: bool,
    pub(crate) held_intent: Intent,
    pub(crate) attack: AttackActivation,
    pub(crate) special: SpecialActivation,
    pub(crate) arena: ArenaBounds,
}

impl Combatant {
    pub fn new(slot: PlayerSlot, stats: Arc<StatsProfile>, spawn: Vec2, arena: ArenaBounds) -> Self {
        let facing = match slot {
            PlayerSlot::P1 => Facing::Right,
            PlayerSlot::P2 => Facing::Left,
        };

        Self {
            slot,
            health: Health::new(stats.max_health),
            stats,
            state: FighterState::Idle,
            state_timer: 0.0,
            facing,
            position: spawn,
            velocity: Vec2::ZERO,
            special_cooldown: 0.0,
            invincibility: 0.0,
            opponent: None,
            ai_controlled: false,
            held_intent: Intent::empty(),
            attack: AttackActivation::default(),
            special: SpecialActivation::default(),
            arena,
        }
    }

    /// Binds the opponent once. Later calls with a different slot are ignored.
    pub fn bind_opponent(&mut self, opponent: PlayerSlot) {
        if opponent == self.slot {
            crate::log_warning(&format!("{}: refusing to bind itself as opponent", self.slot));
            return;
        }
        match self.opponent {
            None => self.opponent = Some(opponent),
            Some(bound) if bound != opponent => {
                crate::log_warning(&format!(
                    "{}: opponent already bound to {}, ignoring {}",
                    self.slot, bound, opponent
                ));
            }
            Some(_) => {}
        }
    }

    pub fn set_ai_controlled(&mut self, ai_controlled: bool) {
        self.ai_controlled = ai_controlled;
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn stats(&self) -> &Arc<StatsProfile> {
        &self.stats
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn state(&self) -> FighterState {
        self.state
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn special_cooldown(&self) -> f32 {
        self.special_cooldown
    }

    pub fn invincibility(&self) -> f32 {
        self.invincibility
    }

    pub fn opponent(&self) -> Option<PlayerSlot> {
        self.opponent
    }

    pub fn is_ai_controlled(&self) -> bool {
        self.ai_controlled
    }

    pub fn held_intent(&self) -> Intent {
        self.held_intent
    }

    pub fn attack(&self) -> AttackActivation {
        self.attack
    }

    pub fn is_armored(&self) -> bool {
        self.special.armor
    }

    pub fn is_ko(&self) -> bool {
        self.state == FighterState::Ko
    }

    pub fn is_grounded(&self) -> bool {
        self.arena.is_grounded(self.position.y)
    }

    pub fn special_readiness(&self) -> f32 {
        if self.stats.special_cooldown <= 0.0 {
            return 1.0;
        }
        (1.0 - self.special_cooldown / self.stats.special_cooldown).clamp(0.0, 1.0)
    }

    pub fn view(&self) -> FighterView {
        FighterView {
            slot: self.slot,
            state: self.state,
            state_timer: self.state_timer,
            facing: self.facing,
            position: self.position,
            velocity: self.velocity,
            health: self.health.current,
            max_health: self.health.max,
            invincible: self.invincibility > 0.0,
            special_readiness: self.special_readiness(),
        }
    }

    /// Advances this fighter by one physics tick.
    ///
    /// `opponent` is the other fighter of the registry; `None` turns facing
    /// and every hit check into a no-op for this tick.
    pub fn tick(
        &mut self,
        dt: f32,
        input: InputFrame,
        mut opponent: Option<&mut Combatant>,
        out: &mut TickOutput,
    ) {
        self.held_intent = input.held;
        self.special_cooldown = (self.special_cooldown - dt).max(0.0);
        self.invincibility = (self.invincibility - dt).max(0.0);

        if let Some(other) = opponent.as_deref() {
            self.face_toward(other.position.x);
        }

        self.state_timer += dt;

        match self.state {
            FighterState::Idle
            | FighterState::WalkForward
            | FighterState::WalkBackward
            | FighterState::Crouch => self.tick_free(input, out),
            FighterState::Jump => self.tick_jump(input),
            FighterState::Punch => self.tick_attack(AttackKind::Punch, opponent.as_deref_mut(), out),
            FighterState::Kick => self.tick_attack(AttackKind::Kick, opponent.as_deref_mut(), out),
            FighterState::Block => self.tick_block(input, out),
            FighterState::Special => self.tick_special(opponent.as_deref_mut(), out),
            FighterState::Hurt => self.tick_hurt(dt, out),
            FighterState::Ko => {}
        }

        self.integrate(dt, out);
    }

    /// Faces the given x. Equal positions keep the current facing.
    pub(crate) fn face_toward(&mut self, x: f32) {
        if x > self.position.x {
            self.facing = Facing::Right;
        } else if x < self.position.x {
            self.facing = Facing::Left;
        }
    }

    fn tick_free(&mut self, input: InputFrame, out: &mut TickOutput) {
        if input.pressed(Intent::SPECIAL) && self.special_cooldown <= 0.0 {
            self.change_state(FighterState::Special, out);
            return;
        }
        if input.pressed(Intent::PUNCH) {
            self.change_state(FighterState::Punch, out);
            return;
        }
        if input.pressed(Intent::KICK) {
            self.change_state(FighterState::Kick, out);
            return;
        }
        if input.held(Intent::BLOCK) {
            self.change_state(FighterState::Block, out);
            return;
        }
        if input.pressed(Intent::JUMP) && self.is_grounded() {
            self.change_state(FighterState::Jump, out);
            self.velocity.y = JUMP_VELOCITY;
            return;
        }

        if input.held(Intent::CROUCH) {
            self.velocity.x = 0.0;
            self.set_locomotion(FighterState::Crouch, out);
            return;
        }

        let axis = input.held.move_axis();
        if axis == 0.0 {
            self.velocity.x = 0.0;
            self.set_locomotion(FighterState::Idle, out);
        } else {
            self.velocity.x = axis * self.stats.walk_speed;
            let toward_opponent = axis * self.facing.sign() > 0.0;
            let next = if toward_opponent {
                FighterState::WalkForward
            } else {
                FighterState::WalkBackward
            };
            self.set_locomotion(next, out);
        }
    }

    fn tick_jump(&mut self, input: InputFrame) {
        self.velocity.x = input.held.move_axis() * self.stats.walk_speed * AIR_CONTROL;
    }

    fn tick_attack(&mut self, kind: AttackKind, opponent: Option<&mut Combatant>, out: &mut TickOutput) {
        self.velocity.x = 0.0;
        let progress = self.state_timer / kind.duration();

        if !self.attack.window_open && (ACTIVE_START..ACTIVE_END).contains(&progress) {
            self.attack.window_open = true;
        }

        if self.attack.window_open && !self.attack.landed {
            if let Some(target) = opponent {
                if in_reach(self.position, target.position, kind.reach()) {
                    self.attack.landed = true;
                    let outcome = target.take_damage(kind.damage(&self.stats), self.position.x, out);
                    self.report_hit(target.slot, kind.source(), outcome, out);
                }
            }
        }

        if self.attack.window_open && progress >= ACTIVE_END {
            self.attack.window_open = false;
            if !self.attack.landed {
                out.cue(self.slot, kind.whiff_cue());
            }
        }

        if progress >= 1.0 {
            self.return_to_idle(out);
        }
    }

    fn tick_block(&mut self, input: InputFrame, out: &mut TickOutput) {
        self.velocity.x = 0.0;
        if !input.held(Intent::BLOCK) {
            self.change_state(FighterState::Idle, out);
        }
    }

    fn tick_hurt(&mut self, dt: f32, out: &mut TickOutput) {
        self.velocity.x = move_toward(self.velocity.x, 0.0, HURT_FRICTION * dt);

        if self.state_timer >= HURT_DURATION {
            self.invincibility = INVINCIBILITY_DURATION;
            self.change_state(FighterState::Idle, out);
        }
    }

    /// Gravity, landing, position integration and wall clamp.
    fn integrate(&mut self, dt: f32, out: &mut TickOutput) {
        let ground = self.arena.ground_y;

        if self.position.y < ground {
            self.velocity.y += GRAVITY * dt;
        } else if self.velocity.y > 0.0 {
            self.position.y = ground;
            self.velocity.y = 0.0;

            if self.state == FighterState::Jump {
                out.cue(self.slot, AudioCue::Land);
                self.change_state(FighterState::Idle, out);
            }
        }

        self.position += self.velocity * dt;
        self.position.x = self.arena.clamp_x(self.position.x);
        self.position.y = self.position.y.min(ground);
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Requests a transition. Rejected while KO.
    pub(crate) fn change_state(&mut self, next: FighterState, out: &mut TickOutput) -> bool {
        if self.state == FighterState::Ko {
            return false;
        }
        self.enter_state(next, out);
        true
    }

    /// Shared exit path for every timed state.
    pub(crate) fn return_to_idle(&mut self, out: &mut TickOutput) {
        self.velocity.x = 0.0;
        self.change_state(FighterState::Idle, out);
    }

    // Walking/crouching/idle switch every tick; only a real change counts as an entry.
    fn set_locomotion(&mut self, next: FighterState, out: &mut TickOutput) {
        if self.state != next {
            self.change_state(next, out);
        }
    }

    /// Unconditional entry: resets the state timer and per-activation flags.
    pub(super) fn enter_state(&mut self, next: FighterState, out: &mut TickOutput) {
        let previous = self.state;
        self.state = next;
        self.state_timer = 0.0;
        self.attack = AttackActivation::default();
        self.special = SpecialActivation::default();

        match next {
            FighterState::Punch => {
                self.velocity.x = 0.0;
            }
            FighterState::Kick => {
                self.velocity.x = 0.0;
                out.cue(self.slot, AudioCue::KickSwing);
            }
            FighterState::Block => {
                self.velocity.x = 0.0;
                out.cue(self.slot, AudioCue::Block);
            }
            FighterState::Special => {
                self.velocity.x = 0.0;
                self.special_cooldown = self.stats.special_cooldown;
                self.special.armor = self.stats.special.profile().armor_until.is_some();
                out.cue(self.slot, AudioCue::Special);
            }
            FighterState::Jump => {
                out.cue(self.slot, AudioCue::Jump);
            }
            _ => {}
        }

        if !(previous.is_free() && next.is_free()) {
            crate::log(&format!("{} {} -> {}", self.slot, previous.name(), next.name()));
        }
    }

    /// Restores health/position/timers and forces Idle, bypassing the KO guard.
    pub fn reset_for_round(&mut self, spawn: Vec2, out: &mut TickOutput) {
        self.health.restore();
        self.position = spawn;
        self.velocity = Vec2::ZERO;
        self.special_cooldown = 0.0;
        self.invincibility = 0.0;
        self.held_intent = Intent::empty();
        self.enter_state(FighterState::Idle, out);

        out.push(SimEvent::HealthChanged {
            slot: self.slot,
            current: self.health.current,
            max: self.health.max,
        });
    }

    /// Hit bookkeeping for the attacker side: event plus impact cue.
    pub(super) fn report_hit(
        &self,
        target: PlayerSlot,
        source: HitSource,
        outcome: DamageOutcome,
        out: &mut TickOutput,
    ) {
        if !outcome.connected() {
            return;
        }
        out.cue(self.slot, AudioCue::for_hit(source));
        out.push(SimEvent::Hit {
            attacker: self.slot,
            target,
            source,
            outcome,
        });
    }
}

fn move_toward(value: f32, target: f32, max_delta: f32) -> f32 {
    if (target - value).abs() <= max_delta {
        target
    } else {
        value + (target - value).signum() * max_delta
    }
}
