//! Damage resolution, shared by melee attacks, specials and projectiles.
//!
//! Check order on the defender: KO → invincibility → armor → block → full hit.
//! Whatever branch is taken, health reaching 0 forces KO and signals the
//! death exactly once.

use super::fighter::{Combatant, FighterState};
use super::KNOCKBACK_SPEED;
use crate::events::{AudioCue, SimEvent, TickOutput};

/// How an incoming hit was resolved. `dealt` is the health actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Defender was KO or invincible
    Ignored,
    /// Armor halved the hit; no stagger
    Armored { dealt: u32 },
    Blocked { dealt: u32 },
    /// Full damage, defender is now Hurt and knocked back
    Staggered { dealt: u32 },
    KnockedOut { dealt: u32 },
}

impl DamageOutcome {
    pub fn dealt(self) -> u32 {
        match self {
            DamageOutcome::Ignored => 0,
            DamageOutcome::Armored { dealt }
            | DamageOutcome::Blocked { dealt }
            | DamageOutcome::Staggered { dealt }
            | DamageOutcome::KnockedOut { dealt } => dealt,
        }
    }

    pub fn connected(self) -> bool {
        self != DamageOutcome::Ignored
    }
}

impl Combatant {
    /// Resolves `amount` raw damage thrown by an attacker standing at `attacker_x`.
    pub fn take_damage(&mut self, amount: u32, attacker_x: f32, out: &mut TickOutput) -> DamageOutcome {
        if self.state == FighterState::Ko || self.invincibility > 0.0 {
            return DamageOutcome::Ignored;
        }

        if self.special.armor {
            let dealt = amount / 2;
            if self.lose_health(dealt, out) {
                return DamageOutcome::KnockedOut { dealt };
            }
            return DamageOutcome::Armored { dealt };
        }

        if self.state == FighterState::Block {
            let dealt = self.stats.blocked_damage(amount);
            if self.lose_health(dealt, out) {
                return DamageOutcome::KnockedOut { dealt };
            }
            out.cue(self.slot, AudioCue::BlockHit);
            return DamageOutcome::Blocked { dealt };
        }

        if self.lose_health(amount, out) {
            return DamageOutcome::KnockedOut { dealt: amount };
        }

        out.cue(self.slot, AudioCue::Hurt);
        self.change_state(FighterState::Hurt, out);
        let away = if attacker_x < self.position.x { 1.0 } else { -1.0 };
        self.velocity.x = away * KNOCKBACK_SPEED;

        DamageOutcome::Staggered { dealt: amount }
    }

    /// Applies the loss and reports it. Returns true if this knocked the fighter out.
    fn lose_health(&mut self, amount: u32, out: &mut TickOutput) -> bool {
        self.health.take_damage(amount);
        out.push(SimEvent::HealthChanged {
            slot: self.slot,
            current: self.health.current,
            max: self.health.max,
        });

        if self.health.is_alive() {
            return false;
        }
        self.knock_out(out);
        true
    }

    fn knock_out(&mut self, out: &mut TickOutput) {
        if self.state == FighterState::Ko {
            return;
        }

        out.cue(self.slot, AudioCue::Ko);
        self.enter_state(FighterState::Ko, out);
        self.velocity = bevy::prelude::Vec2::ZERO;
        out.push(SimEvent::Died { slot: self.slot });

        crate::log_info(&format!("{} ({}) knocked out", self.slot, self.stats.name));
    }
}
