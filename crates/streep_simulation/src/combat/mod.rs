//! Combat core: the per-fighter state machine, damage resolution,
//! per-character specials and projectiles.
//!
//! # Tick flow
//!
//! ```text
//! InputFrame (human edges or AI intent)
//!   ↓
//! Combatant::tick: timers → facing → state rules → gravity/landing → position clamp
//!   ↓ (attack window open, opponent in reach)
//! opponent.take_damage → DamageOutcome (Ignored / Armored / Blocked / Staggered / KnockedOut)
//!   ↓
//! TickOutput: Hit, HealthChanged, Died, audio cues, launched projectiles
//! ```
//!
//! Both fighters live in one registry owned by the match; a combatant only
//! stores its opponent's slot and gets `&mut` access to it for the duration
//! of its own tick.

use bevy::prelude::Vec2;

pub mod damage;
pub mod fighter;
pub mod projectile;
pub mod special;

#[cfg(test)]
mod damage_tests;
#[cfg(test)]
mod special_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use damage::DamageOutcome;
pub use fighter::{AttackKind, Combatant, Facing, FighterState, FighterView};
pub use projectile::{Projectile, ProjectileKind, ProjectileStep};
pub use special::{SpecialKind, SpecialProfile};

// ============================================================================
// Timing (seconds)
// ============================================================================

pub const PUNCH_DURATION: f32 = 0.35;
pub const KICK_DURATION: f32 = 0.40;
pub const HURT_DURATION: f32 = 0.4;
/// Granted when Hurt ends
pub const INVINCIBILITY_DURATION: f32 = 0.3;

/// Attack phases as fractions of the attack duration.
/// startup [0, ACTIVE_START), active [ACTIVE_START, ACTIVE_END), recovery [ACTIVE_END, 1)
pub const ACTIVE_START: f32 = 0.4;
pub const ACTIVE_END: f32 = 0.7;

// ============================================================================
// Physics (px, px/s, screen space with +y down)
// ============================================================================

pub const GRAVITY: f32 = 1200.0;
pub const JUMP_VELOCITY: f32 = -550.0;
/// Fraction of walk speed available while airborne
pub const AIR_CONTROL: f32 = 0.7;
pub const KNOCKBACK_SPEED: f32 = 300.0;
/// Horizontal deceleration while Hurt
pub const HURT_FRICTION: f32 = 600.0;

// ============================================================================
// Reach
// ============================================================================

pub const PUNCH_REACH: f32 = 70.0;
pub const KICK_REACH: f32 = 85.0;
/// Max vertical offset between origins for any melee or projectile hit
pub const HIT_VERTICAL_TOLERANCE: f32 = 90.0;

/// Whether `target` is inside a melee strike of `reach` thrown from `from`.
pub fn in_reach(from: Vec2, target: Vec2, reach: f32) -> bool {
    (target.x - from.x).abs() < reach && (target.y - from.y).abs() < HIT_VERTICAL_TOLERANCE
}
