//! CPU opponent: distance-banded random policy on a slow cadence.
//!
//! Every `decision_interval` the controller looks at the opponent and picks
//! one [`AiChoice`]. In between it re-submits that intent every physics tick,
//! clearing the one-shot channels (jump/punch/kick/special) right after each
//! submission so they read as a single press.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::Combatant;
use crate::components::{InputFrame, Intent};

/// AI tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Seconds between decisions
    pub decision_interval: f32,
    /// Special is used below this distance once fully recovered
    pub special_range: f32,
    /// Beyond this the AI only approaches
    pub far_range: f32,
    /// Beyond this (and up to far) is medium range; below is close range
    pub medium_range: f32,
    /// Chance to jump while approaching from far
    pub jump_chance: f32,
    /// Medium range roll bands: [0, approach) approach, [approach, kick) kick,
    /// [kick, punch) punch, rest block-if-threatened
    pub medium_approach: f32,
    pub medium_kick: f32,
    pub medium_punch: f32,
    /// Close range roll bands: below block (and threatened) block, below punch
    /// punch, below kick kick, rest back away
    pub close_block: f32,
    pub close_punch: f32,
    pub close_kick: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            decision_interval: 0.3,
            special_range: 150.0,
            far_range: 200.0,
            medium_range: 100.0,
            jump_chance: 0.15,
            medium_approach: 0.30,
            medium_kick: 0.55,
            medium_punch: 0.80,
            close_block: 0.40,
            close_punch: 0.50,
            close_kick: 0.75,
        }
    }
}

/// What the AI sees of the fight when deciding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionView {
    /// Horizontal distance between origins
    pub distance: f32,
    pub opponent_right: bool,
    pub opponent_attacking: bool,
    pub special_ready: bool,
}

impl DecisionView {
    pub fn observe(me: &Combatant, opponent: &Combatant) -> Self {
        Self {
            distance: (me.position().x - opponent.position().x).abs(),
            opponent_right: opponent.position().x > me.position().x,
            opponent_attacking: opponent.state().is_attacking(),
            special_ready: me.special_readiness() >= 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiChoice {
    Special,
    Approach,
    ApproachJump,
    Kick,
    Punch,
    Block,
    BackAway,
    /// Nothing pressed until the next decision
    Hold,
}

impl AiChoice {
    pub fn intent(self, opponent_right: bool) -> Intent {
        let toward = if opponent_right { Intent::RIGHT } else { Intent::LEFT };
        let away = if opponent_right { Intent::LEFT } else { Intent::RIGHT };

        match self {
            AiChoice::Special => Intent::SPECIAL,
            AiChoice::Approach => toward,
            AiChoice::ApproachJump => toward | Intent::JUMP,
            AiChoice::Kick => Intent::KICK,
            AiChoice::Punch => Intent::PUNCH,
            AiChoice::Block => Intent::BLOCK,
            AiChoice::BackAway => away,
            AiChoice::Hold => Intent::empty(),
        }
    }
}

/// Picks a choice from one uniform roll in [0, 1).
pub fn choose(view: &DecisionView, roll: f32, config: &AiConfig) -> AiChoice {
    if view.special_ready && view.distance < config.special_range {
        return AiChoice::Special;
    }

    if view.distance > config.far_range {
        return if roll < config.jump_chance {
            AiChoice::ApproachJump
        } else {
            AiChoice::Approach
        };
    }

    if view.distance > config.medium_range {
        return if roll < config.medium_approach {
            AiChoice::Approach
        } else if roll < config.medium_kick {
            AiChoice::Kick
        } else if roll < config.medium_punch {
            AiChoice::Punch
        } else if view.opponent_attacking {
            AiChoice::Block
        } else {
            // Unthreatened at medium range: deliberately idle for one cadence
            AiChoice::Hold
        };
    }

    // Close range reuses the same roll for the block test and the attack bands
    if view.opponent_attacking && roll < config.close_block {
        AiChoice::Block
    } else if roll < config.close_punch {
        AiChoice::Punch
    } else if roll < config.close_kick {
        AiChoice::Kick
    } else {
        AiChoice::BackAway
    }
}

/// Drives one combatant in place of a human input source.
#[derive(Debug, Clone)]
pub struct AiController {
    config: AiConfig,
    decision_timer: f32,
    intent: Intent,
    last_choice: Option<AiChoice>,
}

impl AiController {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            decision_timer: 0.0,
            intent: Intent::empty(),
            last_choice: None,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn last_choice(&self) -> Option<AiChoice> {
        self.last_choice
    }

    /// Intent that will be submitted on the next tick.
    pub fn pending_intent(&self) -> Intent {
        self.intent
    }

    /// Produces this tick's input for `me`.
    ///
    /// Returns `None` (no input, timer frozen) while `me` is KO or has no opponent.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        me: &Combatant,
        opponent: Option<&Combatant>,
        rng: &mut R,
    ) -> Option<InputFrame> {
        let opponent = opponent?;
        if me.is_ko() {
            return None;
        }

        self.decision_timer -= dt;
        if self.decision_timer <= 0.0 {
            self.decision_timer = self.config.decision_interval;

            let view = DecisionView::observe(me, opponent);
            let roll: f32 = rng.gen();
            let choice = choose(&view, roll, &self.config);
            self.intent = choice.intent(view.opponent_right);

            if self.last_choice != Some(choice) {
                crate::log(&format!(
                    "AI {}: {:?} (distance {:.0}, roll {:.2})",
                    me.slot(),
                    choice,
                    view.distance,
                    roll
                ));
            }
            self.last_choice = Some(choice);
        }

        let frame = InputFrame::from_intent(self.intent);
        self.intent.remove(Intent::ONE_SHOT);
        Some(frame)
    }

    /// Next tick decides immediately, with nothing held.
    pub fn reset(&mut self) {
        self.decision_timer = 0.0;
        self.intent = Intent::empty();
        self.last_choice = None;
    }
}

impl Default for AiController {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}
