//! Intent channels: the eight-button abstraction shared by humans and the AI.
//!
//! A human source reports raw held buttons every tick; [`InputTracker`] turns
//! them into an [`InputFrame`] carrying both the held set and the rising edges
//! ("just pressed"). The state machine reads punch/kick/special/jump from the
//! edges and movement/crouch/block from the held set.

use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::PlayerSlot;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Intent: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        const CROUCH = 1 << 3;
        const PUNCH = 1 << 4;
        const KICK = 1 << 5;
        const BLOCK = 1 << 6;
        const SPECIAL = 1 << 7;

        /// Channels that trigger on the press edge
        const ONE_SHOT = Self::JUMP.bits()
            | Self::PUNCH.bits()
            | Self::KICK.bits()
            | Self::SPECIAL.bits();
    }
}

impl Intent {
    /// Lateral axis: -1 (left), 0, +1 (right). Left+right cancel out.
    pub fn move_axis(self) -> f32 {
        let mut axis = 0.0;
        if self.contains(Intent::LEFT) {
            axis -= 1.0;
        }
        if self.contains(Intent::RIGHT) {
            axis += 1.0;
        }
        axis
    }
}

/// What a combatant sees from its input source on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub held: Intent,
    pub pressed: Intent,
}

impl InputFrame {
    pub const NEUTRAL: InputFrame = InputFrame {
        held: Intent::empty(),
        pressed: Intent::empty(),
    };

    /// AI intent: every submitted channel counts as freshly pressed.
    pub fn from_intent(intent: Intent) -> Self {
        Self {
            held: intent,
            pressed: intent,
        }
    }

    pub fn held(&self, channel: Intent) -> bool {
        self.held.contains(channel)
    }

    pub fn pressed(&self, channel: Intent) -> bool {
        self.pressed.contains(channel)
    }
}

/// Edge detector for one human input source.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    previous: Intent,
}

impl InputTracker {
    pub fn frame(&mut self, held: Intent) -> InputFrame {
        let pressed = held & !self.previous;
        self.previous = held;
        InputFrame { held, pressed }
    }
}

/// Raw held buttons per slot, written by the host's input mapping every frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerInputs {
    pub held: [Intent; 2],
}

impl PlayerInputs {
    pub fn set(&mut self, slot: PlayerSlot, held: Intent) {
        self.held[slot.index()] = held;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_reports_rising_edge_once() {
        let mut tracker = InputTracker::default();

        let first = tracker.frame(Intent::PUNCH | Intent::RIGHT);
        assert!(first.pressed(Intent::PUNCH));
        assert!(first.held(Intent::RIGHT));

        let second = tracker.frame(Intent::PUNCH | Intent::RIGHT);
        assert!(!second.pressed(Intent::PUNCH)); // still held, no new edge
        assert!(second.held(Intent::PUNCH));

        tracker.frame(Intent::empty());
        let third = tracker.frame(Intent::PUNCH);
        assert!(third.pressed(Intent::PUNCH));
    }

    #[test]
    fn test_move_axis() {
        assert_eq!(Intent::LEFT.move_axis(), -1.0);
        assert_eq!(Intent::RIGHT.move_axis(), 1.0);
        assert_eq!((Intent::LEFT | Intent::RIGHT).move_axis(), 0.0);
        assert_eq!(Intent::empty().move_axis(), 0.0);
    }

    #[test]
    fn test_one_shot_mask() {
        let mut intent = Intent::LEFT | Intent::PUNCH | Intent::BLOCK | Intent::JUMP;
        intent.remove(Intent::ONE_SHOT);
        assert_eq!(intent, Intent::LEFT | Intent::BLOCK);
    }
}
