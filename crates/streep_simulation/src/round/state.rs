//! Round bookkeeping: win tally, round clock and the phase machine.
//!
//! ```text
//! Setup → Announcing(RoundCall) → Announcing(FightCall) → Fighting
//!   → Resolving(Result) ─┬→ Resolving(Victory) → MatchOver
//!                        └→ Resolving(Intermission) → Setup
//! ```

use crate::components::PlayerSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceStep {
    /// "ROUND n"
    RoundCall,
    /// "FIGHT!"
    FightCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// KO / TIME shown, round already awarded
    Result,
    /// Match decided, short hold before the victory screen
    Victory,
    /// Pause before the next round's setup
    Intermission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Setup,
    Announcing(AnnounceStep),
    Fighting,
    Resolving(ResolveStep),
    MatchOver,
}

impl RoundPhase {
    /// Whether `next` may directly follow `self`.
    pub fn can_advance_to(self, next: RoundPhase) -> bool {
        use AnnounceStep::*;
        use ResolveStep::*;
        use RoundPhase::*;

        matches!(
            (self, next),
            (Setup, Announcing(RoundCall))
                | (Announcing(RoundCall), Announcing(FightCall))
                | (Announcing(FightCall), Fighting)
                | (Fighting, Resolving(Result))
                | (Resolving(Result), Resolving(Victory))
                | (Resolving(Result), Resolving(Intermission))
                | (Resolving(Victory), MatchOver)
                | (Resolving(Intermission), Setup)
        )
    }

    /// Fighters only tick while fighting or while the result is on screen.
    pub fn fighters_active(self) -> bool {
        matches!(self, RoundPhase::Fighting | RoundPhase::Resolving(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEndReason {
    Knockout { loser: PlayerSlot },
    Timeout,
}

/// Big on-screen text, for the HUD collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    Round(u32),
    Fight,
    Ko,
    Time,
    Victory { winner: PlayerSlot },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub p1_wins: u32,
    pub p2_wins: u32,
    /// Seconds left in the current round
    pub round_timer: f32,
    phase: RoundPhase,
    /// Seconds spent in the current phase
    phase_elapsed: f32,
    rounds_to_win: u32,
}

impl RoundState {
    pub fn new(rounds_to_win: u32, round_time: f32) -> Self {
        Self {
            p1_wins: 0,
            p2_wins: 0,
            round_timer: round_time,
            phase: RoundPhase::Setup,
            phase_elapsed: 0.0,
            rounds_to_win,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn phase_elapsed(&self) -> f32 {
        self.phase_elapsed
    }

    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    pub fn wins(&self, slot: PlayerSlot) -> u32 {
        match slot {
            PlayerSlot::P1 => self.p1_wins,
            PlayerSlot::P2 => self.p2_wins,
        }
    }

    /// Number of the round being played (or about to be).
    pub fn round_number(&self) -> u32 {
        self.p1_wins + self.p2_wins + 1
    }

    /// Whole seconds for the HUD clock.
    pub fn display_seconds(&self) -> u32 {
        self.round_timer.max(0.0).ceil() as u32
    }

    pub fn match_winner(&self) -> Option<PlayerSlot> {
        if self.p1_wins >= self.rounds_to_win {
            Some(PlayerSlot::P1)
        } else if self.p2_wins >= self.rounds_to_win {
            Some(PlayerSlot::P2)
        } else {
            None
        }
    }

    pub fn award(&mut self, winner: PlayerSlot) {
        match winner {
            PlayerSlot::P1 => self.p1_wins += 1,
            PlayerSlot::P2 => self.p2_wins += 1,
        }
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.phase_elapsed += dt;
    }

    /// Moves to `next` if it directly follows the current phase.
    pub fn enter(&mut self, next: RoundPhase) -> bool {
        if !self.phase.can_advance_to(next) {
            crate::log_error(&format!(
                "Round: rejected phase change {:?} -> {:?}",
                self.phase, next
            ));
            return false;
        }
        self.phase = next;
        self.phase_elapsed = 0.0;
        true
    }

    /// Back to round 1, wins cleared.
    pub fn reset(&mut self, round_time: f32) {
        self.p1_wins = 0;
        self.p2_wins = 0;
        self.round_timer = round_time;
        self.phase = RoundPhase::Setup;
        self.phase_elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_strict() {
        let mut round = RoundState::new(2, 90.0);
        assert!(!round.enter(RoundPhase::Fighting), "cannot skip the announcements");
        assert_eq!(round.phase(), RoundPhase::Setup);

        assert!(round.enter(RoundPhase::Announcing(AnnounceStep::RoundCall)));
        assert!(!round.enter(RoundPhase::Fighting));
        assert!(round.enter(RoundPhase::Announcing(AnnounceStep::FightCall)));
        assert!(round.enter(RoundPhase::Fighting));
        assert!(!round.enter(RoundPhase::MatchOver));
        assert!(round.enter(RoundPhase::Resolving(ResolveStep::Result)));
        assert!(round.enter(RoundPhase::Resolving(ResolveStep::Intermission)));
        assert!(round.enter(RoundPhase::Setup));
    }

    #[test]
    fn test_fighters_only_active_while_fighting_or_resolving() {
        assert!(RoundPhase::Fighting.fighters_active());
        assert!(RoundPhase::Resolving(ResolveStep::Result).fighters_active());
        assert!(RoundPhase::Resolving(ResolveStep::Intermission).fighters_active());
        assert!(!RoundPhase::Setup.fighters_active());
        assert!(!RoundPhase::Announcing(AnnounceStep::RoundCall).fighters_active());
        assert!(!RoundPhase::Announcing(AnnounceStep::FightCall).fighters_active());
        assert!(!RoundPhase::MatchOver.fighters_active());
    }

    #[test]
    fn test_match_winner_needs_rounds_to_win() {
        let mut round = RoundState::new(2, 90.0);
        round.award(PlayerSlot::P1);
        assert_eq!(round.match_winner(), None);
        assert_eq!(round.round_number(), 2);

        round.award(PlayerSlot::P2);
        round.award(PlayerSlot::P2);
        assert_eq!(round.match_winner(), Some(PlayerSlot::P2));
        assert_eq!(round.wins(PlayerSlot::P2), 2);

        round.reset(90.0);
        assert_eq!(round.round_number(), 1);
        assert_eq!(round.match_winner(), None);
    }

    #[test]
    fn test_display_seconds_rounds_up() {
        let mut round = RoundState::new(2, 90.0);
        assert_eq!(round.display_seconds(), 90);
        round.round_timer = 89.01;
        assert_eq!(round.display_seconds(), 90);
        round.round_timer = 0.2;
        assert_eq!(round.display_seconds(), 1);
        round.round_timer = -0.01;
        assert_eq!(round.display_seconds(), 0);
    }
}
