//! Tests for damage resolution.

#[cfg(test)]
mod tests {
    use crate::combat::test_support::*;
    use crate::combat::{DamageOutcome, FighterState, KNOCKBACK_SPEED};
    use crate::components::{CharacterId, PlayerSlot};
    use crate::events::{AudioCue, SimEvent, TickOutput};

    #[test]
    fn test_full_hit_staggers_away_from_attacker() {
        let mut out = TickOutput::default();
        let [_, mut julia] = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 600.0);

        let outcome = julia.take_damage(100, 300.0, &mut out);
        assert_eq!(outcome, DamageOutcome::Staggered { dealt: 100 });
        assert_eq!(julia.health().current, 900);
        assert_eq!(julia.state(), FighterState::Hurt);
        assert_eq!(julia.velocity().x, KNOCKBACK_SPEED);
        assert_eq!(count_cues(&out, AudioCue::Hurt), 1);

        // Attacker on the right pushes to the left
        let [_, mut julia] = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 600.0);
        julia.take_damage(100, 700.0, &mut out);
        assert_eq!(julia.velocity().x, -KNOCKBACK_SPEED);
    }

    #[test]
    fn test_block_takes_reduced_damage_without_stagger() {
        let mut out = TickOutput::default();
        let [mut miranda, _] = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 600.0);
        miranda.change_state(FighterState::Block, &mut out);

        let outcome = miranda.take_damage(100, 600.0, &mut out);
        assert_eq!(outcome, DamageOutcome::Blocked { dealt: 20 });
        assert_eq!(miranda.health().current, 980);
        assert_eq!(miranda.state(), FighterState::Block);
        assert_eq!(miranda.velocity().x, 0.0);
        assert_eq!(count_cues(&out, AudioCue::BlockHit), 1);
        assert_eq!(count_cues(&out, AudioCue::Hurt), 0);
    }

    #[test]
    fn test_armor_halves_and_skips_stagger() {
        let mut out = TickOutput::default();
        let [mut thatcher, _] = fighters(CharacterId::MargaretThatcher, 300.0, CharacterId::JuliaChild, 600.0);
        thatcher.change_state(FighterState::Special, &mut out);
        assert!(thatcher.is_armored());

        let outcome = thatcher.take_damage(100, 600.0, &mut out);
        assert_eq!(outcome, DamageOutcome::Armored { dealt: 50 });
        assert_eq!(thatcher.health().current, 1150);
        assert_eq!(thatcher.state(), FighterState::Special);

        // Odd amounts truncate
        thatcher.take_damage(85, 600.0, &mut out);
        assert_eq!(thatcher.health().current, 1150 - 42);
    }

    #[test]
    fn test_invincible_defender_ignores_damage() {
        let mut out = TickOutput::default();
        let [_, mut julia] = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 600.0);
        julia.invincibility = 0.1;

        assert_eq!(julia.take_damage(500, 300.0, &mut out), DamageOutcome::Ignored);
        assert_eq!(julia.health().current, 1000);
        assert!(out.events.is_empty(), "no health change is reported");
    }

    #[test]
    fn test_health_changed_on_every_mutation() {
        let mut out = TickOutput::default();
        let [_, mut witch] = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::TheWitch, 600.0);

        witch.take_damage(80, 300.0, &mut out);
        witch.invincibility = 0.0;
        witch.take_damage(100, 300.0, &mut out);

        let changes: Vec<_> = out
            .events
            .iter()
            .filter_map(|event| match event {
                SimEvent::HealthChanged { slot, current, max } => Some((*slot, *current, *max)),
                _ => None,
            })
            .collect();
        assert_eq!(
            changes,
            vec![(PlayerSlot::P2, 820, 900), (PlayerSlot::P2, 720, 900)]
        );
    }

    #[test]
    fn test_lethal_hit_knocks_out_exactly_once() {
        let mut out = TickOutput::default();
        let [_, mut witch] = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::TheWitch, 600.0);
        witch.take_damage(850, 300.0, &mut out);
        witch.invincibility = 0.0;
        witch.state = FighterState::Idle;

        let outcome = witch.take_damage(100, 300.0, &mut out);
        assert_eq!(outcome, DamageOutcome::KnockedOut { dealt: 100 });
        assert_eq!(witch.health().current, 0);
        assert_eq!(witch.state(), FighterState::Ko);
        assert_eq!(witch.velocity().x, 0.0, "no knockback on a KO");
        assert_eq!(count_deaths(&out), 1);

        assert_eq!(witch.take_damage(100, 300.0, &mut out), DamageOutcome::Ignored);
        assert_eq!(count_deaths(&out), 1);
        assert_eq!(count_cues(&out, AudioCue::Ko), 1);
    }

    #[test]
    fn test_blocked_and_armored_hits_can_still_kill() {
        let mut out = TickOutput::default();
        let [mut miranda, mut julia] =
            fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 600.0);

        miranda.health.current = 10;
        miranda.change_state(FighterState::Block, &mut out);
        assert_eq!(
            miranda.take_damage(100, 600.0, &mut out),
            DamageOutcome::KnockedOut { dealt: 20 }
        );
        assert!(miranda.is_ko());

        julia.health.current = 30;
        julia.special.armor = true;
        assert_eq!(
            julia.take_damage(100, 300.0, &mut out),
            DamageOutcome::KnockedOut { dealt: 50 }
        );
        assert!(julia.is_ko());
        assert!(!julia.is_armored(), "KO entry clears the special flags");
        assert_eq!(count_deaths(&out), 2);
    }
}
