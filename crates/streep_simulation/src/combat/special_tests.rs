//! Tests for the per-character specials.

#[cfg(test)]
mod tests {
    use crate::combat::special::{StrikeTiming, MAX_STRIKES};
    use crate::combat::test_support::*;
    use crate::combat::{FighterState, ProjectileKind, SpecialKind, KNOCKBACK_SPEED};
    use crate::components::{CharacterId, InputFrame, Intent, PlayerSlot};
    use crate::events::{HitSource, SimEvent, TickOutput};

    fn special_hits(out: &TickOutput) -> usize {
        out.events
            .iter()
            .filter(|event| matches!(event, SimEvent::Hit { source: HitSource::Special, .. }))
            .count()
    }

    #[test]
    fn test_profiles_fit_activation_flags() {
        for id in CharacterId::ALL {
            let profile = id.profile().special.profile();
            assert!(profile.strikes.len() <= MAX_STRIKES, "{}", profile.name);
            assert!(profile.duration > 0.0);
            for strike in profile.strikes {
                if let StrikeTiming::Window { from, until } = strike.timing {
                    assert!(from < until);
                }
            }
        }
    }

    #[test]
    fn test_dash_slap_closes_distance_and_hits_once() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 500.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        assert_eq!(f[0].state(), FighterState::Special);

        step(&mut f, neutral(), &mut out);
        assert_eq!(f[0].velocity().x, 600.0);

        run(&mut f, 30, neutral(), &mut out);
        assert_eq!(special_hits(&out), 1);
        assert_eq!(f[1].health().current, 1000 - 150);
        assert_eq!(f[0].state(), FighterState::Idle);
        assert_eq!(f[0].velocity().x, 0.0);
        assert!(f[0].position().x > 400.0);
    }

    #[test]
    fn test_dash_slap_out_of_reach_whiffs() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 900.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        run(&mut f, 30, neutral(), &mut out);

        assert_eq!(special_hits(&out), 0);
        assert_eq!(f[1].health().current, 1000);
    }

    #[test]
    fn test_dash_slap_gets_one_reach_check() {
        let mut out = TickOutput::default();
        // Out of reach when the window opens, inside it a few ticks later
        let mut f = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::JuliaChild, 525.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        run(&mut f, 30, neutral(), &mut out);

        assert_eq!(special_hits(&out), 0);
        assert_eq!(f[1].health().current, 1000);
        assert!((f[1].position().x - f[0].position().x).abs() < 80.0, "dash closed the gap");
        assert_eq!(f[0].state(), FighterState::Idle);
    }

    #[test]
    fn test_pot_throw_launches_one_projectile() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::JuliaChild, 300.0, CharacterId::MirandaPriestly, 900.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        run(&mut f, 35, neutral(), &mut out);

        assert_eq!(out.launched.len(), 1);
        let pot = &out.launched[0];
        assert_eq!(pot.kind, ProjectileKind::Pot);
        assert_eq!(pot.owner, PlayerSlot::P1);
        assert_eq!(pot.direction, 1.0);
        assert_eq!(pot.damage, 180);
        assert_eq!(pot.position.x, 350.0);
        assert_eq!(pot.position.y, 470.0);

        // Throwers stay put
        assert_eq!(f[0].position().x, 300.0);
        assert_eq!(f[0].state(), FighterState::Idle);
        assert!(out
            .events
            .iter()
            .any(|event| matches!(event, SimEvent::ProjectileLaunched { kind: ProjectileKind::Pot, .. })));
    }

    #[test]
    fn test_curse_throw_follows_facing() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::MirandaPriestly, 300.0, CharacterId::TheWitch, 800.0);

        step(&mut f, [InputFrame::NEUTRAL, press(Intent::SPECIAL)], &mut out);
        run(&mut f, 35, neutral(), &mut out);

        assert_eq!(out.launched.len(), 1);
        let curse = &out.launched[0];
        assert_eq!(curse.kind, ProjectileKind::Curse);
        assert_eq!(curse.owner, PlayerSlot::P2);
        assert_eq!(curse.direction, -1.0);
        assert_eq!(curse.position.x, 750.0);
    }

    #[test]
    fn test_armored_strike_armor_window() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::MargaretThatcher, 300.0, CharacterId::JuliaChild, 1000.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        run(&mut f, 10, neutral(), &mut out);
        assert!(f[0].is_armored());
        assert_eq!(f[0].velocity().x, 120.0);

        // Hit mid-special: half damage, special keeps going
        f[0].take_damage(100, 1000.0, &mut out);
        assert_eq!(f[0].health().current, 1150);
        assert_eq!(f[0].state(), FighterState::Special);

        // Past 80 % of 0.7 s the armor drops
        run(&mut f, 25, neutral(), &mut out);
        assert_eq!(f[0].state(), FighterState::Special);
        assert!(!f[0].is_armored());

        run(&mut f, 10, neutral(), &mut out);
        assert_eq!(f[0].state(), FighterState::Idle);
    }

    #[test]
    fn test_armored_strike_lands() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::MargaretThatcher, 300.0, CharacterId::JuliaChild, 380.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        run(&mut f, 45, neutral(), &mut out);

        assert_eq!(special_hits(&out), 1);
        assert_eq!(f[1].health().current, 1000 - 250);
    }

    #[test]
    fn test_lunge_applies_heavy_knockback() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::SisterAloysius, 300.0, CharacterId::JuliaChild, 420.0);

        step(&mut f, [press(Intent::SPECIAL), InputFrame::NEUTRAL], &mut out);
        let mut ticks = 0;
        while special_hits(&out) == 0 && ticks < 40 {
            step(&mut f, neutral(), &mut out);
            ticks += 1;
        }

        assert_eq!(special_hits(&out), 1);
        assert_eq!(f[1].state(), FighterState::Hurt);
        assert_eq!(f[1].health().current, 1000 - 180);
        // Hurt friction has had one tick to act on it
        assert!(f[1].velocity().x > KNOCKBACK_SPEED, "vx = {}", f[1].velocity().x);
    }

    #[test]
    fn test_lunge_shoves_invincible_target() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::SisterAloysius, 300.0, CharacterId::JuliaChild, 420.0);
        f[1].invincibility = 5.0;

        let [sister, julia] = &mut f;
        sister.tick(DT, press(Intent::SPECIAL), Some(&mut *julia), &mut out);
        let mut ticks = 0;
        while julia.velocity().x == 0.0 && ticks < 40 {
            sister.tick(DT, InputFrame::NEUTRAL, Some(&mut *julia), &mut out);
            ticks += 1;
        }

        assert_eq!(Some(julia.velocity().x), SpecialKind::Lunge.profile().knockback);
        assert_eq!(julia.health().current, 1000);
        assert_eq!(julia.state(), FighterState::Idle);
        assert_eq!(special_hits(&out), 0);
    }

    #[test]
    fn test_double_spin_hits_twice_per_activation() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::DonnaSheridan, 300.0, CharacterId::JuliaChild, 360.0);
        assert_eq!(f[0].stats().special, SpecialKind::DoubleSpin);

        step(&mut f, [press(Intent::SPECIAL), press(Intent::BLOCK)], &mut out);
        run(&mut f, 40, [InputFrame::NEUTRAL, hold(Intent::BLOCK)], &mut out);

        assert_eq!(special_hits(&out), 2);
        // 130 / 2 = 65 per strike, 13 through Julia's block
        assert_eq!(f[1].health().current, 1000 - 26);
        assert_eq!(f[0].position().x, 300.0);
        assert_eq!(f[0].state(), FighterState::Idle);

        // Flags start clean on the next activation
        run(&mut f, 160, [InputFrame::NEUTRAL, hold(Intent::BLOCK)], &mut out);
        step(&mut f, [press(Intent::SPECIAL), hold(Intent::BLOCK)], &mut out);
        run(&mut f, 40, [InputFrame::NEUTRAL, hold(Intent::BLOCK)], &mut out);
        assert_eq!(special_hits(&out), 4);
    }

    #[test]
    fn test_special_without_opponent_still_finishes() {
        let mut out = TickOutput::default();
        let mut f = fighters(CharacterId::DonnaSheridan, 300.0, CharacterId::JuliaChild, 360.0);

        f[0].tick(DT, press(Intent::SPECIAL), None, &mut out);
        for _ in 0..40 {
            f[0].tick(DT, InputFrame::NEUTRAL, None, &mut out);
        }

        assert_eq!(f[0].state(), FighterState::Idle);
        assert_eq!(special_hits(&out), 0);
    }
}
