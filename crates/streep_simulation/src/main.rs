//! Headless Streep Fighter match
//!
//! Plays a vs-CPU match to the end without rendering. An optional TOML
//! match config path may be passed as the first argument.

use std::process::ExitCode;

use streep_simulation::{
    create_headless_app, init_logger, log_error, log_info, FightMatch, GameMode, MatchConfig,
    PlayerSlot,
};

const MAX_UPDATES: u32 = 20_000;

fn load_config() -> Result<MatchConfig, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(MatchConfig {
            mode: GameMode::VsCpu,
            ..MatchConfig::default()
        });
    };

    let source = std::fs::read_to_string(&path).map_err(|err| format!("{}: {}", path, err))?;
    MatchConfig::from_toml_str(&source).map_err(|err| format!("{}: {}", path, err))
}

fn main() -> ExitCode {
    init_logger();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Bad match config: {}", err));
            return ExitCode::FAILURE;
        }
    };
    log_info(&format!(
        "Starting headless match: {} vs {} (seed: {})",
        config.p1, config.p2, config.seed
    ));

    let mut app = match create_headless_app(config) {
        Ok(app) => app,
        Err(err) => {
            log_error(&format!("Cannot start match: {}", err));
            return ExitCode::FAILURE;
        }
    };

    for update in 0..MAX_UPDATES {
        app.update();

        let fight = app.world().resource::<FightMatch>();
        if let Some(winner) = fight.winner() {
            log_info(&format!(
                "Match complete after {} ticks: {} ({}) wins",
                fight.tick_count(),
                winner,
                fight.fighter(winner).stats().name
            ));
            return ExitCode::SUCCESS;
        }

        if update % 600 == 0 {
            let round = fight.round();
            log_info(&format!(
                "Tick {}: {:?}, round {}, {}s, P1 {} / P2 {}",
                fight.tick_count(),
                round.phase(),
                round.round_number(),
                round.display_seconds(),
                fight.fighter(PlayerSlot::P1).health().current,
                fight.fighter(PlayerSlot::P2).health().current
            ));
        }
    }

    log_error(&format!("Match did not finish within {} updates", MAX_UPDATES));
    ExitCode::FAILURE
}
