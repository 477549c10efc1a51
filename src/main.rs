//! Repel headless entry point
//!
//! Runs a session without a window: the player stays at the centre of the
//! world and optionally flips its pull on a fixed cadence.
//!
//! Usage: `repel [settings.json]`

use std::process::ExitCode;

use repel::{Session, SessionError, Settings, StepOutcome, TickInput};

fn run(settings: &Settings) -> Result<(), SessionError> {
    let mut session = Session::new(settings)?;

    for frame in 1..=settings.frames {
        let input = TickInput {
            toggle_pull: settings.toggle_every != 0 && frame % settings.toggle_every == 0,
            ..Default::default()
        };

        if session.step(&input) == StepOutcome::PlayerLost {
            break;
        }
    }

    let world = session.world();
    match session.player() {
        Some(player) => log::info!(
            "Survived {} frames ({} bullets in play, pull {})",
            session.frame(),
            world.live_bullets().count(),
            player.pull
        ),
        None => log::info!(
            "Player destroyed after {} frames ({} bullets in play)",
            session.frame(),
            world.live_bullets().count()
        ),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Repel (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
