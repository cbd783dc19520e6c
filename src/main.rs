//! Arena Shooter entry point
//!
//! Sets up logging and hands control to the window's event loop.

use anyhow::Context;

use arena_shooter::Settings;
use arena_shooter::platform;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::default();
    let seed: u64 = rand::random();
    log::info!("Arena Shooter starting...");

    platform::run(settings, seed).context("arena shut down with an error")?;
    Ok(())
}
