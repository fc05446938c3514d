use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use brick_stacker::app;
use brick_stacker::config::Settings;
use clap::Parser;
use env_logger::{Env, Target};

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(settings.log_file.as_deref())?;
    app::run(&settings)
}

// The terminal owns stdout and stderr while the game runs, so logs only go
// to an explicit file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}
