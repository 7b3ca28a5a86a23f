use std::fs::File;

use anyhow::{Context, Result};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::paths;

/// Starts file logging into the platform cache directory.
pub fn init(level: LevelFilter) -> Result<()> {
    let path = paths::log_file().context("could not determine a cache directory for logs")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir: {}", parent.display()))?;
    }
    let log_file = File::create(&path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("failed to initialize logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
