//! Platform-specific directory paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "vocab";
const APPLICATION: &str = "vocab-admin";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Word database location when the config does not name one. Falls back to
/// the working directory if no home directory can be determined.
pub fn default_database() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("words.sqlite3"))
        .unwrap_or_else(|| PathBuf::from("words.sqlite3"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("vocab-admin.log"))
}

pub fn ensure_webview_data_dir(base: &Path) -> Result<PathBuf> {
    let dir = base.join("webview");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create webview dir: {}", dir.display()))?;
    Ok(dir)
}

/// WebView profile directory under the local data dir.
pub fn webview_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs().context("unable to resolve data directory")?;
    ensure_webview_data_dir(dirs.data_local_dir())
}
