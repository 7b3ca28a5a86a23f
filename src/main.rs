mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod paths;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use app::App;
use config::AppConfig;

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}; using default settings");
            AppConfig::default()
        }
    };

    if let Err(err) = logging::init(config.level_filter()) {
        eprintln!("logging disabled: {err:#}");
    }
    log::info!("starting with database {}", config.database_path().display());

    let mut desktop = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Vocab Admin"));
    match paths::webview_data_dir() {
        Ok(dir) => desktop = desktop.with_data_directory(dir),
        Err(err) => log::warn!("using default webview data directory: {err:#}"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .with_context(config)
        .launch(App);
}
