mod app;
mod effects;
mod logging;
mod render;

use std::path::PathBuf;

use scout_client::BackendSettings;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let mut settings = BackendSettings::default();
    if let Ok(base_url) = std::env::var("SCOUT_BACKEND_URL") {
        settings.base_url = base_url;
    }
    let data_dir = match std::env::var("SCOUT_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("scout_data"),
    };

    app::run(settings, data_dir)
}
