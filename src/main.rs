use anyhow::Context;
use sdmm::session::Session;
use sdmm::{init_event_bus, init_logging, Config, BUILD_DATE, VERSION};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // An explicit path must exist; anything missing at the default location means defaults
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_from_default_location()?,
    };

    init_logging(&config.logging)?;
    tracing::info!("SDMM {} (built {})", VERSION, BUILD_DATE);

    let bus = init_event_bus(config.bus.clone())?;
    let session = Session::new(bus);
    let report = session.run_headless()?;

    tracing::info!(?report, "Headless session finished");
    Ok(())
}
