use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use desk_buddy::{Config, Devices, HardwareFacade, http};
use log::{error, info};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();

    let devices = Devices::detect(&config);
    let availability = devices.availability();
    info!(
        "Hardware status - LED: {}, OLED: {}, DHT: {}",
        availability.led, availability.oled, availability.dht
    );

    let facade = Arc::new(HardwareFacade::new(devices, &config));
    info!(
        "Available emotions: {}",
        facade.leds().profile().names().join(", ")
    );
    facade.startup().await;

    let background = facade
        .start_background(config.sensor_interval())
        .context("failed to start the render thread")?;

    let served = http::serve(Arc::clone(&facade), config.bind, shutdown_signal()).await;

    background.stop();
    facade.shutdown().await;
    info!("Cleanup complete");

    served.with_context(|| format!("server on {} failed", config.bind))
}
