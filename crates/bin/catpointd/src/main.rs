//! # catpointd
//!
//! Composition root that wires all adapters together and runs the panel.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize `tracing` logging
//! - Construct the status store and image classifier (adapters)
//! - Construct the security service, injecting adapters via port traits
//! - Register startup sensors and apply the initial arming status
//! - Drain the simulated feed into the service until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;
mod listener;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use catpoint_adapter_storage_memory::InMemoryStatusStore;
use catpoint_adapter_virtual::{FakeImageClassifier, SimulatedEvent, VirtualFeed};
use catpoint_app::services::security_service::SecurityService;

use crate::config::Config;
use crate::listener::TracingStatusListener;

type Panel = SecurityService<InMemoryStatusStore, FakeImageClassifier>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter `{}`", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut panel = SecurityService::new(InMemoryStatusStore::new(), FakeImageClassifier::new());
    panel.add_status_listener(Arc::new(TracingStatusListener));

    for sensor in config.startup_sensors()? {
        tracing::info!(
            name = %sensor.name,
            sensor_type = %sensor.sensor_type,
            "registering sensor"
        );
        panel.add_sensor(sensor)?;
    }
    panel
        .set_arming_status(config.security.initial_arming)
        .context("failed to apply initial arming status")?;
    tracing::info!(
        arming = %config.security.initial_arming,
        description = config.security.initial_arming.description(),
        "panel ready"
    );

    if config.simulation.enabled {
        run_simulation(&mut panel, &config).await?;
    } else {
        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown requested");
    }

    tracing::info!(
        arming = %panel.arming_status()?,
        alarm = %panel.alarm_status()?,
        "panel stopped"
    );
    Ok(())
}

async fn run_simulation(panel: &mut Panel, config: &Config) -> anyhow::Result<()> {
    let sensor_ids = panel.sensors()?.iter().map(|sensor| sensor.id).collect();
    let feed = VirtualFeed::new(sensor_ids, config.simulation.frame_every);
    let (sender, mut receiver) = mpsc::channel::<SimulatedEvent>(64);
    let period = Duration::from_millis(config.simulation.tick_ms);
    let feed_task = tokio::spawn(feed.run(sender, period));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = receiver.recv() => {
                let Some(event) = event else { break };
                if let Err(err) = event.apply(panel) {
                    tracing::error!(error = %err, "failed to apply simulated event");
                }
            }
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    drop(receiver);
    feed_task
        .await
        .context("simulated feed task panicked")?
        .context("simulated feed failed")?;
    Ok(())
}
