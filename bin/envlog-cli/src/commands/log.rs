// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `envlog log` command: the long-running logger.
//!
//! Runs until SIGINT or SIGTERM. The signal is only honoured between
//! ticks, then the database connection is closed.

use anyhow::Context;
use env_sensor::EnvironmentSensor;
use host_thermal::HostThermalReader;
use readings_store::{MemoryStore, MySqlStore, ReadingsSink};
use sampler::{SamplerConfig, SamplingLoop};

pub async fn execute(
    config: SamplerConfig,
    dry_run: bool,
    max_ticks: Option<u64>,
) -> anyhow::Result<()> {
    let sensor = env_sensor::open(&config.sensor).context("opening sensor")?;
    let thermal = HostThermalReader::new(&config.thermal);

    if dry_run {
        tracing::info!("dry run: readings are kept in memory");
        let stored = run(config, sensor, thermal, MemoryStore::new(), max_ticks).await?;
        println!("Dry run finished: {stored} readings");
        return Ok(());
    }

    let store = MySqlStore::connect(&config.database)
        .await
        .context("connecting to the readings database")?;
    run(config, sensor, thermal, store, max_ticks).await?;
    Ok(())
}

async fn run<S, K>(
    config: SamplerConfig,
    sensor: S,
    thermal: HostThermalReader,
    sink: K,
    max_ticks: Option<u64>,
) -> anyhow::Result<u64>
where
    S: EnvironmentSensor,
    K: ReadingsSink,
{
    let mut sampler = SamplingLoop::new(config, sensor, thermal, sink)?;
    if let Some(max_ticks) = max_ticks {
        sampler = sampler.with_max_ticks(max_ticks);
    }

    let stats = sampler
        .run(shutdown_signal(), |reading| println!("Inserted: {reading}"))
        .await;
    sampler.shutdown().await?;

    if stats.failed_writes > 0 {
        tracing::warn!("{} readings could not be persisted", stats.failed_writes);
    }
    Ok(stats.stored)
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
