// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The sampling loop.
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ sensor.sample() → thermal.read() → compensate → sink.store│
//!   └──────────────────────────────────────────────────────────┘
//!            ▲                                        │
//!            └──────── wait (interruptible) ◄─────────┘
//! ```
//!
//! Shutdown is only observed while waiting, so a tick that has started
//! always runs to completion.

use crate::schedule::Ticker;
use crate::{LoopStats, SamplerConfig, SamplerError};
use chrono::Local;
use compensation::CompensationEngine;
use env_sensor::EnvironmentSensor;
use host_thermal::HostTemperature;
use readings_store::{CorrectedReading, ReadingsSink};
use std::future::Future;
use tokio::time::Instant;

/// A reading that has been compensated but not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub reading: CorrectedReading,
    /// Host temperature used for compensation, if one was available.
    pub host: Option<f64>,
    /// Uncorrected sensor temperature.
    pub raw_temperature: f64,
}

/// Drives one sensor, one host thermal source and one sink.
///
/// # Example
/// ```no_run
/// use env_sensor::FakeSensor;
/// use host_thermal::HostThermalReader;
/// use readings_store::MemoryStore;
/// use sampler::{SamplerConfig, SamplingLoop};
///
/// # async fn example() -> Result<(), sampler::SamplerError> {
/// let config = SamplerConfig::default();
/// let mut sampler = SamplingLoop::new(
///     config,
///     FakeSensor::new(22.33, 41.10, 1006.20),
///     HostThermalReader::default(),
///     MemoryStore::new(),
/// )?
/// .with_max_ticks(3);
/// let stats = sampler.run(std::future::pending(), |r| println!("Inserted: {r}")).await;
/// println!("{}", stats.summary());
/// sampler.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct SamplingLoop<S, T, K> {
    config: SamplerConfig,
    engine: CompensationEngine,
    sensor: S,
    thermal: T,
    sink: K,
    max_ticks: Option<u64>,
}

impl<S, T, K> SamplingLoop<S, T, K>
where
    S: EnvironmentSensor,
    T: HostTemperature,
    K: ReadingsSink,
{
    /// Validates the configuration and takes ownership of the collaborators.
    pub fn new(config: SamplerConfig, sensor: S, thermal: T, sink: K) -> Result<Self, SamplerError> {
        config.validate()?;
        let engine = CompensationEngine::new(config.compensation);
        tracing::info!(
            "sampler created: sensor '{}', every {}s ({}), weight {}, offset {}",
            sensor.name(),
            config.interval_secs,
            config.schedule,
            config.compensation.weight,
            config.compensation.offset,
        );
        Ok(Self {
            config,
            engine,
            sensor,
            thermal,
            sink,
            max_ticks: None,
        })
    }

    /// Stops [`run`](Self::run) after `max_ticks` ticks.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Reads the sensor and host temperature and compensates, without
    /// persisting anything.
    pub async fn observe(&mut self) -> Result<Observation, SamplerError> {
        let sample = self.sensor.sample()?;
        let host = self.thermal.read().await;
        let temperature = self.engine.compensate(sample.temperature, host);
        let reading = CorrectedReading::new(
            Local::now().naive_local(),
            temperature,
            sample.humidity,
            sample.pressure,
        );
        tracing::debug!(
            "raw {}°C, host {:?}, corrected {}°C",
            sample.temperature,
            host,
            temperature
        );
        Ok(Observation {
            reading,
            host,
            raw_temperature: sample.temperature,
        })
    }

    /// One full tick: observe, then hand the reading to the sink.
    pub async fn tick(&mut self) -> Result<CorrectedReading, SamplerError> {
        let observation = self.observe().await?;
        self.sink.store(&observation.reading).await?;
        Ok(observation.reading)
    }

    /// Runs ticks until `shutdown` completes or the tick bound is reached.
    ///
    /// Sensor failures skip the tick; persistence failures drop the reading.
    /// Both are logged and counted, and the loop carries on. `on_stored` is
    /// called for every reading the sink accepted.
    pub async fn run<F, C>(&mut self, shutdown: F, mut on_stored: C) -> LoopStats
    where
        F: Future<Output = ()>,
        C: FnMut(&CorrectedReading),
    {
        tokio::pin!(shutdown);
        let mut ticker = Ticker::new(self.config.schedule, self.config.interval());
        let mut stats = LoopStats::default();

        loop {
            if self.max_ticks.is_some_and(|max| stats.ticks >= max) {
                tracing::info!("tick limit reached");
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested, stopping");
                    break;
                }
                _ = ticker.ready() => {}
            }

            let started = Instant::now();
            match self.observe().await {
                Ok(observation) => {
                    if observation.host.is_none() {
                        stats.host_unavailable += 1;
                    }
                    match self.sink.store(&observation.reading).await {
                        Ok(()) => {
                            stats.stored += 1;
                            on_stored(&observation.reading);
                        }
                        Err(e) => {
                            stats.failed_writes += 1;
                            tracing::error!(
                                "reading {} dropped: {e}",
                                observation.reading.timestamp_string()
                            );
                        }
                    }
                }
                Err(e) => {
                    stats.sensor_failures += 1;
                    tracing::warn!("tick skipped: {e}");
                }
            }
            stats.record_work(started.elapsed());
        }

        tracing::info!("{}", stats.summary());
        stats
    }

    /// Closes the sink.
    pub async fn shutdown(self) -> Result<(), SamplerError> {
        self.sink.close().await?;
        tracing::info!("sink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_sensor::FakeSensor;
    use readings_store::MemoryStore;

    struct FixedHost(Option<f64>);

    impl HostTemperature for FixedHost {
        async fn read(&self) -> Option<f64> {
            self.0
        }
    }

    fn sampler(host: Option<f64>) -> SamplingLoop<FakeSensor, FixedHost, MemoryStore> {
        SamplingLoop::new(
            SamplerConfig::default(),
            FakeSensor::new(20.0, 50.0, 1000.0),
            FixedHost(host),
            MemoryStore::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_observe_uses_host() {
        let mut s = sampler(Some(14.0));
        let obs = s.observe().await.unwrap();
        assert_eq!(obs.host, Some(14.0));
        assert_eq!(obs.raw_temperature, 20.0);
        assert_eq!(obs.reading.temperature, 18.7);
        assert!(s.sink().is_empty());
    }

    #[tokio::test]
    async fn test_tick_persists() {
        let mut s = sampler(None);
        let reading = s.tick().await.unwrap();
        assert_eq!(reading.temperature, 14.5);
        assert_eq!(s.sink().len(), 1);
        assert_eq!(s.sink().rows()[0].temperature, 14.5);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = SamplerConfig {
            interval_secs: 0,
            ..Default::default()
        };
        let result = SamplingLoop::new(
            config,
            FakeSensor::new(20.0, 50.0, 1000.0),
            FixedHost(None),
            MemoryStore::new(),
        );
        assert!(matches!(result, Err(SamplerError::ConfigError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_first_tick() {
        let mut s = sampler(None);
        let stats = s.run(std::future::ready(()), |_| {}).await;
        assert_eq!(stats.ticks, 0);
        assert!(s.sink().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_wait() {
        let mut s = sampler(None);
        let shutdown = tokio::time::sleep(std::time::Duration::from_secs(5));
        let stats = s.run(shutdown, |_| {}).await;
        // Ticks at t = 0, 2, 4; the signal at t = 5 lands in the wait.
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.stored, 3);
        assert_eq!(stats.host_unavailable, 3);
    }
}
