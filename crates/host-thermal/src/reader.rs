// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The two-source host temperature reader.

use crate::command::read_command;
use crate::zone::{read_zone, THERMAL_ZONE_PATH};
use crate::ThermalError;
use compensation::round2;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can report the host processor temperature once per tick.
pub trait HostTemperature {
    /// Current temperature in °C, or `None` when unavailable.
    fn read(&self) -> impl Future<Output = Option<f64>>;
}

/// Where the host temperature sources live.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThermalSettings {
    /// Firmware utility and its arguments. Empty disables the preferred source.
    pub command: Vec<String>,
    /// Thermal zone file reporting millidegrees Celsius.
    pub zone_path: PathBuf,
    /// Upper bound on the firmware utility's run time.
    pub command_timeout_ms: u64,
}

impl Default for ThermalSettings {
    fn default() -> Self {
        Self {
            command: vec!["vcgencmd".to_string(), "measure_temp".to_string()],
            zone_path: PathBuf::from(THERMAL_ZONE_PATH),
            command_timeout_ms: 2000,
        }
    }
}

/// Which source answered a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ThermalSource {
    /// The firmware utility.
    Command,
    /// The kernel thermal zone file.
    Zone,
}

impl std::fmt::Display for ThermalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThermalSource::Command => write!(f, "firmware command"),
            ThermalSource::Zone => write!(f, "thermal zone"),
        }
    }
}

/// A host temperature together with the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct HostReading {
    /// Processor temperature in °C, rounded to 2 decimals.
    pub celsius: f64,
    pub source: ThermalSource,
}

/// Reads the host processor temperature, preferring the firmware utility
/// and falling back to the thermal zone.
///
/// Every call is independent: no retries, no caching.
#[derive(Debug, Clone)]
pub struct HostThermalReader {
    command: Vec<String>,
    zone_path: PathBuf,
    command_timeout: Duration,
}

impl HostThermalReader {
    /// Creates a reader for the given sources.
    pub fn new(settings: &ThermalSettings) -> Self {
        Self {
            command: settings.command.clone(),
            zone_path: settings.zone_path.clone(),
            command_timeout: Duration::from_millis(settings.command_timeout_ms),
        }
    }

    /// Returns the host temperature in °C, or `None` when neither source
    /// produced a value.
    pub async fn read(&self) -> Option<f64> {
        self.read_with_source().await.map(|r| r.celsius)
    }

    /// Like [`read`](Self::read), also reporting which source answered.
    pub async fn read_with_source(&self) -> Option<HostReading> {
        let result = match self.attempt_command().await {
            Ok(celsius) => Ok(HostReading {
                celsius,
                source: ThermalSource::Command,
            }),
            Err(e) => {
                tracing::debug!("firmware command unavailable: {e}");
                self.attempt_zone().await.map(|celsius| HostReading {
                    celsius,
                    source: ThermalSource::Zone,
                })
            }
        };

        match result {
            Ok(reading) => Some(HostReading {
                celsius: round2(reading.celsius),
                ..reading
            }),
            Err(e) => {
                tracing::debug!("thermal zone unavailable: {e}");
                None
            }
        }
    }

    async fn attempt_command(&self) -> Result<f64, ThermalError> {
        read_command(&self.command, self.command_timeout).await
    }

    async fn attempt_zone(&self) -> Result<f64, ThermalError> {
        read_zone(&self.zone_path).await
    }
}

impl HostTemperature for HostThermalReader {
    async fn read(&self) -> Option<f64> {
        HostThermalReader::read(self).await
    }
}

impl Default for HostThermalReader {
    fn default() -> Self {
        Self::new(&ThermalSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(command: &[&str], zone: &str) -> ThermalSettings {
        ThermalSettings {
            command: command.iter().map(|s| s.to_string()).collect(),
            zone_path: PathBuf::from(zone),
            command_timeout_ms: 500,
        }
    }

    fn zone_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("envlog_reader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_prefers_command() {
        let zone = zone_file("prefer", "30000");
        let reader = HostThermalReader::new(&settings(
            &["echo", "temp=54.8'C"],
            zone.to_str().unwrap(),
        ));
        let reading = reader.read_with_source().await.unwrap();
        assert_eq!(reading.celsius, 54.8);
        assert_eq!(reading.source, ThermalSource::Command);
        let _ = std::fs::remove_file(&zone);
    }

    #[tokio::test]
    async fn test_falls_back_when_command_missing() {
        let zone = zone_file("missing_cmd", "54800\n");
        let reader = HostThermalReader::new(&settings(
            &["/nonexistent/vcgencmd", "measure_temp"],
            zone.to_str().unwrap(),
        ));
        let reading = reader.read_with_source().await.unwrap();
        assert_eq!(reading.celsius, 54.8);
        assert_eq!(reading.source, ThermalSource::Zone);
        let _ = std::fs::remove_file(&zone);
    }

    #[tokio::test]
    async fn test_falls_back_on_command_error() {
        let zone = zone_file("cmd_error", "41250");
        let reader = HostThermalReader::new(&settings(&["false"], zone.to_str().unwrap()));
        assert_eq!(reader.read().await, Some(41.25));
        let _ = std::fs::remove_file(&zone);
    }

    #[tokio::test]
    async fn test_falls_back_on_unparsable_output() {
        let zone = zone_file("cmd_garbage", "39000");
        let reader = HostThermalReader::new(&settings(
            &["echo", "VCHI initialization failed"],
            zone.to_str().unwrap(),
        ));
        assert_eq!(reader.read().await, Some(39.0));
        let _ = std::fs::remove_file(&zone);
    }

    #[tokio::test]
    async fn test_falls_back_on_timeout() {
        let zone = zone_file("cmd_hang", "50000");
        let reader = HostThermalReader::new(&settings(&["sleep", "10"], zone.to_str().unwrap()));
        let reading = reader.read_with_source().await.unwrap();
        assert_eq!(reading.source, ThermalSource::Zone);
        assert_eq!(reading.celsius, 50.0);
        let _ = std::fs::remove_file(&zone);
    }

    #[tokio::test]
    async fn test_absent_when_both_fail() {
        let reader = HostThermalReader::new(&settings(
            &["/nonexistent/vcgencmd"],
            "/nonexistent/thermal_zone0/temp",
        ));
        assert_eq!(reader.read().await, None);
    }

    #[tokio::test]
    async fn test_absent_on_unparsable_zone() {
        let zone = zone_file("zone_garbage", "warm");
        let reader = HostThermalReader::new(&settings(&[], zone.to_str().unwrap()));
        assert_eq!(reader.read().await, None);
        let _ = std::fs::remove_file(&zone);
    }

    #[tokio::test]
    async fn test_rounds_to_two_decimals() {
        let zone = zone_file("zone_round", "48312");
        let reader = HostThermalReader::new(&settings(&[], zone.to_str().unwrap()));
        assert_eq!(reader.read().await, Some(48.31));
        let _ = std::fs::remove_file(&zone);
    }

    #[test]
    fn test_default_settings() {
        let s = ThermalSettings::default();
        assert_eq!(s.command, vec!["vcgencmd", "measure_temp"]);
        assert_eq!(s.zone_path, PathBuf::from(THERMAL_ZONE_PATH));
        assert_eq!(s.command_timeout_ms, 2000);
    }
}
