// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sampler configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! interval_secs = 2
//! schedule = "fixed-delay"
//!
//! [compensation]
//! weight = 0.7
//! offset = -5.5
//!
//! [thermal]
//! command = ["vcgencmd", "measure_temp"]
//! zone_path = "/sys/class/thermal/thermal_zone0/temp"
//! command_timeout_ms = 2000
//!
//! [sensor]
//! kind = "bme280"
//! address = 0x76
//!
//! [database]
//! url = "mysql://logger@localhost/sensor_data"
//! table = "readings"
//! ```

use crate::{SamplerError, Schedule};
use compensation::CompensationParameters;
use env_sensor::SensorSettings;
use host_thermal::ThermalSettings;
use readings_store::DatabaseSettings;
use std::path::Path;
use std::time::Duration;

/// Configuration for the sampling loop and its collaborators.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Wait between ticks, in seconds.
    pub interval_secs: u64,
    /// How the wait relates to the time spent in a tick.
    pub schedule: Schedule,
    pub compensation: CompensationParameters,
    pub thermal: ThermalSettings,
    pub sensor: SensorSettings,
    pub database: DatabaseSettings,
}

impl SamplerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SamplerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SamplerError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SamplerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| SamplerError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SamplerError> {
        toml::to_string_pretty(self)
            .map_err(|e| SamplerError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Rejects values the loop cannot run with.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.interval_secs == 0 {
            return Err(SamplerError::ConfigError(
                "interval_secs must be at least 1".to_string(),
            ));
        }
        if self.thermal.command_timeout_ms == 0 {
            return Err(SamplerError::ConfigError(
                "thermal.command_timeout_ms must be positive".to_string(),
            ));
        }
        self.compensation.validate()?;
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            schedule: Schedule::default(),
            compensation: CompensationParameters::default(),
            thermal: ThermalSettings::default(),
            sensor: SensorSettings::default(),
            database: DatabaseSettings::default(),
        }
    }
}
