// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

use crate::{EnvironmentSensor, SensorError};

/// A sensor that always reports the same values.
///
/// Useful on development hosts without an I²C bus.
#[derive(Debug, Clone)]
pub struct FakeSensor {
    temperature: f64,
    humidity: f64,
    pressure: f64,
}

impl FakeSensor {
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        tracing::debug!("using fake sensor ({temperature} °C, {humidity} %, {pressure} hPa)");
        Self {
            temperature,
            humidity,
            pressure,
        }
    }
}

impl EnvironmentSensor for FakeSensor {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        Ok(self.temperature)
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        Ok(self.humidity)
    }

    fn read_pressure(&mut self) -> Result<f64, SensorError> {
        Ok(self.pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample() {
        let mut s = FakeSensor::new(22.33, 41.10, 1006.20);
        let sample = s.sample().unwrap();
        assert_eq!(sample.temperature, 22.33);
        assert_eq!(sample.humidity, 41.1);
        assert_eq!(sample.pressure, 1006.2);
        assert_eq!(s.name(), "fake");
    }
}
