// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # env-sensor
//!
//! Temperature, humidity and pressure sources for the sampling loop.
//!
//! # Sensors
//! - [`Bme280`]: Bosch BME280 on the Raspberry Pi I²C bus.
//! - [`FakeSensor`]: fixed values, for hosts without a sensor.
//!
//! Pick one at runtime with [`SensorSettings`] and [`open`].

mod bme280;
mod error;
mod fake;
mod sample;

pub use bme280::{Bme280, Calibration, RawMeasurement, DEFAULT_ADDRESS};
pub use error::SensorError;
pub use fake::FakeSensor;
pub use sample::SensorSample;

/// A source of raw environment readings.
pub trait EnvironmentSensor {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Uncorrected temperature in °C.
    fn read_temperature(&mut self) -> Result<f64, SensorError>;

    /// Relative humidity in %.
    fn read_humidity(&mut self) -> Result<f64, SensorError>;

    /// Barometric pressure in hPa.
    fn read_pressure(&mut self) -> Result<f64, SensorError>;

    /// Reads all three quantities, rounded to 2 decimals.
    ///
    /// Any failing quantity fails the whole sample.
    fn sample(&mut self) -> Result<SensorSample, SensorError> {
        let temperature = self.read_temperature()?;
        let humidity = self.read_humidity()?;
        let pressure = self.read_pressure()?;
        Ok(SensorSample::new(temperature, humidity, pressure))
    }
}

impl<S: EnvironmentSensor + ?Sized> EnvironmentSensor for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        (**self).read_humidity()
    }

    fn read_pressure(&mut self) -> Result<f64, SensorError> {
        (**self).read_pressure()
    }

    fn sample(&mut self) -> Result<SensorSample, SensorError> {
        (**self).sample()
    }
}

/// Which sensor to open.
///
/// # TOML Format
/// ```toml
/// [sensor]
/// kind = "bme280"
/// bus = 1
/// address = 0x76
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SensorSettings {
    Bme280 {
        #[serde(default = "default_bus")]
        bus: u8,
        #[serde(default = "default_address")]
        address: u16,
    },
    Fake {
        #[serde(default = "default_fake_temperature")]
        temperature: f64,
        #[serde(default = "default_fake_humidity")]
        humidity: f64,
        #[serde(default = "default_fake_pressure")]
        pressure: f64,
    },
}

fn default_bus() -> u8 {
    1
}

fn default_address() -> u16 {
    DEFAULT_ADDRESS
}

fn default_fake_temperature() -> f64 {
    22.33
}

fn default_fake_humidity() -> f64 {
    41.10
}

fn default_fake_pressure() -> f64 {
    1006.20
}

impl Default for SensorSettings {
    fn default() -> Self {
        SensorSettings::Bme280 {
            bus: default_bus(),
            address: default_address(),
        }
    }
}

/// Opens the sensor described by `settings`.
pub fn open(settings: &SensorSettings) -> Result<Box<dyn EnvironmentSensor>, SensorError> {
    match *settings {
        SensorSettings::Bme280 { bus, address } => Ok(Box::new(Bme280::open(bus, address)?)),
        SensorSettings::Fake {
            temperature,
            humidity,
            pressure,
        } => Ok(Box::new(FakeSensor::new(temperature, humidity, pressure))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Wrapper {
        sensor: SensorSettings,
    }

    #[test]
    fn test_default_is_bme280() {
        assert_eq!(
            SensorSettings::default(),
            SensorSettings::Bme280 {
                bus: 1,
                address: 0x76
            }
        );
    }

    #[test]
    fn test_parse_bme280() {
        let w: Wrapper = toml::from_str("[sensor]\nkind = \"bme280\"\naddress = 0x77\n").unwrap();
        assert_eq!(
            w.sensor,
            SensorSettings::Bme280 {
                bus: 1,
                address: 0x77
            }
        );
    }

    #[test]
    fn test_parse_fake_with_defaults() {
        let w: Wrapper = toml::from_str("[sensor]\nkind = \"fake\"\ntemperature = 19.5\n").unwrap();
        match w.sensor {
            SensorSettings::Fake {
                temperature,
                humidity,
                pressure,
            } => {
                assert_eq!(temperature, 19.5);
                assert_eq!(humidity, 41.10);
                assert_eq!(pressure, 1006.20);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_open_fake() {
        let settings = SensorSettings::Fake {
            temperature: 20.004,
            humidity: 50.0,
            pressure: 1013.25,
        };
        let mut sensor = open(&settings).unwrap();
        assert_eq!(sensor.name(), "fake");
        let s = sensor.sample().unwrap();
        assert_eq!(s.temperature, 20.0);
        assert_eq!(s.pressure, 1013.25);
    }

    struct FailingHumidity;

    impl EnvironmentSensor for FailingHumidity {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn read_temperature(&mut self) -> Result<f64, SensorError> {
            Ok(20.0)
        }
        fn read_humidity(&mut self) -> Result<f64, SensorError> {
            Err(SensorError::InvalidData {
                quantity: "humidity",
                value: -1.0,
            })
        }
        fn read_pressure(&mut self) -> Result<f64, SensorError> {
            Ok(1000.0)
        }
    }

    #[test]
    fn test_any_failure_fails_sample() {
        let mut s = FailingHumidity;
        assert!(matches!(
            s.sample(),
            Err(SensorError::InvalidData { quantity: "humidity", .. })
        ));
    }
}
