// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

use compensation::round2;

/// One raw reading of the environment sensor, rounded to 2 decimals on
/// receipt. Consumed within the tick that produced it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SensorSample {
    /// Uncorrected temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Barometric pressure in hPa.
    pub pressure: f64,
}

impl SensorSample {
    /// Builds a sample, rounding each quantity to 2 decimals.
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature: round2(temperature),
            humidity: round2(humidity),
            pressure: round2(pressure),
        }
    }
}
