// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

use chrono::{NaiveDateTime, SubsecRound};

/// Wire format of the `timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A compensated reading ready to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CorrectedReading {
    /// Local wall-clock time of the tick, truncated to the second.
    pub timestamp: NaiveDateTime,
    /// Corrected temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Barometric pressure in hPa.
    pub pressure: f64,
}

impl CorrectedReading {
    pub fn new(timestamp: NaiveDateTime, temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            temperature,
            humidity,
            pressure,
        }
    }

    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl std::fmt::Display for CorrectedReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}°C, {}%, {} hPa",
            self.timestamp_string(),
            self.temperature,
            self.humidity,
            self.pressure
        )
    }
}

/// A persisted reading with its generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StoredReading {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl StoredReading {
    pub fn from_corrected(id: i64, reading: &CorrectedReading) -> Self {
        Self {
            id,
            timestamp: reading.timestamp,
            temperature: reading.temperature,
            humidity: reading.humidity,
            pressure: reading.pressure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 26)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn test_truncates_to_second() {
        let r = CorrectedReading::new(at(18, 45, 7, 930), 16.83, 41.1, 1006.2);
        assert_eq!(r.timestamp, at(18, 45, 7, 0));
        assert_eq!(r.timestamp_string(), "2025-03-26 18:45:07");
    }

    #[test]
    fn test_display_matches_confirmation_line() {
        let r = CorrectedReading::new(at(9, 0, 0, 0), 16.83, 41.1, 1006.2);
        assert_eq!(r.to_string(), "2025-03-26 09:00:00, 16.83°C, 41.1%, 1006.2 hPa");
    }
}
