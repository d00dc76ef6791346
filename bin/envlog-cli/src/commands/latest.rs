// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `envlog latest` command: print the newest rows as a table.

use anyhow::Context;
use readings_store::{MySqlStore, ReadingsSink, ReadingsSource, StoredReading};
use sampler::SamplerConfig;
use std::fmt;

const RULE_WIDTH: usize = 70;

pub async fn execute(config: SamplerConfig, limit: u32) -> anyhow::Result<()> {
    let mut store = MySqlStore::connect(&config.database)
        .await
        .context("connecting to the readings database")?;
    let rows = store.latest(limit).await?;
    print!("{}", ReadingsTable(&rows));
    store.close().await?;
    Ok(())
}

/// Rows under the `Latest Sensor Readings:` banner, fixed-width columns.
pub struct ReadingsTable<'a>(pub &'a [StoredReading]);

impl fmt::Display for ReadingsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(f, "Latest Sensor Readings:")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<5}{:<20}{:<10}{:<12}{:<12}",
            "ID", "Timestamp", "Temp(°C)", "Humidity(%)", "Pressure(hPa)"
        )?;
        writeln!(f, "{rule}")?;
        for row in self.0 {
            writeln!(
                f,
                "{:<5}{:<20}{:<10.2}{:<12.2}{:<12.2}",
                row.id,
                row.timestamp.format(readings_store::TIMESTAMP_FORMAT).to_string(),
                row.temperature,
                row.humidity,
                row.pressure,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: i64, temperature: f64) -> StoredReading {
        StoredReading {
            id,
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap(),
            temperature,
            humidity: 41.1,
            pressure: 1006.2,
        }
    }

    #[test]
    fn test_header() {
        let table = ReadingsTable(&[]).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Latest Sensor Readings:");
        assert_eq!(lines[1], "-".repeat(70));
        assert_eq!(
            lines[2],
            "ID   Timestamp           Temp(°C)  Humidity(%) Pressure(hPa)"
        );
        assert_eq!(lines[3], lines[1]);
    }

    #[test]
    fn test_rows_fixed_width() {
        let table = ReadingsTable(&[row(12, 16.83), row(11, -3.5)]).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[4],
            "12   2025-03-10 14:05:09 16.83     41.10       1006.20     "
        );
        assert!(lines[5].starts_with("11   2025-03-10 14:05:09 -3.50     "));
        assert_eq!(lines[4].chars().count(), 5 + 20 + 10 + 12 + 12);
    }
}
