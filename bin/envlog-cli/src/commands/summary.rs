// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `envlog summary` command: today's temperatures and the pressure outlook.

use anyhow::Context;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime, SubsecRound};
use forecast::{DailySummary, PressureSample, PressureTrend, TrendMethod};
use readings_store::{MySqlStore, ReadingsSink, ReadingsSource, StoreError, StoredReading};
use sampler::SamplerConfig;
use std::fmt;

pub async fn execute(config: SamplerConfig) -> anyhow::Result<()> {
    let mut store = MySqlStore::connect(&config.database)
        .await
        .context("connecting to the readings database")?;
    let now = Local::now().naive_local().trunc_subsecs(0);
    let report = Report::build(&mut store, now).await?;
    print!("{report}");
    store.close().await?;
    Ok(())
}

/// Everything the summary prints.
#[derive(Debug)]
pub struct Report {
    pub current: Option<StoredReading>,
    pub today: Option<DailySummary>,
    pub trend: Option<PressureTrend>,
}

impl Report {
    pub async fn build<R: ReadingsSource>(
        source: &mut R,
        now: NaiveDateTime,
    ) -> Result<Self, StoreError> {
        let midnight = now.date().and_time(NaiveTime::MIN);
        let today = source.between(midnight, midnight + Duration::days(1)).await?;
        let summary = DailySummary::from_temperatures(today.iter().map(|r| r.temperature));
        // Only a reading from today counts as current.
        let current = today.last().copied();

        let day_ago = now - Duration::hours(24);
        let samples: Vec<PressureSample> = source
            .between(day_ago, now + Duration::seconds(1))
            .await?
            .iter()
            .map(|r| PressureSample {
                unix_secs: r.timestamp.and_utc().timestamp(),
                hpa: r.pressure,
            })
            .collect();
        let reference = source.latest_at_or_before(day_ago).await?;
        tracing::debug!(
            "{} pressure samples in the last 24 h, reference {:?}",
            samples.len(),
            reference.map(|r| r.pressure)
        );

        let trend = PressureTrend::estimate(
            &samples,
            now.and_utc().timestamp(),
            current.map(|r| r.pressure),
            reference.map(|r| r.pressure),
        );

        Ok(Self {
            current,
            today: summary,
            trend,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.today {
            Some(day) => {
                writeln!(f, "Today ({} readings):", day.count)?;
                writeln!(f, "  Latest:   {:.2} °C", day.latest)?;
                writeln!(f, "  Average:  {:.2} °C", day.average)?;
                writeln!(f, "  High:     {:.2} °C", day.high)?;
                writeln!(f, "  Low:      {:.2} °C", day.low)?;
            }
            None => writeln!(f, "Today: no readings")?,
        }

        if let Some(current) = &self.current {
            writeln!(
                f,
                "Current:  {:.2} °C, {:.2} %, {:.2} hPa at {}",
                current.temperature,
                current.humidity,
                current.pressure,
                current.timestamp.format(readings_store::TIMESTAMP_FORMAT)
            )?;
        }

        match &self.trend {
            Some(trend) => {
                let method = match trend.method {
                    TrendMethod::Regression { r_squared } => format!("regression, R² {r_squared:.2}"),
                    TrendMethod::Median => "hourly medians".to_string(),
                    TrendMethod::Reference => "reading 24 h ago".to_string(),
                };
                writeln!(f, "Pressure: {:+.2} hPa over 24 h ({method})", trend.delta_hpa)?;
                writeln!(f, "Forecast: {}", trend.outlook)
            }
            None => writeln!(f, "Forecast: not enough pressure history"),
        }
    }
}
