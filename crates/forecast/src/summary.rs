// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

/// Temperature statistics over one day of readings.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DailySummary {
    /// Number of readings.
    pub count: usize,
    /// Most recent temperature.
    pub latest: f64,
    pub average: f64,
    pub high: f64,
    pub low: f64,
}

impl DailySummary {
    /// Summarises temperatures given oldest first. Returns `None` for an
    /// empty day.
    pub fn from_temperatures<I>(temperatures: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut high = f64::NEG_INFINITY;
        let mut low = f64::INFINITY;
        let mut latest = None;

        for t in temperatures {
            count += 1;
            sum += t;
            high = high.max(t);
            low = low.min(t);
            latest = Some(t);
        }

        Some(Self {
            count,
            latest: latest?,
            average: sum / count as f64,
            high,
            low,
        })
    }
}
