// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Counters collected while the loop runs.

use std::time::Duration;

/// What happened across the ticks of one run.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct LoopStats {
    /// Ticks attempted.
    pub ticks: u64,
    /// Readings accepted by the sink.
    pub stored: u64,
    /// Ticks skipped because the sensor failed.
    pub sensor_failures: u64,
    /// Readings lost because the sink failed.
    pub failed_writes: u64,
    /// Ticks compensated without a host temperature.
    pub host_unavailable: u64,
    /// Time spent reading, compensating and persisting (excludes waits).
    pub work_duration: Duration,
}

impl LoopStats {
    pub(crate) fn record_work(&mut self, work: Duration) {
        self.ticks += 1;
        self.work_duration += work;
    }

    /// Mean time per tick spent doing work.
    pub fn mean_work(&self) -> Duration {
        if self.ticks == 0 {
            return Duration::ZERO;
        }
        self.work_duration.div_f64(self.ticks as f64)
    }

    /// Returns a human-readable summary suitable for logging.
    pub fn summary(&self) -> String {
        format!(
            "Sampling: {} ticks, {} stored, {} sensor failures, {} failed writes, \
             {} without host temperature, {:.1}ms mean work",
            self.ticks,
            self.stored,
            self.sensor_failures,
            self.failed_writes,
            self.host_unavailable,
            self.mean_work().as_secs_f64() * 1000.0,
        )
    }
}
