// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tick scheduling policies.
//!
//! ```text
//! fixed-delay: |work|--interval--|work|--interval--|    period = work + interval
//! fixed-rate:  |work|---|work|---|work|---|            period = interval
//! ```
//!
//! Fixed-delay is the default and drifts by the work time of every tick.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// How the wait between ticks is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schedule {
    /// Sleep for the full interval after each tick.
    #[default]
    FixedDelay,
    /// Start ticks on an interval grid; a late tick shifts the grid.
    FixedRate,
}

impl std::str::FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed-delay" | "delay" => Ok(Schedule::FixedDelay),
            "fixed-rate" | "rate" => Ok(Schedule::FixedRate),
            other => Err(format!(
                "unknown schedule '{other}'; expected 'fixed-delay' or 'fixed-rate'"
            )),
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Schedule::FixedDelay => write!(f, "fixed-delay"),
            Schedule::FixedRate => write!(f, "fixed-rate"),
        }
    }
}

/// Paces the sampling loop according to a [`Schedule`].
#[derive(Debug)]
pub(crate) enum Ticker {
    Delay { interval: Duration, first: bool },
    Rate(Interval),
}

impl Ticker {
    pub(crate) fn new(schedule: Schedule, interval: Duration) -> Self {
        match schedule {
            Schedule::FixedDelay => Ticker::Delay {
                interval,
                first: true,
            },
            Schedule::FixedRate => {
                let mut timer = tokio::time::interval_at(Instant::now(), interval);
                timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Ticker::Rate(timer)
            }
        }
    }

    /// Completes when the next tick may start. The first call returns
    /// immediately.
    pub(crate) async fn ready(&mut self) {
        match self {
            Ticker::Delay { interval, first } => {
                if *first {
                    *first = false;
                } else {
                    tokio::time::sleep(*interval).await;
                }
            }
            Ticker::Rate(timer) => {
                timer.tick().await;
            }
        }
    }
}
