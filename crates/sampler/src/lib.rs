// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # sampler
//!
//! The periodic sampling loop that ties the other crates together.
//!
//! Each tick:
//! 1. Reads a [`SensorSample`](env_sensor::SensorSample) from the sensor.
//! 2. Reads the host processor temperature, if any source answers.
//! 3. Compensates the raw temperature for host heat.
//! 4. Stamps the result with local wall-clock time and hands it to the sink.
//!
//! Nothing is carried from one tick to the next.
//!
//! # Scheduling
//! [`Schedule::FixedDelay`] (the default) waits the full interval after
//! every tick; [`Schedule::FixedRate`] keeps ticks on an interval grid.

mod config;
mod error;
mod sampling;
mod schedule;
mod stats;

pub use config::SamplerConfig;
pub use error::SamplerError;
pub use sampling::{Observation, SamplingLoop};
pub use schedule::Schedule;
pub use stats::LoopStats;
