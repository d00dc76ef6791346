// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # forecast
//!
//! Derived views over persisted readings:
//! - [`DailySummary`]: latest, average, high and low temperature of a day.
//! - [`PressureTrend`]: the 24-hour pressure change and the resulting
//!   [`Outlook`] (rising pressure → clear, falling → possible rain).

mod summary;
mod trend;

pub use summary::DailySummary;
pub use trend::{median, Outlook, PressureSample, PressureTrend, TrendMethod};
