// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # compensation
//!
//! Corrects a sensor temperature for heat radiated by the host processor.
//!
//! The sensor sits close to the SoC, so its reading is modelled as a
//! weighted mix of ambient air and processor heat:
//!
//! ```text
//! corrected = raw * (1 + weight) - weight * host + offset
//! ```
//!
//! Without a host reading only the offset is applied. The result is
//! rounded to 2 decimals.

mod engine;
mod params;

pub use engine::{compensate, round2, CompensationEngine};
pub use params::{CompensationError, CompensationParameters};
