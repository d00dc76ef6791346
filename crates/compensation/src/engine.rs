// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

use crate::CompensationParameters;

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Corrects `raw` (°C) for processor heat and applies the manual offset.
///
/// With `host` present the reading is unmixed as
/// `raw * (1 + weight) - weight * host`; without it `raw` is used as is.
/// `offset` is added in both cases and the result is rounded to 2 decimals.
///
/// Non-finite inputs propagate unchanged.
pub fn compensate(raw: f64, host: Option<f64>, weight: f64, offset: f64) -> f64 {
    let corrected = match host {
        Some(host) => raw * (1.0 + weight) - weight * host,
        None => raw,
    };
    round2(corrected + offset)
}

/// [`compensate`] bound to a fixed set of parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensationEngine {
    params: CompensationParameters,
}

impl CompensationEngine {
    pub fn new(params: CompensationParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CompensationParameters {
        &self.params
    }

    pub fn compensate(&self, raw: f64, host: Option<f64>) -> f64 {
        compensate(raw, host, self.params.weight, self.params.offset)
    }
}
