// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Process-wide compensation constants.

/// Invalid compensation constants.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CompensationError {
    #[error("weight must be a finite, non-negative number, got {0}")]
    InvalidWeight(f64),

    #[error("offset must be finite, got {0}")]
    InvalidOffset(f64),
}

/// Weight of processor heat in the raw reading and a manual calibration
/// offset in °C. Loaded once at startup and never changed.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompensationParameters {
    /// Relative influence of processor heat (dimensionless).
    pub weight: f64,
    /// Environment-specific correction added to every reading (°C).
    pub offset: f64,
}

impl CompensationParameters {
    pub const DEFAULT_WEIGHT: f64 = 0.7;
    pub const DEFAULT_OFFSET: f64 = -5.5;

    pub fn new(weight: f64, offset: f64) -> Self {
        Self { weight, offset }
    }

    /// Checks that both constants are usable.
    pub fn validate(&self) -> Result<(), CompensationError> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(CompensationError::InvalidWeight(self.weight));
        }
        if !self.offset.is_finite() {
            return Err(CompensationError::InvalidOffset(self.offset));
        }
        Ok(())
    }
}

impl Default for CompensationParameters {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WEIGHT, Self::DEFAULT_OFFSET)
    }
}
