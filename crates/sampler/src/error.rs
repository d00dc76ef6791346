// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the sampling loop.

/// Errors that can occur while configuring or running the sampling loop.
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    /// The sensor failed to produce a sample; the tick is skipped.
    #[error("sensor read failed: {0}")]
    Sensor(#[from] env_sensor::SensorError),

    /// The sink rejected a reading or lost its connection.
    #[error("persistence failed: {0}")]
    Store(#[from] readings_store::StoreError),

    /// Invalid compensation constants.
    #[error("compensation: {0}")]
    Compensation(#[from] compensation::CompensationError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
