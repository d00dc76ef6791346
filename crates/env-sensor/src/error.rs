// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for environment sensors.

/// Errors raised while opening or reading an environment sensor.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The I²C bus could not be opened or a transfer failed.
    #[error("i2c: {0}")]
    I2c(#[from] rppal::i2c::Error),

    /// The device at the configured address is not the expected chip.
    #[error("unexpected chip id 0x{found:02x} at address 0x{address:02x} (expected 0x{expected:02x})")]
    WrongChip { address: u16, expected: u8, found: u8 },

    /// The device returned a value outside its physical range.
    #[error("invalid {quantity} reading: {value}")]
    InvalidData { quantity: &'static str, value: f64 },
}
