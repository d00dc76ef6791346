// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fallback source: the kernel thermal zone under `/sys/class/thermal/`.
//!
//! On the Raspberry Pi, thermal zone 0 reports the SoC temperature in
//! millidegrees Celsius (`54800` means 54.8 °C).

use crate::ThermalError;
use std::path::Path;

/// Default sysfs path for the CPU thermal zone.
pub const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Reads the thermal zone at `path` and converts millidegrees to Celsius.
pub async fn read_zone(path: &Path) -> Result<f64, ThermalError> {
    let content = read_sysfs_file(path).await?;
    parse_millidegrees(&content, path)
}

/// Parses trimmed thermal zone content as millidegrees Celsius.
pub(crate) fn parse_millidegrees(content: &str, path: &Path) -> Result<f64, ThermalError> {
    let millidegrees: f64 = content.parse().map_err(|_| ThermalError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected millidegrees, got '{content}'"),
    })?;
    if !millidegrees.is_finite() {
        return Err(ThermalError::ParseError {
            path: path.display().to_string(),
            detail: format!("non-finite value '{content}'"),
        });
    }
    Ok(millidegrees / 1000.0)
}

/// Reads a sysfs file and returns its trimmed content.
async fn read_sysfs_file(path: &Path) -> Result<String, ThermalError> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => Ok(s.trim().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ThermalError::NotAvailable {
            path: path.display().to_string(),
        }),
        Err(e) => Err(ThermalError::ReadError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}
