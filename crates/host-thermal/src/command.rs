// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Preferred source: the firmware utility (`vcgencmd measure_temp`).
//!
//! The utility prints a line such as `temp=54.8'C`. The child process is
//! bounded by a timeout and killed if it overruns.

use crate::ThermalError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs `command` (program followed by its arguments) and parses its
/// `temp=<value>'C` output.
pub async fn read_command(command: &[String], timeout: Duration) -> Result<f64, ThermalError> {
    let (program, args) = command.split_first().ok_or(ThermalError::NoCommand)?;

    let mut child = Command::new(program);
    child
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let output = tokio::time::timeout(timeout, child.output())
        .await
        .map_err(|_| ThermalError::Timeout {
            command: program.clone(),
            timeout,
        })?
        .map_err(|e| ThermalError::Spawn {
            command: program.clone(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ThermalError::CommandFailed {
            command: program.clone(),
            status: output.status.code(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_measure_temp(stdout.trim())
}

/// Extracts the value between the last `temp=` and the following `'`.
///
/// ```
/// assert_eq!(host_thermal::parse_measure_temp("temp=54.8'C").unwrap(), 54.8);
/// ```
pub fn parse_measure_temp(output: &str) -> Result<f64, ThermalError> {
    let unexpected = || ThermalError::UnexpectedOutput {
        output: output.to_string(),
    };

    let (_, rest) = output.rsplit_once("temp=").ok_or_else(unexpected)?;
    let value = rest.split('\'').next().unwrap_or_default().trim();
    let celsius: f64 = value.parse().map_err(|_| unexpected())?;
    if !celsius.is_finite() {
        return Err(unexpected());
    }
    Ok(celsius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_typical_output() {
        assert_eq!(parse_measure_temp("temp=54.8'C").unwrap(), 54.8);
        assert_eq!(parse_measure_temp("temp=40.0'C").unwrap(), 40.0);
    }

    #[test]
    fn test_parse_without_quote() {
        assert_eq!(parse_measure_temp("temp=61.2").unwrap(), 61.2);
    }

    #[test]
    fn test_parse_uses_last_marker() {
        assert_eq!(parse_measure_temp("temp=1'C temp=47.2'C").unwrap(), 47.2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_measure_temp("error: no such command"),
            Err(ThermalError::UnexpectedOutput { .. })
        ));
        assert!(matches!(
            parse_measure_temp("temp=hot'C"),
            Err(ThermalError::UnexpectedOutput { .. })
        ));
        assert!(parse_measure_temp("").is_err());
    }

    #[tokio::test]
    async fn test_command_success() {
        let t = read_command(&cmd(&["echo", "temp=54.8'C"]), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(t, 54.8);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = read_command(
            &cmd(&["/nonexistent/bin/vcgencmd", "measure_temp"]),
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(ThermalError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_nonzero_exit() {
        let result = read_command(&cmd(&["false"]), Duration::from_secs(5)).await;
        assert!(matches!(result, Err(ThermalError::CommandFailed { .. })));
    }

    #[tokio::test]
    async fn test_hung_command_times_out() {
        let result = read_command(&cmd(&["sleep", "10"]), Duration::from_millis(100)).await;
        assert!(matches!(result, Err(ThermalError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_empty_command() {
        let result = read_command(&[], Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ThermalError::NoCommand)));
    }
}
