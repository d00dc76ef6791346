// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for host temperature sources.
//!
//! None of these ever reach the sampling loop: the reader folds them into
//! an absent reading. They exist so each attempt reports *why* it failed.

use std::time::Duration;

/// Reasons a single host temperature source could not produce a value.
#[derive(Debug, thiserror::Error)]
pub enum ThermalError {
    /// No firmware command is configured.
    #[error("no temperature command configured")]
    NoCommand,

    /// The command could not be started (missing or not executable).
    #[error("cannot run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The command did not finish within its time bound.
    #[error("'{command}' did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The command exited with a non-zero status.
    #[error("'{command}' exited with status {status:?}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
    },

    /// The command output has no `temp=<value>'C` reading.
    #[error("unexpected command output '{output}'")]
    UnexpectedOutput { output: String },

    /// Failed to read the thermal zone file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse a numeric value from the thermal zone file.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// The thermal zone file does not exist (container, non-Linux host).
    #[error("thermal zone not found: {path}")]
    NotAvailable { path: String },
}
