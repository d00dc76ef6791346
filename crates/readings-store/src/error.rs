// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the readings store.

/// Errors raised by a readings sink or source.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected a statement or the connection failed.
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    /// The configured table name is not a plain identifier.
    #[error("invalid table name '{0}'")]
    InvalidTable(String),

    /// The store could not (re)establish its connection.
    #[error("not connected to {url}: {source}")]
    Disconnected {
        url: String,
        #[source]
        source: sqlx::Error,
    },
}
