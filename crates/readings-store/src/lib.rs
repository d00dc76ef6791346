// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # readings-store
//!
//! Persistence for corrected readings, behind two narrow traits:
//! - [`ReadingsSink`]: append-only writes, used by the sampling loop.
//! - [`ReadingsSource`]: queries, used by the reporting commands.
//!
//! # Backends
//! - [`MySqlStore`]: one long-lived MySQL/MariaDB connection that is
//!   re-established after a transient failure.
//! - [`MemoryStore`]: process-local, for dry runs and tests.
//!
//! # Expected schema
//! ```sql
//! CREATE TABLE readings (
//!     id          BIGINT AUTO_INCREMENT PRIMARY KEY,
//!     timestamp   DATETIME NOT NULL,
//!     temperature DOUBLE NOT NULL,
//!     humidity    DOUBLE NOT NULL,
//!     pressure    DOUBLE NOT NULL
//! );
//! ```
//! Creating or migrating the table is left to the operator.

mod error;
mod memory;
mod mysql;
mod reading;

use chrono::NaiveDateTime;
use std::future::Future;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use mysql::{DatabaseSettings, MySqlStore};
pub use reading::{CorrectedReading, StoredReading, TIMESTAMP_FORMAT};

/// Append-only destination for corrected readings.
pub trait ReadingsSink {
    /// Persists one reading. Durability is the sink's responsibility once
    /// this returns `Ok`.
    fn store(
        &mut self,
        reading: &CorrectedReading,
    ) -> impl Future<Output = Result<(), StoreError>>;

    /// Releases the underlying connection.
    fn close(self) -> impl Future<Output = Result<(), StoreError>>
    where
        Self: Sized;
}

/// Read access to persisted readings.
pub trait ReadingsSource {
    /// The `limit` most recent rows, newest (highest id) first.
    fn latest(
        &mut self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<StoredReading>, StoreError>>;

    /// Rows with `start <= timestamp < end`, oldest first.
    fn between(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Future<Output = Result<Vec<StoredReading>, StoreError>>;

    /// The newest row with `timestamp <= at`, if any.
    fn latest_at_or_before(
        &mut self,
        at: NaiveDateTime,
    ) -> impl Future<Output = Result<Option<StoredReading>, StoreError>>;
}
