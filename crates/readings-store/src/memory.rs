// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-process store with auto-incrementing ids.

use crate::{CorrectedReading, ReadingsSink, ReadingsSource, StoreError, StoredReading};
use chrono::NaiveDateTime;

/// Keeps every reading in memory, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rows: Vec<StoredReading>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `rows` (ids are kept as given).
    pub fn with_rows(rows: Vec<StoredReading>) -> Self {
        Self { rows }
    }

    /// All rows, in insertion order.
    pub fn rows(&self) -> &[StoredReading] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn next_id(&self) -> i64 {
        self.rows.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

impl ReadingsSink for MemoryStore {
    async fn store(&mut self, reading: &CorrectedReading) -> Result<(), StoreError> {
        let id = self.next_id();
        self.rows.push(StoredReading::from_corrected(id, reading));
        Ok(())
    }

    async fn close(self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl ReadingsSource for MemoryStore {
    async fn latest(&mut self, limit: u32) -> Result<Vec<StoredReading>, StoreError> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn between(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<StoredReading>, StoreError> {
        let mut rows: Vec<_> = self
            .rows
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp < end)
            .copied()
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    async fn latest_at_or_before(
        &mut self,
        at: NaiveDateTime,
    ) -> Result<Option<StoredReading>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.timestamp <= at)
            .max_by_key(|r| (r.timestamp, r.id))
            .copied())
    }
}
