// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Live feed — the bounded, newest-first window of pushed log records.

use std::collections::VecDeque;

use auditdeck_core::error::{AuditDeckError, Result};
use auditdeck_core::types::LogRecord;
use serde_json::Value;
use tracing::{debug, warn};

/// Newest-first buffer of live records, capped at `capacity`.
#[derive(Debug, Clone)]
pub struct LiveFeed {
    capacity: usize,
    entries: VecDeque<LogRecord>,
}

impl LiveFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Put a record at the front, dropping the oldest beyond capacity.
    pub fn push(&mut self, record: LogRecord) {
        self.entries.push_front(record);
        self.entries.truncate(self.capacity);
    }

    /// Decode a push payload and add it to the feed.
    ///
    /// A payload that does not decode leaves the feed unchanged.
    pub fn ingest(&mut self, payload: &str) -> Result<&LogRecord> {
        let record = match decode_payload(payload) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "dropping undecodable live payload");
                return Err(e);
            }
        };
        debug!(id = record.id.as_deref().unwrap_or("-"), "live record received");
        self.push(record);
        self.entries
            .front()
            .ok_or_else(|| AuditDeckError::InvalidRecord("live feed has zero capacity".into()))
    }

    /// Replay history delivered newest first (as the archive returns it), so
    /// that the newest record ends up at the front.
    pub fn seed(&mut self, newest_first: Vec<LogRecord>) {
        for record in newest_first.into_iter().rev() {
            self.push(record);
        }
    }

    /// Records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogRecord> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Decode one push payload.
///
/// The backend emits each record already serialised, so a payload is either
/// a JSON object or a JSON string holding one.
pub fn decode_payload(payload: &str) -> Result<LogRecord> {
    let invalid = |e: serde_json::Error| AuditDeckError::InvalidRecord(e.to_string());

    let value: Value = serde_json::from_str(payload.trim()).map_err(invalid)?;
    match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(invalid),
        Value::Object(_) => serde_json::from_value(value).map_err(invalid),
        other => Err(AuditDeckError::InvalidRecord(format!(
            "expected a log object, got {other}"
        ))),
    }
}
