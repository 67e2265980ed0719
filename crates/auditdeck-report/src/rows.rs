// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display rows — one record projected onto the columns of the log tables.

use auditdeck_core::types::{LogRecord, NOT_AVAILABLE, StatusClass};
use auditdeck_translate::translate;
use serde::Serialize;

use crate::directory::UserDirectory;

const INVALID_DATE: &str = "Invalid Date";

/// A log record ready to print: every column is a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    pub id: Option<String>,
    /// Resolved user display name.
    pub user: String,
    /// `YYYY-MM-DD HH:MM:SS` (UTC).
    pub timestamp: String,
    /// Time of day with milliseconds, for compact live entries.
    pub clock: String,
    pub method: String,
    pub blueprint: String,
    pub path: String,
    pub ip: String,
    pub code: String,
    pub status: StatusClass,
    /// Status message, `"None"` when empty.
    pub message: String,
    /// Translated action label.
    pub action: String,
    pub is_login_event: bool,
}

impl LogRow {
    pub fn project(record: &LogRecord, directory: &UserDirectory) -> Self {
        let parsed = record.parsed_timestamp();
        let timestamp = match parsed {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => record
                .timestamp
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| INVALID_DATE.to_string()),
        };
        let clock = match parsed {
            Some(ts) => ts.format("%H:%M:%S%.3f").to_string(),
            None => INVALID_DATE.to_string(),
        };

        Self {
            id: record.id.clone(),
            user: directory.display_name(record.user_id.as_deref()),
            timestamp,
            clock,
            method: or_default(record.method.as_deref(), NOT_AVAILABLE),
            blueprint: or_default(record.blueprint.as_deref(), NOT_AVAILABLE),
            path: record.path_str().to_string(),
            ip: record.ip.clone().unwrap_or_default(),
            code: or_default(record.code.as_deref(), "---"),
            status: StatusClass::from_code(record.code.as_deref()),
            message: or_default(record.message.as_deref(), "None"),
            action: translate(Some(record)).action_performed,
            is_login_event: record.is_login_event,
        }
    }

    /// Project a batch in order.
    pub fn project_all<'a>(
        records: impl IntoIterator<Item = &'a LogRecord>,
        directory: &UserDirectory,
    ) -> Vec<Self> {
        records
            .into_iter()
            .map(|r| Self::project(r, directory))
            .collect()
    }
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
