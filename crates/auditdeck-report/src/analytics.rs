// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User operation analytics — how often each user performed each action.

use std::collections::HashMap;

use auditdeck_core::types::LogRecord;
use auditdeck_translate::translate;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::directory::UserDirectory;

/// One (user, operation) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSummary {
    pub user_id: String,
    pub user_name: String,
    pub operation: String,
    /// Blueprint of the first record in the group.
    pub blueprint: Option<String>,
    pub count: u64,
    /// Latest valid timestamp in the group.
    pub last_action_time: Option<DateTime<Utc>>,
}

impl OperationSummary {
    /// `Mar 4, 10:15 AM` style, or `"-"` when no record had a valid time.
    pub fn last_action_display(&self) -> String {
        match self.last_action_time {
            Some(ts) => ts.format("%b %-d, %I:%M %p").to_string(),
            None => "-".to_string(),
        }
    }
}

/// Group records by user and translated action.
///
/// Records without a user id are skipped. Groups come out in the order they
/// first appear in `records`.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a LogRecord>,
    directory: &UserDirectory,
) -> Vec<OperationSummary> {
    let mut summaries: Vec<OperationSummary> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let Some(user_id) = record.user() else {
            continue;
        };
        let operation = translate(Some(record)).action_performed;
        let key = (user_id.to_string(), operation);

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                summaries.push(OperationSummary {
                    user_id: key.0.clone(),
                    user_name: directory.display_name(Some(user_id)),
                    operation: key.1.clone(),
                    blueprint: record.blueprint.clone(),
                    count: 0,
                    last_action_time: None,
                });
                index.insert(key, summaries.len() - 1);
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[slot];
        summary.count += 1;
        if let Some(ts) = record.parsed_timestamp() {
            if summary.last_action_time.is_none_or(|last| ts > last) {
                summary.last_action_time = Some(ts);
            }
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditdeck_core::types::UserEntry;
    use chrono::TimeZone;

    fn record(user: Option<&str>, path: &str, timestamp: &str, blueprint: &str) -> LogRecord {
        LogRecord {
            user_id: user.map(str::to_string),
            path: Some(path.to_string()),
            method: Some("GET".to_string()),
            timestamp: Some(timestamp.to_string()),
            blueprint: Some(blueprint.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn groups_by_user_and_action() {
        let records = vec![
            record(Some("u1"), "/api/GETuserprofile", "2025-03-04T10:00:00Z", "user"),
            record(Some("u2"), "/api/GETuserprofile", "2025-03-04T10:01:00Z", "user"),
            record(Some("u1"), "/api/GETuserprofile/507f1f77bcf86cd799439011", "2025-03-04T11:30:00Z", "profile"),
            record(Some("u1"), "/api/GETarticleviews", "2025-03-04T09:00:00Z", "news"),
        ];
        let directory = UserDirectory::from_entries(&[UserEntry { id: "u1".into(), name: "alice".into() }]);

        let summaries = aggregate(&records, &directory);
        assert_eq!(summaries.len(), 3);

        let first = &summaries[0];
        assert_eq!(first.user_name, "alice");
        assert_eq!(first.operation, "Fetched User Profile");
        assert_eq!(first.count, 2);
        assert_eq!(first.blueprint.as_deref(), Some("user"));
        assert_eq!(
            first.last_action_time,
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 11, 30, 0).unwrap())
        );

        assert_eq!(summaries[1].user_name, "u2");
        assert_eq!(summaries[2].operation, "Fetched Article Views");
    }

    #[test]
    fn skips_records_without_user() {
        let records = vec![
            record(None, "/api/GETuserprofile", "2025-03-04T10:00:00Z", "user"),
            record(Some(""), "/api/GETuserprofile", "2025-03-04T10:00:00Z", "user"),
        ];
        assert!(aggregate(&records, &UserDirectory::new()).is_empty());
    }

    #[test]
    fn invalid_timestamps_do_not_erase_valid_ones() {
        let records = vec![
            record(Some("u1"), "/api/GETx", "garbage", "b"),
            record(Some("u1"), "/api/GETx", "2025-03-04T10:15:00Z", "b"),
            record(Some("u1"), "/api/GETx", "", "b"),
        ];
        let summaries = aggregate(&records, &UserDirectory::new());
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[0].last_action_display(), "Mar 4, 10:15 AM");
    }

    #[test]
    fn no_valid_time_displays_dash() {
        let records = vec![record(Some("u1"), "/api/GETx", "nope", "b")];
        let summaries = aggregate(&records, &UserDirectory::new());
        assert_eq!(summaries[0].last_action_display(), "-");
    }
}
