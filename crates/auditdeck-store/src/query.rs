// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Historical search filters.

use auditdeck_core::types::parse_timestamp;
use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Result limit when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 50;

/// Timestamp ordering of search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub(crate) fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filters for a historical log search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Only records of this user.
    pub user_id: Option<String>,
    /// Records at or after this instant.
    pub start: Option<DateTime<Utc>>,
    /// Records up to the end of this instant's day (UTC).
    pub end: Option<DateTime<Utc>>,
    /// Maximum number of results; `0` means no limit.
    pub limit: u32,
    pub order: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            start: None,
            end: None,
            limit: DEFAULT_LIMIT,
            order: SortOrder::Desc,
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one user. An empty id means "all users".
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        self.user_id = (!user_id.is_empty()).then_some(user_id);
        self
    }

    /// Lower bound from an ISO string. Unparseable input leaves the bound
    /// unset.
    pub fn with_start(mut self, raw: &str) -> Self {
        self.start = parse_utc_iso(raw);
        self
    }

    /// Upper bound from an ISO string. Unparseable input leaves the bound
    /// unset.
    pub fn with_end(mut self, raw: &str) -> Self {
        self.end = parse_utc_iso(raw);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// The upper bound moved to the last microsecond of its day.
    pub fn end_inclusive(&self) -> Option<DateTime<Utc>> {
        let end = self.end?;
        let last = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?;
        Some(end.date_naive().and_time(last).and_utc())
    }

    /// Non-empty filters as request parameters, named like the backend's
    /// `/logs` endpoint expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref user) = self.user_id {
            pairs.push(("user_id", user.clone()));
        }
        if let Some(start) = self.start {
            pairs.push(("start_date", start.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(end) = self.end {
            pairs.push(("end_date", end.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("order", self.order.as_str().to_string()));
        pairs
    }
}

/// Parse a UTC ISO 8601 string; a trailing `Z`, an offset, or a naive
/// datetime (taken as UTC) are all accepted.
pub fn parse_utc_iso(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(raw)
}

/// Storage form of a timestamp: RFC 3339, microsecond precision, `Z`.
///
/// Fixed width, so string order is time order.
pub(crate) fn storage_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let query = SearchQuery::new();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.user_id.is_none());
    }

    #[test]
    fn end_extends_to_end_of_day() {
        let query = SearchQuery::new().with_end("2025-03-04T08:00:00Z");
        assert_eq!(
            storage_timestamp(query.end_inclusive().unwrap()),
            "2025-03-04T23:59:59.999999Z"
        );
    }

    #[test]
    fn bad_bounds_are_dropped() {
        let query = SearchQuery::new().with_start("yesterday").with_end("");
        assert!(query.start.is_none());
        assert!(query.end_inclusive().is_none());
    }

    #[test]
    fn empty_user_means_all_users() {
        assert!(SearchQuery::new().with_user("").user_id.is_none());
        assert_eq!(SearchQuery::new().with_user("u1").user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn query_pairs_skip_empty_filters() {
        let pairs = SearchQuery::new().with_limit(500).query_pairs();
        assert_eq!(
            pairs,
            vec![("limit", "500".to_string()), ("order", "desc".to_string())]
        );

        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let query = SearchQuery {
            user_id: Some("u1".into()),
            start: Some(start),
            ..SearchQuery::default()
        };
        let pairs = query.query_pairs();
        assert_eq!(pairs[0], ("user_id", "u1".to_string()));
        assert_eq!(pairs[1], ("start_date", "2025-03-01T00:00:00.000Z".to_string()));
    }
}
