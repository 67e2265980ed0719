// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Historical search over the archive.

use auditdeck_core::error::{AuditDeckError, Result};
use auditdeck_core::types::{LogRecord, parse_timestamp};
use auditdeck_report::LogRow;
use auditdeck_store::SearchQuery;
use tracing::info;

use crate::cli::SearchArgs;
use crate::render;
use crate::services::app_services::AppServices;

pub fn run(svc: &AppServices, args: &SearchArgs) -> Result<()> {
    let records = fetch(svc, args)?;
    let directory = svc.load_directory(args.users.as_deref())?;
    let rows = LogRow::project_all(&records, &directory);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render::log_table(&rows));
    }
    Ok(())
}

/// Run the archive search described by the command-line filters.
pub fn fetch(svc: &AppServices, args: &SearchArgs) -> Result<Vec<LogRecord>> {
    let query = build_query(args, svc.config().search_limit)?;
    let archive = svc.open_archive()?;
    let records = archive.search(&query)?;
    info!(params = ?query.query_pairs(), results = records.len(), "search finished");
    Ok(records)
}

/// Build the query, rejecting dates that cannot be parsed.
pub fn build_query(args: &SearchArgs, default_limit: u32) -> Result<SearchQuery> {
    let mut query = SearchQuery::new()
        .with_limit(args.limit.unwrap_or(default_limit))
        .with_order(args.order.into());
    if let Some(ref user) = args.user {
        query = query.with_user(user.as_str());
    }
    query.start = parse_bound(args.start.as_deref())?;
    query.end = parse_bound(args.end.as_deref())?;
    Ok(query)
}

fn parse_bound(raw: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| AuditDeckError::InvalidTimestamp(raw.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OrderArg;
    use auditdeck_store::SortOrder;

    fn args() -> SearchArgs {
        SearchArgs {
            user: None,
            start: None,
            end: None,
            limit: None,
            order: OrderArg::Desc,
            users: None,
            json: false,
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let query = build_query(&args(), 500).unwrap();
        assert_eq!(query.limit, 500);
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.start.is_none());
    }

    #[test]
    fn filters_are_applied() {
        let args = SearchArgs {
            user: Some("u1".into()),
            start: Some("2025-03-01".into()),
            end: Some("2025-03-02T00:00:00Z".into()),
            limit: Some(10),
            order: OrderArg::Asc,
            ..args()
        };
        let query = build_query(&args, 500).unwrap();
        assert_eq!(query.user_id.as_deref(), Some("u1"));
        assert_eq!(query.limit, 10);
        assert_eq!(query.order, SortOrder::Asc);
        assert!(query.start.is_some());
        assert!(query.end.is_some());
    }

    #[test]
    fn bad_date_is_rejected() {
        let args = SearchArgs {
            start: Some("next week".into()),
            ..args()
        };
        assert!(matches!(
            build_query(&args, 500),
            Err(AuditDeckError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn blank_date_is_ignored() {
        let args = SearchArgs {
            end: Some("  ".into()),
            ..args()
        };
        assert!(build_query(&args, 500).unwrap().end.is_none());
    }
}
