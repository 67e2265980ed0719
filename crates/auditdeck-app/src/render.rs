// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text tables for terminal output.

use auditdeck_report::{LogRow, OperationSummary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Marker shown in the first column of login events.
const LOGIN_MARKER: &str = "*";

const NO_RESULTS: &str = "No results. Refine your search and try again.\n";
const NO_OPERATIONS: &str = "No user operations found for the selected criteria.\n";

/// Historical search table row.
#[derive(Debug, Tabled)]
struct LogLine {
    #[tabled(rename = "")]
    login: &'static str,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Blueprint")]
    blueprint: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Status Message")]
    message: String,
    #[tabled(rename = "Action Performed")]
    action: String,
}

impl From<&LogRow> for LogLine {
    fn from(row: &LogRow) -> Self {
        Self {
            login: if row.is_login_event { LOGIN_MARKER } else { "" },
            user: row.user.clone(),
            timestamp: row.timestamp.clone(),
            method: row.method.clone(),
            blueprint: row.blueprint.clone(),
            path: row.path.clone(),
            ip: row.ip.clone(),
            status: format!("{} {}", row.code, row.status.label()),
            message: row.message.clone(),
            action: row.action.clone(),
        }
    }
}

/// Operation analytics table row.
#[derive(Debug, Tabled)]
struct OperationLine {
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Operation")]
    operation: String,
    #[tabled(rename = "Blueprint")]
    blueprint: String,
    #[tabled(rename = "Performed Count")]
    count: u64,
    #[tabled(rename = "Last Action Time")]
    last_action: String,
}

impl From<&OperationSummary> for OperationLine {
    fn from(summary: &OperationSummary) -> Self {
        Self {
            user: summary.user_name.clone(),
            operation: summary.operation.clone(),
            blueprint: summary.blueprint.clone().unwrap_or_default(),
            count: summary.count,
            last_action: summary.last_action_display(),
        }
    }
}

fn render<T: Tabled>(lines: Vec<T>) -> String {
    let mut table = Table::new(lines);
    table.with(Style::psql());
    format!("{table}\n")
}

/// Historical search results: one line per record, every column.
pub fn log_table(rows: &[LogRow]) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }
    render(rows.iter().map(LogLine::from).collect())
}

/// One live-stream line.
pub fn live_line(row: &LogRow) -> String {
    let marker = if row.is_login_event { LOGIN_MARKER } else { " " };
    format!(
        "{marker} {}  {}  {}  {}  {}",
        row.timestamp, row.user, row.action, row.blueprint, row.path
    )
}

/// Per-user operation analytics.
pub fn analytics_table(summaries: &[OperationSummary]) -> String {
    if summaries.is_empty() {
        return NO_OPERATIONS.to_string();
    }
    render(summaries.iter().map(OperationLine::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditdeck_core::LogRecord;
    use auditdeck_report::{UserDirectory, aggregate};

    fn record(path: &str, login: bool) -> LogRecord {
        LogRecord {
            path: Some(path.to_string()),
            method: Some("GET".to_string()),
            user_id: Some("u1".to_string()),
            timestamp: Some("2025-03-04T10:15:30Z".to_string()),
            is_login_event: login,
            ..Default::default()
        }
    }

    fn row(path: &str, login: bool) -> LogRow {
        LogRow::project(&record(path, login), &UserDirectory::new())
    }

    #[test]
    fn log_table_has_header_and_rows() {
        let out = log_table(&[row("/api/GETuserprofile", false), row("/a", true)]);
        let lines: Vec<&str> = out.lines().collect();
        // Header, rule, two rows.
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Action Performed"));
        assert!(lines[0].contains("IP Address"));
        assert!(lines[2].contains("Fetched User Profile"));
        assert!(lines[3].contains(LOGIN_MARKER));
        assert!(!lines[2].contains(LOGIN_MARKER));
    }

    #[test]
    fn columns_line_up() {
        let out = log_table(&[row("/api/GETuserprofile", false), row("/a", true)]);
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2].find("/api/GETuserprofile"), lines[3].find("/a "));
    }

    #[test]
    fn analytics_table_shows_counts() {
        let records = vec![record("/api/GETuserprofile", false), record("/api/GETuserprofile", false)];
        let summaries = aggregate(&records, &UserDirectory::new());
        let out = analytics_table(&summaries);
        assert!(out.lines().next().unwrap().contains("Performed Count"));
        let body = out.lines().nth(2).unwrap();
        assert!(body.contains("Fetched User Profile"));
        assert!(body.contains(" 2 "));
    }

    #[test]
    fn empty_states() {
        assert_eq!(log_table(&[]), NO_RESULTS);
        assert_eq!(analytics_table(&[]), NO_OPERATIONS);
    }

    #[test]
    fn live_line_shows_action() {
        let line = live_line(&row("/api/GETuserprofile", false));
        assert_eq!(
            line,
            "  2025-03-04 10:15:30  u1  Fetched User Profile  N/A  /api/GETuserprofile"
        );
    }
}
