// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dashboard report — today's KPIs plus the activity, top-endpoint, and
// error-breakdown charts.
//
// The JSON shape matches the backend's `/report/dashboard_stats` response, so
// a report fetched from the backend and one computed locally render the
// same way.

use std::collections::{BTreeMap, HashMap, HashSet};

use auditdeck_core::AppConfig;
use auditdeck_core::types::LogRecord;
use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Status codes at or above this count as errors.
const ERROR_THRESHOLD: u16 = 400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub kpis: Kpis,
    pub charts: Charts,
}

/// Headline numbers for the current UTC day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub unique_users_today: u64,
    pub total_api_calls: u64,
    /// Percentage of calls with an error status, two decimals.
    pub error_rate: f64,
    pub total_logins: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charts {
    pub activity_over_time: ChartSeries,
    pub top_endpoints: ChartSeries,
    pub error_breakdown: ChartSeries,
}

/// Parallel label/value arrays, as chart widgets consume them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    fn from_counts(counts: Vec<(String, u64)>) -> Self {
        let (labels, values) = counts.into_iter().unzip();
        Self { labels, values }
    }

    /// `(label, value)` pairs in chart order.
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl DashboardReport {
    /// Build the report from raw records as of `now`.
    ///
    /// KPIs, top endpoints, and the error breakdown cover records since the
    /// start of `now`'s UTC day; the activity chart covers the 24 hours
    /// before `now`, bucketed by UTC hour of day. Records without a valid
    /// timestamp are not counted.
    pub fn compute<'a>(
        records: impl IntoIterator<Item = &'a LogRecord>,
        now: DateTime<Utc>,
        config: &AppConfig,
    ) -> Self {
        let start_of_day = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or(now);
        let activity_start = now - Duration::hours(24);

        let mut total_calls = 0u64;
        let mut total_errors = 0u64;
        let mut total_logins = 0u64;
        let mut users: HashSet<&str> = HashSet::new();
        let mut paths: HashMap<&str, u64> = HashMap::new();
        let mut errors: BTreeMap<&str, u64> = BTreeMap::new();
        let mut hourly = [0u64; 24];

        for record in records {
            let Some(ts) = record.parsed_timestamp() else {
                continue;
            };

            if ts >= activity_start {
                hourly[ts.hour() as usize] += 1;
            }
            if ts < start_of_day {
                continue;
            }

            total_calls += 1;
            if let Some(user) = record.user() {
                users.insert(user);
            }
            if record.path_str() == config.login_path {
                total_logins += 1;
            }
            *paths.entry(record.path_str()).or_default() += 1;
            if record.status_code().is_some_and(|c| c >= ERROR_THRESHOLD) {
                total_errors += 1;
                let code = record.code.as_deref().unwrap_or_default().trim();
                *errors.entry(code).or_default() += 1;
            }
        }

        let error_rate = if total_calls > 0 {
            round2(total_errors as f64 / total_calls as f64 * 100.0)
        } else {
            0.0
        };

        let activity = ChartSeries {
            labels: (0..24).map(|h| format!("{h}:00")).collect(),
            values: hourly.to_vec(),
        };

        let mut top: Vec<(String, u64)> = paths
            .into_iter()
            .map(|(path, count)| (path.to_string(), count))
            .collect();
        sort_by_count(&mut top);
        top.truncate(config.top_endpoints);

        let mut breakdown: Vec<(String, u64)> = errors
            .into_iter()
            .map(|(code, count)| (code.to_string(), count))
            .collect();
        sort_by_count(&mut breakdown);

        Self {
            kpis: Kpis {
                unique_users_today: users.len() as u64,
                total_api_calls: total_calls,
                error_rate,
                total_logins,
            },
            charts: Charts {
                activity_over_time: activity,
                top_endpoints: ChartSeries::from_counts(top),
                error_breakdown: ChartSeries::from_counts(breakdown),
            },
        }
    }
}

/// Count descending, label ascending on ties.
fn sort_by_count(counts: &mut [(String, u64)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
