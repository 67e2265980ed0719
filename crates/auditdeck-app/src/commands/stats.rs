// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use auditdeck_core::error::{AuditDeckError, Result};
use auditdeck_core::types::parse_timestamp;
use auditdeck_report::DashboardReport;
use chrono::Utc;
use tracing::info;

use crate::services::app_services::{AppServices, read_records};

pub fn run(svc: &AppServices, input: Option<&str>, at: Option<&str>) -> Result<()> {
    let now = match at {
        Some(raw) => {
            parse_timestamp(raw).ok_or_else(|| AuditDeckError::InvalidTimestamp(raw.to_string()))?
        }
        None => Utc::now(),
    };

    let records = match input {
        Some(input) => read_records(input)?,
        None => svc.open_archive()?.all()?,
    };

    let report = DashboardReport::compute(&records, now, svc.config());
    info!(
        calls = report.kpis.total_api_calls,
        users = report.kpis.unique_users_today,
        "dashboard report computed"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
