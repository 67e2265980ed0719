// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// auditdeck-report — everything a log view needs on top of raw records:
// display rows, per-user operation analytics, the bounded live feed, and the
// dashboard KPI/chart report.

pub mod analytics;
pub mod dashboard;
pub mod directory;
pub mod live;
pub mod rows;

pub use analytics::{OperationSummary, aggregate};
pub use dashboard::DashboardReport;
pub use directory::UserDirectory;
pub use live::LiveFeed;
pub use rows::LogRow;
