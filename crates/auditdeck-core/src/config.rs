// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Path the backend records for a successful user login.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/v1/POSTuserauth";

/// Persistent application settings.
///
/// Missing keys fall back to their defaults, so a config file written by an
/// older version keeps loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum number of rows kept in the live feed (newest first).
    pub live_capacity: usize,
    /// Number of archived records replayed into the live feed on start.
    pub live_seed_count: u32,
    /// Result limit for historical search when none is given.
    pub search_limit: u32,
    /// Number of paths shown in the dashboard's top-endpoints chart.
    pub top_endpoints: usize,
    /// Request path counted as a login in the dashboard KPIs.
    pub login_path: String,
    /// SQLite archive file name, relative to the data directory.
    pub archive_file: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            live_capacity: 100,
            live_seed_count: 10,
            search_limit: 500,
            top_endpoints: 5,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            archive_file: "archive.db".to_string(),
            log_filter: "info".to_string(),
        }
    }
}
