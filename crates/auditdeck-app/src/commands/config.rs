// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use auditdeck_core::error::Result;
use tracing::info;

use crate::services::app_services::AppServices;

pub fn run(svc: &AppServices, write: bool) -> Result<()> {
    if write {
        svc.save_config()?;
        info!(path = %svc.config_path().display(), "configuration written");
    }
    println!("# {}", svc.config_path().display());
    println!("{}", serde_json::to_string_pretty(svc.config())?);
    Ok(())
}
