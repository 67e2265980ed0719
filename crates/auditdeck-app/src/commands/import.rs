// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use auditdeck_core::error::Result;
use tracing::info;

use crate::services::app_services::{AppServices, read_records};

pub fn run(svc: &AppServices, input: &str) -> Result<()> {
    let records = read_records(input)?;
    let mut archive = svc.open_archive()?;
    let inserted = archive.insert_all(&records)?;
    let total = archive.count()?;

    info!(read = records.len(), inserted, total, "import finished");
    println!(
        "Imported {inserted} new of {} records ({total} in archive).",
        records.len()
    );
    Ok(())
}
