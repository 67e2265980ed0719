// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use auditdeck_core::error::Result;
use auditdeck_report::aggregate;

use crate::cli::SearchArgs;
use crate::render;
use crate::services::app_services::AppServices;

use super::search;

pub fn run(svc: &AppServices, args: &SearchArgs) -> Result<()> {
    let records = search::fetch(svc, args)?;
    let directory = svc.load_directory(args.users.as_deref())?;
    let summaries = aggregate(&records, &directory);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", render::analytics_table(&summaries));
    }
    Ok(())
}
