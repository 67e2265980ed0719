// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use auditdeck_core::error::Result;
use auditdeck_translate::translate;
use serde::Serialize;

use crate::services::app_services::read_records;

/// A record with its translated action alongside.
#[derive(Serialize)]
struct Annotated<'a> {
    #[serde(flatten)]
    record: &'a auditdeck_core::LogRecord,
    #[serde(rename = "actionPerformed")]
    action_performed: String,
}

pub fn run(input: &str, json: bool) -> Result<()> {
    let records = read_records(input)?;

    if json {
        let annotated: Vec<Annotated<'_>> = records
            .iter()
            .map(|record| Annotated {
                record,
                action_performed: translate(Some(record)).action_performed,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&annotated)?);
    } else {
        for record in &records {
            println!("{}", translate(Some(record)).action_performed);
        }
    }
    Ok(())
}
