// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command dispatch.

mod analytics;
mod config;
mod import;
mod search;
mod stats;
mod tail;
mod translate;

use auditdeck_core::error::Result;

use crate::cli::Command;
use crate::services::app_services::AppServices;

pub async fn run(svc: &AppServices, command: Command) -> Result<()> {
    match command {
        Command::Translate { input, json } => translate::run(&input, json),
        Command::Import { input } => import::run(svc, &input),
        Command::Search(args) => search::run(svc, &args),
        Command::Analytics(args) => analytics::run(svc, &args),
        Command::Stats { input, at } => stats::run(svc, input.as_deref(), at.as_deref()),
        Command::Tail { users, no_archive } => tail::run(svc, users.as_deref(), no_archive).await,
        Command::Config { write } => config::run(svc, write),
    }
}
