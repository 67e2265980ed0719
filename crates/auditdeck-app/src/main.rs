// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// auditdeck — audit log dashboard on the command line.
//
// Entry point. Loads configuration, initialises logging, and dispatches the
// selected command.

mod cli;
mod commands;
mod render;
mod services;

use std::process::ExitCode;

use auditdeck_core::error::AuditDeckError;
use auditdeck_core::human_errors::humanize_error;
use clap::Parser;

use cli::Cli;
use services::app_services::AppServices;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let svc = match AppServices::init(cli.data_dir.clone(), cli.config.clone()) {
        Ok(svc) => svc,
        Err(e) => {
            init_tracing("info");
            return fail(&e);
        }
    };

    init_tracing(&svc.config().log_filter);
    tracing::info!(data_dir = %svc.data_dir().display(), "auditdeck starting");

    match commands::run(&svc, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

fn fail(err: &AuditDeckError) -> ExitCode {
    tracing::error!(error = %err, "command failed");
    let human = humanize_error(err);
    eprintln!("{}\n  {}", human.message, human.suggestion);
    ExitCode::FAILURE
}
