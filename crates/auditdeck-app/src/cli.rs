// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::PathBuf;

use auditdeck_store::SortOrder;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "auditdeck", version, about = "View, search, and summarise application audit logs")]
pub struct Cli {
    /// Data directory holding the archive and config (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.json).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the action performed by each record of a log export.
    Translate {
        /// JSON array or NDJSON file of log records; `-` reads stdin.
        #[arg(default_value = "-")]
        input: String,
        /// Emit the records as JSON with an `actionPerformed` field added.
        #[arg(long)]
        json: bool,
    },

    /// Add records from a log export to the local archive.
    Import {
        /// JSON array or NDJSON file of log records; `-` reads stdin.
        #[arg(default_value = "-")]
        input: String,
    },

    /// Search the archive and print matching records as a log table.
    Search(SearchArgs),

    /// Search the archive and print how often each user performed each
    /// operation.
    Analytics(SearchArgs),

    /// Print the dashboard report (KPIs and charts) as JSON.
    Stats {
        /// Log export to summarise; the archive is used when omitted.
        input: Option<String>,
        /// Report as of this instant instead of now (ISO 8601).
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Follow pushed log records (NDJSON on stdin) as a live stream.
    Tail {
        /// User list JSON used to resolve display names.
        #[arg(long, value_name = "FILE")]
        users: Option<PathBuf>,
        /// Do not seed from or write to the archive.
        #[arg(long)]
        no_archive: bool,
    },

    /// Show the effective configuration.
    Config {
        /// Write the effective configuration to the config file.
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Only records of this user id.
    #[arg(long)]
    pub user: Option<String>,
    /// Records at or after this time (ISO 8601).
    #[arg(long)]
    pub start: Option<String>,
    /// Records up to the end of this day (ISO 8601).
    #[arg(long)]
    pub end: Option<String>,
    /// Maximum number of records, 0 for all (default from config).
    #[arg(long)]
    pub limit: Option<u32>,
    /// Timestamp order.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OrderArg::Desc)]
    pub order: OrderArg,
    /// User list JSON used to resolve display names.
    #[arg(long, value_name = "FILE")]
    pub users: Option<PathBuf>,
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// `--order` choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}
