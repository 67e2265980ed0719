// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Live log stream — records pushed as NDJSON on stdin, shown as they arrive.

use std::path::Path;

use auditdeck_core::error::{AuditDeckError, Result};
use auditdeck_report::{LiveFeed, LogRow, UserDirectory};
use auditdeck_store::LogArchive;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::render;
use crate::services::app_services::AppServices;

pub async fn run(svc: &AppServices, users: Option<&Path>, no_archive: bool) -> Result<()> {
    let config = svc.config();
    let directory = svc.load_directory(users)?;
    let archive = if no_archive {
        None
    } else {
        Some(svc.open_archive()?)
    };

    let mut session = LiveSession::new(config.live_capacity, archive.as_ref(), &directory);
    for row in session.seed(config.live_seed_count)? {
        println!("{}", render::live_line(&row));
    }
    if session.feed.is_empty() {
        eprintln!("Waiting for new logs...");
    }

    // Raw segments, so one line that is not UTF-8 cannot end the stream.
    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let Some(raw) = segment? else { break };
                if let Some(row) = session.accept(&raw) {
                    println!("{}", render::live_line(&row));
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }
    }

    info!(
        received = session.received,
        rejected = session.rejected,
        kept = session.feed.len(),
        "live stream closed"
    );
    Ok(())
}

/// One live stream: the feed, the optional archive it writes through to,
/// and the running counts.
struct LiveSession<'a> {
    feed: LiveFeed,
    archive: Option<&'a LogArchive>,
    directory: &'a UserDirectory,
    received: u64,
    rejected: u64,
}

impl<'a> LiveSession<'a> {
    fn new(capacity: usize, archive: Option<&'a LogArchive>, directory: &'a UserDirectory) -> Self {
        Self {
            feed: LiveFeed::new(capacity),
            archive,
            directory,
            received: 0,
            rejected: 0,
        }
    }

    /// Load recent archive history into the feed. Returns it oldest first,
    /// the order it would have streamed in.
    fn seed(&mut self, count: u32) -> Result<Vec<LogRow>> {
        let Some(archive) = self.archive else {
            return Ok(Vec::new());
        };
        self.feed.seed(archive.recent(count)?);
        info!(seeded = self.feed.len(), "live feed seeded from archive");

        let mut rows: Vec<LogRow> = self
            .feed
            .iter()
            .map(|record| LogRow::project(record, self.directory))
            .collect();
        rows.reverse();
        Ok(rows)
    }

    /// Handle one raw input line. Returns the row to show when the line held
    /// a record; blank and undecodable lines leave the feed unchanged.
    fn accept(&mut self, raw: &[u8]) -> Option<LogRow> {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                let e = AuditDeckError::InvalidRecord(format!("payload is not UTF-8: {e}"));
                warn!(error = %e, "dropping undecodable live payload");
                self.rejected += 1;
                return None;
            }
        };
        if line.trim().is_empty() {
            return None;
        }

        let Ok(record) = self.feed.ingest(line) else {
            self.rejected += 1;
            return None;
        };
        self.received += 1;
        if let Some(archive) = self.archive {
            if let Err(e) = archive.insert(record) {
                warn!(error = %e, "live record not archived");
            }
        }
        Some(LogRow::project(record, self.directory))
    }
}
