// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// auditdeck-store — local, append-only archive of audit log records and the
// historical search over it.

pub mod archive;
pub mod query;

pub use archive::LogArchive;
pub use query::{SearchQuery, SortOrder};
