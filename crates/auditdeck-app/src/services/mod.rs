// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the CLI commands to the auditdeck backend crates.
//
// Commands get configuration, the archive, user directories, and parsed log
// input from here rather than touching files themselves.

pub mod app_services;
pub mod data_dir;
