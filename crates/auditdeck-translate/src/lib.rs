// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// auditdeck-translate — turns an audit log request (HTTP method + path) into
// the action label shown in every log table.
//
// The translation is a pure function of the record: no clock, no locale, no
// state carried between calls.

pub mod action;
pub mod rules;
pub mod subject;

pub use action::{compute_action, translate};
