// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for dashboard users.
//
// Every technical error is mapped to a plain sentence with a suggestion.
// The severity tells the caller whether trying again can help.

use crate::error::AuditDeckError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Locked database, busy disk — trying again may work.
    Transient,
    /// The user must fix their input (bad file, bad date, bad config).
    ActionRequired,
    /// Cannot be fixed by retrying or by changing input.
    Permanent,
}

/// A human-readable error with a summary and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown first).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Drives the exit message and whether a retry is offered.
    pub severity: Severity,
}

/// Convert an `AuditDeckError` into a `HumanError`.
pub fn humanize_error(err: &AuditDeckError) -> HumanError {
    match err {
        AuditDeckError::InvalidRecord(detail) => HumanError {
            message: "Some log data could not be read.".into(),
            suggestion: format!(
                "Check that the input is a JSON array of log records or one record per line. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        AuditDeckError::InvalidTimestamp(detail) => HumanError {
            message: "That date could not be understood.".into(),
            suggestion: format!("Use a date like 2025-03-04 or 2025-03-04T10:15:00Z. ({detail})"),
            severity: Severity::ActionRequired,
        },

        AuditDeckError::InvalidUserList(detail) => HumanError {
            message: "Could not load the user list.".into(),
            suggestion: format!(
                "The user list must be a JSON array of {{\"id\", \"name\"}} entries. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        AuditDeckError::Config(detail) => HumanError {
            message: "The settings file could not be loaded.".into(),
            suggestion: format!("Fix or delete the config file to go back to defaults. ({detail})"),
            severity: Severity::ActionRequired,
        },

        AuditDeckError::Database(detail) => humanize_database_error(detail),

        AuditDeckError::Io(io) => match io.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file could not be found.".into(),
                suggestion: format!("Check the path and try again. ({io})"),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Access to a file was refused.".into(),
                suggestion: "Check the file permissions or pick another data directory.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "A file could not be read or written.".into(),
                suggestion: format!("Try again. ({io})"),
                severity: Severity::Transient,
            },
        },

        AuditDeckError::Serialization(detail) => HumanError {
            message: "The data is not valid JSON.".into(),
            suggestion: format!("Check the input for truncation or stray characters. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}

fn humanize_database_error(detail: &str) -> HumanError {
    let lower = detail.to_lowercase();
    if lower.contains("locked") || lower.contains("busy") {
        HumanError {
            message: "The log archive is in use.".into(),
            suggestion: "Another auditdeck command is writing to the archive. Wait a moment and try again.".into(),
            severity: Severity::Transient,
        }
    } else if lower.contains("not a database") || lower.contains("malformed") {
        HumanError {
            message: "The log archive is damaged.".into(),
            suggestion: "Move the archive file aside and import your logs again.".into(),
            severity: Severity::Permanent,
        }
    } else {
        HumanError {
            message: "The log archive had a problem.".into(),
            suggestion: format!("Try again. ({detail})"),
            severity: Severity::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_database_is_transient() {
        let err = AuditDeckError::Database("database is locked".into());
        assert_eq!(humanize_error(&err).severity, Severity::Transient);
    }

    #[test]
    fn corrupt_database_is_permanent() {
        let err = AuditDeckError::Database("file is not a database".into());
        assert_eq!(humanize_error(&err).severity, Severity::Permanent);
    }

    #[test]
    fn missing_file_needs_action() {
        let err = AuditDeckError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "logs.json"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("logs.json"));
    }

    #[test]
    fn bad_record_mentions_detail() {
        let err = AuditDeckError::InvalidRecord("line 3: expected value".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("line 3"));
    }
}
