// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — resolves the data directory, loads configuration,
// opens the archive, and reads log and user-list input for the commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use auditdeck_core::AppConfig;
use auditdeck_core::error::{AuditDeckError, Result};
use auditdeck_core::types::LogRecord;
use auditdeck_report::UserDirectory;
use auditdeck_report::live::decode_payload;
use auditdeck_store::LogArchive;
use tracing::{debug, info};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Input path meaning "read standard input".
pub const STDIN: &str = "-";

/// Shared services for one command invocation.
pub struct AppServices {
    data_dir: PathBuf,
    config_path: PathBuf,
    config: AppConfig,
}

impl AppServices {
    /// Resolve directories and load the configuration.
    ///
    /// A missing config file means defaults; a malformed one is an error.
    pub fn init(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(data_dir::default_data_dir);
        let config_path = config_path.unwrap_or_else(|| data_dir.join(CONFIG_FILE));
        let config = load_config(&config_path)?;

        Ok(Self {
            data_dir,
            config_path,
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    // -- Archive --------------------------------------------------------------

    /// Open the archive, creating the data directory on first use.
    pub fn open_archive(&self) -> Result<LogArchive> {
        data_dir::ensure_dir(&self.data_dir)?;
        let path = self.data_dir.join(&self.config.archive_file);
        info!(path = %path.display(), "opening log archive");
        LogArchive::open(&path)
    }

    // -- Configuration --------------------------------------------------------

    /// Write the current configuration to the config file.
    pub fn save_config(&self) -> Result<()> {
        persist_config(&self.config_path, &self.config)
    }

    // -- Input ----------------------------------------------------------------

    /// User directory from a user-list file, or an empty one.
    pub fn load_directory(&self, users: Option<&Path>) -> Result<UserDirectory> {
        match users {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let directory = UserDirectory::from_json(&json)?;
                debug!(users = directory.len(), "user directory loaded");
                Ok(directory)
            }
            None => Ok(UserDirectory::new()),
        }
    }
}

/// Read log records from a file, or from stdin for `-`.
pub fn read_records(input: &str) -> Result<Vec<LogRecord>> {
    let text = if input == STDIN {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    let records = parse_records(&text)?;
    debug!(input, records = records.len(), "log records read");
    Ok(records)
}

/// Parse a log export: a JSON array of records, or one record per line
/// (each line may also be a JSON string wrapping a record).
pub fn parse_records(text: &str) -> Result<Vec<LogRecord>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| AuditDeckError::InvalidRecord(e.to_string()));
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            decode_payload(line).map_err(|e| match e {
                AuditDeckError::InvalidRecord(detail) => {
                    AuditDeckError::InvalidRecord(format!("line {}: {detail}", n + 1))
                }
                other => other,
            })
        })
        .collect()
}

fn load_config(path: &Path) -> Result<AppConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(AuditDeckError::Config(format!("{}: {e}", path.display()))),
    };
    serde_json::from_str(&data)
        .map_err(|e| AuditDeckError::Config(format!("{}: {e}", path.display())))
}

fn persist_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        data_dir::ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
