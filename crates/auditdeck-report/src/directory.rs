// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User id -> display name lookup.

use std::collections::HashMap;

use auditdeck_core::error::{AuditDeckError, Result};
use auditdeck_core::types::{NOT_AVAILABLE, UserEntry, UserProfile};
use serde::Deserialize;

/// Display names for user ids, built from the backend's user list.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[UserEntry]) -> Self {
        let names = entries
            .iter()
            .map(|e| (e.id.clone(), e.name.clone()))
            .collect();
        Self { names }
    }

    /// Parse a user list: either `[{"id", "name"}]` entries as served by
    /// `GET /users`, or raw user documents whose names are derived with
    /// [`UserProfile::display_name`].
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Listed {
            Entry(UserEntry),
            Profile(UserProfile),
        }

        let listed: Vec<Listed> =
            serde_json::from_str(json).map_err(|e| AuditDeckError::InvalidUserList(e.to_string()))?;
        let entries: Vec<UserEntry> = listed
            .into_iter()
            .map(|l| match l {
                Listed::Entry(entry) => entry,
                Listed::Profile(profile) => profile.to_entry(),
            })
            .collect();
        Ok(Self::from_entries(&entries))
    }

    /// Name to show for a user: the directory name, else the raw id, else
    /// `"N/A"`.
    pub fn display_name(&self, user_id: Option<&str>) -> String {
        let Some(id) = user_id.filter(|id| !id.is_empty()) else {
            return NOT_AVAILABLE.to_string();
        };
        match self.names.get(id).filter(|name| !name.is_empty()) {
            Some(name) => name.clone(),
            None => id.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
