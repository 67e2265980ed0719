// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for auditdeck.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display value used wherever a field has nothing to show.
pub const NOT_AVAILABLE: &str = "N/A";

/// One audit log record as delivered by the backend (search results and the
/// live push feed share this shape).
///
/// Every field is optional: records come from another system and a partial
/// record must still render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Backend document id (a 24-hex ObjectId string).
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ISO 8601 timestamp as emitted by the backend.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Request path, e.g. `/api/GETuserprofile/507f1f77bcf86cd799439011`.
    #[serde(default)]
    pub path: Option<String>,
    /// HTTP method token. Compared case-insensitively.
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    /// Backend module that served the request.
    #[serde(default)]
    pub blueprint: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_login_event: bool,
    /// API status message.
    #[serde(default)]
    pub message: Option<String>,
    /// API status code, kept as the backend's string form (e.g. `"404"`).
    #[serde(default)]
    pub code: Option<String>,
}

impl LogRecord {
    /// Request path, or `""` when missing.
    pub fn path_str(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    /// HTTP method, or `""` when missing.
    pub fn method_str(&self) -> &str {
        self.method.as_deref().unwrap_or("")
    }

    /// The user id, treating an empty string as absent.
    pub fn user(&self) -> Option<&str> {
        non_empty(self.user_id.as_deref())
    }

    /// Numeric API status code, if the record carries one.
    pub fn status_code(&self) -> Option<u16> {
        self.code.as_deref()?.trim().parse().ok()
    }

    /// The record timestamp parsed as UTC, or `None` when missing or
    /// malformed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.timestamp.as_deref()?)
    }
}

/// Output of the action translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescription {
    #[serde(rename = "actionPerformed")]
    pub action_performed: String,
}

impl ActionDescription {
    /// Description used when there is no record to describe.
    pub fn not_available() -> Self {
        Self {
            action_performed: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Visual class of an API status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Success,
    Warn,
    Error,
    Default,
}

impl StatusClass {
    /// Classify a status code by its leading digit.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.and_then(|c| c.chars().next()) {
            Some('5') => StatusClass::Error,
            Some('4') => StatusClass::Warn,
            Some('2') => StatusClass::Success,
            _ => StatusClass::Default,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusClass::Success => "ok",
            StatusClass::Warn => "warn",
            StatusClass::Error => "error",
            StatusClass::Default => "-",
        }
    }
}

/// Entry of the backend's user list (`GET /users`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub id: String,
    pub name: String,
}

/// Raw user document, before it is reduced to a [`UserEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Username, then full name, then email, then the raw id.
    pub fn display_name(&self) -> String {
        if let Some(username) = non_empty(self.username.as_deref()) {
            return username.to_string();
        }
        let full_name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full_name = full_name.trim();
        if !full_name.is_empty() {
            return full_name.to_string();
        }
        match non_empty(self.email.as_deref()) {
            Some(email) => email.to_string(),
            None => self.id.clone(),
        }
    }

    pub fn to_entry(&self) -> UserEntry {
        UserEntry {
            id: self.id.clone(),
            name: self.display_name(),
        }
    }
}

/// Parse the timestamp forms the backend emits.
///
/// Accepts RFC 3339 (with `Z` or an offset), naive ISO datetimes with `T` or
/// a space separator, and bare dates. Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn record_decodes_backend_shape() {
        let json = r#"{
            "_id": "66dbfff065ee59ec86ffbc39",
            "timestamp": "2025-03-04T10:15:30.123456",
            "path": "/api/GETuserprofile",
            "method": "GET",
            "ip": "10.0.0.7",
            "blueprint": "user",
            "org_id": "66dbfff065ee59ec86ffbc00",
            "user_id": "u-1",
            "is_login_event": false,
            "message": "ok",
            "code": "200"
        }"#;
        let record: LogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("66dbfff065ee59ec86ffbc39"));
        assert_eq!(record.path_str(), "/api/GETuserprofile");
        assert_eq!(record.status_code(), Some(200));
        let ts = record.parsed_timestamp().unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (10, 15, 30));
    }

    #[test]
    fn partial_record_decodes() {
        let record: LogRecord = serde_json::from_str(r#"{ "method": null }"#).unwrap();
        assert_eq!(record.path_str(), "");
        assert_eq!(record.method_str(), "");
        assert!(record.user().is_none());
        assert!(!record.is_login_event);
    }

    #[test]
    fn empty_user_id_is_absent() {
        let record = LogRecord {
            user_id: Some(String::new()),
            ..Default::default()
        };
        assert!(record.user().is_none());
    }

    #[test]
    fn timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 4, 10, 15, 30).unwrap();
        assert_eq!(parse_timestamp("2025-03-04T10:15:30Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-04T10:15:30+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-04T12:15:30+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-04T10:15:30"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-04 10:15:30"), Some(expected));
        let day = parse_timestamp("2025-03-04").unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2025, 3, 4, 0));
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("  "), None);
    }

    #[test]
    fn status_classes() {
        assert_eq!(StatusClass::from_code(Some("503")), StatusClass::Error);
        assert_eq!(StatusClass::from_code(Some("404")), StatusClass::Warn);
        assert_eq!(StatusClass::from_code(Some("201")), StatusClass::Success);
        assert_eq!(StatusClass::from_code(Some("302")), StatusClass::Default);
        assert_eq!(StatusClass::from_code(Some("")), StatusClass::Default);
        assert_eq!(StatusClass::from_code(None), StatusClass::Default);
    }

    #[test]
    fn display_name_fallbacks() {
        let mut profile = UserProfile {
            id: "abc".into(),
            username: Some("jdoe".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            email: Some("jane@example.com".into()),
        };
        assert_eq!(profile.display_name(), "jdoe");

        profile.username = Some(String::new());
        assert_eq!(profile.display_name(), "Jane Doe");

        profile.first_name = None;
        assert_eq!(profile.display_name(), "Doe");

        profile.last_name = None;
        assert_eq!(profile.display_name(), "jane@example.com");

        profile.email = None;
        assert_eq!(profile.to_entry(), UserEntry { id: "abc".into(), name: "abc".into() });
    }
}
