// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Action translation entry points.

use auditdeck_core::types::{ActionDescription, LogRecord};

use crate::rules::match_exception;
use crate::subject::{UNKNOWN_SUBJECT, format_subject, split_verb_prefix, verb_for_method};

/// Length of a backend ObjectId in hex characters.
const OBJECT_ID_LEN: usize = 24;

/// Describe what a logged request did.
///
/// Never fails: a missing record gives `"N/A"`, and any path/method pair
/// gives a non-empty label.
pub fn translate(log: Option<&LogRecord>) -> ActionDescription {
    match log {
        Some(record) => ActionDescription {
            action_performed: compute_action(record.path_str(), record.method_str()),
        },
        None => ActionDescription::not_available(),
    }
}

/// Build the action label for a request path and HTTP method.
pub fn compute_action(path: &str, method: &str) -> String {
    let target = ActionTarget::locate(path);

    if let Some(label) = match_exception(path, target.segment, target.captured_id) {
        return label;
    }

    let (verb, subject) = split_verb_prefix(target.segment)
        .unwrap_or_else(|| (verb_for_method(method), target.segment));

    let subject = format_subject(subject);
    let mut action = if subject.is_empty() {
        format!("{verb} {UNKNOWN_SUBJECT}")
    } else {
        format!("{verb} {subject}")
    };

    if let Some(id) = target.captured_id {
        action.push_str(" of ");
        action.push_str(id);
    }
    action
}

/// The path segment that names the action, plus the resource id that
/// followed it, if any.
#[derive(Debug, PartialEq, Eq)]
struct ActionTarget<'a> {
    segment: &'a str,
    captured_id: Option<&'a str>,
}

impl<'a> ActionTarget<'a> {
    fn locate(path: &'a str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let last = segments.last().copied().unwrap_or("");

        if is_object_id(last) {
            let segment = match segments.len() {
                n if n >= 2 => segments[n - 2],
                _ => "",
            };
            Self {
                segment,
                captured_id: Some(last),
            }
        } else {
            Self {
                segment: last,
                captured_id: None,
            }
        }
    }
}

fn is_object_id(segment: &str) -> bool {
    segment.len() == OBJECT_ID_LEN && segment.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "507f1f77bcf86cd799439011";

    fn record(path: &str, method: &str) -> LogRecord {
        LogRecord {
            path: Some(path.to_string()),
            method: Some(method.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_record_is_not_available() {
        assert_eq!(translate(None).action_performed, "N/A");
    }

    #[test]
    fn exception_label() {
        assert_eq!(compute_action("/api/GETuserprofile", "GET"), "Fetched User Profile");
    }

    #[test]
    fn exception_label_ignores_trailing_id() {
        assert_eq!(
            compute_action(&format!("/api/GETuserprofile/{ID}"), "GET"),
            "Fetched User Profile"
        );
    }

    #[test]
    fn org_details_appends_id() {
        assert_eq!(
            compute_action(&format!("/api/getOrgDetails/{ID}"), "GET"),
            format!("Fetched Organization Details of {ID}")
        );
        assert_eq!(compute_action("/api/getorgdetails", "GET"), "Fetched Organization Details");
    }

    #[test]
    fn prefix_verb_with_snake_and_camel_subject() {
        assert_eq!(
            compute_action("/api/POSTcreate_userAccount", "POST"),
            "Created Create User Account"
        );
    }

    #[test]
    fn method_verb_when_no_prefix() {
        assert_eq!(compute_action("/unknown/xyz", "DELETE"), "Deleted Xyz");
        assert_eq!(compute_action("/unknown/xyz", "delete"), "Deleted Xyz");
    }

    #[test]
    fn empty_path_and_method() {
        assert_eq!(compute_action("", ""), "Processed Unknown Object");
        assert_eq!(translate(Some(&LogRecord::default())).action_performed, "Processed Unknown Object");
    }

    #[test]
    fn prefix_verb_overrides_method() {
        assert_eq!(compute_action("/api/GETreports", "POST"), "Fetched Reports");
    }

    #[test]
    fn generic_label_appends_id() {
        assert_eq!(
            compute_action(&format!("/api/DELETEannouncement/{ID}"), "DELETE"),
            format!("Deleted Announcement of {ID}")
        );
    }

    #[test]
    fn id_only_path() {
        assert_eq!(
            compute_action(&format!("/{ID}"), "GET"),
            format!("Fetched Unknown Object of {ID}")
        );
        assert_eq!(
            compute_action(&format!("/{}", ID.to_uppercase()), ""),
            format!("Processed Unknown Object of {}", ID.to_uppercase())
        );
    }

    #[test]
    fn near_ids_are_action_segments() {
        // 23 and 25 hex characters, and 24 characters with a non-hex letter.
        for path in [
            "/api/507f1f77bcf86cd79943901",
            "/api/507f1f77bcf86cd799439011a",
            "/api/507f1f77bcf86cd79943901g",
        ] {
            let action = compute_action(path, "GET");
            assert!(action.starts_with("Fetched "), "{action}");
            assert!(!action.contains(" of "), "{action}");
        }
    }

    #[test]
    fn only_trailing_id_is_captured() {
        assert_eq!(
            compute_action(&format!("/api/{ID}/GETmembers"), "GET"),
            "Fetched Members"
        );
    }

    #[test]
    fn prefix_only_segment_is_unknown_object() {
        assert_eq!(compute_action("/api/POST", "POST"), "Created Unknown Object");
    }

    #[test]
    fn lowercase_check_falls_through_to_prefix() {
        assert_eq!(compute_action("/api/check_userdevice", "GET"), "Checked Userdevice");
        assert_eq!(compute_action("/api/Check_userdevice", "GET"), "Checked User Device");
    }

    #[test]
    fn repeated_slashes_are_ignored() {
        assert_eq!(compute_action("//api///PUTsettings//", "PUT"), "Updated Settings");
    }

    #[test]
    fn deterministic_and_never_empty() {
        let cases = [
            ("", ""),
            ("/", "GET"),
            ("/api", "OPTIONS"),
            ("/auth/v1/POSTuserauth", "POST"),
            ("/api/ñandú_Über", "PATCH"),
            ("/api/GETé", "GET"),
        ];
        for (path, method) in cases {
            let rec = record(path, method);
            let first = translate(Some(&rec));
            let second = translate(Some(&rec));
            assert_eq!(first, second);
            assert!(!first.action_performed.is_empty(), "{path:?} produced an empty label");
        }
    }

    #[test]
    fn locate_target() {
        assert_eq!(
            ActionTarget::locate(&format!("/a/b/{ID}")),
            ActionTarget { segment: "b", captured_id: Some(ID) }
        );
        assert_eq!(ActionTarget::locate("/a/b"), ActionTarget { segment: "b", captured_id: None });
        assert_eq!(ActionTarget::locate(""), ActionTarget { segment: "", captured_id: None });
    }
}
