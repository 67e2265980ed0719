// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed labels for endpoints whose names do not read well through the
// generic verb/subject inference.
//
// Rules are tried in order and the first match wins. Each rule keeps its own
// matching discipline: the organization-details rule compares the action
// segment case-insensitively, every other rule looks for a case-sensitive
// substring anywhere in the raw path.

/// What a rule compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Action segment equals this lowercase literal, ignoring case.
    SegmentEquals(&'static str),
    /// Raw path contains this literal, case-sensitive.
    PathContains(&'static str),
}

/// One entry of the exception table.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionRule {
    pub matcher: Matcher,
    pub label: &'static str,
    /// Whether a captured trailing id is appended as `" of <id>"`.
    pub appends_id: bool,
}

impl ExceptionRule {
    const fn path(needle: &'static str, label: &'static str) -> Self {
        Self {
            matcher: Matcher::PathContains(needle),
            label,
            appends_id: false,
        }
    }

    pub fn matches(&self, path: &str, segment: &str) -> bool {
        match self.matcher {
            Matcher::SegmentEquals(expected) => segment.to_lowercase() == expected,
            Matcher::PathContains(needle) => path.contains(needle),
        }
    }
}

pub static EXCEPTION_RULES: &[ExceptionRule] = &[
    ExceptionRule {
        matcher: Matcher::SegmentEquals("getorgdetails"),
        label: "Fetched Organization Details",
        appends_id: true,
    },
    ExceptionRule::path("GETorganizationmembersDetails", "Fetched Organization Members Details"),
    ExceptionRule::path("POSTupdateFCMToken", "Updated Notification Token"),
    ExceptionRule::path("logout", "Logged Out"),
    ExceptionRule::path("POSTuserauth", "Logged In"),
    ExceptionRule::path("GETorgswitch", "Fetched Organization Details"),
    ExceptionRule::path("POSTcreatep0", "Created P0"),
    ExceptionRule::path("GETarticleviews", "Fetched Article Views"),
    ExceptionRule::path("GETuserprofile", "Fetched User Profile"),
    ExceptionRule::path("GETallannouncements", "Fetched All Announcements"),
    ExceptionRule::path("Check_userdevice", "Checked User Device"),
    ExceptionRule::path("GETdynamicmodel", "Fetched Dynamic Model"),
    ExceptionRule::path("GETorgleavesetup", "Fetched Organization Leave Setup"),
    ExceptionRule::path("POSTleavetype_details", "Created Leave Type"),
];

/// Label of the first matching rule, with the captured id appended when the
/// rule asks for it.
pub fn match_exception(path: &str, segment: &str, captured_id: Option<&str>) -> Option<String> {
    let rule = EXCEPTION_RULES.iter().find(|rule| rule.matches(path, segment))?;
    match captured_id {
        Some(id) if rule.appends_id => Some(format!("{} of {id}", rule.label)),
        _ => Some(rule.label.to_string()),
    }
}
