//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON schema (camelCase field names) but are
//! defined independently from the mock-server crate. Integration tests catch
//! any schema drift between the two.
//!
//! Ids and timestamps are assigned by the server and never generated here, so
//! both are kept opaque: `TodoId` wraps whatever string the server sent, and
//! `Timestamp` keeps the raw text alongside its parsed instant so it
//! serializes back byte-for-byte.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Creation time as reported by the server.
///
/// RFC 3339 date-times and bare `YYYY-MM-DD` dates (midnight UTC) are parsed;
/// anything else is kept verbatim and sorts before every parseable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    instant: Option<DateTime<Utc>>,
}

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        let instant = parse_instant(&raw);
        Self { raw, instant }
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: Timestamp,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_reads_camel_case_and_defaults() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":"1","title":"A","createdAt":"2024-01-01"}"#).unwrap();
        assert_eq!(todo.id, TodoId::new("1"));
        assert_eq!(todo.description, None);
        assert!(!todo.completed);
        assert_eq!(todo.created_at.as_str(), "2024-01-01");
    }

    #[test]
    fn null_description_is_none() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"1","title":"A","description":null,"completed":true,"createdAt":"x"}"#,
        )
        .unwrap();
        assert_eq!(todo.description, None);
        assert!(todo.completed);
    }

    #[test]
    fn timestamp_serializes_raw_text() {
        let ts = Timestamp::from("2024-03-05T10:00:00.123+02:00");
        assert_eq!(
            serde_json::to_value(&ts).unwrap(),
            "2024-03-05T10:00:00.123+02:00"
        );
    }

    #[test]
    fn timestamps_order_chronologically_across_formats() {
        let date = Timestamp::from("2024-01-02");
        let earlier = Timestamp::from("2024-01-01T23:00:00Z");
        let offset = Timestamp::from("2024-01-02T01:00:00+02:00");
        assert!(earlier < date);
        // 2024-01-01T23:00Z
        assert_eq!(offset.instant(), earlier.instant());
        assert!(date > offset);
    }

    #[test]
    fn unparseable_timestamp_sorts_first() {
        let junk = Timestamp::from("yesterday");
        assert!(junk.instant().is_none());
        assert!(junk < Timestamp::from("1970-01-01"));
    }

    #[test]
    fn completion_update_omits_other_fields() {
        let json = serde_json::to_value(UpdateTodo::completion(true)).unwrap();
        assert_eq!(json, serde_json::json!({"completed": true}));
    }
}
