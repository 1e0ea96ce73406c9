//! The JSON field-value encoding used by the Firestore REST API, where each
//! field is an object tagging its type:
//!
//! ```json
//! { "fields": { "status": { "stringValue": "active" } } }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "timestampValue")]
    Timestamp(Timestamp),
    #[serde(rename = "integerValue")]
    Integer(i64),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
}

/// A point in time, always encoded in UTC with second precision, e.g.
/// `2024-01-31T08:00:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

/// A document body as sent to Firestore. Fields are kept in name order so
/// the encoded JSON is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    fields: BTreeMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, Value::String(value.into()))
    }

    pub fn timestamp(self, name: impl Into<String>, value: impl Into<Timestamp>) -> Self {
        self.field(name, Value::Timestamp(value.into()))
    }

    pub fn integer(self, name: impl Into<String>, value: i64) -> Self {
        self.field(name, Value::Integer(value))
    }

    pub fn boolean(self, name: impl Into<String>, value: bool) -> Self {
        self.field(name, Value::Boolean(value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The document Firestore returns after a successful create. Only the
/// metadata is read; the echoed fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDocument {
    /// The resource name of the document, for example
    /// `projects/{project_id}/databases/{database_id}/documents/{document_path}`.
    pub name: String,
    pub create_time: Option<String>,
}

impl CreatedDocument {
    pub fn id(&self) -> Option<&str> {
        self.name.rsplit_once('/').map(|(_, id)| id)
    }
}
