//! Field values — the three shapes a document field can take.
//!
//! Every field of a document is a scalar string, a flat list of strings, or
//! an ordered list of uniformly-shaped entries. Values are plain data; the
//! shape rules (which field holds which kind, which sub-fields an entry
//! carries) live in [`schema`](super::schema) and are enforced by the
//! operations on [`Document`](super::Document).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schema::FieldKind;

/// One record of an object-list field: a flat map of sub-field name → scalar.
///
/// All entries of the same field carry the same sub-field set (the field's
/// entry shape). Sub-field order inside the map is not meaningful; display
/// order is the form's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(BTreeMap<String, String>);

impl Entry {
    /// Builds the all-empty entry for a shape — the default template a form
    /// appends when the user adds a new block.
    pub fn blank(shape: &[&str]) -> Self {
        Entry(
            shape
                .iter()
                .map(|sub| (sub.to_string(), String::new()))
                .collect(),
        )
    }

    /// Builds an entry from `(sub_field, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Entry(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, sub_field: &str) -> Option<&str> {
        self.0.get(sub_field).map(String::as_str)
    }

    pub fn set(&mut self, sub_field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(sub_field.into(), value.into());
    }

    pub fn contains(&self, sub_field: &str) -> bool {
        self.0.contains_key(sub_field)
    }

    /// Iterates `(sub_field, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when the entry's sub-field set is exactly `shape`.
    pub fn matches_shape(&self, shape: &[&str]) -> bool {
        self.0.len() == shape.len() && shape.iter().all(|sub| self.0.contains_key(*sub))
    }

    /// True when every sub-field is empty — a freshly appended block the
    /// user never typed into.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    /// Rebuilds the entry with exactly the sub-fields of `shape`: existing
    /// values are kept, missing sub-fields become empty, unknown sub-fields
    /// are dropped. Used by the defensive merge when loading records.
    pub fn conform(mut self, shape: &[&str]) -> Self {
        Entry(
            shape
                .iter()
                .map(|sub| (sub.to_string(), self.0.remove(*sub).unwrap_or_default()))
                .collect(),
        )
    }
}

/// The value of one document field.
///
/// Serialized untagged, so the JSON is the natural shape a form backend
/// expects: `"text"`, `["a", "b"]`, or `[{"sub": "val"}]`. An empty JSON
/// array deserializes as an empty `List`; the defensive merge in
/// [`Document::replace`](super::Document::replace) coerces it to the
/// schema's declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
    Entries(Vec<Entry>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Scalar(_) => FieldKind::Scalar,
            FieldValue::List(_) => FieldKind::List,
            FieldValue::Entries(_) => FieldKind::Entries,
        }
    }

    /// The documented empty default for a kind: empty string or empty list.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Scalar => FieldValue::Scalar(String::new()),
            FieldKind::List => FieldValue::List(Vec::new()),
            FieldKind::Entries => FieldValue::Entries(Vec::new()),
        }
    }

    /// Element count for list kinds; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::List(items) => Some(items.len()),
            FieldValue::Entries(entries) => Some(entries.len()),
        }
    }

    /// True for an empty string, an empty list, or a list whose every
    /// element is blank.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::List(items) => items.iter().all(String::is_empty),
            FieldValue::Entries(entries) => entries.iter().all(Entry::is_blank),
        }
    }
}
