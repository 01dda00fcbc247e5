//! Document schemas — the declared shape of each document kind.
//!
//! A schema is static data: an ordered list of field definitions giving each
//! field's name, kind, minimum-length policy, entry shape, and whether
//! submit-time validation requires it. The operations on
//! [`Document`](super::Document) check every mutation against the schema, so
//! a typo'd field name or a kind mismatch is a typed error instead of silent
//! state corruption.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::FieldValue;

/// The three field kinds a document distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A single string value (plain text, date string, number-as-string).
    Scalar,
    /// An ordered list of string values.
    List,
    /// An ordered list of uniformly-shaped entries.
    Entries,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Scalar => "a scalar",
            FieldKind::List => "a flat list",
            FieldKind::Entries => "an object list",
        };
        f.write_str(name)
    }
}

/// The record kinds the builder edits and the gateway stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    Portfolio,
    Profile,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::Portfolio => "portfolio",
            DocumentKind::Profile => "profile",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field's declaration within a schema.
///
/// `min_len` is the explicit minimum-length policy for list fields: the
/// floor below which `remove_item` refuses to shrink the list. It replaces
/// the remove-button guard the form layer would otherwise re-implement per
/// section. `entry_shape` is the fixed sub-field set for `Entries` fields
/// and empty for the other kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub min_len: usize,
    pub entry_shape: &'static [&'static str],
    /// Submit-time validation demands a non-empty value. Enforced by
    /// `session::validate`, never by the document operations themselves.
    pub required: bool,
}

impl FieldSchema {
    /// The value a blank (fresh-form) document starts with: empty scalar or
    /// a list seeded with `min_len` blank elements, so a new form already
    /// shows the blocks the policy says must stay.
    pub fn blank_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Scalar => FieldValue::Scalar(String::new()),
            FieldKind::List => FieldValue::List(vec![String::new(); self.min_len]),
            FieldKind::Entries => FieldValue::Entries(
                (0..self.min_len)
                    .map(|_| super::value::Entry::blank(self.entry_shape))
                    .collect(),
            ),
        }
    }
}

/// The full declared shape of one document kind. Field order is display
/// order: renderers and validators walk `fields` in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSchema {
    pub kind: DocumentKind,
    pub fields: &'static [FieldSchema],
}

impl DocumentSchema {
    /// Looks up a field declaration by name. Linear scan; schemas hold a
    /// dozen fields at most.
    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}
