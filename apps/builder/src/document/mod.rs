//! Document Form State Manager — the single owner of one in-progress record.
//!
//! A [`Document`] is a schema-checked map of named fields, each a scalar, a
//! flat list, or an object list (see [`value::FieldValue`]). The manager
//! exposes a small, closed operation set that a form layer binds controls
//! to: replace a scalar, replace one list element, replace one sub-field of
//! one entry, append a caller-supplied template, remove by index, and
//! wholesale replace. Every operation is synchronous, total for well-formed
//! input, and touches only the named field.
//!
//! # Structural sharing
//! Fields are stored as `Arc<FieldValue>`. A mutation validates first, then
//! rebuilds only the touched field's value and swaps its `Arc`; a clone of
//! the document taken before the mutation keeps sharing storage with every
//! untouched field. [`Document::changed_fields`] turns that identity into
//! the change-detection signal a reactive rendering layer needs.
//!
//! # Failure semantics
//! Malformed input (unknown field, kind mismatch, out-of-range index,
//! unknown sub-field, minimum-length violation) returns a typed
//! [`DocumentError`] and leaves the document untouched. Callers on
//! production UI paths may discard the error to get no-op behavior; the
//! operation never panics and never partially applies.

pub mod schema;
pub mod shapes;
pub mod value;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use schema::{DocumentKind, DocumentSchema, FieldKind, FieldSchema};
pub use value::{Entry, FieldValue};

/// Untyped field map, as fetched from the gateway or read from a draft.
/// [`Document::from_raw`] turns it back into a fully-defined document.
pub type RawFields = BTreeMap<String, FieldValue>;

/// Shape errors: the operation referred to a field, index, or sub-field the
/// document's schema does not recognize. These are programming errors in
/// the calling form, not user-facing conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' is {actual}, expected {expected}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("index {index} out of range for '{field}' (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("unknown sub-field '{sub_field}' for entries of '{field}'")]
    UnknownSubField { field: String, sub_field: String },

    #[error("entry template does not match the shape of '{field}'")]
    EntryShapeMismatch { field: String },

    #[error("'{field}' must keep at least {min_len} item(s)")]
    MinLenReached { field: String, min_len: usize },
}

/// The template appended by [`Document::append_item`]: a scalar for flat
/// lists, a fully-populated entry for object lists. Supplied by the caller
/// because only the field's form knows its default shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemTemplate {
    Scalar(String),
    Entry(Entry),
}

impl From<String> for ItemTemplate {
    fn from(value: String) -> Self {
        ItemTemplate::Scalar(value)
    }
}

impl From<&str> for ItemTemplate {
    fn from(value: &str) -> Self {
        ItemTemplate::Scalar(value.to_string())
    }
}

impl From<Entry> for ItemTemplate {
    fn from(entry: Entry) -> Self {
        ItemTemplate::Entry(entry)
    }
}

/// The closed operation set as data. A form layer funnels every control
/// event through [`Document::apply`], which makes the wiring uniform and
/// the event stream loggable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    SetScalar {
        field: String,
        value: String,
    },
    SetListItem {
        field: String,
        index: usize,
        value: String,
    },
    SetEntryField {
        field: String,
        index: usize,
        sub_field: String,
        value: String,
    },
    AppendItem {
        field: String,
        template: ItemTemplate,
    },
    RemoveItem {
        field: String,
        index: usize,
    },
}

/// The in-progress record being edited: a fully-defined, schema-checked
/// field map. Cloning is cheap (per-field `Arc`s are shared), which is how
/// callers take pre-mutation snapshots for change detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    schema: DocumentSchema,
    fields: BTreeMap<&'static str, Arc<FieldValue>>,
}

impl Document {
    /// A fresh-form document: empty scalars, and lists seeded with the
    /// schema's `min_len` blank elements so the form starts with the
    /// blocks its policy says must stay.
    pub fn blank(schema: DocumentSchema) -> Self {
        let fields = schema
            .fields
            .iter()
            .map(|decl| (decl.name, Arc::new(decl.blank_value())))
            .collect();
        Document { schema, fields }
    }

    /// Builds a document from an untyped field map (a fetched record or a
    /// cached draft) with a defensive merge: every schema field takes the
    /// incoming value when its kind matches, and the documented empty
    /// default otherwise, so the result is always fully defined. Incoming
    /// entries are conformed to the schema's entry shape; unrecognized
    /// incoming fields are dropped.
    pub fn from_raw(schema: DocumentSchema, mut raw: RawFields) -> Self {
        let fields = schema
            .fields
            .iter()
            .map(|decl| {
                let merged = merge_field(decl, raw.remove(decl.name));
                (decl.name, Arc::new(merged))
            })
            .collect();
        Document { schema, fields }
    }

    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    pub fn kind(&self) -> DocumentKind {
        self.schema.kind
    }

    // ────────────────────────────────────────────────────────────────────
    // Reads
    // ────────────────────────────────────────────────────────────────────

    /// The shared handle for a field's current value. `Arc::ptr_eq` between
    /// two documents' handles is the change-detection primitive.
    pub fn field(&self, name: &str) -> Option<&Arc<FieldValue>> {
        self.fields.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)?.as_ref() {
            FieldValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.fields.get(name)?.as_ref() {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn entries(&self, name: &str) -> Option<&[Entry]> {
        match self.fields.get(name)?.as_ref() {
            FieldValue::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// Clones the field map out into untyped form for serialization.
    pub fn to_raw(&self) -> RawFields {
        self.fields
            .iter()
            .map(|(name, value)| (name.to_string(), (**value).clone()))
            .collect()
    }

    /// Names of the fields whose value identity differs from `snapshot`,
    /// in schema order. A field rebuilt with equal content still counts as
    /// changed; the comparison is identity, not deep equality.
    pub fn changed_fields(&self, snapshot: &Document) -> Vec<&'static str> {
        self.schema
            .fields
            .iter()
            .filter(|decl| {
                match (self.fields.get(decl.name), snapshot.fields.get(decl.name)) {
                    (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
                    _ => true,
                }
            })
            .map(|decl| decl.name)
            .collect()
    }

    // ────────────────────────────────────────────────────────────────────
    // Operations
    // ────────────────────────────────────────────────────────────────────

    /// Replaces a scalar field's value. Every other field keeps its value
    /// and its identity.
    pub fn set_scalar(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let decl = self.declared(field)?;
        match self.current(decl)? {
            FieldValue::Scalar(_) => {}
            other => return Err(kind_mismatch(field, FieldKind::Scalar, other.kind())),
        }
        self.store(decl.name, FieldValue::Scalar(value.into()));
        Ok(())
    }

    /// Replaces the element at `index` of a flat list. Length and every
    /// other element are unchanged.
    pub fn set_list_item(
        &mut self,
        field: &str,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let decl = self.declared(field)?;
        let items = match self.current(decl)? {
            FieldValue::List(items) => {
                check_index(field, index, items.len())?;
                let mut items = items.clone();
                items[index] = value.into();
                items
            }
            other => return Err(kind_mismatch(field, FieldKind::List, other.kind())),
        };
        self.store(decl.name, FieldValue::List(items));
        Ok(())
    }

    /// Replaces one sub-field of the entry at `index` of an object list.
    /// All other sub-fields of that entry, and all other entries, are
    /// unchanged.
    pub fn set_entry_field(
        &mut self,
        field: &str,
        index: usize,
        sub_field: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let decl = self.declared(field)?;
        if !decl.entry_shape.contains(&sub_field) {
            return Err(DocumentError::UnknownSubField {
                field: field.to_string(),
                sub_field: sub_field.to_string(),
            });
        }
        let entries = match self.current(decl)? {
            FieldValue::Entries(entries) => {
                check_index(field, index, entries.len())?;
                let mut entries = entries.clone();
                entries[index].set(sub_field, value.into());
                entries
            }
            other => return Err(kind_mismatch(field, FieldKind::Entries, other.kind())),
        };
        self.store(decl.name, FieldValue::Entries(entries));
        Ok(())
    }

    /// Appends the caller-supplied template as the new last element of a
    /// list field. Existing elements keep their indices. An entry template
    /// must carry exactly the field's entry shape.
    pub fn append_item(
        &mut self,
        field: &str,
        template: impl Into<ItemTemplate>,
    ) -> Result<(), DocumentError> {
        let decl = self.declared(field)?;
        let appended = match (self.current(decl)?, template.into()) {
            (FieldValue::List(items), ItemTemplate::Scalar(value)) => {
                let mut items = items.clone();
                items.push(value);
                FieldValue::List(items)
            }
            (FieldValue::Entries(entries), ItemTemplate::Entry(entry)) => {
                if !entry.matches_shape(decl.entry_shape) {
                    return Err(DocumentError::EntryShapeMismatch {
                        field: field.to_string(),
                    });
                }
                let mut entries = entries.clone();
                entries.push(entry);
                FieldValue::Entries(entries)
            }
            (other, ItemTemplate::Scalar(_)) => {
                return Err(kind_mismatch(field, FieldKind::List, other.kind()))
            }
            (other, ItemTemplate::Entry(_)) => {
                return Err(kind_mismatch(field, FieldKind::Entries, other.kind()))
            }
        };
        self.store(decl.name, appended);
        Ok(())
    }

    /// Removes the element at `index` of a list field; subsequent elements
    /// shift down by one. Refuses to shrink the list below the field's
    /// `min_len` policy.
    pub fn remove_item(&mut self, field: &str, index: usize) -> Result<(), DocumentError> {
        let decl = self.declared(field)?;
        let shrunk = match self.current(decl)? {
            FieldValue::List(items) => {
                check_index(field, index, items.len())?;
                check_floor(decl, items.len())?;
                let mut items = items.clone();
                items.remove(index);
                FieldValue::List(items)
            }
            FieldValue::Entries(entries) => {
                check_index(field, index, entries.len())?;
                check_floor(decl, entries.len())?;
                let mut entries = entries.clone();
                entries.remove(index);
                FieldValue::Entries(entries)
            }
            other => return Err(kind_mismatch(field, FieldKind::List, other.kind())),
        };
        self.store(decl.name, shrunk);
        Ok(())
    }

    /// Wholesale replacement from an untyped field map, used when loading a
    /// previously persisted record into an open form. Same defensive merge
    /// as [`Document::from_raw`]; the operation cannot fail.
    pub fn replace(&mut self, raw: RawFields) {
        *self = Document::from_raw(self.schema, raw);
    }

    /// Applies one [`Edit`]. Rejected edits are logged at debug level and
    /// leave the document untouched.
    pub fn apply(&mut self, edit: Edit) -> Result<(), DocumentError> {
        let result = match edit {
            Edit::SetScalar { field, value } => self.set_scalar(&field, value),
            Edit::SetListItem {
                field,
                index,
                value,
            } => self.set_list_item(&field, index, value),
            Edit::SetEntryField {
                field,
                index,
                sub_field,
                value,
            } => self.set_entry_field(&field, index, &sub_field, value),
            Edit::AppendItem { field, template } => self.append_item(&field, template),
            Edit::RemoveItem { field, index } => self.remove_item(&field, index),
        };
        if let Err(err) = &result {
            debug!("edit rejected: {err}");
        }
        result
    }

    // ────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ────────────────────────────────────────────────────────────────────

    fn declared(&self, field: &str) -> Result<&'static FieldSchema, DocumentError> {
        self.schema
            .field(field)
            .ok_or_else(|| DocumentError::UnknownField(field.to_string()))
    }

    fn current(&self, decl: &FieldSchema) -> Result<&FieldValue, DocumentError> {
        self.fields
            .get(decl.name)
            .map(Arc::as_ref)
            .ok_or_else(|| DocumentError::UnknownField(decl.name.to_string()))
    }

    fn store(&mut self, name: &'static str, value: FieldValue) {
        self.fields.insert(name, Arc::new(value));
    }
}

fn kind_mismatch(field: &str, expected: FieldKind, actual: FieldKind) -> DocumentError {
    DocumentError::KindMismatch {
        field: field.to_string(),
        expected,
        actual,
    }
}

fn check_index(field: &str, index: usize, len: usize) -> Result<(), DocumentError> {
    if index >= len {
        return Err(DocumentError::IndexOutOfRange {
            field: field.to_string(),
            index,
            len,
        });
    }
    Ok(())
}

fn check_floor(decl: &FieldSchema, len: usize) -> Result<(), DocumentError> {
    if len <= decl.min_len {
        return Err(DocumentError::MinLenReached {
            field: decl.name.to_string(),
            min_len: decl.min_len,
        });
    }
    Ok(())
}

/// Defensive merge for one field: incoming value when the kind matches
/// (entries conformed to the declared shape), documented empty default
/// otherwise. An empty incoming list is accepted for either list kind
/// because the untagged wire form cannot distinguish them.
fn merge_field(decl: &FieldSchema, incoming: Option<FieldValue>) -> FieldValue {
    match incoming {
        Some(FieldValue::Scalar(s)) if decl.kind == FieldKind::Scalar => FieldValue::Scalar(s),
        Some(FieldValue::List(items)) if decl.kind == FieldKind::List => FieldValue::List(items),
        Some(FieldValue::Entries(entries)) if decl.kind == FieldKind::Entries => FieldValue::Entries(
            entries
                .into_iter()
                .map(|entry| entry.conform(decl.entry_shape))
                .collect(),
        ),
        Some(FieldValue::List(items)) if decl.kind == FieldKind::Entries && items.is_empty() => {
            FieldValue::Entries(Vec::new())
        }
        Some(FieldValue::Entries(entries)) if decl.kind == FieldKind::List && entries.is_empty() => {
            FieldValue::List(Vec::new())
        }
        _ => FieldValue::empty(decl.kind),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::shapes::{self, EXPERIENCE_SHAPE};

    fn make_resume() -> Document {
        Document::blank(shapes::resume())
    }

    fn make_experience(job_title: &str, company: &str, start: &str, end: &str) -> Entry {
        Entry::from_pairs([
            ("job_title", job_title),
            ("company", company),
            ("location", ""),
            ("start_date", start),
            ("end_date", end),
            ("description", ""),
        ])
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn test_blank_document_is_fully_defined() {
        let doc = make_resume();
        for decl in doc.schema().fields {
            assert!(
                doc.field(decl.name).is_some(),
                "field '{}' must be present in a blank document",
                decl.name
            );
        }
        assert_eq!(doc.scalar("full_name"), Some(""));
        assert_eq!(doc.list("skills"), Some(&[][..]));
    }

    #[test]
    fn test_blank_document_seeds_min_len_entries() {
        let doc = make_resume();
        let experience = doc.entries("experience").unwrap();
        assert_eq!(experience.len(), 1, "min_len floor seeds one blank block");
        assert!(experience[0].is_blank());
    }

    // ── set_scalar ──────────────────────────────────────────────────────

    #[test]
    fn test_set_scalar_replaces_value() {
        let mut doc = make_resume();
        doc.set_scalar("full_name", "Ada Lovelace").unwrap();
        assert_eq!(doc.scalar("full_name"), Some("Ada Lovelace"));
    }

    #[test]
    fn test_set_scalar_preserves_sibling_identity() {
        let mut doc = make_resume();
        let snapshot = doc.clone();
        doc.set_scalar("full_name", "Ada Lovelace").unwrap();

        for decl in doc.schema().fields {
            let now = doc.field(decl.name).unwrap();
            let before = snapshot.field(decl.name).unwrap();
            if decl.name == "full_name" {
                assert!(!Arc::ptr_eq(now, before), "touched field must be replaced");
            } else {
                assert!(
                    Arc::ptr_eq(now, before),
                    "sibling '{}' must keep its identity",
                    decl.name
                );
            }
        }
        assert_eq!(doc.changed_fields(&snapshot), vec!["full_name"]);
    }

    #[test]
    fn test_set_scalar_unknown_field_leaves_document_untouched() {
        let mut doc = make_resume();
        let snapshot = doc.clone();
        let err = doc.set_scalar("fax_number", "n/a").unwrap_err();
        assert_eq!(err, DocumentError::UnknownField("fax_number".to_string()));
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_set_scalar_on_list_field_is_kind_mismatch() {
        let mut doc = make_resume();
        let err = doc.set_scalar("skills", "Rust").unwrap_err();
        assert_eq!(
            err,
            DocumentError::KindMismatch {
                field: "skills".to_string(),
                expected: FieldKind::Scalar,
                actual: FieldKind::List,
            }
        );
    }

    // ── set_list_item ───────────────────────────────────────────────────

    #[test]
    fn test_set_list_item_replaces_only_that_index() {
        let mut doc = make_resume();
        doc.append_item("skills", "React").unwrap();
        doc.append_item("skills", "Node.js").unwrap();
        doc.set_list_item("skills", 0, "Vue").unwrap();

        let skills: Vec<&str> = doc.list("skills").unwrap().iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["Vue", "Node.js"]);
    }

    #[test]
    fn test_set_list_item_out_of_range() {
        let mut doc = make_resume();
        doc.append_item("skills", "React").unwrap();
        let err = doc.set_list_item("skills", 1, "Vue").unwrap_err();
        assert_eq!(
            err,
            DocumentError::IndexOutOfRange {
                field: "skills".to_string(),
                index: 1,
                len: 1,
            }
        );
    }

    // ── set_entry_field ─────────────────────────────────────────────────

    #[test]
    fn test_set_entry_field_updates_only_target_sub_field() {
        let mut doc = make_resume();
        doc.set_entry_field("experience", 0, "job_title", "Engineer")
            .unwrap();
        doc.set_entry_field("experience", 0, "company", "Acme")
            .unwrap();

        let entry = &doc.entries("experience").unwrap()[0];
        assert_eq!(entry.get("job_title"), Some("Engineer"));
        assert_eq!(entry.get("company"), Some("Acme"));
        assert_eq!(entry.get("location"), Some(""), "untouched sub-field");
    }

    #[test]
    fn test_set_entry_field_on_different_sub_fields_commutes() {
        let base = {
            let mut doc = make_resume();
            doc.append_item(
                "experience",
                make_experience("A", "X", "2020-01-01", "2021-01-01"),
            )
            .unwrap();
            doc
        };

        let mut ab = base.clone();
        ab.set_entry_field("experience", 1, "job_title", "Engineer")
            .unwrap();
        ab.set_entry_field("experience", 1, "company", "Acme").unwrap();

        let mut ba = base.clone();
        ba.set_entry_field("experience", 1, "company", "Acme").unwrap();
        ba.set_entry_field("experience", 1, "job_title", "Engineer")
            .unwrap();

        assert_eq!(
            ab.entries("experience").unwrap(),
            ba.entries("experience").unwrap(),
            "order of independent sub-field writes must not matter"
        );
    }

    #[test]
    fn test_set_entry_field_unknown_sub_field() {
        let mut doc = make_resume();
        let snapshot = doc.clone();
        let err = doc
            .set_entry_field("experience", 0, "salary", "1")
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownSubField {
                field: "experience".to_string(),
                sub_field: "salary".to_string(),
            }
        );
        assert_eq!(doc, snapshot);
    }

    // ── append_item / remove_item ───────────────────────────────────────

    #[test]
    fn test_append_grows_by_exactly_one_and_keeps_indices() {
        let mut doc = make_resume();
        doc.append_item("skills", "React").unwrap();
        assert_eq!(doc.list("skills").unwrap().len(), 1);
        doc.append_item("skills", "Node.js").unwrap();
        assert_eq!(doc.list("skills").unwrap().len(), 2);
        assert_eq!(doc.list("skills").unwrap()[0], "React");
    }

    #[test]
    fn test_append_then_remove_last_is_content_identity() {
        let mut doc = make_resume();
        doc.append_item("skills", "React").unwrap();
        let before = doc.list("skills").unwrap().to_vec();

        let appended_at = before.len();
        doc.append_item("skills", "Temp").unwrap();
        doc.remove_item("skills", appended_at).unwrap();

        assert_eq!(doc.list("skills").unwrap(), before.as_slice());
    }

    #[test]
    fn test_append_entry_template_must_match_shape() {
        let mut doc = make_resume();
        let err = doc
            .append_item("experience", Entry::from_pairs([("job_title", "X")]))
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::EntryShapeMismatch {
                field: "experience".to_string(),
            }
        );
    }

    #[test]
    fn test_append_scalar_to_object_list_is_kind_mismatch() {
        let mut doc = make_resume();
        let err = doc.append_item("experience", "not an entry").unwrap_err();
        assert_eq!(
            err,
            DocumentError::KindMismatch {
                field: "experience".to_string(),
                expected: FieldKind::List,
                actual: FieldKind::Entries,
            }
        );
    }

    #[test]
    fn test_remove_shifts_subsequent_items_down() {
        let mut doc = make_resume();
        for skill in ["a", "b", "c"] {
            doc.append_item("skills", skill).unwrap();
        }
        doc.remove_item("skills", 1).unwrap();
        let skills: Vec<&str> = doc.list("skills").unwrap().iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_refuses_to_drop_below_min_len() {
        let mut doc = make_resume();
        let snapshot = doc.clone();
        // blank resume seeds exactly one experience block; the floor is 1
        let err = doc.remove_item("experience", 0).unwrap_err();
        assert_eq!(
            err,
            DocumentError::MinLenReached {
                field: "experience".to_string(),
                min_len: 1,
            }
        );
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut doc = make_resume();
        let err = doc.remove_item("skills", 0).unwrap_err();
        assert_eq!(
            err,
            DocumentError::IndexOutOfRange {
                field: "skills".to_string(),
                index: 0,
                len: 0,
            }
        );
    }

    // ── multi-step editing scenarios ────────────────────────────────────

    #[test]
    fn test_experience_block_scenario() {
        let mut doc = make_resume();
        doc.set_entry_field("experience", 0, "job_title", "A").unwrap();
        doc.set_entry_field("experience", 0, "company", "X").unwrap();
        doc.set_entry_field("experience", 0, "start_date", "2020-01-01")
            .unwrap();
        doc.set_entry_field("experience", 0, "end_date", "2021-01-01")
            .unwrap();

        doc.append_item(
            "experience",
            make_experience("", "", "2024-01-01", "2024-01-01"),
        )
        .unwrap();
        assert_eq!(doc.entries("experience").unwrap().len(), 2);
        assert_eq!(
            doc.entries("experience").unwrap()[0].get("job_title"),
            Some("A"),
            "first entry unchanged by append"
        );

        doc.set_entry_field("experience", 1, "job_title", "Engineer")
            .unwrap();
        assert_eq!(
            doc.entries("experience").unwrap()[1].get("job_title"),
            Some("Engineer")
        );
        assert_eq!(
            doc.entries("experience").unwrap()[0].get("job_title"),
            Some("A"),
            "entry 0 unchanged by entry 1 edit"
        );

        doc.remove_item("experience", 0).unwrap();
        let remaining = doc.entries("experience").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining[0].get("job_title"),
            Some("Engineer"),
            "surviving entry shifts to index 0"
        );
    }

    #[test]
    fn test_skills_scenario() {
        let mut doc = make_resume();
        doc.append_item("skills", "React").unwrap();
        doc.append_item("skills", "Node.js").unwrap();
        doc.set_list_item("skills", 0, "Vue").unwrap();

        let skills: Vec<&str> = doc.list("skills").unwrap().iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["Vue", "Node.js"]);
    }

    // ── replace / from_raw ──────────────────────────────────────────────

    #[test]
    fn test_replace_round_trips_a_complete_record() {
        let mut original = make_resume();
        original.set_scalar("full_name", "Ada Lovelace").unwrap();
        original.append_item("skills", "Rust").unwrap();
        original
            .set_entry_field("experience", 0, "company", "Analytical Engines")
            .unwrap();

        let mut loaded = make_resume();
        loaded.replace(original.to_raw());
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_replace_fills_missing_fields_with_empty_defaults() {
        let mut raw = RawFields::new();
        raw.insert(
            "full_name".to_string(),
            FieldValue::Scalar("Ada".to_string()),
        );

        let doc = Document::from_raw(shapes::resume(), raw);
        assert_eq!(doc.scalar("full_name"), Some("Ada"));
        assert_eq!(doc.list("skills"), Some(&[][..]));
        assert_eq!(
            doc.entries("experience"),
            Some(&[][..]),
            "missing object list becomes the empty list, not a seeded block"
        );
    }

    #[test]
    fn test_replace_coerces_empty_list_into_object_list_field() {
        // The untagged wire form parses [] as a flat list; the merge must
        // respect the schema's declared kind.
        let mut raw = RawFields::new();
        raw.insert("experience".to_string(), FieldValue::List(vec![]));

        let doc = Document::from_raw(shapes::resume(), raw);
        assert_eq!(doc.entries("experience"), Some(&[][..]));
    }

    #[test]
    fn test_replace_conforms_entry_shapes() {
        let mut raw = RawFields::new();
        raw.insert(
            "experience".to_string(),
            FieldValue::Entries(vec![Entry::from_pairs([
                ("job_title", "Engineer"),
                ("obsolete", "dropped"),
            ])]),
        );

        let doc = Document::from_raw(shapes::resume(), raw);
        let entry = &doc.entries("experience").unwrap()[0];
        assert!(entry.matches_shape(EXPERIENCE_SHAPE));
        assert_eq!(entry.get("job_title"), Some("Engineer"));
        assert_eq!(entry.get("obsolete"), None);
    }

    #[test]
    fn test_replace_drops_unrecognized_fields() {
        let mut raw = RawFields::new();
        raw.insert(
            "fax_number".to_string(),
            FieldValue::Scalar("none".to_string()),
        );

        let doc = Document::from_raw(shapes::resume(), raw);
        assert!(doc.field("fax_number").is_none());
    }

    #[test]
    fn test_replace_on_kind_mismatch_takes_empty_default() {
        let mut raw = RawFields::new();
        raw.insert(
            "skills".to_string(),
            FieldValue::Scalar("not a list".to_string()),
        );

        let doc = Document::from_raw(shapes::resume(), raw);
        assert_eq!(doc.list("skills"), Some(&[][..]));
    }

    // ── apply / Edit ────────────────────────────────────────────────────

    #[test]
    fn test_apply_dispatches_every_operation() {
        let mut doc = make_resume();

        doc.apply(Edit::SetScalar {
            field: "full_name".to_string(),
            value: "Ada".to_string(),
        })
        .unwrap();
        doc.apply(Edit::AppendItem {
            field: "skills".to_string(),
            template: ItemTemplate::Scalar("React".to_string()),
        })
        .unwrap();
        doc.apply(Edit::SetListItem {
            field: "skills".to_string(),
            index: 0,
            value: "Vue".to_string(),
        })
        .unwrap();
        doc.apply(Edit::SetEntryField {
            field: "experience".to_string(),
            index: 0,
            sub_field: "company".to_string(),
            value: "Acme".to_string(),
        })
        .unwrap();
        doc.apply(Edit::AppendItem {
            field: "experience".to_string(),
            template: ItemTemplate::Entry(Entry::blank(EXPERIENCE_SHAPE)),
        })
        .unwrap();
        doc.apply(Edit::RemoveItem {
            field: "experience".to_string(),
            index: 1,
        })
        .unwrap();

        assert_eq!(doc.scalar("full_name"), Some("Ada"));
        assert_eq!(doc.list("skills").unwrap()[0], "Vue");
        assert_eq!(doc.entries("experience").unwrap().len(), 1);
        assert_eq!(
            doc.entries("experience").unwrap()[0].get("company"),
            Some("Acme")
        );
    }

    #[test]
    fn test_apply_rejected_edit_is_surfaced_and_harmless() {
        let mut doc = make_resume();
        let snapshot = doc.clone();
        let err = doc
            .apply(Edit::SetScalar {
                field: "unknown".to_string(),
                value: "x".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, DocumentError::UnknownField("unknown".to_string()));
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_edit_serde_tagging() {
        let edit = Edit::SetEntryField {
            field: "experience".to_string(),
            index: 1,
            sub_field: "job_title".to_string(),
            value: "Engineer".to_string(),
        };
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["op"], "set_entry_field");
        assert_eq!(json["index"], 1);

        let back: Edit = serde_json::from_value(json).unwrap();
        assert_eq!(back, edit);
    }

    // ── changed_fields ──────────────────────────────────────────────────

    #[test]
    fn test_changed_fields_reports_touched_fields_in_schema_order() {
        let mut doc = make_resume();
        let snapshot = doc.clone();
        doc.append_item("skills", "Rust").unwrap();
        doc.set_scalar("full_name", "Ada").unwrap();

        let changed = doc.changed_fields(&snapshot);
        assert_eq!(changed, vec!["full_name", "skills"]);
        assert!(doc.changed_fields(&doc.clone()).is_empty());
    }
}
