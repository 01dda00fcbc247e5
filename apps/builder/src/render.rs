//! Markdown renderer — turns a finished document into portable text.
//!
//! The renderer is stateless and schema-driven: it walks the document's
//! field table in declaration order and emits a section per non-empty
//! field, so every document kind renders through the same code path. This
//! is the seam a PDF or HTML exporter would sit behind; nothing here knows
//! about styling.

use crate::document::{Document, Entry, FieldValue};

/// Scalar fields that become the document's H1 instead of a body section.
const TITLE_FIELDS: &[&str] = &["full_name", "name"];

/// Entry sub-field rendered as a trailing paragraph instead of a bullet.
const BODY_SUB_FIELD: &str = "description";

/// Renders the whole document as a markdown string. Empty fields, blank
/// list elements, and blank entries are skipped.
pub fn render_document_to_md(document: &Document) -> String {
    let mut md = format!("# {}\n\n", document_title(document));

    for decl in document.schema().fields {
        if TITLE_FIELDS.contains(&decl.name) {
            continue;
        }
        let Some(value) = document.field(decl.name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        md.push_str(&format!("## {}\n\n", title_case(decl.name)));
        match value.as_ref() {
            FieldValue::Scalar(text) => {
                md.push_str(text);
                md.push_str("\n\n");
            }
            FieldValue::List(items) => {
                for item in items.iter().filter(|item| !item.is_empty()) {
                    md.push_str(&format!("- {item}\n"));
                }
                md.push('\n');
            }
            FieldValue::Entries(entries) => {
                for entry in entries.iter().filter(|entry| !entry.is_blank()) {
                    render_entry(&mut md, decl.entry_shape, entry);
                }
            }
        }
    }

    md
}

/// One entry block: the first non-empty sub-field becomes the heading,
/// the rest become labeled bullets, the description a closing paragraph.
fn render_entry(md: &mut String, shape: &[&str], entry: &Entry) {
    let mut values = shape
        .iter()
        .filter(|sub| **sub != BODY_SUB_FIELD)
        .filter_map(|sub| entry.get(sub).filter(|v| !v.is_empty()).map(|v| (*sub, v)));

    match values.next() {
        Some((_, heading)) => md.push_str(&format!("### {heading}\n")),
        None => md.push_str("### (untitled)\n"),
    }
    for (sub, value) in values {
        md.push_str(&format!("- **{}:** {}\n", title_case(sub), value));
    }
    if let Some(description) = entry.get(BODY_SUB_FIELD).filter(|v| !v.is_empty()) {
        md.push_str(&format!("\n{description}\n"));
    }
    md.push('\n');
}

fn document_title(document: &Document) -> String {
    TITLE_FIELDS
        .iter()
        .filter_map(|name| document.scalar(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| title_case(document.kind().as_str()))
}

/// "field_of_study" -> "Field Of Study".
fn title_case(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
