//! Submit-time validation — collects human-readable issues before handoff.
//!
//! Validation is schema-driven: it walks the document's field table and
//! checks every `required` field for real content (whitespace does not
//! count). It never mutates the document and is deliberately separate from
//! the manager's shape checking — shape errors are programming errors,
//! validation issues are things the user still has to type.

use std::fmt;

use serde::Serialize;

use crate::document::{Document, Entry, FieldKind};

/// One submit-blocking problem, addressed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks the document against its schema's `required` flags, plus the
/// email format rule. At most one issue per field, in schema order.
pub fn validate_document(document: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for decl in document.schema().fields {
        let issue = match decl.kind {
            FieldKind::Scalar => {
                let value = document.scalar(decl.name).unwrap_or_default();
                check_scalar(decl.name, decl.required, value)
            }
            FieldKind::List => {
                let items = document.list(decl.name).unwrap_or_default();
                check_list(decl.name, decl.required, items)
            }
            FieldKind::Entries => {
                let entries = document.entries(decl.name).unwrap_or_default();
                check_entries(decl.name, decl.required, entries)
            }
        };
        if let Some(issue) = issue {
            issues.push(issue);
        }
    }

    issues
}

fn check_scalar(name: &'static str, required: bool, value: &str) -> Option<ValidationIssue> {
    let value = value.trim();
    if required && value.is_empty() {
        return Some(ValidationIssue {
            field: name,
            message: format!("{} is required", field_label(name)),
        });
    }
    if name == "email" && !value.is_empty() && !looks_like_email(value) {
        return Some(ValidationIssue {
            field: name,
            message: format!("{} must be a valid email address", field_label(name)),
        });
    }
    None
}

fn check_list(name: &'static str, required: bool, items: &[String]) -> Option<ValidationIssue> {
    if required && !items.iter().any(|item| !item.trim().is_empty()) {
        return Some(ValidationIssue {
            field: name,
            message: format!("Add at least one item to {}", field_label_lower(name)),
        });
    }
    None
}

fn check_entries(name: &'static str, required: bool, entries: &[Entry]) -> Option<ValidationIssue> {
    let has_content = entries
        .iter()
        .any(|entry| entry.iter().any(|(_, value)| !value.trim().is_empty()));
    if required && !has_content {
        return Some(ValidationIssue {
            field: name,
            message: format!("Fill in at least one {} entry", field_label_lower(name)),
        });
    }
    None
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// "full_name" -> "Full name".
fn field_label(name: &str) -> String {
    let mut label = field_label_lower(name);
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    label
}

fn field_label_lower(name: &str) -> String {
    name.replace('_', " ")
}
