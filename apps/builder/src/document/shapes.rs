//! Built-in document schemas — the field tables behind each supported kind.
//!
//! One static table per document kind, in the order forms render the
//! sections. Everything the manager, the validator, and the renderer know
//! about a kind comes from here; adding a field to a kind is a one-line
//! table change.

use super::schema::{DocumentKind, DocumentSchema, FieldKind, FieldSchema};

/// Sub-field names of one work-history entry.
pub const EXPERIENCE_SHAPE: &[&str] = &[
    "job_title",
    "company",
    "location",
    "start_date",
    "end_date",
    "description",
];

/// Sub-field names of one education entry.
pub const EDUCATION_SHAPE: &[&str] = &[
    "institution",
    "degree",
    "field_of_study",
    "start_date",
    "end_date",
    "description",
];

/// Sub-field names of one project entry.
pub const PROJECT_SHAPE: &[&str] = &["name", "link", "description"];

/// Sub-field names of one social-link entry.
pub const SOCIAL_LINK_SHAPE: &[&str] = &["label", "url"];

const fn scalar(name: &'static str, required: bool) -> FieldSchema {
    FieldSchema {
        name,
        kind: FieldKind::Scalar,
        min_len: 0,
        entry_shape: &[],
        required,
    }
}

const fn list(name: &'static str, required: bool) -> FieldSchema {
    FieldSchema {
        name,
        kind: FieldKind::List,
        min_len: 0,
        entry_shape: &[],
        required,
    }
}

const fn entries(
    name: &'static str,
    entry_shape: &'static [&'static str],
    min_len: usize,
    required: bool,
) -> FieldSchema {
    FieldSchema {
        name,
        kind: FieldKind::Entries,
        min_len,
        entry_shape,
        required,
    }
}

// Sections the editing form always renders with at least one block carry
// min_len = 1; every flat list starts empty and may stay empty.

static RESUME_FIELDS: &[FieldSchema] = &[
    scalar("full_name", true),
    scalar("headline", false),
    scalar("email", true),
    scalar("phone", false),
    scalar("location", false),
    scalar("summary", false),
    list("skills", true),
    list("languages", false),
    list("interests", false),
    entries("experience", EXPERIENCE_SHAPE, 1, true),
    entries("education", EDUCATION_SHAPE, 1, false),
    entries("projects", PROJECT_SHAPE, 0, false),
];

static PORTFOLIO_FIELDS: &[FieldSchema] = &[
    scalar("name", true),
    scalar("tagline", false),
    scalar("email", true),
    scalar("location", false),
    scalar("about", false),
    list("skills", false),
    entries("projects", PROJECT_SHAPE, 1, true),
    entries("social_links", SOCIAL_LINK_SHAPE, 0, false),
];

static PROFILE_FIELDS: &[FieldSchema] = &[
    scalar("full_name", true),
    scalar("headline", false),
    scalar("email", true),
    scalar("phone", false),
    scalar("location", false),
    scalar("bio", false),
    list("interests", false),
    entries("social_links", SOCIAL_LINK_SHAPE, 0, false),
];

pub fn resume() -> DocumentSchema {
    DocumentSchema {
        kind: DocumentKind::Resume,
        fields: RESUME_FIELDS,
    }
}

pub fn portfolio() -> DocumentSchema {
    DocumentSchema {
        kind: DocumentKind::Portfolio,
        fields: PORTFOLIO_FIELDS,
    }
}

pub fn profile() -> DocumentSchema {
    DocumentSchema {
        kind: DocumentKind::Profile,
        fields: PROFILE_FIELDS,
    }
}

/// The schema for a document kind, used when reconstructing a document
/// from a fetched record or a cached draft.
pub fn schema_for(kind: DocumentKind) -> DocumentSchema {
    match kind {
        DocumentKind::Resume => resume(),
        DocumentKind::Portfolio => portfolio(),
        DocumentKind::Profile => profile(),
    }
}
