//! Template Catalog — static metadata for the presentation templates.
//!
//! The catalog is read-only data compiled into the binary: template ids,
//! display names, and the handful of attributes the chooser UI filters on.
//! Rendering mechanics live elsewhere; a template here is a named look, not
//! a layout engine.

use serde::{Deserialize, Serialize};

/// How much decorative graphics a template carries, from text-only to
/// heavily illustrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphicsLevel {
    Minimal,
    Moderate,
    Rich,
}

/// Display metadata for one presentation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub color_scheme: &'static str,
    pub headshot: bool,
    pub graphics: GraphicsLevel,
    pub columns: u8,
    pub recommended: bool,
}

/// Chooser predicates. Every `Some` field must match; `None` fields are
/// ignored, so the default filter matches the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub headshot: Option<bool>,
    pub graphics: Option<GraphicsLevel>,
    pub columns: Option<u8>,
    pub recommended: Option<bool>,
}

impl TemplateFilter {
    pub fn matches(&self, template: &Template) -> bool {
        self.headshot.map_or(true, |v| template.headshot == v)
            && self.graphics.map_or(true, |v| template.graphics == v)
            && self.columns.map_or(true, |v| template.columns == v)
            && self.recommended.map_or(true, |v| template.recommended == v)
    }
}

static TEMPLATES: &[Template] = &[
    Template {
        id: "stockholm",
        name: "Stockholm",
        color_scheme: "slate",
        headshot: true,
        graphics: GraphicsLevel::Moderate,
        columns: 2,
        recommended: true,
    },
    Template {
        id: "new_york",
        name: "New York",
        color_scheme: "charcoal",
        headshot: false,
        graphics: GraphicsLevel::Minimal,
        columns: 1,
        recommended: true,
    },
    Template {
        id: "vienna",
        name: "Vienna",
        color_scheme: "cream",
        headshot: true,
        graphics: GraphicsLevel::Rich,
        columns: 2,
        recommended: false,
    },
    Template {
        id: "milan",
        name: "Milan",
        color_scheme: "burgundy",
        headshot: false,
        graphics: GraphicsLevel::Moderate,
        columns: 2,
        recommended: false,
    },
    Template {
        id: "geneva",
        name: "Geneva",
        color_scheme: "ivory",
        headshot: true,
        graphics: GraphicsLevel::Minimal,
        columns: 1,
        recommended: false,
    },
    Template {
        id: "tokyo",
        name: "Tokyo",
        color_scheme: "ink",
        headshot: false,
        graphics: GraphicsLevel::Rich,
        columns: 2,
        recommended: false,
    },
    Template {
        id: "oslo",
        name: "Oslo",
        color_scheme: "fjord",
        headshot: true,
        graphics: GraphicsLevel::Minimal,
        columns: 2,
        recommended: false,
    },
    Template {
        id: "lisbon",
        name: "Lisbon",
        color_scheme: "terracotta",
        headshot: false,
        graphics: GraphicsLevel::Moderate,
        columns: 1,
        recommended: false,
    },
];

/// Every template, in catalog order.
pub fn all() -> &'static [Template] {
    TEMPLATES
}

/// Looks a template up by its id.
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates matching every predicate the filter sets, in catalog order.
pub fn filter(filter: &TemplateFilter) -> Vec<&'static Template> {
    TEMPLATES.iter().filter(|t| filter.matches(t)).collect()
}

/// The default template for new sessions: the first recommended entry.
pub fn recommended() -> &'static Template {
    TEMPLATES
        .iter()
        .find(|t| t.recommended)
        .unwrap_or(&TEMPLATES[0])
}
