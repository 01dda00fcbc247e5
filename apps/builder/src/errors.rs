//! Central error type — everything a session operation can fail with.
//!
//! Per-module errors ([`DocumentError`], [`GatewayError`], [`CacheError`])
//! stay typed and convert in via `#[from]`; the variants defined here are
//! the session-level failures that belong to no single module.

use thiserror::Error;

use crate::cache::CacheError;
use crate::document::DocumentError;
use crate::gateway::GatewayError;
use crate::session::validate::ValidationIssue;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("photo is {size} bytes, the limit is {max}")]
    PhotoTooLarge { size: usize, max: usize },

    #[error("photo could not be read: {0}")]
    PhotoRead(#[from] std::io::Error),

    #[error("submit blocked by {} validation issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
}

impl BuilderError {
    /// The collected issues when the error is a validation block.
    pub fn validation_issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            BuilderError::Validation(issues) => Some(issues),
            _ => None,
        }
    }
}
