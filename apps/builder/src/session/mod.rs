//! Form session — the single owner of one in-progress document.
//!
//! A [`FormSession`] wraps exactly one [`Document`] together with the
//! state that travels with it: whose record it is, which presentation
//! template is selected, the server id once the record exists, and an
//! optionally attached headshot. All document mutation goes through the
//! session synchronously; the only async paths are reading a photo file
//! and talking to the gateway.
//!
//! Submit is gated: [`FormSession::submit`] refuses to call the gateway
//! while [`validate::validate_document`] reports issues, and a gateway
//! failure leaves the document and session state intact so the user can
//! fix things and retry.

pub mod validate;

use std::path::Path;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::{DraftCache, DraftRecord};
use crate::catalog;
use crate::document::{Document, DocumentError, DocumentSchema, Edit};
use crate::errors::BuilderError;
use crate::gateway::{FetchedRecord, RecordGateway, RecordPayload};
use self::validate::ValidationIssue;

/// Hard cap on an attached headshot.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// What a successful submit produced: the record's server id and whether
/// this call created it or updated an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: Uuid,
    pub created: bool,
}

pub struct FormSession {
    document: Document,
    username: String,
    template_id: String,
    record_id: Option<Uuid>,
    photo: Option<Bytes>,
}

impl FormSession {
    /// Starts a fresh session: blank document, the catalog's recommended
    /// template, no server record yet.
    pub fn new(schema: DocumentSchema, username: impl Into<String>) -> Self {
        FormSession {
            document: Document::blank(schema),
            username: username.into(),
            template_id: catalog::recommended().id.to_string(),
            record_id: None,
            photo: None,
        }
    }

    /// Opens a session over a record fetched from the gateway. Unrecognized
    /// template ids fall back to the recommended template rather than
    /// failing the whole load.
    pub fn from_record(record: FetchedRecord) -> Self {
        let schema = crate::document::shapes::schema_for(record.kind);
        let template_id = match catalog::find(&record.template_id) {
            Some(template) => template.id.to_string(),
            None => {
                warn!(
                    "record {} references unknown template '{}', using recommended",
                    record.id, record.template_id
                );
                catalog::recommended().id.to_string()
            }
        };
        FormSession {
            document: Document::from_raw(schema, record.fields),
            username: record.username,
            template_id,
            record_id: Some(record.id),
            photo: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn record_id(&self) -> Option<Uuid> {
        self.record_id
    }

    /// Funnels one form event into the document.
    pub fn apply(&mut self, edit: Edit) -> Result<(), DocumentError> {
        self.document.apply(edit)
    }

    // ────────────────────────────────────────────────────────────────────
    // Template choice
    // ────────────────────────────────────────────────────────────────────

    /// Selects a template by id, validated against the catalog.
    pub fn select_template(&mut self, id: &str) -> Result<(), BuilderError> {
        let template = catalog::find(id)
            .ok_or_else(|| BuilderError::UnknownTemplate(id.to_string()))?;
        info!("template '{}' selected for '{}'", template.id, self.username);
        self.template_id = template.id.to_string();
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────
    // Photo
    // ────────────────────────────────────────────────────────────────────

    /// Attaches an in-memory headshot, enforcing the size cap.
    pub fn attach_photo(&mut self, bytes: Bytes) -> Result<(), BuilderError> {
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(BuilderError::PhotoTooLarge {
                size: bytes.len(),
                max: MAX_PHOTO_BYTES,
            });
        }
        self.photo = Some(bytes);
        Ok(())
    }

    /// Reads a photo file into the session.
    pub async fn load_photo(&mut self, path: impl AsRef<Path>) -> Result<(), BuilderError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        self.attach_photo(Bytes::from(bytes))
    }

    pub fn photo(&self) -> Option<&Bytes> {
        self.photo.as_ref()
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    // ────────────────────────────────────────────────────────────────────
    // Drafts
    // ────────────────────────────────────────────────────────────────────

    /// The cache key this session's drafts live under.
    pub fn draft_key(&self) -> String {
        format!("{}-{}", self.document.kind(), self.username)
    }

    /// A draft snapshot of the current state, stamped now.
    pub fn draft(&self) -> DraftRecord {
        DraftRecord {
            kind: self.document.kind(),
            template_id: self.template_id.clone(),
            saved_at: Utc::now(),
            fields: self.document.to_raw(),
        }
    }

    pub fn save_draft(&self, cache: &DraftCache) -> Result<(), BuilderError> {
        cache.save(&self.draft_key(), &self.draft())?;
        Ok(())
    }

    /// Restores the latest saved draft for this session's key, if any.
    /// Returns whether a draft was applied.
    pub fn resume_draft(&mut self, cache: &DraftCache) -> Result<bool, BuilderError> {
        let Some(draft) = cache.load(&self.draft_key())? else {
            return Ok(false);
        };
        if draft.kind != self.document.kind() {
            warn!(
                "draft under '{}' is a {} record, expected {}; ignoring",
                self.draft_key(),
                draft.kind,
                self.document.kind()
            );
            return Ok(false);
        }
        self.document.replace(draft.fields);
        if catalog::find(&draft.template_id).is_some() {
            self.template_id = draft.template_id;
        }
        info!("draft resumed for '{}'", self.username);
        Ok(true)
    }

    pub fn discard_draft(&self, cache: &DraftCache) -> Result<bool, BuilderError> {
        Ok(cache.remove(&self.draft_key())?)
    }

    // ────────────────────────────────────────────────────────────────────
    // Submit
    // ────────────────────────────────────────────────────────────────────

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate::validate_document(&self.document)
    }

    /// Hands the finished document to the gateway: create on first submit,
    /// update once a record id is known. Validation issues block the call;
    /// gateway failures leave the session untouched for a retry.
    pub async fn submit(
        &mut self,
        gateway: &dyn RecordGateway,
    ) -> Result<SubmitReceipt, BuilderError> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(BuilderError::Validation(issues));
        }

        let payload = RecordPayload {
            kind: self.document.kind(),
            username: self.username.clone(),
            template_id: self.template_id.clone(),
            fields: self.document.to_raw(),
        };

        match self.record_id {
            Some(id) => {
                gateway.update_record(id, &payload).await?;
                Ok(SubmitReceipt { id, created: false })
            }
            None => {
                let created = gateway.create_record(&payload).await?;
                self.record_id = Some(created.id);
                Ok(SubmitReceipt {
                    id: created.id,
                    created: true,
                })
            }
        }
    }
}
