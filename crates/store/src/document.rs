//! Per-project journal document repository.

use std::collections::HashMap;

use dashmap::DashMap;
use tracing::info;

use daftar_core::document::{
    validate_can_delete, validate_can_modify, validate_document, validate_status_change, Document,
    DocumentDraft, DocumentStatus,
};
use daftar_shared::types::{DocumentId, ProjectId};

use crate::error::StoreError;

/// Concurrent store of journal documents, grouped by project.
///
/// Every write runs the save pipeline, so a stored document is always
/// balanced. Status rules gate update, delete, and status changes.
#[derive(Debug, Default)]
pub struct DocumentStore {
    projects: DashMap<ProjectId, HashMap<DocumentId, Document>>,
}

impl DocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a new document with the caller-chosen status.
    pub fn create(
        &self,
        project_id: ProjectId,
        draft: DocumentDraft,
        status: DocumentStatus,
    ) -> Result<Document, StoreError> {
        let validated = validate_document(draft)?;
        let document = Document::from_validated(validated, status);

        let mut docs = self.projects.entry(project_id).or_default();
        docs.insert(document.id, document.clone());
        info!(%project_id, document_id = %document.id, number = %document.number, %status, "created document");
        Ok(document)
    }

    /// Re-validates and replaces an existing document's content.
    ///
    /// The document keeps its id and status. Permanent documents are
    /// edit-locked and reject the update.
    pub fn update(
        &self,
        project_id: ProjectId,
        id: DocumentId,
        draft: DocumentDraft,
    ) -> Result<Document, StoreError> {
        let mut docs = self
            .projects
            .get_mut(&project_id)
            .ok_or(StoreError::DocumentNotFound(id))?;
        let existing = docs.get(&id).ok_or(StoreError::DocumentNotFound(id))?;
        validate_can_modify(existing.status)?;
        let status = existing.status;

        let validated = validate_document(draft)?;
        let mut document = Document::from_validated(validated, status);
        document.id = id;
        docs.insert(id, document.clone());
        info!(%project_id, document_id = %id, "updated document");
        Ok(document)
    }

    /// Moves a document between temporary and permanent.
    ///
    /// Re-asking for the current status is rejected so a caller can tell
    /// a no-op apart from a real transition.
    pub fn set_status(
        &self,
        project_id: ProjectId,
        id: DocumentId,
        status: DocumentStatus,
    ) -> Result<Document, StoreError> {
        let mut docs = self
            .projects
            .get_mut(&project_id)
            .ok_or(StoreError::DocumentNotFound(id))?;
        let document = docs.get_mut(&id).ok_or(StoreError::DocumentNotFound(id))?;
        validate_status_change(document.status, status)?;
        document.status = status;
        let document = document.clone();
        info!(%project_id, document_id = %id, %status, "changed document status");
        Ok(document)
    }

    /// Deletes a document. Only temporary documents may be deleted.
    pub fn delete(&self, project_id: ProjectId, id: DocumentId) -> Result<(), StoreError> {
        let mut docs = self
            .projects
            .get_mut(&project_id)
            .ok_or(StoreError::DocumentNotFound(id))?;
        let existing = docs.get(&id).ok_or(StoreError::DocumentNotFound(id))?;
        validate_can_delete(existing.status)?;
        docs.remove(&id);
        info!(%project_id, document_id = %id, "deleted document");
        Ok(())
    }

    /// Fetches one document.
    pub fn get(&self, project_id: ProjectId, id: DocumentId) -> Result<Document, StoreError> {
        self.projects
            .get(&project_id)
            .and_then(|docs| docs.get(&id).cloned())
            .ok_or(StoreError::DocumentNotFound(id))
    }

    /// Lists a project's documents, ordered by date then number.
    #[must_use]
    pub fn list(&self, project_id: ProjectId) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .projects
            .get(&project_id)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        documents.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.number.cmp(&b.number)));
        documents
    }
}
