//! # Document Manager
//!
//! Owns every open [`Document`] and the choice of which one is active.
//! Documents are kept in the order they were opened and are addressed by
//! name (their path as given).

use crate::document::{Document, DocumentOptions};
use crate::session::{SessionFile, SessionState};
use crate::EditorError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct DocumentManager {
    documents: Vec<Document>,
    active: Option<usize>,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and make it active.
    ///
    /// A document with the same name must not already be open.
    pub fn open(&mut self, doc: Document) -> Result<&mut Document, EditorError> {
        let name = doc.name();
        if self.contains(&name) {
            return Err(EditorError::DocumentAlreadyOpen(name));
        }

        info!(document = %name, "opened document");
        self.documents.push(doc);
        let index = self.documents.len() - 1;
        self.active = Some(index);
        Ok(&mut self.documents[index])
    }

    /// Remove a document without saving it. Closing the active document
    /// makes the first remaining one active; closing any other document
    /// leaves the active one as it is.
    pub fn close(&mut self, name: &str) -> Result<Document, EditorError> {
        let index = self.position(name)?;
        let doc = self.documents.remove(index);
        self.active = match self.active {
            _ if self.documents.is_empty() => None,
            Some(active) if active == index => Some(0),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };

        if doc.is_dirty() {
            warn!(document = %name, "closed document with unsaved changes");
        } else {
            info!(document = %name, "closed document");
        }
        Ok(doc)
    }

    pub fn close_active(&mut self) -> Result<Document, EditorError> {
        let name = self.active()?.name();
        self.close(&name)
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), EditorError> {
        self.active = Some(self.position(name)?);
        Ok(())
    }

    pub fn active(&self) -> Result<&Document, EditorError> {
        self.active
            .and_then(|index| self.documents.get(index))
            .ok_or(EditorError::NoActiveDocument)
    }

    pub fn active_mut(&mut self) -> Result<&mut Document, EditorError> {
        self.active
            .and_then(|index| self.documents.get_mut(index))
            .ok_or(EditorError::NoActiveDocument)
    }

    pub fn active_name(&self) -> Option<String> {
        self.active().ok().map(Document::name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_name().as_deref() == Some(name)
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Document> {
        self.documents.iter_mut().find(|doc| doc.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in open order
    pub fn names(&self) -> Vec<String> {
        self.documents.iter().map(Document::name).collect()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Names of documents with unsaved changes
    pub fn unsaved(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter(|doc| doc.is_dirty())
            .map(Document::name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Save the active document, optionally under a new name.
    ///
    /// Saving under the name of another open document is rejected.
    pub fn save_active(&mut self, path: Option<&Path>) -> Result<PathBuf, EditorError> {
        if let Some(path) = path {
            let target = path.display().to_string();
            let active = self.active()?.name();
            if target != active && self.contains(&target) {
                return Err(EditorError::DocumentAlreadyOpen(target));
            }
        }
        self.active_mut()?.save(path)
    }

    /// Capture the open files for the next start-up
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            files: self
                .documents
                .iter()
                .map(|doc| SessionFile {
                    path: doc.path.clone(),
                    show_id: doc.show_id,
                })
                .collect(),
            active_file: self.active().ok().map(|doc| doc.path.clone()),
        }
    }

    /// Re-open the files of a saved session.
    ///
    /// Files that no longer exist are skipped. Files that fail to load are
    /// skipped and returned with their error; restoring never aborts.
    pub fn restore(
        &mut self,
        state: &SessionState,
        options: &DocumentOptions,
    ) -> Vec<(PathBuf, EditorError)> {
        let mut failures = Vec::new();

        for file in &state.files {
            if !file.path.exists() {
                warn!(path = %file.path.display(), "session file no longer exists");
                continue;
            }
            let loaded = Document::load(&file.path).and_then(|doc| {
                let mut doc = doc.with_options(options);
                doc.show_id = file.show_id;
                self.open(doc).map(|_| ())
            });
            if let Err(err) = loaded {
                warn!(path = %file.path.display(), error = %err, "could not restore document");
                failures.push((file.path.clone(), err));
            }
        }

        if let Some(active) = &state.active_file {
            let name = active.display().to_string();
            if self.set_active(&name).is_err() && !self.is_empty() {
                self.active = Some(0);
            }
        }

        failures
    }

    fn position(&self, name: &str) -> Result<usize, EditorError> {
        self.documents
            .iter()
            .position(|doc| doc.name() == name)
            .ok_or_else(|| EditorError::UnknownDocument(name.to_string()))
    }
}
