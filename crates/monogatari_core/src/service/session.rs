//! Open-document session: project, editor view and dirty tracking together.
//!
//! # Responsibility
//! - Implement the shell's New, Open, Save and chapter-switch flows on top
//!   of the assembler and the dirty-state engine.
//! - Route destructive flows through the save-or-discard gate.
//!
//! # Invariants
//! - Every flow that replaces or persists the document resets the baseline
//!   afterwards, so a freshly created, opened or saved document is clean.
//! - The buffer is synced into the selected chapter before any snapshot,
//!   save or selection change.

use crate::document::assembler::load_document;
use crate::document::canonical::SnapshotSource;
use crate::document::{OpenDocument, Project};
use crate::model::NodeId;
use crate::service::dirty_state::{
    DecisionHost, DirtyState, DirtyStateEngine, GateError, GateOutcome, PendingAction,
};
use crate::store::{ProjectStore, StoreResult};
use chrono::{DateTime, Utc};
use log::info;
use std::path::Path;

/// How [`Session::open_text`] interpreted the opened text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Project file; `blocks` recognized blocks were loaded.
    Project { blocks: usize },
    /// No recognized block; the text became the editor buffer.
    PlainText,
}

pub struct Session {
    document: OpenDocument,
    dirty: DirtyStateEngine,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session over the all-empty document, already clean.
    pub fn new() -> Self {
        Self::with_document(OpenDocument::default())
    }

    /// Session over `document` with its current state as baseline.
    pub fn with_document(document: OpenDocument) -> Self {
        let mut session = Self {
            document,
            dirty: DirtyStateEngine::new(),
        };
        session.mark_clean();
        session
    }

    pub fn document(&self) -> &OpenDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut OpenDocument {
        &mut self.document
    }

    pub fn project(&self) -> &Project {
        &self.document.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.document.project
    }

    pub fn dirty(&self) -> &DirtyStateEngine {
        &self.dirty
    }

    pub fn has_unsaved_changes(&mut self) -> bool {
        self.dirty.has_unsaved_changes(&mut self.document)
    }

    pub fn state(&mut self) -> DirtyState {
        self.dirty.state(&mut self.document)
    }

    /// Takes the current canonical snapshot as baseline.
    pub fn mark_clean(&mut self) {
        self.dirty.reset_baseline(&mut self.document);
    }

    /// Replaces the document with starter content.
    pub fn new_document(&mut self) {
        self.document = OpenDocument::starter();
        self.mark_clean();
        info!("event=session_new module=service status=ok");
    }

    /// Adopts opened file text.
    ///
    /// Text with at least one recognized block replaces the project and
    /// selects its first chapter. Anything else keeps the models and becomes
    /// the editor buffer.
    pub fn open_text(&mut self, text: &str) -> OpenOutcome {
        let loaded = load_document(text);
        let outcome = if loaded.is_plain_text() {
            self.document.view.buffer = text.to_string();
            OpenOutcome::PlainText
        } else {
            let view = loaded
                .project
                .first_chapter_view(loaded.project.book.total_words);
            self.document = OpenDocument::new(loaded.project, view);
            OpenOutcome::Project {
                blocks: loaded.recognized_blocks,
            }
        };
        self.mark_clean();
        info!(
            "event=session_open module=service status=ok plain_text={}",
            outcome == OpenOutcome::PlainText
        );
        outcome
    }

    /// Syncs the buffer, stamps the save time and renders the save-mode file.
    ///
    /// The baseline is untouched; call [`Session::mark_clean`] once the text
    /// has been written, or use [`Session::save_to`].
    pub fn save_text(&mut self, now: DateTime<Utc>) -> String {
        self.document.save_text(now)
    }

    /// Saves through `store` and marks the session clean on success.
    pub fn save_to<St: ProjectStore + ?Sized>(
        &mut self,
        store: &St,
        path: &Path,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let text = self.save_text(now);
        store.write_text(path, &text)?;
        self.mark_clean();
        Ok(())
    }

    /// Moves the editor to `chapter`, syncing the current buffer first.
    pub fn select_chapter(&mut self, chapter: NodeId) -> bool {
        self.document.select_chapter(chapter)
    }

    /// Gate, then replace with starter content.
    pub fn request_new<H>(&mut self, host: &mut H) -> Result<GateOutcome, GateError<H::Error>>
    where
        H: DecisionHost<OpenDocument> + ?Sized,
    {
        let outcome = self.dirty.confirm_proceed_if_dirty(
            &mut self.document,
            host,
            PendingAction::NewDocument,
            |document| *document = OpenDocument::starter(),
        )?;
        if outcome.proceeded() {
            self.mark_clean();
        }
        Ok(outcome)
    }

    /// Gate, then adopt `text`. The open outcome is `None` when cancelled.
    pub fn request_open<H>(
        &mut self,
        host: &mut H,
        text: &str,
    ) -> Result<(GateOutcome, Option<OpenOutcome>), GateError<H::Error>>
    where
        H: DecisionHost<OpenDocument> + ?Sized,
    {
        let outcome = self.dirty.confirm_proceed_if_dirty(
            &mut self.document,
            host,
            PendingAction::OpenDocument,
            |_| {},
        )?;
        if !outcome.proceeded() {
            return Ok((outcome, None));
        }
        Ok((outcome, Some(self.open_text(text))))
    }

    /// Gate before closing. `Ok` with a proceeding outcome means the host may
    /// exit.
    pub fn request_quit<H>(&mut self, host: &mut H) -> Result<GateOutcome, GateError<H::Error>>
    where
        H: DecisionHost<OpenDocument> + ?Sized,
    {
        self.dirty
            .confirm_proceed_if_dirty(&mut self.document, host, PendingAction::Quit, |_| {})
    }
}

impl SnapshotSource for Session {
    fn canonical_snapshot(&mut self) -> String {
        self.document.canonical_snapshot()
    }
}
