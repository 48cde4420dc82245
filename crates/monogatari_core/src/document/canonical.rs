//! Canonical, timestamp-free rendering used for change detection.
//!
//! # Invariants
//! - Two calls without an intervening mutation return byte-identical text.
//! - Only the `<LatestSave>` line of the BaseInfo block is removed; the codec
//!   itself has no canonical mode.

use crate::document::assembler::build_document;
use crate::document::{EditorView, OpenDocument, Project};
use once_cell::sync::Lazy;
use regex::Regex;

static LATEST_SAVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]*<LatestSave>[\s\S]*?</LatestSave>[ \t]*\r?\n?")
        .expect("valid latest save regex")
});

/// Removes the smallest `<LatestSave>…</LatestSave>` span with its line.
pub fn strip_save_timestamp(block: &str) -> String {
    LATEST_SAVE_RE.replace_all(block, "").into_owned()
}

/// Syncs the editor buffer into its chapter, then renders the canonical form.
pub fn canonical_snapshot(project: &mut Project, view: &EditorView) -> String {
    view.sync_into(project);
    build_document(project, view, false)
}

/// Anything that can render the current canonical snapshot of a document.
pub trait SnapshotSource {
    fn canonical_snapshot(&mut self) -> String;
}

impl SnapshotSource for OpenDocument {
    fn canonical_snapshot(&mut self) -> String {
        canonical_snapshot(&mut self.project, &self.view)
    }
}
