//! Whole-project document and the live editor view beside it.
//!
//! # Responsibility
//! - Group the five sub-models into one owned [`Project`].
//! - Carry the editor state that is not part of any model but feeds encoding.
//!
//! # Invariants
//! - The editor buffer is the authoritative body of the selected chapter until
//!   it is synced back; every snapshot or encode syncs first.
//!
//! # See also
//! - docs: `crate::document::assembler`, `crate::document::canonical`

pub mod assembler;
pub mod canonical;

use crate::document::assembler::build_document;
use crate::model::book::BookInfo;
use crate::model::chapter::ChapterTree;
use crate::model::character::{CharacterProfile, CharacterRoster};
use crate::model::outline::OutlineTree;
use crate::model::world::WorldTree;
use crate::model::NodeId;
use chrono::{DateTime, Utc};

/// The five sibling sub-models of one project file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub book: BookInfo,
    pub chapters: ChapterTree,
    pub outline: OutlineTree,
    pub world: WorldTree,
    pub characters: CharacterRoster,
}

/// Beat label given to the starter storyline.
pub const STARTER_BEAT: &str = "Opening";

impl Project {
    /// Content of a freshly created project: one segment with an empty
    /// chapter, one storyline with one event and scene, a bare world tree and
    /// one blank character.
    pub fn starter() -> Self {
        let mut chapters = ChapterTree::new();
        chapters.add_segment("Seg 1");

        let mut outline = OutlineTree::new();
        let storyline = outline.add_storyline("Storyline 1");
        if let Some(line) = outline.storyline_mut(storyline) {
            line.beat = STARTER_BEAT.to_string();
        }
        if let Ok(event) = outline.add_event(storyline, "Event 1") {
            outline.add_scene(event, "Scene A").ok();
        }

        let mut characters = CharacterRoster::default();
        characters.add_character(CharacterProfile::new());

        Self {
            book: BookInfo::default(),
            chapters,
            outline,
            world: WorldTree::new(),
            characters,
        }
    }

    /// Editing view focused on the first chapter with its body loaded.
    pub fn first_chapter_view(&self, total_words: u64) -> EditorView {
        let first = self.chapters.first_chapter();
        EditorView {
            buffer: first.map(|c| c.body.clone()).unwrap_or_default(),
            selected_chapter: first.map(|c| c.id),
            total_words,
        }
    }
}

/// Live editing state supplied by the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorView {
    /// Text currently in the editor widget.
    pub buffer: String,
    /// Chapter the buffer belongs to, if any.
    pub selected_chapter: Option<NodeId>,
    /// Whole-project word count maintained by the shell.
    pub total_words: u64,
}

impl EditorView {
    /// Writes the buffer back into the selected chapter.
    ///
    /// Returns `false` when no chapter is selected or it no longer exists.
    pub fn sync_into(&self, project: &mut Project) -> bool {
        let Some(id) = self.selected_chapter else {
            return false;
        };
        match project.chapters.chapter_mut(id) {
            Some(chapter) => {
                if chapter.body != self.buffer {
                    chapter.body.clone_from(&self.buffer);
                }
                true
            }
            None => false,
        }
    }
}

/// A project together with the editor view that is editing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenDocument {
    pub project: Project,
    pub view: EditorView,
}

impl OpenDocument {
    pub fn new(project: Project, view: EditorView) -> Self {
        Self { project, view }
    }

    /// Starter project with its first chapter selected.
    pub fn starter() -> Self {
        let project = Project::starter();
        let view = project.first_chapter_view(0);
        Self { project, view }
    }

    /// Syncs the buffer into the selected chapter.
    pub fn sync_editor(&mut self) -> bool {
        self.view.sync_into(&mut self.project)
    }

    /// Syncs the buffer, stamps the save time and renders the save-mode file.
    pub fn save_text(&mut self, now: DateTime<Utc>) -> String {
        self.sync_editor();
        self.project.book.stamp_saved(now);
        build_document(&self.project, &self.view, true)
    }

    /// Syncs the current buffer, then moves the editor to `chapter`.
    ///
    /// Returns `false` and leaves the view untouched when `chapter` is unknown.
    pub fn select_chapter(&mut self, chapter: NodeId) -> bool {
        if self.project.chapters.chapter(chapter).is_none() {
            return false;
        }
        self.sync_editor();
        let body = self
            .project
            .chapters
            .chapter(chapter)
            .map(|c| c.body.clone())
            .unwrap_or_default();
        self.view.selected_chapter = Some(chapter);
        self.view.buffer = body;
        true
    }
}
