//! Segment/chapter tree model.
//!
//! # Responsibility
//! - Hold the ordered prose of the project.
//! - Provide create, remove, move and reorder operations for the shell.
//!
//! # Invariants
//! - Chapter and segment ids survive every move and reorder.
//! - The tree keeps at least one chapter once it has one; removals that would
//!   leave zero chapters are refused.
//! - A segment emptied by a remove or move is dropped while other segments
//!   remain.
//! - Chapter word count is derived from the body, never stored.

use crate::model::{name_or, new_node_id, reorder, NodeId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One chapter of prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: NodeId,
    pub name: String,
    pub body: String,
}

impl Chapter {
    /// Creates an empty chapter with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_node_id(), name, String::new())
    }

    /// Creates a chapter with a caller-provided id, used by decode paths.
    pub fn with_id(id: NodeId, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            body: body.into(),
        }
    }

    /// Character count of the body.
    pub fn word_count(&self) -> usize {
        self.body.chars().count()
    }
}

/// Ordered group of chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: NodeId,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl Segment {
    /// Creates a segment with a fresh id and no chapters.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_node_id(), name)
    }

    pub fn with_id(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            chapters: Vec::new(),
        }
    }
}

/// Errors from chapter tree edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterTreeError {
    SegmentNotFound(NodeId),
    ChapterNotFound(NodeId),
    /// Removing the segment would leave the tree without a segment.
    LastSegment(NodeId),
    /// Removing the target would leave the tree without a chapter.
    LastChapter(NodeId),
    /// Move source and destination are the same segment.
    SameSegment(NodeId),
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for ChapterTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SegmentNotFound(id) => write!(f, "segment not found: {id}"),
            Self::ChapterNotFound(id) => write!(f, "chapter not found: {id}"),
            Self::LastSegment(id) => write!(f, "cannot remove the last segment: {id}"),
            Self::LastChapter(id) => write!(f, "cannot remove the last chapter: {id}"),
            Self::SameSegment(id) => write!(f, "chapter already belongs to segment: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl Error for ChapterTreeError {}

/// Ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterTree {
    pub segments: Vec<Segment>,
}

impl ChapterTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_chapters(&self) -> usize {
        self.segments.iter().map(|segment| segment.chapters.len()).sum()
    }

    /// Sum of all chapter word counts.
    pub fn total_word_count(&self) -> usize {
        self.chapters().map(Chapter::word_count).sum()
    }

    /// All chapters in document order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.segments.iter().flat_map(|segment| segment.chapters.iter())
    }

    pub fn first_chapter(&self) -> Option<&Chapter> {
        self.chapters().next()
    }

    pub fn segment(&self, id: NodeId) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    pub fn chapter(&self, id: NodeId) -> Option<&Chapter> {
        self.chapters().find(|chapter| chapter.id == id)
    }

    pub fn chapter_mut(&mut self, id: NodeId) -> Option<&mut Chapter> {
        self.segments
            .iter_mut()
            .flat_map(|segment| segment.chapters.iter_mut())
            .find(|chapter| chapter.id == id)
    }

    /// Returns `(segment_index, chapter_index)` for a chapter id.
    pub fn locate_chapter(&self, id: NodeId) -> Option<(usize, usize)> {
        self.segments.iter().enumerate().find_map(|(si, segment)| {
            segment
                .chapters
                .iter()
                .position(|chapter| chapter.id == id)
                .map(|ci| (si, ci))
        })
    }

    /// Appends a segment holding one empty "Chapter 1".
    ///
    /// Blank names become `Seg N`.
    pub fn add_segment(&mut self, name: &str) -> NodeId {
        let next = self.segments.len() + 1;
        let mut segment = Segment::new(name_or(name, || format!("Seg {next}")));
        segment.chapters.push(Chapter::new("Chapter 1"));
        let id = segment.id;
        self.segments.push(segment);
        id
    }

    /// Appends an empty chapter to a segment.
    ///
    /// Blank names become `Chapter N` where N counts the segment's chapters.
    pub fn add_chapter(
        &mut self,
        segment_id: NodeId,
        name: &str,
    ) -> Result<NodeId, ChapterTreeError> {
        let segment = self
            .segments
            .iter_mut()
            .find(|segment| segment.id == segment_id)
            .ok_or(ChapterTreeError::SegmentNotFound(segment_id))?;
        let next = segment.chapters.len() + 1;
        let chapter = Chapter::new(name_or(name, || format!("Chapter {next}")));
        let id = chapter.id;
        segment.chapters.push(chapter);
        Ok(id)
    }

    /// Removes a segment and its chapters.
    pub fn remove_segment(&mut self, segment_id: NodeId) -> Result<Segment, ChapterTreeError> {
        let index = self
            .segments
            .iter()
            .position(|segment| segment.id == segment_id)
            .ok_or(ChapterTreeError::SegmentNotFound(segment_id))?;
        if self.segments.len() <= 1 {
            return Err(ChapterTreeError::LastSegment(segment_id));
        }
        let remaining = self.total_chapters() - self.segments[index].chapters.len();
        if remaining == 0 {
            return Err(ChapterTreeError::LastChapter(segment_id));
        }
        Ok(self.segments.remove(index))
    }

    /// Removes one chapter, dropping its segment when emptied and others remain.
    pub fn remove_chapter(&mut self, chapter_id: NodeId) -> Result<Chapter, ChapterTreeError> {
        let (si, ci) = self
            .locate_chapter(chapter_id)
            .ok_or(ChapterTreeError::ChapterNotFound(chapter_id))?;
        if self.total_chapters() <= 1 {
            return Err(ChapterTreeError::LastChapter(chapter_id));
        }
        let removed = self.segments[si].chapters.remove(ci);
        self.drop_if_emptied(si);
        Ok(removed)
    }

    /// Moves a chapter to the end of another segment.
    ///
    /// The chapter keeps its id and body; an emptied source segment is dropped
    /// when other segments remain.
    pub fn move_chapter(
        &mut self,
        chapter_id: NodeId,
        to_segment: NodeId,
    ) -> Result<(), ChapterTreeError> {
        let (from_si, ci) = self
            .locate_chapter(chapter_id)
            .ok_or(ChapterTreeError::ChapterNotFound(chapter_id))?;
        let to_si = self
            .segments
            .iter()
            .position(|segment| segment.id == to_segment)
            .ok_or(ChapterTreeError::SegmentNotFound(to_segment))?;
        if from_si == to_si {
            return Err(ChapterTreeError::SameSegment(to_segment));
        }

        let moving = self.segments[from_si].chapters.remove(ci);
        self.segments[to_si].chapters.push(moving);
        self.drop_if_emptied(from_si);
        Ok(())
    }

    pub fn reorder_segments(&mut self, from: usize, to: usize) -> Result<(), ChapterTreeError> {
        let len = self.segments.len();
        if reorder(&mut self.segments, from, to) {
            Ok(())
        } else {
            Err(ChapterTreeError::IndexOutOfRange {
                index: from.max(to),
                len,
            })
        }
    }

    pub fn reorder_chapters(
        &mut self,
        segment_id: NodeId,
        from: usize,
        to: usize,
    ) -> Result<(), ChapterTreeError> {
        let segment = self
            .segments
            .iter_mut()
            .find(|segment| segment.id == segment_id)
            .ok_or(ChapterTreeError::SegmentNotFound(segment_id))?;
        let len = segment.chapters.len();
        if reorder(&mut segment.chapters, from, to) {
            Ok(())
        } else {
            Err(ChapterTreeError::IndexOutOfRange {
                index: from.max(to),
                len,
            })
        }
    }

    fn drop_if_emptied(&mut self, segment_index: usize) {
        if self.segments[segment_index].chapters.is_empty() && self.segments.len() > 1 {
            self.segments.remove(segment_index);
        }
    }
}
