//! Project file assembly and decomposition.
//!
//! # Responsibility
//! - Concatenate the non-empty codec blocks inside one `<Project>` root in
//!   canonical order.
//! - Split a file back into blocks and route each to its codec by declared
//!   name.
//!
//! # Invariants
//! - Block order on write is always BaseInfo, ChapterSelection, Outline,
//!   WorldSettings, Characters; on read it does not matter.
//! - A document of five empty models is exactly [`EMPTY_PROJECT`].
//! - Word counts are refreshed from the editor view on every build; the
//!   caller's `BookInfo` is not mutated.

use crate::codec::{
    decode_any, BaseInfoCodec, BlockCodec, ChapterSelectionCodec, CharactersCodec, DecodedBlock,
    OutlineCodec, WorldSettingsCodec,
};
use crate::document::canonical::strip_save_timestamp;
use crate::document::{EditorView, Project};
use crate::model::book::count_visible_chars;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

pub const PROJECT_OPEN: &str = "<Project>\n";
pub const PROJECT_CLOSE: &str = "</Project>\n";
/// File content of a project whose five models are all effectively empty.
pub const EMPTY_PROJECT: &str = "<Project>\n</Project>\n";

static BLOCK_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<Type(?:\s[^>]*)?>.*?</Type>").expect("valid block regex"));

/// Result of loading a project file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub project: Project,
    /// Number of blocks that decoded into a model slot.
    pub recognized_blocks: usize,
}

impl LoadedDocument {
    /// Whether the text contained no recognizable project block.
    pub fn is_plain_text(&self) -> bool {
        self.recognized_blocks == 0
    }
}

/// Builds the project file text.
///
/// With `include_save_timestamp == false` the BaseInfo block loses its
/// `<LatestSave>` line, which yields the canonical form.
pub fn build_document(
    project: &Project,
    view: &EditorView,
    include_save_timestamp: bool,
) -> String {
    let mut book = project.book.clone();
    book.total_words = view.total_words;
    book.now_words = count_visible_chars(&view.buffer);

    let base_info = BaseInfoCodec::encode(&book).map(|block| {
        if include_save_timestamp {
            block
        } else {
            strip_save_timestamp(&block)
        }
    });
    let blocks = [
        base_info,
        ChapterSelectionCodec::encode(&project.chapters),
        OutlineCodec::encode(&project.outline),
        WorldSettingsCodec::encode(&project.world),
        CharactersCodec::encode(&project.characters),
    ];

    let mut out = String::from(PROJECT_OPEN);
    for block in blocks.iter().flatten() {
        out.push_str(block);
        out.push('\n');
    }
    out.push_str(PROJECT_CLOSE);
    out
}

/// Returns every `<Type>…</Type>` span in file order.
///
/// Matching is non-greedy, so each span ends at the first closing tag after
/// its opening tag.
pub fn split_document(text: &str) -> Vec<&str> {
    BLOCK_SPAN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Decodes every recognizable block into a fresh project.
///
/// Slots without a block keep their defaults. When the same block name
/// appears twice, the later block wins.
pub fn load_document(text: &str) -> LoadedDocument {
    let spans = split_document(text);
    let mut project = Project::default();
    let mut recognized_blocks = 0;

    for span in &spans {
        let Some(decoded) = decode_any(span) else {
            continue;
        };
        debug!(
            "event=block_load module=document status=ok name={}",
            decoded.name()
        );
        recognized_blocks += 1;
        match decoded {
            DecodedBlock::BaseInfo(book) => project.book = book,
            DecodedBlock::ChapterSelection(chapters) => project.chapters = chapters,
            DecodedBlock::Outline(outline) => project.outline = outline,
            DecodedBlock::WorldSettings(world) => project.world = world,
            DecodedBlock::Characters(characters) => project.characters = characters,
        }
    }

    info!(
        "event=document_load module=document status=ok spans={} recognized={}",
        spans.len(),
        recognized_blocks
    );
    LoadedDocument {
        project,
        recognized_blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::split_document;

    #[test]
    fn split_ignores_lookalike_tags() {
        let text = "<Project>\n<Types/>\n<Type>\n  <Name>A</Name>\n</Type>\n<Type kind=\"x\">b</Type>\n</Project>";
        assert_eq!(
            split_document(text),
            vec!["<Type>\n  <Name>A</Name>\n</Type>", "<Type kind=\"x\">b</Type>"]
        );
    }
}
