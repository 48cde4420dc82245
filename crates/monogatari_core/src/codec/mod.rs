//! Block codecs for the five project sub-models.
//!
//! # Responsibility
//! - Define the shared encode/decode contract for one `<Type>` block.
//! - Dispatch a block to its codec by declared name.
//!
//! # Invariants
//! - `encode` returns `None` for an effectively empty model.
//! - `decode` returns `None` for malformed markup or a foreign block name and
//!   never panics; value anomalies are normalized instead of rejected.
//! - Block names are unique across codecs.
//!
//! # See also
//! - docs: `crate::document::assembler`

pub mod base_info;
pub mod chapter_selection;
pub mod characters;
pub mod escape;
pub(crate) mod markup;
pub mod outline;
pub mod template;
pub mod world_settings;

use crate::model::book::BookInfo;
use crate::model::chapter::ChapterTree;
use crate::model::character::CharacterRoster;
use crate::model::outline::OutlineTree;
use crate::model::world::WorldTree;
use log::debug;
use markup::{ElementView, BLOCK_NAME_TAG, BLOCK_TAG};
use roxmltree::Document;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use base_info::BaseInfoCodec;
pub use chapter_selection::ChapterSelectionCodec;
pub use characters::CharactersCodec;
pub use markup::format_id;
pub use outline::OutlineCodec;
pub use world_settings::WorldSettingsCodec;

/// Encode/decode pair for one block kind.
pub trait BlockCodec {
    type Model;

    /// Declared block name written as the block's first child.
    const NAME: &'static str;

    /// Serializes `model` into one block, or `None` when it is effectively
    /// empty.
    fn encode(model: &Self::Model) -> Option<String>;

    /// Parses one block. `None` for malformed text or another block's name.
    fn decode(block: &str) -> Option<Self::Model>;
}

/// Why a block could not be decoded. Surfaces only in debug logs.
#[derive(Debug)]
pub enum BlockError {
    Malformed(roxmltree::Error),
    /// Root element is not the block container.
    NotABlock(String),
    MissingName,
    UnknownName(String),
    NameMismatch { expected: &'static str, found: String },
}

impl Display for BlockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed block markup: {err}"),
            Self::NotABlock(tag) => write!(f, "root element `{tag}` is not a block"),
            Self::MissingName => write!(f, "block has no declared name"),
            Self::UnknownName(name) => write!(f, "unknown block name `{name}`"),
            Self::NameMismatch { expected, found } => {
                write!(f, "expected block `{expected}`, found `{found}`")
            }
        }
    }
}

impl Error for BlockError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for BlockError {
    fn from(value: roxmltree::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Result of decoding a block of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBlock {
    BaseInfo(BookInfo),
    ChapterSelection(ChapterTree),
    Outline(OutlineTree),
    WorldSettings(WorldTree),
    Characters(CharacterRoster),
}

impl DecodedBlock {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BaseInfo(_) => BaseInfoCodec::NAME,
            Self::ChapterSelection(_) => ChapterSelectionCodec::NAME,
            Self::Outline(_) => OutlineCodec::NAME,
            Self::WorldSettings(_) => WorldSettingsCodec::NAME,
            Self::Characters(_) => CharactersCodec::NAME,
        }
    }
}

type BlockReader = for<'a, 'input> fn(ElementView<'a, 'input>) -> DecodedBlock;

const DISPATCH: [(&str, BlockReader); 5] = [
    (BaseInfoCodec::NAME, |root| {
        DecodedBlock::BaseInfo(base_info::read(root))
    }),
    (ChapterSelectionCodec::NAME, |root| {
        DecodedBlock::ChapterSelection(chapter_selection::read(root))
    }),
    (OutlineCodec::NAME, |root| {
        DecodedBlock::Outline(outline::read(root))
    }),
    (WorldSettingsCodec::NAME, |root| {
        DecodedBlock::WorldSettings(world_settings::read(root))
    }),
    (CharactersCodec::NAME, |root| {
        DecodedBlock::Characters(characters::read(root))
    }),
];

/// Names of every recognized block, in canonical file order.
pub fn block_names() -> [&'static str; 5] {
    DISPATCH.map(|(name, _)| name)
}

/// Decodes a block of whichever kind its declared name selects.
pub fn decode_any(block: &str) -> Option<DecodedBlock> {
    let outcome = parse_block(block).and_then(|doc| {
        let root = ElementView::new(doc.root_element());
        let name = declared_name(&doc)?;
        let (_, reader) = DISPATCH
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .ok_or(BlockError::UnknownName(name))?;
        Ok(reader(root))
    });
    log_rejection(outcome, "any")
}

/// Shared decode path: parses, checks the declared name, then reads.
pub(crate) fn decode_named<T>(
    block: &str,
    expected: &'static str,
    read: impl FnOnce(ElementView<'_, '_>) -> T,
) -> Option<T> {
    let outcome = parse_block(block).and_then(|doc| {
        let name = declared_name(&doc)?;
        if name != expected {
            return Err(BlockError::NameMismatch {
                expected,
                found: name,
            });
        }
        Ok(read(ElementView::new(doc.root_element())))
    });
    log_rejection(outcome, expected)
}

fn parse_block(block: &str) -> Result<Document<'_>, BlockError> {
    let doc = Document::parse(block)?;
    let root = doc.root_element();
    if !root.has_tag_name(BLOCK_TAG) {
        return Err(BlockError::NotABlock(root.tag_name().name().to_string()));
    }
    Ok(doc)
}

fn declared_name(doc: &Document<'_>) -> Result<String, BlockError> {
    let first = doc
        .root_element()
        .children()
        .find(|node| node.is_element())
        .filter(|node| node.has_tag_name(BLOCK_NAME_TAG))
        .ok_or(BlockError::MissingName)?;
    let name = ElementView::new(first).own_text().trim().to_string();
    if name.is_empty() {
        return Err(BlockError::MissingName);
    }
    Ok(name)
}

fn log_rejection<T>(outcome: Result<T, BlockError>, codec: &str) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(
                "event=block_decode module=codec status=skipped codec={} reason={}",
                codec,
                reason_code(&err)
            );
            None
        }
    }
}

fn reason_code(err: &BlockError) -> &'static str {
    match err {
        BlockError::Malformed(_) => "malformed",
        BlockError::NotABlock(_) => "not_a_block",
        BlockError::MissingName => "missing_name",
        BlockError::UnknownName(_) => "unknown_name",
        BlockError::NameMismatch { .. } => "name_mismatch",
    }
}
