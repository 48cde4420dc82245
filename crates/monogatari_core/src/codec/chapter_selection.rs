//! `ChapterSelection` block: segments and their chapters with prose bodies.

use crate::codec::markup::{ElementView, IdLedger, MarkupWriter, NAME_ATTR};
use crate::codec::{decode_named, BlockCodec};
use crate::model::chapter::{Chapter, ChapterTree, Segment};

pub struct ChapterSelectionCodec;

impl BlockCodec for ChapterSelectionCodec {
    type Model = ChapterTree;
    const NAME: &'static str = "ChapterSelection";

    fn encode(model: &ChapterTree) -> Option<String> {
        if model.is_empty() {
            return None;
        }

        let mut w = MarkupWriter::block(Self::NAME);
        for segment in &model.segments {
            w.open_node("Segment", &segment.name, segment.id);
            for chapter in &segment.chapters {
                w.open_node("Chapter", &chapter.name, chapter.id);
                w.text_element("Content", &chapter.body);
                w.close("Chapter");
            }
            w.close("Segment");
        }
        Some(w.finish())
    }

    fn decode(block: &str) -> Option<ChapterTree> {
        decode_named(block, Self::NAME, read)
    }
}

pub(crate) fn read(root: ElementView<'_, '_>) -> ChapterTree {
    let mut ids = IdLedger::default();
    let segments = root
        .children("Segment")
        .iter()
        .map(|seg| {
            let mut segment = Segment::with_id(ids.claim(seg), seg.attr(NAME_ATTR));
            segment.chapters = seg
                .children("Chapter")
                .iter()
                .map(|ch| Chapter::with_id(ids.claim(ch), ch.attr(NAME_ATTR), ch.text("Content")))
                .collect();
            segment
        })
        .collect();
    ChapterTree { segments }
}
