use monogatari_core::model::chapter::{ChapterTree, ChapterTreeError};
use monogatari_core::{BlockCodec, ChapterSelectionCodec};
use uuid::Uuid;

#[test]
fn add_segment_creates_first_chapter_and_numbered_defaults() {
    let mut tree = ChapterTree::new();
    let first = tree.add_segment("");
    let second = tree.add_segment(" Part Two ");
    assert_eq!(tree.segments[0].name, "Seg 1");
    assert_eq!(tree.segments[1].name, "Part Two");
    assert_eq!(tree.segment(first).unwrap().chapters[0].name, "Chapter 1");

    let added = tree.add_chapter(second, "  ").unwrap();
    assert_eq!(tree.chapter(added).unwrap().name, "Chapter 2");
    assert_eq!(tree.total_chapters(), 3);
}

#[test]
fn moved_chapter_keeps_identity_and_body() {
    let mut tree = ChapterTree::new();
    let from = tree.add_segment("A");
    let to = tree.add_segment("B");
    let chapter = tree.segment(from).unwrap().chapters[0].id;
    tree.chapter_mut(chapter).unwrap().body = "It was raining.".to_string();

    tree.move_chapter(chapter, to).unwrap();

    assert_eq!(tree.segments.len(), 1, "emptied source segment is dropped");
    let target = tree.segment(to).unwrap();
    assert_eq!(target.chapters.len(), 2);
    assert_eq!(target.chapters[1].id, chapter);
    assert_eq!(target.chapters[1].body, "It was raining.");
}

#[test]
fn removals_keep_at_least_one_chapter() {
    let mut tree = ChapterTree::new();
    let only = tree.add_segment("Only");
    let chapter = tree.segment(only).unwrap().chapters[0].id;
    assert_eq!(
        tree.remove_chapter(chapter),
        Err(ChapterTreeError::LastChapter(chapter))
    );
    assert_eq!(
        tree.remove_segment(only),
        Err(ChapterTreeError::LastSegment(only))
    );

    let other = tree.add_segment("Other");
    let removed = tree.remove_segment(only).unwrap();
    assert_eq!(removed.id, only);
    assert_eq!(tree.segments[0].id, other);
}

#[test]
fn reorder_rejects_out_of_range_indices() {
    let mut tree = ChapterTree::new();
    let a = tree.add_segment("A");
    tree.add_segment("B");
    tree.reorder_segments(1, 0).unwrap();
    assert_eq!(tree.segments[1].id, a);
    assert!(matches!(
        tree.reorder_segments(0, 5),
        Err(ChapterTreeError::IndexOutOfRange { .. })
    ));
}

#[test]
fn chapter_selection_roundtrips_bodies_verbatim() {
    let mut tree = ChapterTree::new();
    let seg = tree.add_segment("第一部 <Dawn>");
    let chapter = tree.segment(seg).unwrap().chapters[0].id;
    tree.chapter_mut(chapter).unwrap().body =
        "  leading spaces\r\nCRLF & \"quotes\" </Type>\n\n".to_string();
    tree.add_chapter(seg, "Empty").unwrap();

    let block = ChapterSelectionCodec::encode(&tree).unwrap();
    assert!(!block.contains("</Type>\n</Content>"));
    assert_eq!(ChapterSelectionCodec::decode(&block).unwrap(), tree);
}

#[test]
fn malformed_and_duplicate_ids_are_replaced() {
    let id = Uuid::new_v4().to_string();
    let block = format!(
        "<Type>\n  <Name>ChapterSelection</Name>\n  <Segment Name=\"S\" UUID=\"{id}\">\n    <Chapter Name=\"a\" UUID=\"{id}\">\n      <Content>x</Content>\n    </Chapter>\n    <Chapter Name=\"b\" UUID=\"not-a-uuid\">\n      <Content>y</Content>\n    </Chapter>\n  </Segment>\n</Type>"
    );
    let tree = ChapterSelectionCodec::decode(&block).unwrap();
    let segment = &tree.segments[0];
    assert_eq!(segment.id.to_string(), id);
    assert_ne!(segment.chapters[0].id, segment.id);
    assert_ne!(segment.chapters[1].id, segment.chapters[0].id);
    assert_eq!(segment.chapters[1].body, "y");
}

#[test]
fn ids_are_accepted_in_any_case() {
    let id = Uuid::new_v4();
    let block = format!(
        "<Type>\n  <Name>ChapterSelection</Name>\n  <Segment Name=\"S\" UUID=\"{}\">\n  </Segment>\n</Type>",
        id.to_string().to_uppercase()
    );
    let tree = ChapterSelectionCodec::decode(&block).unwrap();
    assert_eq!(tree.segments[0].id, id);
    assert!(tree.segments[0].chapters.is_empty());
}
