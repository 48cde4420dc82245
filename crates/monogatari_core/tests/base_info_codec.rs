use chrono::{TimeZone, Utc};
use monogatari_core::codec::base_info::format_timestamp;
use monogatari_core::model::book::BookInfo;
use monogatari_core::{decode_any, BaseInfoCodec, BlockCodec, DecodedBlock};

fn sample_book() -> BookInfo {
    let mut book = BookInfo::default();
    book.title = "The <Quiet> Sea & Sky".to_string();
    book.author = "K. O'Hara".to_string();
    book.premise = "What if \"home\" moved?".to_string();
    book.tagline = "Tides remember.".to_string();
    book.genre = "Fantasy".to_string();
    book.synopsis = "  line one\nline two\r\n  ".to_string();
    book.add_tag("sea");
    book.add_tag("落日");
    book.total_words = 1200;
    book.now_words = 42;
    book
}

#[test]
fn empty_book_is_omitted() {
    assert_eq!(BaseInfoCodec::encode(&BookInfo::default()), None);

    let mut book = BookInfo::default();
    book.premise = "only a premise".to_string();
    assert_eq!(BaseInfoCodec::encode(&book), None);
}

#[test]
fn book_roundtrips_with_special_characters() {
    let book = sample_book();
    let block = BaseInfoCodec::encode(&book).unwrap();
    assert!(block.starts_with("<Type>\n  <Name>BaseInfo</Name>\n"));
    assert!(block.contains("<BookName>The &lt;Quiet&gt; Sea &amp; Sky</BookName>"));

    let decoded = BaseInfoCodec::decode(&block).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn latest_save_is_written_on_its_own_line_and_read_back() {
    let mut book = sample_book();
    let at = Utc.with_ymd_and_hms(2025, 9, 7, 12, 30, 15).unwrap();
    book.stamp_saved(at);
    let block = BaseInfoCodec::encode(&book).unwrap();
    assert!(block.contains(&format!(
        "\n    <LatestSave>{}</LatestSave>\n",
        format_timestamp(at)
    )));
    assert_eq!(BaseInfoCodec::decode(&block).unwrap().last_saved, Some(at));
}

#[test]
fn decode_tolerates_missing_sections_and_bad_counts() {
    let block = "<Type>\n  <Name>BaseInfo</Name>\n  <General>\n    <BookName>Only title</BookName>\n  </General>\n  <Stats>\n    <TotalWords>lots</TotalWords>\n  </Stats>\n</Type>";
    let book = BaseInfoCodec::decode(block).unwrap();
    assert_eq!(book.title, "Only title");
    assert_eq!(book.author, "");
    assert!(book.tags().is_empty());
    assert_eq!(book.total_words, 0);
    assert_eq!(book.last_saved, None);
}

#[test]
fn duplicate_and_blank_tags_are_dropped_on_decode() {
    let block = "<Type>\n  <Name>BaseInfo</Name>\n  <Tags>\n    <Tag>a</Tag>\n    <Tag>  </Tag>\n    <Tag>b</Tag>\n    <Tag>a</Tag>\n  </Tags>\n</Type>";
    let book = BaseInfoCodec::decode(block).unwrap();
    assert_eq!(book.tags(), &["a".to_string(), "b".to_string()]);
}

#[test]
fn foreign_or_broken_blocks_are_rejected() {
    let outline = "<Type>\n  <Name>Outline</Name>\n</Type>";
    assert_eq!(BaseInfoCodec::decode(outline), None);
    assert_eq!(BaseInfoCodec::decode("<Type><Name>BaseInfo</Name>"), None);
    assert_eq!(BaseInfoCodec::decode("<Other><Name>BaseInfo</Name></Other>"), None);
    assert_eq!(BaseInfoCodec::decode("<Type>\n  <General/>\n</Type>"), None);
}

#[test]
fn decode_any_dispatches_by_declared_name() {
    let block = BaseInfoCodec::encode(&sample_book()).unwrap();
    match decode_any(&block) {
        Some(DecodedBlock::BaseInfo(book)) => assert_eq!(book.genre, "Fantasy"),
        other => panic!("unexpected dispatch: {other:?}"),
    }
    assert!(decode_any("<Type>\n  <Name>Unknown</Name>\n</Type>").is_none());
}
