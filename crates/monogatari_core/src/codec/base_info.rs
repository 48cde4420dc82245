//! `BaseInfo` block: book metadata, tags and save statistics.
//!
//! # Invariants
//! - `<LatestSave>` is written only when a save timestamp exists, always as
//!   its own line inside `<General>` so canonicalization can strip it.
//! - Word counts are written as the model holds them; the assembler refreshes
//!   them from the live editor state before encoding.

use crate::codec::markup::{ElementView, MarkupWriter};
use crate::codec::{decode_named, BlockCodec};
use crate::model::book::BookInfo;
use chrono::{DateTime, SecondsFormat, Utc};

pub struct BaseInfoCodec;

pub(crate) const LATEST_SAVE_TAG: &str = "LatestSave";

impl BlockCodec for BaseInfoCodec {
    type Model = BookInfo;
    const NAME: &'static str = "BaseInfo";

    fn encode(model: &BookInfo) -> Option<String> {
        if model.is_effectively_empty() {
            return None;
        }

        let mut w = MarkupWriter::block(Self::NAME);
        w.open("General");
        w.text_element("BookName", &model.title);
        w.text_element("Author", &model.author);
        w.text_element("Purpose", &model.premise);
        w.text_element("ToRecap", &model.tagline);
        w.text_element("StoryType", &model.genre);
        w.text_element("Intro", &model.synopsis);
        if let Some(saved) = model.last_saved {
            w.raw_element(LATEST_SAVE_TAG, format_timestamp(saved));
        }
        w.close("General");

        w.open("Tags");
        for tag in model.tags().iter().filter(|t| !t.trim().is_empty()) {
            w.text_element("Tag", tag);
        }
        w.close("Tags");

        w.open("Stats");
        w.raw_element("TotalWords", model.total_words);
        w.raw_element("NowWords", model.now_words);
        w.close("Stats");
        Some(w.finish())
    }

    fn decode(block: &str) -> Option<BookInfo> {
        decode_named(block, Self::NAME, read)
    }
}

pub(crate) fn read(root: ElementView<'_, '_>) -> BookInfo {
    let general = root.child("General");
    let mut info = BookInfo::default();
    info.title = general.text("BookName");
    info.author = general.text("Author");
    info.premise = general.text("Purpose");
    info.tagline = general.text("ToRecap");
    info.genre = general.text("StoryType");
    info.synopsis = general.text("Intro");
    info.last_saved = parse_timestamp(&general.text(LATEST_SAVE_TAG));
    info.set_tags(root.list("Tags", "Tag"));

    let stats = root.child("Stats");
    info.total_words = stats.count("TotalWords");
    info.now_words = stats.count("NowWords");
    info
}

/// RFC 3339 in UTC with a millisecond fraction, e.g. `2025-09-07T12:30:15.123Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts RFC 3339 with or without a fractional part. Blank or invalid text
/// reads as no timestamp.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
