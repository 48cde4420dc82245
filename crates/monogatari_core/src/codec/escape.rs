//! Markup-safe escaping for the five reserved characters.
//!
//! # Invariants
//! - `escape` replaces `&` before anything else so existing entities are never
//!   double-escaped.
//! - `unescape(escape(s)) == s` for every input free of markup-illegal code
//!   points.
//! - Code points the markup cannot carry (C0 controls other than TAB, LF and
//!   CR, plus U+FFFE and U+FFFF) are written as U+FFFD on every escaping path.
//! - Decoders rely on the markup reader for un-escaping; `unescape` exists for
//!   callers that hold raw fragments.

/// Replaces `& < > " '` with their named entities.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

/// Reverses [`escape`]. Unknown entities are left untouched.
pub fn unescape(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Escaping for element text.
///
/// Carriage returns become character references so the reader's line-end
/// normalization cannot rewrite them.
pub(crate) fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\r' => out.push_str("&#13;"),
            _ => push_escaped(&mut out, ch),
        }
    }
    out
}

/// Escaping for attribute values.
///
/// Tab, line feed and carriage return become character references so
/// attribute-value normalization keeps them.
pub(crate) fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => push_escaped(&mut out, ch),
        }
    }
    out
}

/// U+FFFD stands in for code points the markup reader rejects even as
/// character references.
const REPLACEMENT: char = '\u{FFFD}';

fn is_markup_legal(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        _ if !is_markup_legal(ch) => out.push(REPLACEMENT),
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&apos;"),
        _ => out.push(ch),
    }
}
