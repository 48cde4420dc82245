//! Shared block writer and tolerant element reader.
//!
//! # Responsibility
//! - Emit the indented block layout every codec shares.
//! - Read one parsed block with type-default fallbacks for missing or
//!   malformed content.
//!
//! # Invariants
//! - Output indents two spaces per nesting level and writes leaf elements on
//!   one line.
//! - Every text and attribute value passes through the escaping helpers.
//! - Reader accessors never fail; absence and malformed values resolve to the
//!   documented defaults.

use crate::codec::escape::{escape_attr, escape_text};
use crate::model::character::{clamp_scale, Rgba, WireToken, SCALE_DEFAULT};
use crate::model::{new_node_id, NodeId};
use roxmltree::Node;
use std::collections::HashSet;
use std::fmt::Display;
use uuid::Uuid;

/// Tag of the name-agnostic block container.
pub const BLOCK_TAG: &str = "Type";
/// First child of every block, holding the declared block name.
pub const BLOCK_NAME_TAG: &str = "Name";
/// Identity attributes on addressable nodes.
pub const NAME_ATTR: &str = "Name";
pub const UUID_ATTR: &str = "UUID";

/// Uppercase hyphenated form used on the wire.
pub fn format_id(id: NodeId) -> String {
    id.hyphenated().to_string().to_uppercase()
}

/// Builder for one `<Type>` block.
pub(crate) struct MarkupWriter {
    out: String,
    depth: usize,
}

impl MarkupWriter {
    /// Starts a bare `<Type>` container without a declared name.
    pub fn container() -> Self {
        let mut writer = Self {
            out: String::new(),
            depth: 0,
        };
        writer.open(BLOCK_TAG);
        writer
    }

    /// Starts a block and writes its declared name.
    pub fn block(name: &str) -> Self {
        let mut writer = Self::container();
        writer.raw_element(BLOCK_NAME_TAG, name);
        writer
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn push_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attr(value));
            self.out.push('"');
        }
    }

    pub fn open(&mut self, tag: &str) {
        self.open_with(tag, &[]);
    }

    pub fn open_with(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.push_attrs(attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    /// Opens an addressable node with `Name` and `UUID` attributes.
    pub fn open_node(&mut self, tag: &str, name: &str, id: NodeId) {
        let id = format_id(id);
        self.open_with(tag, &[(NAME_ATTR, name), (UUID_ATTR, id.as_str())]);
    }

    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)], body: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.push_attrs(attrs);
        self.out.push('>');
        self.out.push_str(body);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// Free-text leaf.
    pub fn text_element(&mut self, tag: &str, value: &str) {
        self.leaf(tag, &[], &escape_text(value));
    }

    /// Free-text leaf, skipped when `value` is empty.
    pub fn optional_text(&mut self, tag: &str, value: &str) {
        if !value.is_empty() {
            self.text_element(tag, value);
        }
    }

    /// Free-text leaf carrying attributes.
    pub fn text_element_with(&mut self, tag: &str, attrs: &[(&str, &str)], value: &str) {
        self.leaf(tag, attrs, &escape_text(value));
    }

    /// Leaf for values whose textual form never needs escaping.
    pub fn raw_element(&mut self, tag: &str, value: impl Display) {
        self.leaf(tag, &[], &value.to_string());
    }

    pub fn flag(&mut self, tag: &str, value: bool) {
        self.raw_element(tag, if value { "true" } else { "false" });
    }

    pub fn color(&mut self, tag: &str, value: Rgba) {
        self.raw_element(tag, value.to_hex());
    }

    pub fn token<T: WireToken>(&mut self, tag: &str, value: T) {
        self.raw_element(tag, value.token());
    }

    /// Wrapper holding one `item` leaf per entry, written even when empty.
    pub fn list(&mut self, wrapper: &str, item: &str, values: &[String]) {
        self.open(wrapper);
        for value in values {
            self.text_element(item, value);
        }
        self.close(wrapper);
    }

    /// Wrapper holding the non-blank entries, skipped when none remain.
    pub fn optional_list(&mut self, wrapper: &str, item: &str, values: &[String]) {
        let kept: Vec<&String> = values.iter().filter(|v| !v.trim().is_empty()).collect();
        if kept.is_empty() {
            return;
        }
        self.open(wrapper);
        for value in kept {
            self.text_element(item, value);
        }
        self.close(wrapper);
    }

    /// Integer array as repeated `<Val>` entries, written verbatim.
    pub fn int_list(&mut self, wrapper: &str, values: &[i32]) {
        self.open(wrapper);
        for value in values {
            self.raw_element("Val", value);
        }
        self.close(wrapper);
    }

    /// Closes the block container.
    pub fn finish(mut self) -> String {
        debug_assert_eq!(self.depth, 1, "unbalanced block writer");
        self.close(BLOCK_TAG);
        self.out
    }
}

/// Possibly-absent element inside a parsed block.
#[derive(Clone, Copy)]
pub(crate) struct ElementView<'a, 'input> {
    node: Option<Node<'a, 'input>>,
}

impl<'a, 'input> ElementView<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node: Some(node) }
    }

    pub fn is_present(&self) -> bool {
        self.node.is_some()
    }

    /// First element child named `tag`.
    pub fn child(&self, tag: &str) -> ElementView<'a, 'input> {
        let node = self
            .node
            .and_then(|node| node.children().find(|c| c.is_element() && c.has_tag_name(tag)));
        ElementView { node }
    }

    /// Every element child named `tag`, in document order.
    pub fn children(&self, tag: &str) -> Vec<ElementView<'a, 'input>> {
        self.node
            .map(|node| {
                node.children()
                    .filter(|c| c.is_element() && c.has_tag_name(tag))
                    .map(ElementView::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concatenated text content of this element; empty when absent.
    pub fn own_text(&self) -> String {
        self.node
            .map(|node| {
                node.children()
                    .filter(|c| c.is_text())
                    .filter_map(|c| c.text())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Text of child `tag`, untrimmed; empty when absent.
    pub fn text(&self, tag: &str) -> String {
        self.child(tag).own_text()
    }

    /// Child `tag` as a clamped slider value. Malformed text reads as zero;
    /// an absent child keeps `default`.
    pub fn scale_or(&self, tag: &str, default: i32) -> i32 {
        let child = self.child(tag);
        if !child.is_present() {
            return default;
        }
        parse_scale(&child.own_text()).unwrap_or(0)
    }

    /// Child `tag` as a plain non-negative counter; malformed text reads as zero.
    pub fn count(&self, tag: &str) -> u64 {
        self.text(tag).trim().parse().unwrap_or(0)
    }

    /// `true` for the literal `true` or `1`, `false` otherwise.
    pub fn flag(&self, tag: &str) -> bool {
        matches!(self.text(tag).trim(), "true" | "1")
    }

    pub fn color_or(&self, tag: &str, default: Rgba) -> Rgba {
        Rgba::parse_hex(&self.text(tag)).unwrap_or(default)
    }

    pub fn token<T: WireToken>(&self, tag: &str) -> T {
        T::from_token_or_default(&self.text(tag))
    }

    /// Entries of `wrapper/item`, blank entries included.
    pub fn list(&self, wrapper: &str, item: &str) -> Vec<String> {
        self.child(wrapper)
            .children(item)
            .iter()
            .map(|e| e.own_text())
            .collect()
    }

    /// Entries of `wrapper/item` with blank entries dropped.
    pub fn non_blank_list(&self, wrapper: &str, item: &str) -> Vec<String> {
        self.list(wrapper, item)
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    /// Fixed-length slider array from `wrapper/Val`.
    ///
    /// Entries are clamped; malformed entries and padding use the neutral
    /// value; extra entries are dropped. An absent wrapper yields all-neutral.
    pub fn scales(&self, wrapper: &str, len: usize) -> Vec<i32> {
        let mut values: Vec<i32> = self
            .child(wrapper)
            .children("Val")
            .iter()
            .map(|e| parse_scale(&e.own_text()).unwrap_or(SCALE_DEFAULT))
            .take(len)
            .collect();
        values.resize(len, SCALE_DEFAULT);
        values
    }

    /// Attribute value, empty when absent.
    pub fn attr(&self, name: &str) -> String {
        self.node
            .and_then(|node| node.attribute(name))
            .unwrap_or_default()
            .to_string()
    }

    /// `UUID` attribute, or a fresh id when absent or malformed.
    pub fn id(&self) -> NodeId {
        self.node
            .and_then(|node| node.attribute(UUID_ATTR))
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .unwrap_or_else(new_node_id)
    }
}

/// Tracks ids already used within one decoded block.
///
/// A repeated id is replaced by a fresh one so identity stays unique.
#[derive(Default)]
pub(crate) struct IdLedger {
    seen: HashSet<NodeId>,
}

impl IdLedger {
    pub fn claim(&mut self, element: &ElementView<'_, '_>) -> NodeId {
        let id = element.id();
        if self.seen.insert(id) {
            return id;
        }
        let fresh = new_node_id();
        self.seen.insert(fresh);
        fresh
    }
}

fn parse_scale(text: &str) -> Option<i32> {
    let value: i64 = text.trim().parse().ok()?;
    Some(clamp_scale(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32))
}

#[cfg(test)]
mod tests {
    use super::{format_id, parse_scale, MarkupWriter};
    use uuid::Uuid;

    #[test]
    fn writer_indents_and_closes_block() {
        let mut w = MarkupWriter::block("Demo");
        w.open("Outer");
        w.text_element("Leaf", "a<b");
        w.close("Outer");
        assert_eq!(
            w.finish(),
            "<Type>\n  <Name>Demo</Name>\n  <Outer>\n    <Leaf>a&lt;b</Leaf>\n  </Outer>\n</Type>\n"
        );
    }

    #[test]
    fn ids_are_written_uppercase() {
        let id = Uuid::parse_str("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
        assert_eq!(format_id(id), "0F8FAD5B-D9CB-469F-A165-70867728950E");
    }

    #[test]
    fn scale_parse_clamps_out_of_range_values() {
        assert_eq!(parse_scale(" 999 "), Some(100));
        assert_eq!(parse_scale("-4"), Some(0));
        assert_eq!(parse_scale("99999999999999"), Some(100));
        assert_eq!(parse_scale("abc"), None);
    }
}
