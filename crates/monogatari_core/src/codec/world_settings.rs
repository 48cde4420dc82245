//! `WorldSettings` block: the recursive location tree.
//!
//! # Invariants
//! - The synthetic root is never written; its children are the top-level
//!   `<Location>` entries.
//! - Decode re-wraps top-level entries under a fresh synthetic root.
//! - The location type is written as `<LocalType>` so no element inside a
//!   block is named like the block container.

use crate::codec::markup::{ElementView, IdLedger, MarkupWriter, NAME_ATTR};
use crate::codec::{decode_named, BlockCodec};
use crate::model::world::{CustomAttribute, WorldTree};
use crate::model::NodeId;
use log::debug;

pub struct WorldSettingsCodec;

const KEY_NAME_ATTR: &str = "Name";

impl BlockCodec for WorldSettingsCodec {
    type Model = WorldTree;
    const NAME: &'static str = "WorldSettings";

    fn encode(model: &WorldTree) -> Option<String> {
        if model.is_empty() {
            return None;
        }

        let mut w = MarkupWriter::block(Self::NAME);
        for id in model.top_level() {
            write_location(&mut w, model, id);
        }
        Some(w.finish())
    }

    fn decode(block: &str) -> Option<WorldTree> {
        decode_named(block, Self::NAME, read)
    }
}

fn write_location(w: &mut MarkupWriter, tree: &WorldTree, id: NodeId) {
    let Some(location) = tree.get(id) else {
        return;
    };
    w.open_node("Location", &location.name, id);
    w.optional_text("LocalType", &location.kind);
    if !location.attributes.is_empty() {
        w.open("Attributes");
        for attribute in &location.attributes {
            w.text_element_with(
                "Key",
                &[(KEY_NAME_ATTR, attribute.key.as_str())],
                &attribute.value,
            );
        }
        w.close("Attributes");
    }
    w.optional_text("Memo", &location.memo);
    for child in tree.children(id) {
        write_location(w, tree, child);
    }
    w.close("Location");
}

pub(crate) fn read(root: ElementView<'_, '_>) -> WorldTree {
    let mut tree = WorldTree::new();
    let mut ids = IdLedger::default();
    let anchor = tree.root_id();
    for element in root.children("Location") {
        read_location(&element, anchor, &mut tree, &mut ids);
    }
    tree
}

fn read_location(
    element: &ElementView<'_, '_>,
    parent: NodeId,
    tree: &mut WorldTree,
    ids: &mut IdLedger,
) {
    let id = match tree.insert_with_id(parent, ids.claim(element), element.attr(NAME_ATTR)) {
        Ok(id) => id,
        Err(err) => {
            debug!(
                "event=location_decode module=codec status=skipped reason={}",
                err
            );
            return;
        }
    };
    if let Some(location) = tree.get_mut(id) {
        location.kind = element.text("LocalType");
        location.memo = element.text("Memo");
        location.attributes = element
            .child("Attributes")
            .children("Key")
            .iter()
            .map(|key| CustomAttribute::new(key.attr(KEY_NAME_ATTR), key.own_text()))
            .collect();
    }
    for child in element.children("Location") {
        read_location(&child, id, tree, ids);
    }
}
