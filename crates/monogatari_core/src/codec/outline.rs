//! `Outline` block: storylines, events and scenes.
//!
//! # Invariants
//! - Empty memos and lists are omitted; blank list entries are dropped on both
//!   encode and decode.
//! - Storyline beat labels travel in the `Type` attribute.

use crate::codec::markup::{format_id, ElementView, IdLedger, MarkupWriter, NAME_ATTR, UUID_ATTR};
use crate::codec::{decode_named, BlockCodec};
use crate::model::outline::{Event, OutlineTree, Scene, Storyline};

pub struct OutlineCodec;

const BEAT_ATTR: &str = "Type";

impl BlockCodec for OutlineCodec {
    type Model = OutlineTree;
    const NAME: &'static str = "Outline";

    fn encode(model: &OutlineTree) -> Option<String> {
        if model.is_empty() {
            return None;
        }

        let mut w = MarkupWriter::block(Self::NAME);
        for storyline in &model.storylines {
            let id = format_id(storyline.id);
            w.open_with(
                "Storyline",
                &[
                    (NAME_ATTR, storyline.name.as_str()),
                    (BEAT_ATTR, storyline.beat.as_str()),
                    (UUID_ATTR, id.as_str()),
                ],
            );
            w.optional_text("Memo", &storyline.memo);
            write_cast_and_items(&mut w, &storyline.cast, &storyline.items);
            for event in &storyline.events {
                write_event(&mut w, event);
            }
            w.close("Storyline");
        }
        Some(w.finish())
    }

    fn decode(block: &str) -> Option<OutlineTree> {
        decode_named(block, Self::NAME, read)
    }
}

fn write_cast_and_items(w: &mut MarkupWriter, cast: &[String], items: &[String]) {
    w.optional_list("People", "Person", cast);
    w.optional_list("Items", "Item", items);
}

fn write_event(w: &mut MarkupWriter, event: &Event) {
    w.open_node("Event", &event.name, event.id);
    w.optional_text("Memo", &event.memo);
    write_cast_and_items(w, &event.cast, &event.items);
    for scene in &event.scenes {
        w.open_node("Scene", &scene.name, scene.id);
        w.optional_text("Time", &scene.time);
        w.optional_text("Location", &scene.location);
        write_cast_and_items(w, &scene.cast, &scene.items);
        w.optional_list("Doings", "Doing", &scene.actions);
        w.optional_text("Memo", &scene.memo);
        w.close("Scene");
    }
    w.close("Event");
}

pub(crate) fn read(root: ElementView<'_, '_>) -> OutlineTree {
    let mut ids = IdLedger::default();
    let storylines = root
        .children("Storyline")
        .iter()
        .map(|sl| {
            let mut storyline = Storyline::with_id(ids.claim(sl), sl.attr(NAME_ATTR));
            storyline.beat = sl.attr(BEAT_ATTR);
            storyline.memo = sl.text("Memo");
            storyline.cast = sl.non_blank_list("People", "Person");
            storyline.items = sl.non_blank_list("Items", "Item");
            storyline.events = sl
                .children("Event")
                .iter()
                .map(|ev| read_event(ev, &mut ids))
                .collect();
            storyline
        })
        .collect();
    OutlineTree { storylines }
}

fn read_event(ev: &ElementView<'_, '_>, ids: &mut IdLedger) -> Event {
    let mut event = Event::with_id(ids.claim(ev), ev.attr(NAME_ATTR));
    event.memo = ev.text("Memo");
    event.cast = ev.non_blank_list("People", "Person");
    event.items = ev.non_blank_list("Items", "Item");
    event.scenes = ev
        .children("Scene")
        .iter()
        .map(|sc| {
            let mut scene = Scene::with_id(ids.claim(sc), sc.attr(NAME_ATTR));
            scene.time = sc.text("Time");
            scene.location = sc.text("Location");
            scene.cast = sc.non_blank_list("People", "Person");
            scene.items = sc.non_blank_list("Items", "Item");
            scene.actions = sc.non_blank_list("Doings", "Doing");
            scene.memo = sc.text("Memo");
            scene
        })
        .collect();
    event
}
