use monogatari_core::model::outline::OutlineTree;
use monogatari_core::{BlockCodec, OutlineCodec};

#[test]
fn inherited_cast_and_items_are_copies() {
    let mut outline = OutlineTree::new();
    let line = outline.add_storyline("Main");
    {
        let storyline = outline.storyline_mut(line).unwrap();
        storyline.cast = vec!["Aki".to_string(), "Ren".to_string()];
        storyline.items = vec!["Lantern".to_string()];
    }
    let event = outline.add_event(line, "Arrival").unwrap();
    outline.storyline_mut(line).unwrap().cast.push("Mio".to_string());

    assert_eq!(
        outline.event(event).unwrap().cast,
        vec!["Aki".to_string(), "Ren".to_string()]
    );

    let scene = outline.add_scene(event, "").unwrap();
    outline.event_mut(event).unwrap().items.clear();
    let scene = outline.scene(scene).unwrap();
    assert_eq!(scene.name, "Scene 1");
    assert_eq!(scene.items, vec!["Lantern".to_string()]);
}

#[test]
fn moves_append_and_keep_ids() {
    let mut outline = OutlineTree::new();
    let a = outline.add_storyline("A");
    let b = outline.add_storyline("");
    assert_eq!(outline.storyline(b).unwrap().name, "Storyline 2");

    let event = outline.add_event(a, "E").unwrap();
    let other_event = outline.add_event(b, "F").unwrap();
    let scene = outline.add_scene(event, "S").unwrap();

    outline.move_scene(scene, other_event).unwrap();
    assert!(outline.event(event).unwrap().scenes.is_empty());
    assert_eq!(outline.event(other_event).unwrap().scenes[0].id, scene);

    outline.move_event(event, b).unwrap();
    let line_b = outline.storyline(b).unwrap();
    assert_eq!(line_b.events.len(), 2);
    assert_eq!(line_b.events[1].id, event);
    assert!(outline.storyline(a).unwrap().events.is_empty());
}

#[test]
fn outline_roundtrips_and_omits_empty_children() {
    let mut outline = OutlineTree::new();
    let line = outline.add_storyline("Main & Side");
    outline.storyline_mut(line).unwrap().beat = "Opening".to_string();
    let event = outline.add_event(line, "Storm").unwrap();
    let scene = outline.add_scene(event, "Cliff").unwrap();
    {
        let event = outline.event_mut(event).unwrap();
        let scene = event.scenes.iter_mut().find(|s| s.id == scene).unwrap();
        scene.time = "夜".to_string();
        scene.location = "Harbor <north>".to_string();
        scene.cast = vec!["Aki".to_string()];
        scene.actions = vec!["runs".to_string(), "falls".to_string()];
        scene.memo = "keep \"tense\"".to_string();
    }

    let block = OutlineCodec::encode(&outline).unwrap();
    assert!(block.contains("Type=\"Opening\""));
    assert!(!block.contains("<Items>"));
    assert!(block.contains("<Storyline Name=\"Main &amp; Side\" Type=\"Opening\" UUID="));
    assert_eq!(OutlineCodec::decode(&block).unwrap(), outline);
}

#[test]
fn blank_list_entries_are_skipped() {
    let block = "<Type>\n  <Name>Outline</Name>\n  <Storyline Name=\"L\" Type=\"\" UUID=\"\">\n    <People>\n      <Person>Aki</Person>\n      <Person> </Person>\n    </People>\n  </Storyline>\n</Type>";
    let outline = OutlineCodec::decode(block).unwrap();
    assert_eq!(outline.storylines[0].cast, vec!["Aki".to_string()]);
    assert!(outline.storylines[0].events.is_empty());
}

#[test]
fn empty_outline_is_omitted() {
    assert_eq!(OutlineCodec::encode(&OutlineTree::new()), None);
}
