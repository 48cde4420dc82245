use monogatari_core::codec::template::{decode_library, encode_library};
use monogatari_core::model::template::WorldTemplate;
use monogatari_core::model::world::{CustomAttribute, WorldTree};
use monogatari_core::{MemoryProjectStore, TemplateError, TemplateLibrary};
use std::path::Path;

fn city() -> WorldTemplate {
    WorldTemplate::new("City", vec!["Population".to_string(), "Ruler".to_string()])
}

#[test]
fn library_text_roundtrips_and_skips_blank_types() {
    let forest = WorldTemplate::new("Forest & <Wild>", vec!["Beasts".to_string()]);
    let text = encode_library(&[WorldTemplate::blank(), city(), forest.clone()]);
    let parsed = decode_library(&text);
    assert_eq!(parsed, vec![city(), forest]);

    let with_blank = "<Type>\n  <WorldType> </WorldType>\n</Type>\n<Type>\n  <WorldType>Port</WorldType>\n</Type>";
    assert_eq!(decode_library(with_blank), vec![WorldTemplate::new("Port", vec![])]);
}

#[test]
fn blank_preset_is_first_and_protected() {
    let mut library = TemplateLibrary::new();
    assert_eq!(library.names(), vec!["Blank"]);
    assert!(matches!(library.remove("Blank"), Err(TemplateError::BuiltIn)));
    assert!(matches!(library.rename("Blank", "X"), Err(TemplateError::BuiltIn)));
    assert!(matches!(
        library.upsert(WorldTemplate::new("Blank", vec![])),
        Err(TemplateError::BuiltIn)
    ));
    assert!(matches!(
        library.upsert(WorldTemplate::new("  ", vec![])),
        Err(TemplateError::InvalidName)
    ));
}

#[test]
fn upsert_rename_and_remove() {
    let mut library = TemplateLibrary::new();
    assert!(!library.upsert(city()).unwrap());
    assert!(library
        .upsert(WorldTemplate::new("City", vec!["Mayor".to_string()]))
        .unwrap());
    assert_eq!(library.get("City").unwrap().keys, vec!["Mayor".to_string()]);

    library.upsert(WorldTemplate::new("Village", vec![])).unwrap();
    assert!(matches!(
        library.rename("Village", "City"),
        Err(TemplateError::NameTaken(_))
    ));
    library.rename("Village", "Hamlet").unwrap();
    assert_eq!(library.names(), vec!["Blank", "City", "Hamlet"]);
    assert_eq!(library.get("Hamlet").unwrap().world_type, "Hamlet");

    library.remove("City").unwrap();
    assert!(matches!(library.remove("City"), Err(TemplateError::NotFound(_))));
}

#[test]
fn apply_and_capture_through_the_world_tree() {
    let mut library = TemplateLibrary::new();
    library.upsert(city()).unwrap();

    let mut world = WorldTree::new();
    let root = world.root_id();
    let place = world.add_location(root, "Somewhere").unwrap();
    world.get_mut(place).unwrap().attributes = vec![CustomAttribute::new("Old", "v")];

    library.apply_to("City", &mut world, place).unwrap();
    let node = world.get(place).unwrap();
    assert_eq!(node.name, "City");
    assert_eq!(node.kind, "City");
    assert_eq!(
        node.attributes,
        vec![
            CustomAttribute::new("Population", ""),
            CustomAttribute::new("Ruler", "")
        ]
    );

    assert!(library.apply_to("City", &mut world, root).is_err());

    world.get_mut(place).unwrap().kind = "Capital".to_string();
    assert_eq!(library.capture_from(&world, place).unwrap(), "Capital");
    assert_eq!(
        library.get("Capital").unwrap().keys,
        vec!["Population".to_string(), "Ruler".to_string()]
    );

    world.get_mut(place).unwrap().kind = String::new();
    assert!(matches!(
        library.capture_from(&world, place),
        Err(TemplateError::UntypedLocation(_))
    ));
}

#[test]
fn library_persists_through_a_store() {
    let store = MemoryProjectStore::new();
    let path = Path::new("/data/WorldTemplate.xml");
    assert_eq!(TemplateLibrary::load(&store, path).unwrap(), TemplateLibrary::new());

    let mut library = TemplateLibrary::new();
    library.upsert(city()).unwrap();
    library.save(&store, path).unwrap();

    let loaded = TemplateLibrary::load(&store, path).unwrap();
    assert_eq!(loaded, library);
}
