use monogatari_core::model::world::{CustomAttribute, WorldTree, WorldTreeError};
use monogatari_core::{BlockCodec, WorldSettingsCodec};

fn capital_with_forest() -> (WorldTree, uuid::Uuid, uuid::Uuid) {
    let mut world = WorldTree::new();
    let root = world.root_id();
    let capital = world.add_location(root, "Capital").unwrap();
    let forest = world.add_location(capital, "Forest").unwrap();
    (world, capital, forest)
}

#[test]
fn synthetic_root_is_never_written() {
    let (mut world, capital, forest) = capital_with_forest();
    {
        let node = world.get_mut(forest).unwrap();
        node.kind = "Wild".to_string();
        node.attributes = vec![CustomAttribute::new("Climate", "damp & cold")];
        node.memo = "Wolves.".to_string();
    }

    let block = WorldSettingsCodec::encode(&world).unwrap();
    assert!(!block.contains("ALL"));
    assert!(block.contains(&format!(
        "  <Location Name=\"Capital\" UUID=\"{}\">\n    <Location Name=\"Forest\"",
        capital.to_string().to_uppercase()
    )));
    assert!(block.contains("<Key Name=\"Climate\">damp &amp; cold</Key>"));

    let decoded = WorldSettingsCodec::decode(&block).unwrap();
    assert_eq!(decoded, world);
    let top = decoded.top_level();
    assert_eq!(top, vec![capital]);
    assert_eq!(decoded.children(capital), vec![forest]);
    assert_eq!(decoded.get(forest).unwrap().kind, "Wild");
}

#[test]
fn world_with_only_the_root_is_omitted() {
    assert_eq!(WorldSettingsCodec::encode(&WorldTree::new()), None);
}

#[test]
fn root_cannot_be_edited() {
    let (mut world, capital, _) = capital_with_forest();
    let root = world.root_id();
    assert_eq!(world.rename(root, "X"), Err(WorldTreeError::RootImmutable));
    assert_eq!(world.remove(root), Err(WorldTreeError::RootImmutable));
    assert_eq!(
        world.move_location(root, capital, 0),
        Err(WorldTreeError::RootImmutable)
    );
}

#[test]
fn moving_under_own_descendant_is_refused() {
    let (mut world, capital, forest) = capital_with_forest();
    assert!(matches!(
        world.move_location(capital, forest, 0),
        Err(WorldTreeError::CycleDetected { .. })
    ));
    assert_eq!(world.parent(forest), Some(capital));
}

#[test]
fn move_clamps_index_and_keeps_identity() {
    let (mut world, capital, forest) = capital_with_forest();
    let root = world.root_id();
    let harbor = world.add_location(root, "Harbor").unwrap();
    world.move_location(forest, root, 99).unwrap();
    assert_eq!(world.top_level(), vec![capital, harbor, forest]);
    world.move_location(forest, root, 0).unwrap();
    assert_eq!(world.top_level(), vec![forest, capital, harbor]);
    assert_eq!(world.get(forest).unwrap().name, "Forest");
}

#[test]
fn remove_takes_the_subtree() {
    let (mut world, capital, forest) = capital_with_forest();
    assert_eq!(world.remove(capital).unwrap(), 2);
    assert!(world.is_empty());
    assert!(!world.contains(forest));
}

#[test]
fn preorder_reports_depths() {
    let (mut world, capital, forest) = capital_with_forest();
    let root = world.root_id();
    let harbor = world.add_location(root, "Harbor").unwrap();
    assert_eq!(world.preorder(), vec![(1, capital), (2, forest), (1, harbor)]);
}

#[test]
fn duplicate_location_ids_get_fresh_ones_on_decode() {
    let id = "0F8FAD5B-D9CB-469F-A165-70867728950E";
    let block = format!(
        "<Type>\n  <Name>WorldSettings</Name>\n  <Location Name=\"A\" UUID=\"{id}\">\n  </Location>\n  <Location Name=\"B\" UUID=\"{id}\">\n  </Location>\n</Type>"
    );
    let world = WorldSettingsCodec::decode(&block).unwrap();
    let top = world.top_level();
    assert_eq!(top.len(), 2);
    assert_ne!(top[0], top[1]);
    assert_eq!(world.get(top[1]).unwrap().name, "B");
}
