//! Extraction over TOML scene fixtures

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use block_extract::{
    EntityId, ExtractConfig, Extractor, GeometryStore, MemoryStore, Outcome, Scene,
};

fn load(source: &str) -> MemoryStore {
    let scene = Scene::from_str(source).expect("Should parse");
    MemoryStore::from_scene(&scene).expect("Should load")
}

#[test]
fn test_widget_fixture() {
    let mut store = load(include_str!("fixtures/widget.toml"));
    let outcome = Extractor::default().run(&mut store, Some(EntityId(1)));
    assert!(outcome.is_created(), "got {:?}", outcome);

    assert_snapshot!(store.to_string(), @r"
    model space:
      #5 [0] line (3, 3, 0) -> (4, 4, 0)
      #9 [0] instance 'Widget' at (0, 0, 0)
    definition 'Widget' at (0, 0, 0):
      #6 [0] solid (0, 0, 0)..(1, 1, 1)
      #7 [wiring] line (0.2, 0.2, 0.2) -> (0.8, 0.8, 0.8)
      #8 [0] circle (0.5, 0.5, 0.5) r=0.25
    ");
}

#[test]
fn test_widget_fixture_result_reloads() {
    let mut store = load(include_str!("fixtures/widget.toml"));
    Extractor::default().run(&mut store, Some(EntityId(1)));

    let toml = store.to_scene().to_toml().expect("Should serialize");
    let reloaded = load(&toml);
    assert_eq!(reloaded.to_string().lines().count(), store.to_string().lines().count());
    assert_eq!(reloaded.definition("Widget").unwrap().entities.len(), 3);
    assert_eq!(reloaded.instances_of("widget").count(), 1);
}

#[test]
fn test_nested_fixture_clones_inner_instance() {
    let mut store = load(include_str!("fixtures/nested.toml"));
    // Bolt member is #1, model space starts at #2
    let outcome = Extractor::default().run(&mut store, Some(EntityId(2)));
    let Outcome::Created(extraction) = outcome else {
        panic!("expected success, got {:?}", outcome);
    };

    assert_eq!(extraction.name, "Housing");
    assert_eq!(extraction.erased, vec![EntityId(2), EntityId(3), EntityId(4)]);
    // The far bolt instance is left alone, the near one now lives in Housing
    assert_eq!(store.instances_of("Bolt").count(), 1);
    assert!(store.contains(EntityId(5)));
    assert_eq!(store.definition("Housing").unwrap().entities.len(), 2);
}

#[test]
fn test_fixture_with_custom_layer_misses_default_label() {
    let mut store = load(include_str!("fixtures/widget.toml"));
    let before = store.clone();
    let config = ExtractConfig::from_str(r#"marker_layer = "titles""#).unwrap();

    let outcome = Extractor::new(config).run(&mut store, Some(EntityId(1)));
    assert_eq!(
        outcome,
        Outcome::LabelNotFound {
            layer: "titles".to_string()
        }
    );
    assert_eq!(store, before);
}

#[test]
fn test_selecting_label_is_rejected() {
    let mut store = load(include_str!("fixtures/widget.toml"));
    let outcome = Extractor::default().run(&mut store, Some(EntityId(2)));
    assert!(matches!(outcome, Outcome::Rejected { .. }));
}
