//! Building the reusable definition from cloned entities

use tracing::debug;

use crate::error::ExtractError;
use crate::geometry::{EntityId, Point3};
use crate::store::GeometryStore;

/// A freshly registered definition and the clones it holds
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltDefinition {
    pub name: String,
    /// Clone ids, boundary first, then contents in input order
    pub members: Vec<EntityId>,
}

/// Create definition `name` at `origin` holding clones of the boundary and contents
///
/// Originals are not modified. If a clone fails the partially filled
/// definition stays in the store; callers run this inside a
/// [`Transaction`](crate::store::Transaction) so it is rolled back.
pub fn build_definition<S: GeometryStore>(
    store: &mut S,
    name: &str,
    origin: Point3,
    boundary: EntityId,
    contents: &[EntityId],
) -> Result<BuiltDefinition, ExtractError> {
    if store.has_definition(name) {
        return Err(ExtractError::duplicate(name));
    }
    store.create_definition(name, origin)?;

    let mut members = Vec::with_capacity(contents.len() + 1);
    for &source in std::iter::once(&boundary).chain(contents) {
        let clone = store.clone_into(source, name)?;
        debug!(%source, %clone, definition = name, "cloned into definition");
        members.push(clone);
    }

    Ok(BuiltDefinition {
        name: name.to_string(),
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Owner};
    use crate::store::MemoryStore;

    fn setup() -> (MemoryStore, EntityId, Vec<EntityId>) {
        let mut store = MemoryStore::new();
        let boundary = store.add_entity(
            "0",
            Geometry::Solid {
                min: Point3::origin(),
                max: Point3::new(1.0, 1.0, 1.0),
            },
        );
        let a = store.add_entity(
            "0",
            Geometry::Circle {
                center: Point3::new(0.5, 0.5, 0.5),
                radius: 0.2,
            },
        );
        let b = store.add_entity(
            "wiring",
            Geometry::Line {
                start: Point3::new(0.1, 0.1, 0.1),
                end: Point3::new(0.2, 0.2, 0.2),
            },
        );
        (store, boundary, vec![a, b])
    }

    #[test]
    fn test_clones_in_order() {
        let (mut store, boundary, contents) = setup();
        let built =
            build_definition(&mut store, "Widget", Point3::origin(), boundary, &contents).unwrap();

        assert_eq!(built.members.len(), 3);
        let def = store.definition("Widget").unwrap();
        assert_eq!(def.entities, built.members);
        assert_eq!(def.origin, Point3::origin());

        let sources = std::iter::once(boundary).chain(contents.iter().copied());
        for (clone, source) in built.members.iter().zip(sources) {
            let clone = store.entity(*clone).unwrap();
            let source = store.entity(source).unwrap();
            assert_eq!(clone.geometry, source.geometry);
            assert_eq!(clone.layer, source.layer);
            assert_eq!(clone.owner, Owner::Definition("Widget".to_string()));
        }
    }

    #[test]
    fn test_originals_untouched() {
        let (mut store, boundary, contents) = setup();
        let before: Vec<_> = store.model_space().cloned().collect();
        build_definition(&mut store, "Widget", Point3::origin(), boundary, &contents).unwrap();
        let after: Vec<_> = store.model_space().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_boundary_only() {
        let (mut store, boundary, _) = setup();
        let built = build_definition(&mut store, "Shell", Point3::origin(), boundary, &[]).unwrap();
        assert_eq!(built.members.len(), 1);
    }

    #[test]
    fn test_duplicate_name_makes_no_changes() {
        let (mut store, boundary, contents) = setup();
        store.create_definition("widget", Point3::origin()).unwrap();
        let before = store.clone();

        let err = build_definition(&mut store, "Widget", Point3::origin(), boundary, &contents)
            .unwrap_err();
        assert_eq!(err, ExtractError::duplicate("Widget"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_missing_entity_fails() {
        let (mut store, boundary, _) = setup();
        let err = build_definition(
            &mut store,
            "Widget",
            Point3::origin(),
            boundary,
            &[EntityId(99)],
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::Store(_)));
    }
}
