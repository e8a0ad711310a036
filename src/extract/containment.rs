//! Finding the entities enclosed by the boundary

use crate::geometry::{EntityId, Extents};
use crate::store::GeometryStore;

/// Entities at least partially inside `region`, minus `exclude`
///
/// Uses crossing-window semantics: anything whose extents intersect the
/// region, including those only touching it, is returned in store order.
pub fn query_contents<S: GeometryStore>(
    store: &S,
    region: &Extents,
    exclude: &[EntityId],
) -> Vec<EntityId> {
    store
        .select_crossing(region)
        .into_iter()
        .filter(|id| !exclude.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Point3};
    use crate::store::MemoryStore;

    fn line(store: &mut MemoryStore, start: [f64; 3], end: [f64; 3]) -> EntityId {
        store.add_entity(
            "0",
            Geometry::Line {
                start: start.into(),
                end: end.into(),
            },
        )
    }

    #[test]
    fn test_excludes_boundary_and_label() {
        let mut store = MemoryStore::new();
        let boundary = store.add_entity(
            "0",
            Geometry::Solid {
                min: Point3::origin(),
                max: Point3::new(1.0, 1.0, 1.0),
            },
        );
        let label = store.add_entity(
            "block_title",
            Geometry::Text {
                position: Point3::origin(),
                content: "Widget".to_string(),
                height: 2.5,
            },
        );
        let inner = line(&mut store, [0.1; 3], [0.9; 3]);

        let region = store.extents(boundary).unwrap();
        assert_eq!(query_contents(&store, &region, &[boundary, label]), vec![inner]);
    }

    #[test]
    fn test_crossing_and_outside() {
        let mut store = MemoryStore::new();
        let crossing = line(&mut store, [0.5; 3], [4.0; 3]);
        line(&mut store, [2.0; 3], [4.0; 3]);

        let region = Extents::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(query_contents(&store, &region, &[]), vec![crossing]);
    }

    #[test]
    fn test_empty_region_result() {
        let store = MemoryStore::new();
        let region = Extents::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert!(query_contents(&store, &region, &[]).is_empty());
    }
}
