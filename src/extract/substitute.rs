//! Replacing the originals with one instance

use tracing::debug;

use crate::error::ExtractError;
use crate::geometry::{EntityId, Point3};
use crate::store::GeometryStore;

/// Insert an instance of `definition` at `position`, then erase `originals`
///
/// The instance goes in first so an erase failure never leaves the scene
/// without the replacement. Returns the instance id.
pub fn substitute<S: GeometryStore>(
    store: &mut S,
    definition: &str,
    position: Point3,
    originals: &[EntityId],
) -> Result<EntityId, ExtractError> {
    let instance = store.insert_instance(definition, position)?;
    debug!(%instance, definition, "inserted instance");

    for &id in originals {
        store.erase(id)?;
    }
    debug!(count = originals.len(), "erased originals");
    Ok(instance)
}
