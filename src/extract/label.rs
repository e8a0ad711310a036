//! Resolving the definition name from a label at the boundary corner

use tracing::debug;

use crate::error::ExtractError;
use crate::geometry::{Category, EntityId, Point3};
use crate::store::GeometryStore;

/// Where to look for a label and how close it must be
#[derive(Debug, Clone, Copy)]
pub struct LabelQuery<'a> {
    pub layer: &'a str,
    pub tolerance: f64,
}

/// A text entity naming the definition
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: EntityId,
    pub name: String,
}

/// Find the label whose anchor coincides with `corner`
///
/// Text entities on the marker layer are scanned in store order and the
/// first coincident one wins, even when its text is empty. An empty text
/// counts as no label.
pub fn resolve_label<S: GeometryStore>(
    store: &S,
    corner: &Point3,
    query: &LabelQuery<'_>,
) -> Result<Label, ExtractError> {
    for id in store.entities_on_layer(query.layer, Category::Text) {
        let Some((content, position)) = store.entity(id)?.as_text() else {
            continue;
        };
        if !position.is_equal_to(corner, query.tolerance) {
            continue;
        }
        if content.is_empty() {
            debug!(%id, "coincident label is empty");
            break;
        }
        return Ok(Label {
            id,
            name: content.to_string(),
        });
    }
    Err(ExtractError::label_not_found(query.layer))
}
