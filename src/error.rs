//! Error types for block extraction

use thiserror::Error;

use crate::geometry::{Category, EntityId};
use crate::store::StoreError;

/// Errors that can stop an extraction
///
/// The display text of the first three variants is the message shown to the
/// user; store failures are wrapped into a generic message by
/// [`Outcome::message`](crate::Outcome::message).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// The selected boundary is not a solid volume
    #[error("Selection must be a 3D Solid cube or prism")]
    NotASolid { id: EntityId, found: Category },

    /// No non-empty label coincides with the boundary's min corner
    #[error("Could not find title text on layer '{layer}' at the cube's corner")]
    LabelNotFound { layer: String },

    /// A definition with the label's name already exists
    #[error("A block named '{name}' already exists")]
    DuplicateName { name: String },

    /// Unexpected store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExtractError {
    /// Create a label-not-found error
    pub fn label_not_found(layer: impl Into<String>) -> Self {
        Self::LabelNotFound {
            layer: layer.into(),
        }
    }

    /// Create a duplicate-name error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }
}
