//! Block Extract - turn the contents of a boundary solid into a reusable block
//!
//! Given a solid that encloses a group of entities and a text label on the
//! `block_title` layer at the solid's min corner, this library clones the
//! solid and everything crossing it into a new named definition, places one
//! instance of it where the originals were, and erases the originals. The
//! whole operation is one transaction: it either completes or leaves the
//! store untouched.
//!
//! # Example
//!
//! ```rust
//! use block_extract::{extract_block, Geometry, MemoryStore, Point3};
//!
//! let mut store = MemoryStore::new();
//! let cube = store.add_entity("0", Geometry::Solid {
//!     min: Point3::origin(),
//!     max: Point3::new(1.0, 1.0, 1.0),
//! });
//! store.add_entity("block_title", Geometry::Text {
//!     position: Point3::origin(),
//!     content: "Widget".to_string(),
//!     height: 2.5,
//! });
//!
//! let outcome = extract_block(&mut store, Some(cube));
//! assert!(outcome.is_created());
//! assert_eq!(outcome.message().unwrap(), "Block 'Widget' created successfully");
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod store;

pub use config::{ConfigError, ExtractConfig};
pub use error::ExtractError;
pub use extract::{Extraction, Extractor, Outcome, Stage};
pub use geometry::{Category, Entity, EntityId, Extents, Geometry, Owner, Point3};
pub use store::{
    Definition, GeometryStore, MemoryStore, Scene, SceneError, StoreError, Transaction,
};

/// Extract a block with the default configuration
///
/// `selection` is the boundary chosen by the user, or `None` if the prompt
/// was cancelled.
pub fn extract_block<S: GeometryStore>(store: &mut S, selection: Option<EntityId>) -> Outcome {
    Extractor::default().run(store, selection)
}

/// Extract a block with a custom configuration
///
/// # Example
///
/// ```rust
/// use block_extract::{extract_block_with_config, ExtractConfig, Geometry, MemoryStore, Outcome, Point3};
///
/// let mut store = MemoryStore::new();
/// let cube = store.add_entity("0", Geometry::Solid {
///     min: Point3::origin(),
///     max: Point3::new(1.0, 1.0, 1.0),
/// });
///
/// let config = ExtractConfig::new().with_marker_layer("titles");
/// let outcome = extract_block_with_config(&mut store, Some(cube), config);
/// assert_eq!(outcome, Outcome::LabelNotFound { layer: "titles".to_string() });
/// ```
pub fn extract_block_with_config<S: GeometryStore>(
    store: &mut S,
    selection: Option<EntityId>,
    config: ExtractConfig,
) -> Outcome {
    Extractor::new(config).run(store, selection)
}
