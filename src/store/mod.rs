//! Geometry store interface
//!
//! The extraction algorithm never touches a host document directly. It talks
//! to a [`GeometryStore`], which exposes typed queries (by layer and category,
//! by crossing region) and the four mutations the algorithm needs: create a
//! definition, clone into it, insert an instance, erase. Every mutation made
//! by one extraction runs inside a [`Transaction`].

pub mod memory;
pub mod scene;
pub mod transaction;

pub use memory::MemoryStore;
pub use scene::{Scene, SceneError};
pub use transaction::Transaction;

use thiserror::Error;

use crate::geometry::{Category, Entity, EntityId, Extents, Point3};

/// Errors reported by a geometry store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No live entity with this id
    #[error("entity {id} not found")]
    EntityNotFound { id: EntityId },

    /// No definition registered under this name
    #[error("definition '{name}' not found")]
    DefinitionNotFound { name: String },

    /// A definition with this name is already registered
    #[error("definition '{name}' already exists")]
    DuplicateDefinition { name: String },

    /// The entity belongs to a definition rather than the active scene
    #[error("entity {id} is not in model space")]
    NotInModelSpace { id: EntityId },

    /// The entity has no computable extents
    #[error("entity {id} has no geometric extents")]
    NoExtents { id: EntityId },

    /// The store refused a mutation
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: String, reason: String },
}

impl StoreError {
    /// Create a rejected-mutation error
    pub fn rejected(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// A named, reusable container of entity clones
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    /// Base point; instances place this point at their insertion position
    pub origin: Point3,
    /// Member entities in append order
    pub entities: Vec<EntityId>,
}

impl Definition {
    pub fn new(name: impl Into<String>, origin: Point3) -> Self {
        Self {
            name: name.into(),
            origin,
            entities: Vec::new(),
        }
    }
}

/// Typed access to a store of entities and definitions
///
/// Queries only see live entities. Iteration order of query results is the
/// store's own order and must be stable between calls.
pub trait GeometryStore {
    /// Opaque state captured by [`GeometryStore::savepoint`]
    type Savepoint;

    /// Look up a live entity
    fn entity(&self, id: EntityId) -> Result<&Entity, StoreError>;

    /// Extents of a live entity, resolving instances through their definition
    fn extents(&self, id: EntityId) -> Result<Extents, StoreError>;

    /// Model-space entities of the given category on the given layer
    fn entities_on_layer(&self, layer: &str, category: Category) -> Vec<EntityId>;

    /// Model-space entities whose extents intersect the region
    fn select_crossing(&self, region: &Extents) -> Vec<EntityId>;

    /// Whether a definition with this name is registered
    fn has_definition(&self, name: &str) -> bool;

    /// Look up a definition by name
    fn definition(&self, name: &str) -> Result<&Definition, StoreError>;

    /// Register a new, empty definition
    fn create_definition(&mut self, name: &str, origin: Point3) -> Result<(), StoreError>;

    /// Deep-copy an entity and append the copy to a definition
    ///
    /// Returns the id of the copy. The source entity is untouched.
    fn clone_into(&mut self, id: EntityId, definition: &str) -> Result<EntityId, StoreError>;

    /// Place an instance of a definition in model space
    fn insert_instance(&mut self, definition: &str, position: Point3)
        -> Result<EntityId, StoreError>;

    /// Remove a live entity
    fn erase(&mut self, id: EntityId) -> Result<(), StoreError>;

    /// Capture the current state
    fn savepoint(&self) -> Self::Savepoint;

    /// Return to a previously captured state, discarding everything since
    fn restore(&mut self, savepoint: Self::Savepoint);
}
