//! Geometric primitives and entities
//!
//! The only geometry this crate reasons about is bounding extents and point
//! equality within a tolerance.

pub mod entity;
pub mod types;

pub use entity::{Category, Entity, EntityId, Geometry, Owner};
pub use types::{Extents, Point3};
