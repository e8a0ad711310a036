//! Entities held by a geometry store

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Extents, Point3};

/// Opaque identity of an entity within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The container an entity belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// The active scene
    ModelSpace,
    /// Member of the named definition
    Definition(String),
}

/// Type-specific geometry of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Closed solid volume, described by its box
    Solid { min: Point3, max: Point3 },
    Line { start: Point3, end: Point3 },
    /// Circle in a plane parallel to XY
    Circle { center: Point3, radius: f64 },
    Text {
        position: Point3,
        content: String,
        #[serde(default = "default_text_height")]
        height: f64,
    },
    /// Placed reference to a definition
    Instance { definition: String, position: Point3 },
}

fn default_text_height() -> f64 {
    2.5
}

/// Coarse entity classification used by store queries and selection filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Solid,
    Line,
    Circle,
    Text,
    Instance,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Solid => "solid",
            Category::Line => "line",
            Category::Circle => "circle",
            Category::Text => "text",
            Category::Instance => "instance",
        };
        f.write_str(name)
    }
}

impl Geometry {
    pub fn category(&self) -> Category {
        match self {
            Geometry::Solid { .. } => Category::Solid,
            Geometry::Line { .. } => Category::Line,
            Geometry::Circle { .. } => Category::Circle,
            Geometry::Text { .. } => Category::Text,
            Geometry::Instance { .. } => Category::Instance,
        }
    }

    /// Extents computable from the geometry alone
    ///
    /// Instances return `None`: their extents depend on the definition and
    /// are resolved by the store.
    pub fn local_extents(&self) -> Option<Extents> {
        match self {
            Geometry::Solid { min, max } => Some(Extents::new(*min, *max)),
            Geometry::Line { start, end } => Some(Extents::new(*start, *end)),
            Geometry::Circle { center, radius } => {
                let r = radius.abs();
                Some(Extents::new(
                    Point3::new(center.x - r, center.y - r, center.z),
                    Point3::new(center.x + r, center.y + r, center.z),
                ))
            }
            Geometry::Text { position, .. } => Some(Extents::from_point(*position)),
            Geometry::Instance { .. } => None,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Solid { min, max } => write!(f, "solid {}..{}", min, max),
            Geometry::Line { start, end } => write!(f, "line {} -> {}", start, end),
            Geometry::Circle { center, radius } => write!(f, "circle {} r={}", center, radius),
            Geometry::Text {
                position, content, ..
            } => write!(f, "text {:?} at {}", content, position),
            Geometry::Instance {
                definition,
                position,
            } => write!(f, "instance '{}' at {}", definition, position),
        }
    }
}

/// A geometric object in a store
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub owner: Owner,
    pub layer: String,
    pub geometry: Geometry,
}

impl Entity {
    pub fn category(&self) -> Category {
        self.geometry.category()
    }

    /// Text payload and anchor, if this is a text entity
    pub fn as_text(&self) -> Option<(&str, &Point3)> {
        match &self.geometry {
            Geometry::Text {
                content, position, ..
            } => Some((content.as_str(), position)),
            _ => None,
        }
    }
}
