//! Core geometric types: points and axis-aligned extents

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 3D point in world coordinates
///
/// Serialized as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Per-axis absolute comparison: every coordinate differs by at most `tolerance`
    pub fn is_equal_to(&self, other: &Point3, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    /// Offset this point by the vector `to - from`
    pub fn translated(&self, from: &Point3, to: &Point3) -> Point3 {
        Point3::new(
            self.x + (to.x - from.x),
            self.y + (to.y - from.y),
            self.z + (to.z - from.z),
        )
    }

    fn min(&self, other: &Point3) -> Point3 {
        Point3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    fn max(&self, other: &Point3) -> Point3 {
        Point3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An axis-aligned bounding box representing the spatial extent of an entity
///
/// `min` is never greater than `max` on any axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min: Point3,
    pub max: Point3,
}

impl Extents {
    /// Create extents from two opposite corners, in any order
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Zero-volume extents at a single point
    pub fn from_point(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Check if these extents contain a point (boundary inclusive)
    pub fn contains_point(&self, point: &Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if these extents intersect another
    ///
    /// Touching faces count as intersecting, the way a crossing window
    /// picks up objects that merely touch its edge.
    pub fn intersects(&self, other: &Extents) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Smallest extents containing both
    pub fn union(&self, other: &Extents) -> Extents {
        Extents {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Move the extents by the vector `to - from`
    pub fn translated(&self, from: &Point3, to: &Point3) -> Extents {
        Extents {
            min: self.min.translated(from, to),
            max: self.max.translated(from, to),
        }
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}
