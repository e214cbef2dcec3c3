#![warn(missing_docs)]

//! Math types for cylinder wrapping.
//!
//! Thin aliases over nalgebra for the planar and spatial quantities the
//! wrap transform works with, plus the tolerance constants used for
//! geometric comparisons.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in a sketch plane's local 2D coordinate system.
pub type Point2 = nalgebra::Point2<f64>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default CAD tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two directions are parallel (same or opposite sense).
    pub fn parallel(&self, a: &Dir3, b: &Dir3) -> bool {
        a.as_ref().cross(b.as_ref()).norm() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
