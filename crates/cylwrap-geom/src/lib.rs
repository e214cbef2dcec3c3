#![warn(missing_docs)]

//! Analytic geometry for cylinder wrapping.
//!
//! Provides the cylindrical surface the wrap transform evaluates, the
//! [`Curve3d`] abstraction with the two analytic curves a wrapped sketch
//! can produce (straight lines and circular arcs), and a 2D bounding box
//! for planar selections.

use cylwrap_math::{Dir3, Point2, Point3, Tolerance, Vec3};
use std::f64::consts::PI;

// =============================================================================
// Cylinder
// =============================================================================

/// A cylindrical surface defined by an axis line and radius.
///
/// Parameterization: `P(u, v) = center + radius * (cos(u) * ref_dir + sin(u) * y_dir) + v * axis`
///
/// Where `u` is the angular parameter and `v` is the height along the axis.
/// A negative radius is allowed and mirrors the surface through the axis.
#[derive(Debug, Clone)]
pub struct CylinderSurface {
    /// Center point of the cylinder axis at `v = 0`.
    pub center: Point3,
    /// Unit direction along the cylinder axis.
    pub axis: Dir3,
    /// Reference direction for u=0 (perpendicular to axis).
    pub ref_dir: Dir3,
    /// Radius of the cylinder.
    pub radius: f64,
}

impl CylinderSurface {
    /// Create a Z-aligned cylinder whose axis passes through `center`.
    pub fn with_center(center: Point3, radius: f64) -> Self {
        Self {
            center,
            axis: Dir3::new_normalize(Vec3::z()),
            ref_dir: Dir3::new_normalize(Vec3::x()),
            radius,
        }
    }

    /// Create a cylinder with a custom center and axis.
    pub fn with_axis(center: Point3, axis: Vec3, radius: f64) -> Self {
        let a = Dir3::new_normalize(axis);
        let arbitrary = if a.as_ref().x.abs() < 0.9 {
            Vec3::x()
        } else {
            Vec3::y()
        };
        let ref_dir = Dir3::new_normalize(arbitrary - arbitrary.dot(a.as_ref()) * a.as_ref());
        Self {
            center,
            axis: a,
            ref_dir,
            radius,
        }
    }

    fn y_dir(&self) -> Vec3 {
        self.axis.as_ref().cross(self.ref_dir.as_ref())
    }

    /// Evaluate the surface at parameter `(u, v)`.
    pub fn evaluate(&self, uv: Point2) -> Point3 {
        let (sin_u, cos_u) = uv.x.sin_cos();
        self.center
            + self.radius * (cos_u * self.ref_dir.as_ref() + sin_u * self.y_dir())
            + uv.y * self.axis.as_ref()
    }

    /// Convert an arc length measured along the circumference to an angle.
    ///
    /// The caller must ensure the radius is non-zero.
    pub fn arc_length_to_angle(&self, arc_length: f64) -> f64 {
        arc_length / self.radius
    }

    /// Distance from `p` to the cylinder axis.
    pub fn radial_distance(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        (d - d.dot(self.axis.as_ref()) * self.axis.as_ref()).norm()
    }

    /// Angular parameter of `p` around the axis, in `(-π, π]`.
    pub fn angle_of(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        d.dot(&self.y_dir()).atan2(d.dot(self.ref_dir.as_ref()))
    }

    /// Whether the axis is aligned with global +Z or -Z.
    pub fn is_vertical(&self) -> bool {
        Tolerance::DEFAULT.parallel(&self.axis, &Dir3::new_normalize(Vec3::z()))
    }
}

// =============================================================================
// Curve types
// =============================================================================

/// A parametric curve in 3D space.
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Evaluate the curve at parameter `t` to get a 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Length of the curve over its parameter range.
    fn length(&self) -> f64;
}

// =============================================================================
// Line3d
// =============================================================================

/// A 3D line segment defined by origin and direction.
///
/// Parameterization: `P(t) = origin + t * direction`, `t ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub struct Line3d {
    /// Starting point.
    pub origin: Point3,
    /// Direction (magnitude is the segment length).
    pub direction: Vec3,
}

impl Line3d {
    /// Create a line from two endpoints, parameterized so `t=0` gives `start` and `t=1` gives `end`.
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }
}

impl Curve3d for Line3d {
    fn evaluate(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    fn length(&self) -> f64 {
        self.direction.norm()
    }
}

// =============================================================================
// Arc3d
// =============================================================================

/// A circular arc in 3D space.
///
/// Parameterization: `P(t) = center + radius * (cos(t) * x_dir + sin(t) * y_dir)`
///
/// Where `t ∈ [0, sweep]` and `x_dir` points from the center to the start point.
/// The arc runs counter-clockwise about `normal`.
#[derive(Debug, Clone)]
pub struct Arc3d {
    /// Center of the supporting circle.
    pub center: Point3,
    /// Radius of the supporting circle.
    pub radius: f64,
    /// Direction from the center to the start point.
    pub x_dir: Dir3,
    /// Second in-plane direction (`normal × x_dir`).
    pub y_dir: Dir3,
    /// Normal to the circle plane.
    pub normal: Dir3,
    /// Angle swept from start to end, in `(0, 2π)`.
    pub sweep: f64,
}

impl Arc3d {
    /// Build the arc that starts at `start`, passes through `mid` and ends at `end`.
    ///
    /// Returns `None` when the three points are collinear (or two coincide),
    /// in which case no circle passes through them.
    pub fn from_three_points(start: Point3, mid: Point3, end: Point3) -> Option<Self> {
        let (center, radius, normal) = circle_through_points(&start, &mid, &end)?;
        let x_dir = Dir3::new_normalize(start - center);
        let y_dir = Dir3::new_normalize(normal.as_ref().cross(x_dir.as_ref()));

        let d_end = end - center;
        let mut sweep = d_end
            .dot(y_dir.as_ref())
            .atan2(d_end.dot(x_dir.as_ref()));
        if sweep <= 0.0 {
            sweep += 2.0 * PI;
        }

        Some(Self {
            center,
            radius,
            x_dir,
            y_dir,
            normal,
            sweep,
        })
    }

    /// Start point of the arc.
    pub fn start(&self) -> Point3 {
        self.evaluate(0.0)
    }

    /// End point of the arc.
    pub fn end(&self) -> Point3 {
        self.evaluate(self.sweep)
    }
}

impl Curve3d for Arc3d {
    fn evaluate(&self, t: f64) -> Point3 {
        let (sin_t, cos_t) = t.sin_cos();
        self.center + self.radius * (cos_t * self.x_dir.as_ref() + sin_t * self.y_dir.as_ref())
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep
    }
}

/// Circle through three points: `(center, radius, normal)`.
///
/// The normal is oriented so that `p1 → p2 → p3` runs counter-clockwise
/// about it. Returns `None` for coincident points, or when the angle at `p3`
/// between the other two is within the angular tolerance of 0 or π.
pub fn circle_through_points(p1: &Point3, p2: &Point3, p3: &Point3) -> Option<(Point3, f64, Dir3)> {
    let tol = Tolerance::DEFAULT;
    let a = p1 - p3;
    let b = p2 - p3;
    let (la, lb) = (a.norm(), b.norm());
    if tol.is_zero(la) || tol.is_zero(lb) {
        return None;
    }
    let n = a.cross(&b);
    // |a × b| = |a| |b| sin(angle)
    if n.norm() <= tol.angular * la * lb {
        return None;
    }
    let n2 = n.norm_squared();

    let offset = (a.norm_squared() * b - b.norm_squared() * a).cross(&n) / (2.0 * n2);
    let center = p3 + offset;
    let radius = offset.norm();
    Some((center, radius, Dir3::new_normalize(n)))
}

// =============================================================================
// Bounding box
// =============================================================================

/// Axis-aligned bounding box in a sketch plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl BoundingBox2 {
    /// Degenerate box containing a single point.
    pub fn from_point(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::from_point(first);
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Point2) {
        self.min = Point2::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point2::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }

    /// Union of two boxes.
    pub fn combine(&self, other: &BoundingBox2) -> Self {
        let mut out = *self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
