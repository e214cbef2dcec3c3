#![warn(missing_docs)]

//! Wrap planar sketch curves onto the lateral surface of a cylinder.
//!
//! Horizontal distance in the sketch plane is read as arc length around the
//! cylinder and vertical distance as height along its axis, so a flat
//! drawing unrolls onto the cylinder the way a label wraps a bottle.
//!
//! # Example
//!
//! ```
//! use cylwrap_math::{Point2, Point3};
//! use cylwrap_sketch::{wrap_curves, CylinderDescriptor, SourceCurve, WrapParameters};
//!
//! let cylinder = CylinderDescriptor::new(Point3::origin(), 5.0);
//! let curves = vec![
//!     SourceCurve::Line {
//!         start: Point2::new(0.0, 1.0),
//!         end: Point2::new(4.0, 1.0),
//!     },
//!     SourceCurve::Unsupported("SketchCircle".into()),
//! ];
//!
//! let report = wrap_curves(&curves, &cylinder, &WrapParameters::default()).unwrap();
//! assert_eq!(report.wrapped().count(), 1);
//! assert_eq!(report.skipped().count(), 1);
//! ```

mod curve;
mod cylinder;
mod params;
mod wrap;

pub use curve::{bounds_of, OutputCurve, PlanarPoint, SourceCurve};
pub use cylinder::CylinderDescriptor;
pub use params::{LineMode, SplitStrategy, WrapParameters, OFFSET_RANGE, SCALE_RANGE};
pub use wrap::{
    map_point, wrap_curve, wrap_curves, WrapEntry, WrapOutcome, WrapReport, WrapSummary,
};

use thiserror::Error;

/// Errors from wrapping sketch curves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WrapError {
    /// Nothing to wrap, or nothing to wrap onto.
    #[error("empty selection: {0}")]
    EmptySelection(String),

    /// Radius plus offset is zero (or the radius itself is not positive).
    #[error("degenerate cylinder: radius {radius} with offset {offset} leaves no wrap radius")]
    DegenerateCylinder {
        /// Cylinder radius.
        radius: f64,
        /// Configured radial offset.
        offset: f64,
    },

    /// The curve type has no wrapped reconstruction.
    #[error("{0} : unsupported")]
    UnsupportedCurveType(String),

    /// A parameter is out of its valid domain.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
