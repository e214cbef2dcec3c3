//! Planar source curves and their wrapped 3D reconstructions.

use cylwrap_geom::{Arc3d, BoundingBox2, Curve3d, Line3d};
use cylwrap_math::{Point2, Point3};

/// A point in the sketch plane's local coordinate system.
pub type PlanarPoint = Point2;

/// A sketch curve selected for wrapping, with its planar geometry
/// already extracted from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCurve {
    /// A single sketch point.
    Point(PlanarPoint),
    /// A straight line segment.
    Line {
        /// Start point.
        start: PlanarPoint,
        /// End point.
        end: PlanarPoint,
    },
    /// A spline through an ordered list of fit points.
    FittedSpline {
        /// Fit points, in order.
        fit_points: Vec<PlanarPoint>,
        /// Whether the spline closes back on its first point.
        closed: bool,
    },
    /// A curve type the wrap cannot rebuild, tagged with its host type name.
    Unsupported(String),
}

impl SourceCurve {
    /// Name of the curve type, for reporting.
    pub fn type_name(&self) -> &str {
        match self {
            SourceCurve::Point(_) => "Point",
            SourceCurve::Line { .. } => "Line",
            SourceCurve::FittedSpline { .. } => "FittedSpline",
            SourceCurve::Unsupported(kind) => kind,
        }
    }

    /// Whether this curve can be wrapped.
    pub fn is_supported(&self) -> bool {
        !matches!(self, SourceCurve::Unsupported(_))
    }

    /// Planar points that define this curve.
    pub fn points(&self) -> Vec<PlanarPoint> {
        match self {
            SourceCurve::Point(p) => vec![*p],
            SourceCurve::Line { start, end } => vec![*start, *end],
            SourceCurve::FittedSpline { fit_points, .. } => fit_points.clone(),
            SourceCurve::Unsupported(_) => Vec::new(),
        }
    }

    /// Bounding box of the defining points, `None` for unsupported curves.
    pub fn bounds(&self) -> Option<BoundingBox2> {
        BoundingBox2::from_points(self.points())
    }
}

/// Combined bounding box of a selection.
pub fn bounds_of(curves: &[SourceCurve]) -> Option<BoundingBox2> {
    curves
        .iter()
        .filter_map(SourceCurve::bounds)
        .reduce(|a, b| a.combine(&b))
}

/// The 3D reconstruction of a wrapped [`SourceCurve`].
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCurve {
    /// A single point.
    Point(Point3),
    /// A straight segment.
    Line {
        /// Start point.
        start: Point3,
        /// End point.
        end: Point3,
    },
    /// A circular arc given by three points it passes through, in order.
    Arc {
        /// Start point.
        start: Point3,
        /// A point between start and end.
        mid: Point3,
        /// End point.
        end: Point3,
    },
    /// A spline through the wrapped fit points.
    FittedSpline {
        /// Fit points, in source order.
        fit_points: Vec<Point3>,
        /// Whether the spline is closed.
        closed: bool,
    },
}

impl OutputCurve {
    /// Name of the curve type, for reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            OutputCurve::Point(_) => "Point",
            OutputCurve::Line { .. } => "Line",
            OutputCurve::Arc { .. } => "Arc",
            OutputCurve::FittedSpline { .. } => "FittedSpline",
        }
    }

    /// Whether this is a closed fitted spline.
    pub fn is_closed_spline(&self) -> bool {
        matches!(self, OutputCurve::FittedSpline { closed: true, .. })
    }

    /// The analytic arc, if this is an arc whose points are not collinear.
    pub fn arc(&self) -> Option<Arc3d> {
        match self {
            OutputCurve::Arc { start, mid, end } => Arc3d::from_three_points(*start, *mid, *end),
            _ => None,
        }
    }

    /// Analytic curve for lines and arcs.
    pub fn as_curve(&self) -> Option<Box<dyn Curve3d>> {
        match self {
            OutputCurve::Line { start, end } => Some(Box::new(Line3d::from_points(*start, *end))),
            OutputCurve::Arc { .. } => self.arc().map(|a| Box::new(a) as Box<dyn Curve3d>),
            _ => None,
        }
    }

    /// Curve length. Splines measure the polyline through their fit points
    /// and points have zero length.
    pub fn length(&self) -> f64 {
        match self {
            OutputCurve::Point(_) => 0.0,
            OutputCurve::FittedSpline { fit_points, closed } => {
                let open: f64 = fit_points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
                match (closed, fit_points.first(), fit_points.last()) {
                    (true, Some(first), Some(last)) => open + (first - last).norm(),
                    _ => open,
                }
            }
            OutputCurve::Arc { start, end, .. } => match self.as_curve() {
                Some(curve) => curve.length(),
                None => (end - start).norm(),
            },
            OutputCurve::Line { .. } => self.as_curve().map_or(0.0, |c| c.length()),
        }
    }

    /// Points defining this curve, in order.
    pub fn points(&self) -> Vec<Point3> {
        match self {
            OutputCurve::Point(p) => vec![*p],
            OutputCurve::Line { start, end } => vec![*start, *end],
            OutputCurve::Arc { start, mid, end } => vec![*start, *mid, *end],
            OutputCurve::FittedSpline { fit_points, .. } => fit_points.clone(),
        }
    }
}
