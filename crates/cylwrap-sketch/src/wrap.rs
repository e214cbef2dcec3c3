//! The wrap transform: planar points onto the cylinder, and the
//! per-curve reconstruction policy.

use cylwrap_geom::CylinderSurface;
use cylwrap_math::{Point2, Point3};
use tracing::{debug, info, warn};

use crate::{
    CylinderDescriptor, LineMode, OutputCurve, PlanarPoint, SourceCurve, WrapError,
    WrapParameters,
};

/// Map a planar point onto the cylinder.
///
/// Planar x (after `x_scale`) is read as arc length along the circumference
/// and planar y (after `y_scale`) as height along the axis:
///
/// ```text
/// R = radius + radius_offset
/// θ = x * x_scale / R
/// (R cos θ + origin.x, R sin θ + origin.y, y * y_scale)
/// ```
///
/// The effective radius must be non-zero; see [`CylinderDescriptor::validate`].
pub fn map_point(
    point: PlanarPoint,
    cylinder: &CylinderDescriptor,
    params: &WrapParameters,
) -> Point3 {
    map_onto(&cylinder.wrap_surface(params), point, params)
}

fn map_onto(surface: &CylinderSurface, point: PlanarPoint, params: &WrapParameters) -> Point3 {
    let sx = point.x * params.x_scale;
    let sy = point.y * params.y_scale;
    surface.evaluate(Point2::new(surface.arc_length_to_angle(sx), sy))
}

/// Wrap a single curve.
///
/// Points map directly. Lines become a three-point arc through the wrapped
/// start, planar midpoint and end, unless both endpoints share the same
/// planar x (no angular span) or [`LineMode::Chord`] is configured, in which
/// case they stay straight. Fitted splines keep their fit point order and
/// closed flag.
///
/// # Errors
///
/// [`WrapError::UnsupportedCurveType`] for curves that cannot be wrapped.
pub fn wrap_curve(
    curve: &SourceCurve,
    cylinder: &CylinderDescriptor,
    params: &WrapParameters,
) -> Result<OutputCurve, WrapError> {
    let surface = cylinder.wrap_surface(params);
    wrap_on_surface(curve, &surface, params)
}

fn wrap_on_surface(
    curve: &SourceCurve,
    surface: &CylinderSurface,
    params: &WrapParameters,
) -> Result<OutputCurve, WrapError> {
    let map = |p: PlanarPoint| map_onto(surface, p, params);

    let output = match curve {
        SourceCurve::Point(p) => OutputCurve::Point(map(*p)),
        SourceCurve::Line { start, end } => {
            let (s, e) = (map(*start), map(*end));
            if params.line_mode == LineMode::Chord || start.x == end.x {
                OutputCurve::Line { start: s, end: e }
            } else {
                let mid = map(planar_midpoint(start, end));
                OutputCurve::Arc {
                    start: s,
                    mid,
                    end: e,
                }
            }
        }
        SourceCurve::FittedSpline { fit_points, closed } => OutputCurve::FittedSpline {
            fit_points: fit_points.iter().map(|p| map(*p)).collect(),
            closed: *closed,
        },
        SourceCurve::Unsupported(kind) => {
            return Err(WrapError::UnsupportedCurveType(kind.clone()));
        }
    };
    Ok(output)
}

fn planar_midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// What happened to one source curve.
#[derive(Debug, Clone, PartialEq)]
pub enum WrapOutcome {
    /// The curve was rebuilt on the cylinder.
    Wrapped(OutputCurve),
    /// The curve type is not supported and was left out.
    Skipped {
        /// Type name of the skipped curve.
        kind: String,
    },
}

/// Result for one source curve, keyed by its position in the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapEntry {
    /// Index of the source curve in the input selection.
    pub source_index: usize,
    /// Wrapped geometry, or the reason it was skipped.
    pub outcome: WrapOutcome,
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapSummary {
    /// Curves rebuilt on the cylinder.
    pub wrapped: usize,
    /// Curves skipped as unsupported.
    pub skipped: usize,
    /// Wrapped curves flagged as face cutting tools.
    pub split_tools: usize,
}

/// Outcome of wrapping a whole selection, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapReport {
    /// One entry per source curve.
    pub entries: Vec<WrapEntry>,
    split_face: bool,
}

impl WrapReport {
    /// Wrapped curves with their source index.
    pub fn wrapped(&self) -> impl Iterator<Item = (usize, &OutputCurve)> + '_ {
        self.entries.iter().filter_map(|e| match &e.outcome {
            WrapOutcome::Wrapped(curve) => Some((e.source_index, curve)),
            WrapOutcome::Skipped { .. } => None,
        })
    }

    /// Skipped curves with their source index and type name.
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.entries.iter().filter_map(|e| match &e.outcome {
            WrapOutcome::Skipped { kind } => Some((e.source_index, kind.as_str())),
            WrapOutcome::Wrapped(_) => None,
        })
    }

    /// Wrapped closed splines to be used as face cutting tools.
    ///
    /// Empty unless the batch ran with `split_face` enabled.
    pub fn split_tools(&self) -> impl Iterator<Item = (usize, &OutputCurve)> + '_ {
        let enabled = self.split_face;
        self.wrapped()
            .filter(move |(_, curve)| enabled && curve.is_closed_spline())
    }

    /// Counts of wrapped, skipped and cutting-tool curves.
    pub fn summary(&self) -> WrapSummary {
        WrapSummary {
            wrapped: self.wrapped().count(),
            skipped: self.skipped().count(),
            split_tools: self.split_tools().count(),
        }
    }

    /// Total length of all wrapped curves.
    pub fn total_length(&self) -> f64 {
        self.wrapped().map(|(_, c)| c.length()).sum()
    }
}

/// Wrap a whole selection of curves onto a cylinder.
///
/// Batch preconditions are checked before any curve is transformed: an
/// empty selection, invalid parameters or a zero effective radius abort the
/// batch with no output. Unsupported curves are logged and reported as
/// skipped; the rest of the batch still runs.
pub fn wrap_curves(
    curves: &[SourceCurve],
    cylinder: &CylinderDescriptor,
    params: &WrapParameters,
) -> Result<WrapReport, WrapError> {
    if curves.is_empty() {
        return Err(WrapError::EmptySelection("no sketch curves selected".into()));
    }
    params.validate()?;
    cylinder.validate(params)?;

    if !cylinder.is_vertical() {
        warn!(
            axis = ?cylinder.axis.into_inner(),
            "cylinder axis is not vertical; wrapping around global Z"
        );
    }

    let surface = cylinder.wrap_surface(params);
    let entry = |(index, curve): (usize, &SourceCurve)| {
        let outcome = match wrap_on_surface(curve, &surface, params) {
            Ok(output) => {
                debug!(index, from = curve.type_name(), to = output.type_name(), "wrapped curve");
                WrapOutcome::Wrapped(output)
            }
            Err(err) => {
                warn!(index, %err, "skipping curve");
                WrapOutcome::Skipped {
                    kind: curve.type_name().to_string(),
                }
            }
        };
        WrapEntry {
            source_index: index,
            outcome,
        }
    };

    #[cfg(feature = "parallel")]
    let entries: Vec<WrapEntry> = {
        use rayon::prelude::*;
        curves.par_iter().enumerate().map(entry).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let entries: Vec<WrapEntry> = curves.iter().enumerate().map(entry).collect();

    let report = WrapReport {
        entries,
        split_face: params.split_face,
    };
    let summary = report.summary();
    info!(
        wrapped = summary.wrapped,
        skipped = summary.skipped,
        split_tools = summary.split_tools,
        radius = surface.radius,
        "wrapped sketch curves onto cylinder"
    );
    Ok(report)
}
