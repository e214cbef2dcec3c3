//! Wrap job documents exchanged with the host modeling session.
//!
//! A [`WrapJob`] is a snapshot of what the user selected in the host: the
//! cylindrical face, the sketch entities (tagged with the host's type
//! names), and the wrap parameters. Coordinates are copied out of the host
//! up front so nothing here refers back into the live session.

use cylwrap_math::{Point2, Point3};
use cylwrap_sketch::{CylinderDescriptor, SourceCurve, WrapParameters};
use serde::{Deserialize, Serialize};

/// 2D vector with f64 components, in sketch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// Create a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// As a sketch-plane point.
    pub fn to_point(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// 3D vector with f64 components, in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// As a model-space point.
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

fn z_axis() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

/// Geometry of the selected cylindrical face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylinderFace {
    /// A point on the axis.
    pub origin: Vec3,
    /// Face radius.
    pub radius: f64,
    /// Axis direction (need not be normalized).
    #[serde(default = "z_axis")]
    pub axis: Vec3,
}

impl CylinderFace {
    /// Snapshot as the wrap transform's cylinder.
    pub fn to_descriptor(&self) -> CylinderDescriptor {
        let axis = self.axis;
        CylinderDescriptor::with_axis(
            self.origin.to_point(),
            self.radius,
            cylwrap_math::Vec3::new(axis.x, axis.y, axis.z),
        )
    }
}

/// A sketch entity as the host reports it.
///
/// Only points, lines and fitted splines can be wrapped; the remaining
/// kinds are carried so they can be reported as skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchEntity {
    /// A sketch point.
    SketchPoint {
        /// Location.
        point: Vec2,
    },
    /// A sketch line.
    SketchLine {
        /// Start point.
        start: Vec2,
        /// End point.
        end: Vec2,
    },
    /// A spline through fit points.
    SketchFittedSpline {
        /// Fit points, in order.
        fit_points: Vec<Vec2>,
        /// Whether the spline is closed.
        #[serde(default)]
        closed: bool,
    },
    /// A circular arc.
    SketchArc {
        /// Arc center.
        center: Vec2,
        /// Start point.
        start: Vec2,
        /// Swept angle in radians.
        sweep: f64,
    },
    /// A full circle.
    SketchCircle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f64,
    },
    /// A full ellipse.
    SketchEllipse {
        /// Ellipse center.
        center: Vec2,
        /// Major axis vector (length is the major radius).
        major_axis: Vec2,
        /// Minor radius.
        minor_radius: f64,
    },
    /// A portion of an ellipse.
    SketchEllipticalArc {
        /// Ellipse center.
        center: Vec2,
        /// Major axis vector (length is the major radius).
        major_axis: Vec2,
        /// Minor radius.
        minor_radius: f64,
        /// Start parameter in radians.
        start_angle: f64,
        /// End parameter in radians.
        end_angle: f64,
    },
    /// A spline defined by control points.
    SketchFixedSpline {
        /// Control points.
        control_points: Vec<Vec2>,
        /// Polynomial degree.
        degree: u32,
    },
}

impl SketchEntity {
    /// The host type name of this entity.
    pub fn type_name(&self) -> &'static str {
        match self {
            SketchEntity::SketchPoint { .. } => "SketchPoint",
            SketchEntity::SketchLine { .. } => "SketchLine",
            SketchEntity::SketchFittedSpline { .. } => "SketchFittedSpline",
            SketchEntity::SketchArc { .. } => "SketchArc",
            SketchEntity::SketchCircle { .. } => "SketchCircle",
            SketchEntity::SketchEllipse { .. } => "SketchEllipse",
            SketchEntity::SketchEllipticalArc { .. } => "SketchEllipticalArc",
            SketchEntity::SketchFixedSpline { .. } => "SketchFixedSpline",
        }
    }

    /// Extract the planar geometry the wrap transform needs.
    pub fn to_source_curve(&self) -> SourceCurve {
        match self {
            SketchEntity::SketchPoint { point } => SourceCurve::Point(point.to_point()),
            SketchEntity::SketchLine { start, end } => SourceCurve::Line {
                start: start.to_point(),
                end: end.to_point(),
            },
            SketchEntity::SketchFittedSpline { fit_points, closed } => SourceCurve::FittedSpline {
                fit_points: fit_points.iter().map(|p| p.to_point()).collect(),
                closed: *closed,
            },
            other => SourceCurve::Unsupported(other.type_name().to_string()),
        }
    }
}

/// A wrap request: what to wrap, onto what, and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapJob {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// The selected cylindrical face, if any.
    pub cylinder: Option<CylinderFace>,
    /// Selected sketch entities, in selection order.
    #[serde(default)]
    pub entities: Vec<SketchEntity>,
    /// Wrap parameters.
    #[serde(default)]
    pub params: WrapParameters,
}

impl Default for WrapJob {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            cylinder: None,
            entities: Vec::new(),
            params: WrapParameters::default(),
        }
    }
}

impl WrapJob {
    /// Create a new empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Planar curves for the transform, in selection order.
    pub fn source_curves(&self) -> Vec<SourceCurve> {
        self.entities.iter().map(SketchEntity::to_source_curve).collect()
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cylwrap_sketch::LineMode;

    #[test]
    fn roundtrip_job() {
        let mut job = WrapJob::new();
        job.cylinder = Some(CylinderFace {
            origin: Vec3::new(0.0, 0.0, 5.0),
            radius: 2.5,
            axis: z_axis(),
        });
        job.entities.push(SketchEntity::SketchLine {
            start: Vec2::new(0.0, 0.0),
            end: Vec2::new(3.0, 0.0),
        });
        job.entities.push(SketchEntity::SketchFittedSpline {
            fit_points: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0)],
            closed: true,
        });
        job.params.split_face = true;

        let json = job.to_json().unwrap();
        let restored = WrapJob::from_json(&json).unwrap();
        assert_eq!(job, restored);
    }

    #[test]
    fn minimal_job_uses_defaults() {
        let json = r#"{
            "version": "0.1",
            "cylinder": { "origin": { "x": 1.0, "y": 2.0, "z": 0.0 }, "radius": 4.0 },
            "entities": [
                { "type": "SketchPoint", "point": { "x": 0.5, "y": 1.5 } },
                { "type": "SketchFittedSpline", "fit_points": [{ "x": 0.0, "y": 0.0 }] }
            ]
        }"#;
        let job = WrapJob::from_json(json).unwrap();
        assert_eq!(job.params, WrapParameters::default());

        let face = job.cylinder.as_ref().unwrap();
        assert_eq!(face.axis, z_axis());
        let cyl = face.to_descriptor();
        assert_eq!(cyl.radius, 4.0);
        assert!(cyl.is_vertical());

        match &job.entities[1] {
            SketchEntity::SketchFittedSpline { closed, .. } => assert!(!closed),
            other => panic!("unexpected entity {other:?}"),
        }
    }

    #[test]
    fn params_section_is_partial() {
        let json = r#"{
            "version": "0.1",
            "cylinder": null,
            "params": { "x_scale": 2.0, "line_mode": "chord" }
        }"#;
        let job = WrapJob::from_json(json).unwrap();
        assert_eq!(job.params.x_scale, 2.0);
        assert_eq!(job.params.line_mode, LineMode::Chord);
        assert_eq!(job.params.radius_offset, 0.1);
        assert!(job.entities.is_empty());
        assert!(job.cylinder.is_none());
    }

    #[test]
    fn serde_tagged_entity() {
        let entity = SketchEntity::SketchCircle {
            center: Vec2::new(1.0, 1.0),
            radius: 3.0,
        };
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains("\"type\":\"SketchCircle\""));
        let restored: SketchEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, restored);
    }

    #[test]
    fn unsupported_entities_keep_their_type_name() {
        let entities = vec![
            SketchEntity::SketchArc {
                center: Vec2::new(0.0, 0.0),
                start: Vec2::new(1.0, 0.0),
                sweep: 1.0,
            },
            SketchEntity::SketchEllipse {
                center: Vec2::new(0.0, 0.0),
                major_axis: Vec2::new(2.0, 0.0),
                minor_radius: 1.0,
            },
            SketchEntity::SketchEllipticalArc {
                center: Vec2::new(0.0, 0.0),
                major_axis: Vec2::new(2.0, 0.0),
                minor_radius: 1.0,
                start_angle: 0.0,
                end_angle: 1.0,
            },
            SketchEntity::SketchFixedSpline {
                control_points: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
                degree: 3,
            },
        ];
        let names: Vec<String> = entities
            .iter()
            .map(|e| match e.to_source_curve() {
                SourceCurve::Unsupported(kind) => kind,
                other => panic!("expected unsupported, got {other:?}"),
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "SketchArc",
                "SketchEllipse",
                "SketchEllipticalArc",
                "SketchFixedSpline"
            ]
        );
    }

    #[test]
    fn supported_entities_convert() {
        let job = WrapJob {
            entities: vec![
                SketchEntity::SketchPoint {
                    point: Vec2::new(1.0, 2.0),
                },
                SketchEntity::SketchLine {
                    start: Vec2::new(0.0, 0.0),
                    end: Vec2::new(0.0, 1.0),
                },
            ],
            ..Default::default()
        };
        let curves = job.source_curves();
        assert_eq!(curves[0], SourceCurve::Point(Point2::new(1.0, 2.0)));
        assert_eq!(
            curves[1],
            SourceCurve::Line {
                start: Point2::new(0.0, 0.0),
                end: Point2::new(0.0, 1.0),
            }
        );
    }
}
