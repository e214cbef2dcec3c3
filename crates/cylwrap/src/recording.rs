//! In-memory host that records what it is asked to build.

use cylwrap_ir::Vec3;
use cylwrap_math::Point3;
use serde::{Deserialize, Serialize};

use crate::host::{EntityId, HostError, HostOpKind, SketchHost};

/// One recorded host operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostOp {
    /// A sketch was created.
    CreateSketch {
        /// New sketch.
        id: EntityId,
        /// Sketch name.
        name: String,
    },
    /// A point was added.
    AddPoint {
        /// New entity.
        id: EntityId,
        /// Owning sketch.
        sketch: EntityId,
        /// Location.
        point: Vec3,
    },
    /// A line was added.
    AddLine {
        /// New entity.
        id: EntityId,
        /// Owning sketch.
        sketch: EntityId,
        /// Start point.
        start: Vec3,
        /// End point.
        end: Vec3,
    },
    /// A three-point arc was added.
    AddArc {
        /// New entity.
        id: EntityId,
        /// Owning sketch.
        sketch: EntityId,
        /// Start point.
        start: Vec3,
        /// Intermediate point.
        mid: Vec3,
        /// End point.
        end: Vec3,
    },
    /// A fitted spline was added.
    AddFittedSpline {
        /// New entity.
        id: EntityId,
        /// Owning sketch.
        sketch: EntityId,
        /// Fit points.
        fit_points: Vec<Vec3>,
        /// Closed flag.
        closed: bool,
    },
    /// The cylinder face was split.
    SplitFace {
        /// Cutting curves.
        tools: Vec<EntityId>,
        /// Resulting faces.
        faces: Vec<EntityId>,
    },
    /// A patch was created.
    AddPatch {
        /// New patch.
        id: EntityId,
        /// Boundary curve.
        boundary: EntityId,
    },
    /// A patch was thickened.
    Thicken {
        /// New body.
        id: EntityId,
        /// Source patch.
        patch: EntityId,
        /// Thickness.
        depth: f64,
    },
}

impl HostOp {
    /// The kind of this operation.
    pub fn kind(&self) -> HostOpKind {
        match self {
            HostOp::CreateSketch { .. } => HostOpKind::CreateSketch,
            HostOp::AddPoint { .. } => HostOpKind::AddPoint,
            HostOp::AddLine { .. } => HostOpKind::AddLine,
            HostOp::AddArc { .. } => HostOpKind::AddArc,
            HostOp::AddFittedSpline { .. } => HostOpKind::AddFittedSpline,
            HostOp::SplitFace { .. } => HostOpKind::SplitFace,
            HostOp::AddPatch { .. } => HostOpKind::AddPatch,
            HostOp::Thicken { .. } => HostOpKind::Thicken,
        }
    }
}

/// A [`SketchHost`] that assigns sequential ids and records every call.
///
/// The recorded operations form a plan that can be replayed against a real
/// modeling session.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    next_id: EntityId,
    ops: Vec<HostOp>,
    fail_on: Option<HostOpKind>,
}

impl RecordingHost {
    /// Create an empty recorder. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that rejects every operation of `kind`.
    pub fn failing_on(kind: HostOpKind) -> Self {
        Self {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    /// Operations recorded so far, in call order.
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Take the recorded operations.
    pub fn into_ops(self) -> Vec<HostOp> {
        self.ops
    }

    /// Number of recorded operations of `kind`.
    pub fn count(&self, kind: HostOpKind) -> usize {
        self.ops.iter().filter(|op| op.kind() == kind).count()
    }

    fn check(&self, kind: HostOpKind) -> Result<(), HostError> {
        match self.fail_on {
            Some(k) if k == kind => Err(HostError::new(kind, "rejected by recording host")),
            _ => Ok(()),
        }
    }

    fn allocate(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, kind: HostOpKind, build: impl FnOnce(EntityId) -> HostOp) -> Result<EntityId, HostError> {
        self.check(kind)?;
        let id = self.allocate();
        self.ops.push(build(id));
        Ok(id)
    }
}

impl SketchHost for RecordingHost {
    fn create_sketch(&mut self, name: &str) -> Result<EntityId, HostError> {
        self.record(HostOpKind::CreateSketch, |id| HostOp::CreateSketch {
            id,
            name: name.to_string(),
        })
    }

    fn add_point(&mut self, sketch: EntityId, point: Point3) -> Result<EntityId, HostError> {
        self.record(HostOpKind::AddPoint, |id| HostOp::AddPoint {
            id,
            sketch,
            point: point.into(),
        })
    }

    fn add_line(
        &mut self,
        sketch: EntityId,
        start: Point3,
        end: Point3,
    ) -> Result<EntityId, HostError> {
        self.record(HostOpKind::AddLine, |id| HostOp::AddLine {
            id,
            sketch,
            start: start.into(),
            end: end.into(),
        })
    }

    fn add_arc_three_points(
        &mut self,
        sketch: EntityId,
        start: Point3,
        mid: Point3,
        end: Point3,
    ) -> Result<EntityId, HostError> {
        self.record(HostOpKind::AddArc, |id| HostOp::AddArc {
            id,
            sketch,
            start: start.into(),
            mid: mid.into(),
            end: end.into(),
        })
    }

    fn add_fitted_spline(
        &mut self,
        sketch: EntityId,
        fit_points: &[Point3],
        closed: bool,
    ) -> Result<EntityId, HostError> {
        self.record(HostOpKind::AddFittedSpline, |id| HostOp::AddFittedSpline {
            id,
            sketch,
            fit_points: fit_points.iter().map(|p| Vec3::from(*p)).collect(),
            closed,
        })
    }

    fn split_face(&mut self, tools: &[EntityId]) -> Result<Vec<EntityId>, HostError> {
        self.check(HostOpKind::SplitFace)?;
        // Each closed tool cuts out one face; the remainder is one more.
        let faces: Vec<EntityId> = (0..=tools.len()).map(|_| self.allocate()).collect();
        self.ops.push(HostOp::SplitFace {
            tools: tools.to_vec(),
            faces: faces.clone(),
        });
        Ok(faces)
    }

    fn add_patch(&mut self, boundary: EntityId) -> Result<EntityId, HostError> {
        self.record(HostOpKind::AddPatch, |id| HostOp::AddPatch { id, boundary })
    }

    fn thicken(&mut self, patch: EntityId, depth: f64) -> Result<EntityId, HostError> {
        self.record(HostOpKind::Thicken, |id| HostOp::Thicken { id, patch, depth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut host = RecordingHost::new();
        let sketch = host.create_sketch("WrapSketch").unwrap();
        let point = host.add_point(sketch, Point3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(sketch, 1);
        assert_eq!(point, 2);
        assert_eq!(
            host.ops()[1],
            HostOp::AddPoint {
                id: 2,
                sketch: 1,
                point: Vec3::new(1.0, 2.0, 3.0),
            }
        );
    }

    #[test]
    fn test_split_face_returns_remainder() {
        let mut host = RecordingHost::new();
        let faces = host.split_face(&[7, 8]).unwrap();
        assert_eq!(faces.len(), 3);
        assert_eq!(host.count(HostOpKind::SplitFace), 1);
    }

    #[test]
    fn test_failing_host() {
        let mut host = RecordingHost::failing_on(HostOpKind::AddPatch);
        assert!(host.create_sketch("s").is_ok());
        let err = host.add_patch(1).unwrap_err();
        assert_eq!(err.kind, HostOpKind::AddPatch);
        assert_eq!(err.to_string(), "host add_patch failed: rejected by recording host");
        assert_eq!(host.ops().len(), 1);
    }

    #[test]
    fn test_ops_serialize_tagged() {
        let mut host = RecordingHost::new();
        host.thicken(4, 0.2).unwrap();
        let json = serde_json::to_string(host.ops()).unwrap();
        assert_eq!(json, r#"[{"op":"thicken","id":1,"patch":4,"depth":0.2}]"#);
    }
}
