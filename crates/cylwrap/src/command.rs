//! The wrap command: transform a selection and build the result in a host.

use cylwrap_ir::WrapJob;
use cylwrap_sketch::{
    wrap_curves, CylinderDescriptor, OutputCurve, SourceCurve, SplitStrategy, WrapError,
    WrapParameters, WrapReport,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::host::{EntityId, HostError, SketchHost};

/// Name of the sketch that receives wrapped curves.
pub const WRAP_SKETCH_NAME: &str = "WrapSketch";

/// Errors from running a wrap command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The selection could not be wrapped.
    #[error(transparent)]
    Wrap(#[from] WrapError),

    /// The host rejected an operation.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// What a successful wrap created in the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Per-curve outcome of the transform.
    pub report: WrapReport,
    /// The sketch holding the wrapped curves.
    pub sketch: EntityId,
    /// Host entity for each wrapped curve, keyed by source index.
    pub curves: Vec<(usize, EntityId)>,
    /// Patch surfaces built from cutting tools.
    pub patches: Vec<EntityId>,
    /// Bodies thickened from the patches.
    pub bodies: Vec<EntityId>,
    /// Faces produced by splitting the cylinder face.
    pub faces: Vec<EntityId>,
}

impl CommandOutput {
    /// Host entity created for source curve `index`, if it was wrapped.
    pub fn entity_for(&self, index: usize) -> Option<EntityId> {
        self.curves
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, id)| *id)
    }
}

/// A wrap request bound to a specific selection.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapCommand {
    cylinder: Option<CylinderDescriptor>,
    curves: Vec<SourceCurve>,
    params: WrapParameters,
}

impl WrapCommand {
    /// Create a command for `curves` on `cylinder`.
    pub fn new(cylinder: CylinderDescriptor, curves: Vec<SourceCurve>, params: WrapParameters) -> Self {
        Self {
            cylinder: Some(cylinder),
            curves,
            params,
        }
    }

    /// Create a command from a job document. A job without a cylinder is
    /// accepted here and rejected at execution.
    pub fn from_job(job: &WrapJob) -> Self {
        Self {
            cylinder: job.cylinder.as_ref().map(|face| face.to_descriptor()),
            curves: job.source_curves(),
            params: job.params.clone(),
        }
    }

    /// Replace the parameters.
    pub fn with_params(mut self, params: WrapParameters) -> Self {
        self.params = params;
        self
    }

    /// The parameters this command will run with.
    pub fn params(&self) -> &WrapParameters {
        &self.params
    }

    /// The selected curves.
    pub fn curves(&self) -> &[SourceCurve] {
        &self.curves
    }

    /// The selected cylinder, if any.
    pub fn cylinder(&self) -> Option<&CylinderDescriptor> {
        self.cylinder.as_ref()
    }

    /// Run the wrap and build the result in `host`.
    ///
    /// Nothing is sent to the host unless the whole selection passes the
    /// batch checks. A host failure stops the command; entities created
    /// before the failure stay in the host.
    pub fn execute<H: SketchHost + ?Sized>(&self, host: &mut H) -> Result<CommandOutput, CommandError> {
        let cylinder = self
            .cylinder
            .as_ref()
            .ok_or_else(|| WrapError::EmptySelection("no cylinder face selected".into()))?;

        info!(
            origin = ?cylinder.origin.coords,
            radius = cylinder.radius,
            axis = ?cylinder.axis.into_inner(),
            curves = self.curves.len(),
            "wrapping selection"
        );

        let report = wrap_curves(&self.curves, cylinder, &self.params)?;

        let sketch = host.create_sketch(WRAP_SKETCH_NAME)?;
        let mut curves = Vec::with_capacity(report.entries.len());
        for (index, curve) in report.wrapped() {
            let id = materialize(host, sketch, curve)?;
            debug!(index, id, kind = curve.type_name(), "created sketch entity");
            curves.push((index, id));
        }

        let tools: Vec<EntityId> = report
            .split_tools()
            .filter_map(|(index, _)| curves.iter().find(|(i, _)| *i == index).map(|(_, id)| *id))
            .collect();

        let mut output = CommandOutput {
            report,
            sketch,
            curves,
            patches: Vec::new(),
            bodies: Vec::new(),
            faces: Vec::new(),
        };

        if !self.params.split_face {
            return Ok(output);
        }
        if tools.is_empty() {
            info!("no closed splines to cut the cylinder face with");
            return Ok(output);
        }

        match self.params.split_strategy {
            SplitStrategy::PatchAndThicken => {
                for &tool in &tools {
                    output.patches.push(host.add_patch(tool)?);
                }
                for &patch in &output.patches {
                    output.bodies.push(host.thicken(patch, self.params.thicken_depth)?);
                }
                info!(
                    patches = output.patches.len(),
                    depth = self.params.thicken_depth,
                    "thickened wrapped outlines"
                );
            }
            SplitStrategy::SplitFace => {
                output.faces = host.split_face(&tools)?;
                info!(tools = tools.len(), faces = output.faces.len(), "split cylinder face");
            }
        }

        Ok(output)
    }
}

fn materialize<H: SketchHost + ?Sized>(
    host: &mut H,
    sketch: EntityId,
    curve: &OutputCurve,
) -> Result<EntityId, HostError> {
    match curve {
        OutputCurve::Point(p) => host.add_point(sketch, *p),
        OutputCurve::Line { start, end } => host.add_line(sketch, *start, *end),
        OutputCurve::Arc { start, mid, end } => host.add_arc_three_points(sketch, *start, *mid, *end),
        OutputCurve::FittedSpline { fit_points, closed } => {
            host.add_fitted_spline(sketch, fit_points, *closed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostOpKind;
    use crate::recording::{HostOp, RecordingHost};
    use cylwrap_ir::Vec3;
    use cylwrap_math::{Point2, Point3};

    fn square_spline(closed: bool) -> SourceCurve {
        SourceCurve::FittedSpline {
            fit_points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            closed,
        }
    }

    fn selection() -> Vec<SourceCurve> {
        vec![
            SourceCurve::Point(Point2::new(0.0, 2.0)),
            SourceCurve::Line {
                start: Point2::new(0.0, 0.0),
                end: Point2::new(0.0, 3.0),
            },
            SourceCurve::Unsupported("SketchCircle".into()),
            square_spline(true),
            square_spline(false),
        ]
    }

    fn cylinder() -> CylinderDescriptor {
        CylinderDescriptor::new(Point3::origin(), 10.0)
    }

    #[test]
    fn test_builds_sketch_without_split() {
        let cmd = WrapCommand::new(cylinder(), selection(), WrapParameters::default());
        let mut host = RecordingHost::new();
        let out = cmd.execute(&mut host).unwrap();

        assert_eq!(
            host.ops()[0],
            HostOp::CreateSketch {
                id: 1,
                name: WRAP_SKETCH_NAME.into(),
            }
        );
        assert_eq!(host.count(HostOpKind::AddPoint), 1);
        assert_eq!(host.count(HostOpKind::AddLine), 1);
        assert_eq!(host.count(HostOpKind::AddFittedSpline), 2);
        assert_eq!(host.count(HostOpKind::AddPatch), 0);
        assert_eq!(out.curves.len(), 4);
        assert_eq!(out.entity_for(2), None);
        assert_eq!(out.report.summary().skipped, 1);
    }

    #[test]
    fn test_point_lands_on_offset_radius() {
        let params = WrapParameters {
            radius_offset: 0.0,
            ..Default::default()
        };
        let cmd = WrapCommand::new(cylinder(), vec![SourceCurve::Point(Point2::new(0.0, 2.0))], params);
        let mut host = RecordingHost::new();
        cmd.execute(&mut host).unwrap();
        assert_eq!(
            host.ops()[1],
            HostOp::AddPoint {
                id: 2,
                sketch: 1,
                point: Vec3::new(10.0, 0.0, 2.0),
            }
        );
    }

    #[test]
    fn test_patch_and_thicken() {
        let params = WrapParameters {
            split_face: true,
            thicken_depth: 0.5,
            ..Default::default()
        };
        let cmd = WrapCommand::new(cylinder(), selection(), params);
        let mut host = RecordingHost::new();
        let out = cmd.execute(&mut host).unwrap();

        let tool = out.entity_for(3).unwrap();
        assert_eq!(out.patches.len(), 1);
        assert_eq!(out.bodies.len(), 1);
        assert!(out.faces.is_empty());

        let ops = host.ops();
        let n = ops.len();
        assert_eq!(
            ops[n - 2],
            HostOp::AddPatch {
                id: out.patches[0],
                boundary: tool,
            }
        );
        assert_eq!(
            ops[n - 1],
            HostOp::Thicken {
                id: out.bodies[0],
                patch: out.patches[0],
                depth: 0.5,
            }
        );
    }

    #[test]
    fn test_split_face_strategy() {
        let mut curves = selection();
        curves.push(square_spline(true));
        let params = WrapParameters {
            split_face: true,
            split_strategy: SplitStrategy::SplitFace,
            ..Default::default()
        };
        let cmd = WrapCommand::new(cylinder(), curves, params);
        let mut host = RecordingHost::new();
        let out = cmd.execute(&mut host).unwrap();

        assert_eq!(host.count(HostOpKind::SplitFace), 1);
        assert_eq!(host.count(HostOpKind::AddPatch), 0);
        match host.ops().last().unwrap() {
            HostOp::SplitFace { tools, faces } => {
                assert_eq!(tools, &vec![out.entity_for(3).unwrap(), out.entity_for(5).unwrap()]);
                assert_eq!(faces, &out.faces);
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn test_split_without_closed_splines_does_nothing() {
        let params = WrapParameters {
            split_face: true,
            ..Default::default()
        };
        let cmd = WrapCommand::new(cylinder(), vec![square_spline(false)], params);
        let mut host = RecordingHost::new();
        let out = cmd.execute(&mut host).unwrap();
        assert!(out.patches.is_empty());
        assert_eq!(host.ops().len(), 2);
    }

    #[test]
    fn test_degenerate_cylinder_touches_nothing() {
        let params = WrapParameters {
            radius_offset: -10.0,
            ..Default::default()
        };
        let cmd = WrapCommand::new(cylinder(), selection(), params);
        let mut host = RecordingHost::new();
        let err = cmd.execute(&mut host).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Wrap(WrapError::DegenerateCylinder { .. })
        ));
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_missing_cylinder() {
        let mut job = WrapJob::new();
        job.entities.push(cylwrap_ir::SketchEntity::SketchPoint {
            point: cylwrap_ir::Vec2::new(0.0, 0.0),
        });
        let cmd = WrapCommand::from_job(&job);
        let mut host = RecordingHost::new();
        let err = cmd.execute(&mut host).unwrap_err();
        assert_eq!(
            err,
            CommandError::Wrap(WrapError::EmptySelection("no cylinder face selected".into()))
        );
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_empty_curves() {
        let cmd = WrapCommand::new(cylinder(), Vec::new(), WrapParameters::default());
        let mut host = RecordingHost::new();
        assert!(matches!(
            cmd.execute(&mut host),
            Err(CommandError::Wrap(WrapError::EmptySelection(_)))
        ));
    }

    #[test]
    fn test_host_failure_propagates() {
        let params = WrapParameters {
            split_face: true,
            ..Default::default()
        };
        let cmd = WrapCommand::new(cylinder(), selection(), params);
        let mut host = RecordingHost::failing_on(HostOpKind::Thicken);
        let err = cmd.execute(&mut host).unwrap_err();
        match err {
            CommandError::Host(e) => assert_eq!(e.kind, HostOpKind::Thicken),
            other => panic!("expected host error, got {other:?}"),
        }
        assert_eq!(host.count(HostOpKind::AddPatch), 1);
        assert_eq!(host.count(HostOpKind::Thicken), 0);
    }

    #[test]
    fn test_dyn_host() {
        let cmd = WrapCommand::new(cylinder(), selection(), WrapParameters::simple());
        let mut recording = RecordingHost::new();
        let host: &mut dyn SketchHost = &mut recording;
        let out = cmd.execute(host).unwrap();
        assert_eq!(out.curves.len(), 4);
    }
}
