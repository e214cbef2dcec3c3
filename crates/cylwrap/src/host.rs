//! The modeling session that wrapped geometry is handed to.

use std::fmt;

use cylwrap_math::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to an entity created by the host.
pub type EntityId = u64;

/// Kinds of operation a host performs for a wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostOpKind {
    /// Create a sketch.
    CreateSketch,
    /// Add a sketch point.
    AddPoint,
    /// Add a sketch line.
    AddLine,
    /// Add a three-point sketch arc.
    AddArc,
    /// Add a fitted spline.
    AddFittedSpline,
    /// Split the cylinder face.
    SplitFace,
    /// Create a patch surface bounded by a curve.
    AddPatch,
    /// Thicken a patch into a body.
    Thicken,
}

impl HostOpKind {
    /// Stable name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostOpKind::CreateSketch => "create_sketch",
            HostOpKind::AddPoint => "add_point",
            HostOpKind::AddLine => "add_line",
            HostOpKind::AddArc => "add_arc",
            HostOpKind::AddFittedSpline => "add_fitted_spline",
            HostOpKind::SplitFace => "split_face",
            HostOpKind::AddPatch => "add_patch",
            HostOpKind::Thicken => "thicken",
        }
    }
}

impl fmt::Display for HostOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host operation that failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("host {kind} failed: {message}")]
pub struct HostError {
    /// The operation that failed.
    pub kind: HostOpKind,
    /// Host-provided description.
    pub message: String,
}

impl HostError {
    /// Create a new host error.
    pub fn new(kind: HostOpKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The modeling kernel that materializes wrapped curves.
///
/// Implementations wrap a live CAD session. The face-cutting operations act
/// on the cylindrical face the user selected, which the host keeps track of.
pub trait SketchHost {
    /// Create a new sketch and return its handle.
    fn create_sketch(&mut self, name: &str) -> Result<EntityId, HostError>;

    /// Add a point to `sketch`.
    fn add_point(&mut self, sketch: EntityId, point: Point3) -> Result<EntityId, HostError>;

    /// Add a straight line to `sketch`.
    fn add_line(
        &mut self,
        sketch: EntityId,
        start: Point3,
        end: Point3,
    ) -> Result<EntityId, HostError>;

    /// Add an arc through three points to `sketch`.
    fn add_arc_three_points(
        &mut self,
        sketch: EntityId,
        start: Point3,
        mid: Point3,
        end: Point3,
    ) -> Result<EntityId, HostError>;

    /// Add a spline through `fit_points` to `sketch`.
    fn add_fitted_spline(
        &mut self,
        sketch: EntityId,
        fit_points: &[Point3],
        closed: bool,
    ) -> Result<EntityId, HostError>;

    /// Split the selected cylinder face with the given curves. Returns the resulting faces.
    fn split_face(&mut self, tools: &[EntityId]) -> Result<Vec<EntityId>, HostError>;

    /// Create a patch surface bounded by `boundary`.
    fn add_patch(&mut self, boundary: EntityId) -> Result<EntityId, HostError>;

    /// Thicken `patch` into a new body.
    fn thicken(&mut self, patch: EntityId, depth: f64) -> Result<EntityId, HostError>;
}
