#![warn(missing_docs)]

//! Wrap planar sketch curves around a cylindrical face.
//!
//! This crate ties the wrap transform to a modeling session. A
//! [`WrapCommand`] holds a selection (a cylinder plus planar curves) and the
//! wrap parameters; [`WrapCommand::execute`] transforms the curves and asks a
//! [`SketchHost`] to build them, optionally cutting the cylinder face with
//! the wrapped closed outlines.
//!
//! # Example
//!
//! ```
//! use cylwrap::{RecordingHost, WrapCommand};
//! use cylwrap::cylwrap_math::{Point2, Point3};
//! use cylwrap::cylwrap_sketch::{CylinderDescriptor, SourceCurve, WrapParameters};
//!
//! let cylinder = CylinderDescriptor::new(Point3::origin(), 20.0);
//! let curves = vec![SourceCurve::Line {
//!     start: Point2::new(0.0, 0.0),
//!     end: Point2::new(10.0, 5.0),
//! }];
//!
//! let mut host = RecordingHost::new();
//! let output = WrapCommand::new(cylinder, curves, WrapParameters::default())
//!     .execute(&mut host)
//!     .unwrap();
//! assert_eq!(output.curves.len(), 1);
//! ```

pub use cylwrap_geom;
pub use cylwrap_ir;
pub use cylwrap_math;
pub use cylwrap_sketch;

mod command;
mod host;
mod recording;

pub use command::{CommandError, CommandOutput, WrapCommand, WRAP_SKETCH_NAME};
pub use host::{EntityId, HostError, HostOpKind, SketchHost};
pub use recording::{HostOp, RecordingHost};
