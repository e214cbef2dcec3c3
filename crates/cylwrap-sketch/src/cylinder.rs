//! The target cylinder, as read from the selected cylindrical face.

use cylwrap_geom::CylinderSurface;
use cylwrap_math::{Dir3, Point3, Tolerance, Vec3};

use crate::{WrapError, WrapParameters};

/// Snapshot of the cylindrical face geometry the curves are wrapped onto.
///
/// The axis is recorded for diagnostics only: wrapping always treats the
/// axis as parallel to global Z.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderDescriptor {
    /// A point on the cylinder axis.
    pub origin: Point3,
    /// Cylinder radius.
    pub radius: f64,
    /// Unit axis direction.
    pub axis: Dir3,
}

impl CylinderDescriptor {
    /// Z-aligned cylinder through `origin`.
    pub fn new(origin: Point3, radius: f64) -> Self {
        Self {
            origin,
            radius,
            axis: Dir3::new_normalize(Vec3::z()),
        }
    }

    /// Cylinder with an explicit axis direction (normalized here).
    pub fn with_axis(origin: Point3, radius: f64, axis: Vec3) -> Self {
        Self {
            origin,
            radius,
            axis: Dir3::new_normalize(axis),
        }
    }

    /// Whether the axis is parallel to global Z.
    pub fn is_vertical(&self) -> bool {
        self.surface().is_vertical()
    }

    /// The face's own surface.
    pub fn surface(&self) -> CylinderSurface {
        CylinderSurface::with_axis(self.origin, self.axis.into_inner(), self.radius)
    }

    /// Radius plus the configured radial standoff.
    pub fn effective_radius(&self, params: &WrapParameters) -> f64 {
        self.radius + params.radius_offset
    }

    /// The surface planar points are evaluated on: vertical, through the
    /// origin's x/y at height zero, with the effective radius.
    pub fn wrap_surface(&self, params: &WrapParameters) -> CylinderSurface {
        CylinderSurface::with_center(
            Point3::new(self.origin.x, self.origin.y, 0.0),
            self.effective_radius(params),
        )
    }

    /// Check that wrapping onto this cylinder is defined.
    pub fn validate(&self, params: &WrapParameters) -> Result<(), WrapError> {
        let effective = self.effective_radius(params);
        let bad_radius = self.radius.is_nan() || self.radius <= 0.0;
        if bad_radius || !effective.is_finite() || Tolerance::DEFAULT.is_zero(effective) {
            return Err(WrapError::DegenerateCylinder {
                radius: self.radius,
                offset: params.radius_offset,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_radius() {
        let cyl = CylinderDescriptor::new(Point3::origin(), 5.0);
        let params = WrapParameters::default();
        assert!((cyl.effective_radius(&params) - 5.1).abs() < 1e-12);
        assert!(cyl.validate(&params).is_ok());
    }

    #[test]
    fn test_zero_effective_radius() {
        let cyl = CylinderDescriptor::new(Point3::origin(), 0.1);
        let params = WrapParameters {
            radius_offset: -0.1,
            ..Default::default()
        };
        assert_eq!(
            cyl.validate(&params),
            Err(WrapError::DegenerateCylinder {
                radius: 0.1,
                offset: -0.1
            })
        );
    }

    #[test]
    fn test_negative_effective_radius_is_allowed() {
        let cyl = CylinderDescriptor::new(Point3::origin(), 1.0);
        let params = WrapParameters {
            radius_offset: -3.0,
            ..Default::default()
        };
        assert!(cyl.validate(&params).is_ok());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let params = WrapParameters::simple();
        let zero = CylinderDescriptor::new(Point3::origin(), 0.0);
        assert!(matches!(
            zero.validate(&params),
            Err(WrapError::DegenerateCylinder { .. })
        ));
        let nan = CylinderDescriptor::new(Point3::origin(), f64::NAN);
        assert!(nan.validate(&params).is_err());
    }

    #[test]
    fn test_wrap_surface_ignores_origin_height() {
        let cyl = CylinderDescriptor::new(Point3::new(1.0, 2.0, 7.5), 3.0);
        let surface = cyl.wrap_surface(&WrapParameters::simple());
        assert_eq!(surface.center, Point3::new(1.0, 2.0, 0.0));
        assert_eq!(surface.radius, 3.0);
    }

    #[test]
    fn test_vertical_axis() {
        assert!(CylinderDescriptor::new(Point3::origin(), 1.0).is_vertical());
        let tilted = CylinderDescriptor::with_axis(Point3::origin(), 1.0, Vec3::x());
        assert!(!tilted.is_vertical());
    }
}
