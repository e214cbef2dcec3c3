//! Wrap configuration.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::WrapError;

/// Accepted range for `x_scale` and `y_scale` when clamping user input.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.01..=10.0;

/// Accepted range for `radius_offset` and `thicken_depth` when clamping user input.
pub const OFFSET_RANGE: RangeInclusive<f64> = -100.0..=100.0;

/// How a sketch line is rebuilt after wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    /// Three-point arc through the wrapped start, midpoint and end.
    /// Lines with no horizontal extent stay straight.
    #[default]
    Arc,
    /// Straight chord between the wrapped endpoints.
    Chord,
}

/// How wrapped closed splines cut the cylinder face downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Patch each closed spline, then thicken the patch into a new body.
    #[default]
    PatchAndThicken,
    /// Split the cylinder face once, using every closed spline as a tool.
    SplitFace,
}

/// Parameters of one wrap invocation.
///
/// Captured once before any curve is transformed and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapParameters {
    /// Multiplier on planar x before it is read as arc length.
    pub x_scale: f64,
    /// Multiplier on planar y, which becomes height along the axis.
    pub y_scale: f64,
    /// Radial standoff added to the cylinder radius.
    pub radius_offset: f64,
    /// Use the wrapped closed splines to cut the cylinder face.
    pub split_face: bool,
    /// Depth used when thickening patches (only with `split_face`).
    pub thicken_depth: f64,
    /// Line reconstruction policy.
    pub line_mode: LineMode,
    /// Face cutting policy (only with `split_face`).
    pub split_strategy: SplitStrategy,
}

impl Default for WrapParameters {
    fn default() -> Self {
        Self {
            x_scale: 1.0,
            y_scale: 1.0,
            radius_offset: 0.1,
            split_face: false,
            thicken_depth: 0.2,
            line_mode: LineMode::Arc,
            split_strategy: SplitStrategy::PatchAndThicken,
        }
    }
}

impl WrapParameters {
    /// Parameters of the plain variant: no standoff, lines kept as chords,
    /// direct face splitting.
    pub fn simple() -> Self {
        Self {
            radius_offset: 0.0,
            line_mode: LineMode::Chord,
            split_strategy: SplitStrategy::SplitFace,
            ..Self::default()
        }
    }

    /// Parse parameters from a TOML document. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> Result<Self, WrapError> {
        let params: Self =
            toml::from_str(source).map_err(|e| WrapError::InvalidParameters(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters.
    pub fn validate(&self) -> Result<(), WrapError> {
        let fields = [
            ("x_scale", self.x_scale),
            ("y_scale", self.y_scale),
            ("radius_offset", self.radius_offset),
            ("thicken_depth", self.thicken_depth),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(WrapError::InvalidParameters(format!(
                "{name} must be finite"
            )));
        }
        if self.x_scale <= 0.0 {
            return Err(WrapError::InvalidParameters(
                "x_scale must be positive".into(),
            ));
        }
        if self.y_scale <= 0.0 {
            return Err(WrapError::InvalidParameters(
                "y_scale must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Copy of these parameters restricted to the interactive input ranges.
    pub fn clamped(&self) -> Self {
        let clamp = |v: f64, r: &RangeInclusive<f64>| v.clamp(*r.start(), *r.end());
        Self {
            x_scale: clamp(self.x_scale, &SCALE_RANGE),
            y_scale: clamp(self.y_scale, &SCALE_RANGE),
            radius_offset: clamp(self.radius_offset, &OFFSET_RANGE),
            thicken_depth: clamp(self.thicken_depth, &OFFSET_RANGE),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = WrapParameters::default();
        assert_eq!(params.x_scale, 1.0);
        assert_eq!(params.y_scale, 1.0);
        assert_eq!(params.radius_offset, 0.1);
        assert!(!params.split_face);
        assert_eq!(params.thicken_depth, 0.2);
        assert_eq!(params.line_mode, LineMode::Arc);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_simple_variant() {
        let params = WrapParameters::simple();
        assert_eq!(params.radius_offset, 0.0);
        assert_eq!(params.line_mode, LineMode::Chord);
        assert_eq!(params.split_strategy, SplitStrategy::SplitFace);
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let params = WrapParameters {
            x_scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(WrapError::InvalidParameters(_))
        ));

        let params = WrapParameters {
            y_scale: f64::NAN,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(
            err,
            WrapError::InvalidParameters("y_scale must be finite".into())
        );
    }

    #[test]
    fn test_negative_offset_is_valid() {
        let params = WrapParameters {
            radius_offset: -50.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_clamped() {
        let params = WrapParameters {
            x_scale: 25.0,
            y_scale: 0.0,
            radius_offset: -500.0,
            thicken_depth: 3.0,
            split_face: true,
            ..Default::default()
        };
        let clamped = params.clamped();
        assert_eq!(clamped.x_scale, 10.0);
        assert_eq!(clamped.y_scale, 0.01);
        assert_eq!(clamped.radius_offset, -100.0);
        assert_eq!(clamped.thicken_depth, 3.0);
        assert!(clamped.split_face);
    }

    #[test]
    fn test_from_toml_partial() {
        let params = WrapParameters::from_toml(
            r#"
            x_scale = 0.5
            split_face = true
            line_mode = "chord"
            split_strategy = "split_face"
            "#,
        )
        .unwrap();
        assert_eq!(params.x_scale, 0.5);
        assert_eq!(params.y_scale, 1.0);
        assert!(params.split_face);
        assert_eq!(params.line_mode, LineMode::Chord);
        assert_eq!(params.split_strategy, SplitStrategy::SplitFace);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            WrapParameters::from_toml("y_scale = -1.0"),
            Err(WrapError::InvalidParameters(_))
        ));
        assert!(matches!(
            WrapParameters::from_toml("line_mode = \"spiral\""),
            Err(WrapError::InvalidParameters(_))
        ));
    }
}
