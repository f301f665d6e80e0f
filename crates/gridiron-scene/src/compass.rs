//! Compass plots: one arrow per `(angle, magnitude)` pair on a polar axis.
//!
//! The renderer is unit-agnostic. Angles arrive in radians and magnitudes in
//! whatever unit the caller chose; converting raw tracking samples (compass
//! bearing in degrees, yards per tick) is done beforehand, see
//! [`tracking`](crate::tracking).
//!
//! # Styling
//!
//! Every arrow in a scene shares one resolved [`ArrowStyle`]. The renderer's
//! base style is combined with an optional per-call [`ArrowStyleOverride`]
//! by a shallow merge: each field that is `Some` in the override replaces the
//! base value, every other field keeps it.
//!
//! ```
//! use gridiron_scene::compass::{render_compass, ArrowStyleOverride, CompassInputPoint};
//!
//! let overrides = ArrowStyleOverride { opacity: Some(0.3), ..Default::default() };
//! let scene = render_compass(&[CompassInputPoint::new(1.0, 2.0)], Some(&overrides)).unwrap();
//! let arrow = scene.arrows().next().unwrap();
//! assert_eq!(arrow.style.opacity, 0.3);
//! assert_eq!(arrow.style.color, [0.0, 0.0, 0.0, 1.0]);
//! ```

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

pub use crate::scene::{ArrowHead, ArrowStyle, ArrowStyleOverride};
use crate::scene::{Arrow, Axes, CanvasSize, Primitive, RenderedScene};
use crate::SceneError;

/// Default canvas for a single compass plot.
const DEFAULT_CANVAS: CanvasSize = CanvasSize {
    width: 6.0,
    height: 6.0,
};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One vector to draw: direction in radians, length in caller units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompassInputPoint {
    pub angle_radians: f64,
    /// Must be finite and `>= 0`.
    pub magnitude: f64,
}

impl CompassInputPoint {
    pub fn new(angle_radians: f64, magnitude: f64) -> Self {
        Self {
            angle_radians,
            magnitude,
        }
    }
}

// ---------------------------------------------------------------------------
// CompassRenderer
// ---------------------------------------------------------------------------

/// Builds compass-plot scenes.
///
/// The renderer holds only configuration; [`render`](Self::render) never
/// mutates it, so one instance can serve any number of calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompassRenderer {
    /// Base style every arrow starts from.
    pub style: ArrowStyle,
    /// Lower bound for the radial axis. When set, an empty input renders an
    /// empty plot at this scale instead of failing.
    pub radial_floor: Option<f64>,
    pub canvas_size: Option<CanvasSize>,
}

impl CompassRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: ArrowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_radial_floor(mut self, floor: f64) -> Self {
        self.radial_floor = Some(floor);
        self
    }

    pub fn with_canvas_size(mut self, canvas_size: CanvasSize) -> Self {
        self.canvas_size = Some(canvas_size);
        self
    }

    /// Render one arrow per point, from the origin to
    /// `(angle mod 2π, magnitude)`.
    ///
    /// The radial axis upper bound is the largest magnitude (raised to the
    /// radial floor, if one is configured).
    ///
    /// # Errors
    ///
    /// - [`SceneError::EmptyInput`] if `points` is empty and no radial floor
    ///   is configured.
    /// - [`SceneError::InvalidAngle`] for a NaN or infinite angle.
    /// - [`SceneError::InvalidMagnitude`] for a negative or non-finite
    ///   magnitude.
    /// - [`SceneError::InvalidRadialFloor`] if the configured floor is
    ///   negative or non-finite.
    pub fn render(
        &self,
        points: &[CompassInputPoint],
        overrides: Option<&ArrowStyleOverride>,
    ) -> Result<RenderedScene, SceneError> {
        if let Some(floor) = self.radial_floor {
            if !floor.is_finite() || floor < 0.0 {
                return Err(SceneError::InvalidRadialFloor { floor });
            }
        }
        validate(points)?;

        let data_max = points
            .iter()
            .map(|p| p.magnitude)
            .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))));

        let radial_max = match (data_max, self.radial_floor) {
            (Some(max), Some(floor)) => max.max(floor),
            (Some(max), None) => max,
            (None, Some(floor)) => floor,
            (None, None) => return Err(SceneError::EmptyInput),
        };

        let style = match overrides {
            Some(o) => self.style.merged(o),
            None => self.style,
        };

        let mut scene = RenderedScene::new(
            Axes::Polar { radial_max },
            self.canvas_size.unwrap_or(DEFAULT_CANVAS),
        );
        scene.primitives.reserve(points.len());
        for p in points {
            scene.push(Primitive::Arrow(Arrow {
                origin: [0.0, 0.0],
                target: [wrap_angle(p.angle_radians), p.magnitude],
                style,
            }));
        }

        tracing::debug!(arrows = points.len(), radial_max, "rendered compass plot");

        Ok(scene)
    }
}

/// Render with the default [`CompassRenderer`] (black simple arrows, no
/// radial floor).
///
/// # Errors
///
/// See [`CompassRenderer::render`].
pub fn render_compass(
    points: &[CompassInputPoint],
    overrides: Option<&ArrowStyleOverride>,
) -> Result<RenderedScene, SceneError> {
    CompassRenderer::default().render(points, overrides)
}

/// Wrap a finite angle into `[0, 2π)`.
///
/// `rem_euclid` rounds tiny negative inputs up to exactly `2π`; those fold
/// back to zero.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

fn validate(points: &[CompassInputPoint]) -> Result<(), SceneError> {
    for (index, p) in points.iter().enumerate() {
        if !p.angle_radians.is_finite() {
            return Err(SceneError::InvalidAngle {
                index,
                angle: p.angle_radians,
            });
        }
        if !p.magnitude.is_finite() || p.magnitude < 0.0 {
            return Err(SceneError::InvalidMagnitude {
                index,
                magnitude: p.magnitude,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn angles_wrap_into_one_turn() {
        let scene = render_compass(
            &[
                CompassInputPoint::new(-PI / 2.0, 1.0),
                CompassInputPoint::new(5.0 * PI, 1.0),
            ],
            None,
        )
        .unwrap();
        let thetas: Vec<f64> = scene.arrows().map(|a| a.target[0]).collect();
        assert!((thetas[0] - 1.5 * PI).abs() < 1e-12);
        assert!((thetas[1] - PI).abs() < 1e-12);
    }

    #[test]
    fn floor_raises_bound_but_never_clips_data() {
        let renderer = CompassRenderer::new().with_radial_floor(4.0);
        let low = renderer
            .render(&[CompassInputPoint::new(0.0, 1.0)], None)
            .unwrap();
        assert_eq!(low.axes.radial_max(), Some(4.0));

        let high = renderer
            .render(&[CompassInputPoint::new(0.0, 9.0)], None)
            .unwrap();
        assert_eq!(high.axes.radial_max(), Some(9.0));
    }

    #[test]
    fn tiny_negative_angle_wraps_to_zero() {
        assert_eq!((-1e-20f64).rem_euclid(TAU), TAU);
        assert_eq!(wrap_angle(-1e-20), 0.0);
        assert_eq!(wrap_angle(TAU), 0.0);

        let scene = render_compass(&[CompassInputPoint::new(-1e-20, 1.0)], None).unwrap();
        let theta = scene.arrows().next().unwrap().target[0];
        assert!((0.0..TAU).contains(&theta));
    }

    #[test]
    fn negative_floor_is_rejected() {
        let err = CompassRenderer::new()
            .with_radial_floor(-3.0)
            .render(&[], None)
            .unwrap_err();
        match err {
            SceneError::InvalidRadialFloor { floor } => assert_eq!(floor, -3.0),
            other => panic!("expected InvalidRadialFloor, got {other:?}"),
        }
    }

    #[test]
    fn nan_floor_is_rejected_even_with_data() {
        let renderer = CompassRenderer::new().with_radial_floor(f64::NAN);
        assert!(matches!(
            renderer.render(&[], None),
            Err(SceneError::InvalidRadialFloor { .. })
        ));
        assert!(matches!(
            renderer.render(&[CompassInputPoint::new(0.0, 1.0)], None),
            Err(SceneError::InvalidRadialFloor { .. })
        ));
    }

    #[test]
    fn floor_allows_empty_input() {
        let scene = CompassRenderer::new()
            .with_radial_floor(2.0)
            .render(&[], None)
            .unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.axes.radial_max(), Some(2.0));
    }

    #[test]
    fn negative_magnitude_is_rejected_with_index() {
        let err = render_compass(
            &[
                CompassInputPoint::new(0.0, 1.0),
                CompassInputPoint::new(0.0, -0.5),
            ],
            None,
        )
        .unwrap_err();
        match err {
            SceneError::InvalidMagnitude { index, magnitude } => {
                assert_eq!(index, 1);
                assert_eq!(magnitude, -0.5);
            }
            other => panic!("expected InvalidMagnitude, got {other:?}"),
        }
    }

    #[test]
    fn nan_angle_is_rejected() {
        let err = render_compass(&[CompassInputPoint::new(f64::NAN, 1.0)], None).unwrap_err();
        assert!(matches!(err, SceneError::InvalidAngle { index: 0, .. }));
    }

    #[test]
    fn renderer_style_is_the_merge_base() {
        let renderer = CompassRenderer::new().with_style(ArrowStyle {
            color: [1.0, 0.0, 0.0, 1.0],
            ..Default::default()
        });
        let scene = renderer
            .render(
                &[CompassInputPoint::new(0.0, 1.0)],
                Some(&ArrowStyleOverride {
                    opacity: Some(0.3),
                    ..Default::default()
                }),
            )
            .unwrap();
        let style = scene.arrows().next().unwrap().style;
        assert_eq!(style.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(style.opacity, 0.3);
    }
}
