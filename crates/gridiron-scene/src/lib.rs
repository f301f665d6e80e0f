//! Gridiron Scene -- football-field and compass-plot scene builders.
//!
//! This crate turns structured input into a [`RenderedScene`]: an ordered,
//! backend-agnostic list of drawable primitives (rectangles, polylines,
//! text labels, arrows, scatter markers) plus axis bounds and visibility
//! flags. Nothing here touches a window, a file, or global plotting state;
//! callers hand the scene to whatever surface they control (the bundled
//! [`svg::SvgWriter`] is one such surface). Several scenes can be combined
//! into a titled [`PanelGrid`](scene::PanelGrid).
//!
//! Two independent renderers are provided:
//!
//! - [`FieldRenderer`](field::FieldRenderer) draws an American-football
//!   field diagram on a fixed 120 x 53.3 coordinate system.
//! - [`CompassRenderer`](compass::CompassRenderer) draws one arrow per
//!   `(angle, magnitude)` pair on a polar axis scaled to the data.
//!
//! # Quick Start
//!
//! ```
//! use gridiron_scene::prelude::*;
//!
//! let field = FieldRenderer::render(&FieldDiagramSpec::default());
//! assert_eq!(field.rects().count(), 3); // surface + two end zones
//!
//! let points = [
//!     CompassInputPoint::new(0.0, 5.0),
//!     CompassInputPoint::new(std::f64::consts::FRAC_PI_2, 3.0),
//! ];
//! let compass = render_compass(&points, None).unwrap();
//! assert_eq!(compass.arrows().count(), 2);
//! assert_eq!(compass.axes.radial_max(), Some(5.0));
//! ```

#![deny(unsafe_code)]

pub mod compass;
pub mod field;
pub mod scene;
pub mod svg;
pub mod tracking;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while building or encoding scenes.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The compass renderer was given no points and has no radial floor.
    #[error("compass input is empty -- no radial axis scale can be derived")]
    EmptyInput,

    /// A compass point carried a negative or non-finite magnitude.
    #[error("compass point {index} has invalid magnitude {magnitude} (must be finite and >= 0)")]
    InvalidMagnitude {
        index: usize,
        magnitude: f64,
    },

    /// A compass point carried a NaN or infinite angle.
    #[error("compass point {index} has non-finite angle {angle}")]
    InvalidAngle {
        index: usize,
        angle: f64,
    },

    /// The compass renderer's radial floor was negative or non-finite.
    #[error("radial floor {floor} is invalid (must be finite and >= 0)")]
    InvalidRadialFloor {
        floor: f64,
    },

    /// JSON encoding of a scene failed.
    #[error("failed to serialize scene: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::compass::{render_compass, CompassInputPoint, CompassRenderer};
    pub use crate::field::{yard_number, FieldDiagramSpec, FieldRenderer};
    pub use crate::scene::{
        Arrow, ArrowHead, ArrowStyle, ArrowStyleOverride, AxisRange, Axes, CanvasSize,
        HorizontalAlign, Marker, PanelGrid, Polyline, Primitive, Rect, RenderedScene, Rgba,
        TextLabel,
    };
    pub use crate::svg::SvgWriter;
    pub use crate::tracking::{
        compass_points, direction_radians, group_by_play, overlay_path, velocity_mps,
        MarkerStyle, TrackingSample,
    };
    pub use crate::SceneError;
}
