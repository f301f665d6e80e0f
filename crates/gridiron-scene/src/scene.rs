//! Backend-agnostic scene description.
//!
//! A [`RenderedScene`] is the only output of the renderers in this crate.
//! It is a passive value: an ordered list of [`Primitive`]s (earlier
//! primitives are drawn underneath later ones), the axis configuration the
//! primitives are expressed in, and a few presentation flags.
//!
//! Coordinates are interpreted according to [`Axes`]:
//!
//! - [`Axes::Cartesian`] -- points are `[x, y]` in data units.
//! - [`Axes::Polar`] -- points are `[theta, r]` with `theta` in radians.
//!
//! # Fingerprints
//!
//! [`RenderedScene::fingerprint`] hashes the canonical JSON encoding with
//! BLAKE3. Two scenes with the same fingerprint draw identically, which is
//! how the renderers' purity is checked in tests.

use serde::{Deserialize, Serialize};

use crate::SceneError;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// RGBA color, each channel in `0.0..=1.0`.
pub type Rgba = [f32; 4];

/// Turf fill for the playing surface: `darkgreen` (#006400).
pub const COLOR_TURF: Rgba = [0.0, 0.392, 0.0, 1.0];

/// Yard lines, hash marks and yard numbers: #FFFFFF.
pub const COLOR_WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Thin outline around the surface and end zones: #FF0000.
pub const COLOR_EDGE_RED: Rgba = [1.0, 0.0, 0.0, 1.0];

/// End-zone overlay fill: #0000FF (drawn translucent).
pub const COLOR_END_ZONE: Rgba = [0.0, 0.0, 1.0, 1.0];

/// Caller-positioned highlight line: #FFFF00.
pub const COLOR_HIGHLIGHT: Rgba = [1.0, 1.0, 0.0, 1.0];

/// Fixed midfield line-of-scrimmage overlay: `gold` (#FFD700).
pub const COLOR_GOLD: Rgba = [1.0, 0.843, 0.0, 1.0];

/// Neutral arrow color: #000000.
pub const COLOR_BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Path markers for the plays of interest: `orange` (#FFA500).
pub const COLOR_ORANGE: Rgba = [1.0, 0.647, 0.0, 1.0];

/// Path markers for comparison plays: #FF0000.
pub const COLOR_RED: Rgba = [1.0, 0.0, 0.0, 1.0];

// ---------------------------------------------------------------------------
// Arrow styles
// ---------------------------------------------------------------------------

/// Shape of the arrow head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowHead {
    /// Open two-stroke head (`->`).
    #[default]
    Simple,
    /// Filled triangular head (`-|>`).
    Filled,
    /// Bare line, no head (`-`).
    Line,
}

/// Fully resolved arrow appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub head: ArrowHead,
    pub color: Rgba,
    pub opacity: f64,
    pub line_width: f64,
}

impl Default for ArrowStyle {
    /// Simple head, black, opaque, width 1.
    fn default() -> Self {
        Self {
            head: ArrowHead::Simple,
            color: COLOR_BLACK,
            opacity: 1.0,
            line_width: 1.0,
        }
    }
}

impl ArrowStyle {
    /// Shallow merge: fields set in `overrides` replace ours.
    pub fn merged(&self, overrides: &ArrowStyleOverride) -> ArrowStyle {
        ArrowStyle {
            head: overrides.head.unwrap_or(self.head),
            color: overrides.color.unwrap_or(self.color),
            opacity: overrides.opacity.unwrap_or(self.opacity),
            line_width: overrides.line_width.unwrap_or(self.line_width),
        }
    }
}

/// Partial [`ArrowStyle`]; `None` fields leave the base style untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyleOverride {
    pub head: Option<ArrowHead>,
    pub color: Option<Rgba>,
    pub opacity: Option<f64>,
    pub line_width: Option<f64>,
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Axis-aligned filled rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Lower-left corner `[x, y]`.
    pub origin: [f64; 2],
    pub width: f64,
    pub height: f64,
    pub fill: Rgba,
    pub edge: Rgba,
    pub edge_width: f64,
    /// Multiplies the fill alpha; `1.0` is opaque.
    pub opacity: f64,
}

/// Connected line segments through `points`, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<[f64; 2]>,
    pub color: Rgba,
    pub width: f64,
}

impl Polyline {
    /// Build a two-point segment.
    pub fn segment(from: [f64; 2], to: [f64; 2], color: Rgba) -> Self {
        Self {
            points: vec![from, to],
            color,
            width: 1.0,
        }
    }

    /// Iterate over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = ([f64; 2], [f64; 2])> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns `true` if this polyline contains a vertical segment at `x`
    /// covering `y0..=y1` (in either direction).
    pub fn has_vertical_segment(&self, x: f64, y0: f64, y1: f64) -> bool {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.segments().any(|(a, b)| {
            a[0] == x
                && b[0] == x
                && a[1].min(b[1]) <= lo
                && a[1].max(b[1]) >= hi
        })
    }
}

/// Horizontal anchoring of a text label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub position: [f64; 2],
    pub content: String,
    pub color: Rgba,
    /// Font size in points.
    pub font_size: f64,
    pub align: HorizontalAlign,
    /// Counter-clockwise rotation about `position`, in degrees.
    pub rotation_degrees: f64,
}

/// A directed arrow from `origin` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub origin: [f64; 2],
    pub target: [f64; 2],
    pub style: ArrowStyle,
}

/// A single scatter point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: [f64; 2],
    pub color: Rgba,
    pub opacity: f64,
    /// Marker diameter in points.
    pub size: f64,
}

/// One drawable element of a [`RenderedScene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect(Rect),
    Polyline(Polyline),
    Text(TextLabel),
    Arrow(Arrow),
    Marker(Marker),
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// Closed interval `[min, max]` for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// The coordinate system a scene's primitives are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Axes {
    /// Rectangular data coordinates with explicit bounds.
    Cartesian { x: AxisRange, y: AxisRange },
    /// Polar coordinates; the radial axis spans `[0, radial_max]`.
    Polar { radial_max: f64 },
}

impl Axes {
    /// The radial upper bound, if this is a polar axis.
    pub fn radial_max(&self) -> Option<f64> {
        match self {
            Axes::Polar { radial_max } => Some(*radial_max),
            Axes::Cartesian { .. } => None,
        }
    }
}

/// Requested output size in plot units (inches, for the SVG backend).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// RenderedScene
// ---------------------------------------------------------------------------

/// The complete output of a renderer.
///
/// Primitives are stored in draw order. The scene owns all of its data and
/// carries no reference to the input it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedScene {
    pub primitives: Vec<Primitive>,
    pub axes: Axes,
    /// When `false`, backends draw no axis frame, ticks or tick labels.
    pub axis_visible: bool,
    pub canvas_size: CanvasSize,
    /// Heading drawn above the plot, e.g. `"PlayKey: 26624-1-1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RenderedScene {
    /// Create an empty, untitled scene.
    pub fn new(axes: Axes, canvas_size: CanvasSize) -> Self {
        Self {
            primitives: Vec::new(),
            axes,
            axis_visible: true,
            canvas_size,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a primitive on top of everything already in the scene.
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polyline(l) => Some(l),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &TextLabel> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Arrow(a) => Some(a),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker(m) => Some(m),
            _ => None,
        })
    }

    /// Encode the scene as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a scene previously produced by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Serialization`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// BLAKE3 hex digest (64 lowercase hex chars) of the compact JSON
    /// encoding of this scene.
    pub fn fingerprint(&self) -> String {
        let json_bytes =
            serde_json::to_vec(self).expect("RenderedScene should always be JSON-serializable");
        blake3::hash(&json_bytes).to_hex().to_string()
    }
}

// ---------------------------------------------------------------------------
// PanelGrid
// ---------------------------------------------------------------------------

/// Several scenes laid out row-major in a fixed number of columns, like a
/// small-multiples figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGrid {
    /// Panels per row; treated as 1 if zero.
    pub columns: usize,
    pub panels: Vec<RenderedScene>,
    /// Heading drawn above the whole grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PanelGrid {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            panels: Vec::new(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push(&mut self, panel: RenderedScene) {
        self.panels.push(panel);
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Number of rows needed for all panels.
    pub fn rows(&self) -> usize {
        self.panels.len().div_ceil(self.columns.max(1))
    }

    /// `(row, column)` of the panel at `index`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (index / columns, index % columns)
    }

    /// Encode the grid as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
