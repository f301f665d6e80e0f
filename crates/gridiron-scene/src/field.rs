//! American-football field diagram.
//!
//! [`FieldRenderer::render`] produces the scene for a field on a fixed
//! coordinate system: the playing surface spans `x = 0..120` (two 10-unit
//! end zones around 100 yards of play) and `y = 0..53.3`.
//!
//! # Draw order
//!
//! | Step | Primitive(s) | Condition |
//! |------|--------------|-----------|
//! | 1 | Turf rectangle | always |
//! | 2 | Yard-line "ladder" polyline | always |
//! | 3 | Two translucent end-zone rectangles | `show_end_zones` |
//! | 4 | Mirrored yard numbers, top and bottom | `show_yard_numbers` |
//! | 5 | Hash marks, four per integer x | always |
//! | 6 | Highlight line and caption | `highlight_line` |
//! | 7 | Midfield line of scrimmage and caption | `treat_fifty_as_line_of_scrimmage` |
//!
//! # Example
//!
//! ```
//! use gridiron_scene::field::{FieldDiagramSpec, FieldRenderer};
//!
//! let spec = FieldDiagramSpec {
//!     highlight_line: true,
//!     highlight_line_position: 25.0,
//!     ..Default::default()
//! };
//! let scene = FieldRenderer::render(&spec);
//! assert!(scene.labels().any(|l| l.content == "<- Line of Scrimmage"));
//! ```

use serde::{Deserialize, Serialize};

use crate::scene::{
    AxisRange, Axes, CanvasSize, HorizontalAlign, Polyline, Primitive, Rect, RenderedScene, Rgba,
    TextLabel, COLOR_EDGE_RED, COLOR_END_ZONE, COLOR_GOLD, COLOR_HIGHLIGHT, COLOR_TURF,
    COLOR_WHITE,
};

// ---------------------------------------------------------------------------
// Field geometry
// ---------------------------------------------------------------------------

/// Full field length including both end zones.
pub const FIELD_LENGTH: f64 = 120.0;

/// Sideline-to-sideline width.
pub const FIELD_WIDTH: f64 = 53.3;

/// Depth of each end zone; also the offset from yard position to field x.
pub const END_ZONE_DEPTH: f64 = 10.0;

/// Spacing between drawn yard lines.
const YARD_LINE_SPACING: usize = 10;

/// Extra vertical room below and above the surface for labels.
const LABEL_MARGIN: f64 = 5.0;

/// Vertical extents of the four hash-mark bands, bottom to top.
const HASH_BANDS: [(f64, f64); 4] = [(0.4, 0.7), (53.0, 52.5), (22.91, 23.57), (29.73, 30.39)];

/// Baseline of the bottom row of yard numbers.
const YARD_NUMBER_BOTTOM_Y: f64 = 5.0;

/// Horizontal nudge applied to the upside-down top row so the rotated
/// glyphs sit over the line.
const YARD_NUMBER_TOP_NUDGE: f64 = 0.95;

const YARD_NUMBER_FONT_SIZE: f64 = 20.0;

const CAPTION_FONT_SIZE: f64 = 10.0;

/// Captions sit this far right of their line...
const CAPTION_X_OFFSET: f64 = 2.0;

/// ...at this height.
const CAPTION_Y: f64 = 50.0;

/// Field x of the midfield line.
const MIDFIELD_X: f64 = 60.0;

const MIDFIELD_CAPTION: &str = "<- Player Yardline at Snap";

const SURFACE_EDGE_WIDTH: f64 = 0.1;

const END_ZONE_OPACITY: f64 = 0.2;

// ---------------------------------------------------------------------------
// FieldDiagramSpec
// ---------------------------------------------------------------------------

/// Options for a field diagram.
///
/// Every field has a default, so any subset can be supplied as JSON:
///
/// ```
/// use gridiron_scene::field::FieldDiagramSpec;
///
/// let spec: FieldDiagramSpec =
///     serde_json::from_str(r#"{ "show_end_zones": false }"#).unwrap();
/// assert!(!spec.show_end_zones);
/// assert!(spec.show_yard_numbers);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDiagramSpec {
    /// Draw the mirrored yard numbers.
    pub show_yard_numbers: bool,
    /// Shade both end zones. Also narrows hash marks to the playable area.
    pub show_end_zones: bool,
    /// Draw an extra reference line at `highlight_line_position`.
    pub highlight_line: bool,
    /// Yard position (nominally `0..=100`) of the highlight line. Not
    /// clamped; must be finite to be drawn.
    pub highlight_line_position: f64,
    /// Caption for the highlight line.
    pub highlight_label: String,
    /// Draw a fixed gold line at midfield.
    pub treat_fifty_as_line_of_scrimmage: bool,
    pub canvas_size: CanvasSize,
}

impl Default for FieldDiagramSpec {
    fn default() -> Self {
        Self {
            show_yard_numbers: true,
            show_end_zones: true,
            highlight_line: false,
            highlight_line_position: 50.0,
            highlight_label: "Line of Scrimmage".to_owned(),
            treat_fifty_as_line_of_scrimmage: false,
            canvas_size: CanvasSize::new(12.0, 6.33),
        }
    }
}

// ---------------------------------------------------------------------------
// Yard numbering
// ---------------------------------------------------------------------------

/// Displayed yard number for the yard line at field x-coordinate `x`.
///
/// Numbers count up from each goal line (`x = 10` and `x = 110`) and meet at
/// 50 on midfield (`x = 60`): `x - 10` on the near half, `120 - x - 10` past
/// `x = 50`.
///
/// ```
/// use gridiron_scene::field::yard_number;
///
/// assert_eq!(yard_number(20), 10);
/// assert_eq!(yard_number(60), 50);
/// assert_eq!(yard_number(70), 40);
/// assert_eq!(yard_number(100), 10);
/// ```
pub fn yard_number(x: i32) -> i32 {
    let mirrored = if x > 50 { 120 - x } else { x };
    mirrored - END_ZONE_DEPTH as i32
}

// ---------------------------------------------------------------------------
// FieldRenderer
// ---------------------------------------------------------------------------

/// Builds field-diagram scenes. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRenderer;

impl FieldRenderer {
    /// Render a field diagram for `spec`.
    ///
    /// Never fails: every spec is drawable. A highlight position outside
    /// `0..=100` is drawn at its literal field coordinate (position + 10);
    /// a NaN or infinite position skips the highlight with a warning.
    pub fn render(spec: &FieldDiagramSpec) -> RenderedScene {
        let mut scene = RenderedScene::new(
            Axes::Cartesian {
                x: AxisRange::new(0.0, FIELD_LENGTH),
                y: AxisRange::new(-LABEL_MARGIN, FIELD_WIDTH + LABEL_MARGIN),
            },
            spec.canvas_size,
        );
        scene.axis_visible = false;

        // 1. Turf.
        scene.push(Primitive::Rect(Rect {
            origin: [0.0, 0.0],
            width: FIELD_LENGTH,
            height: FIELD_WIDTH,
            fill: COLOR_TURF,
            edge: COLOR_EDGE_RED,
            edge_width: SURFACE_EDGE_WIDTH,
            opacity: 1.0,
        }));

        // 2. Yard lines and boundary.
        scene.push(Primitive::Polyline(yard_line_ladder()));

        // 3. End zones.
        if spec.show_end_zones {
            for x in [0.0, FIELD_LENGTH - END_ZONE_DEPTH] {
                scene.push(Primitive::Rect(Rect {
                    origin: [x, 0.0],
                    width: END_ZONE_DEPTH,
                    height: FIELD_WIDTH,
                    fill: COLOR_END_ZONE,
                    edge: COLOR_EDGE_RED,
                    edge_width: SURFACE_EDGE_WIDTH,
                    opacity: END_ZONE_OPACITY,
                }));
            }
        }

        // 4. Yard numbers on every line strictly between the goal lines.
        if spec.show_yard_numbers {
            for x in (20..110).step_by(YARD_LINE_SPACING) {
                let content = yard_number(x).to_string();
                let xf = f64::from(x);
                scene.push(Primitive::Text(TextLabel {
                    position: [xf, YARD_NUMBER_BOTTOM_Y],
                    content: content.clone(),
                    color: COLOR_WHITE,
                    font_size: YARD_NUMBER_FONT_SIZE,
                    align: HorizontalAlign::Center,
                    rotation_degrees: 0.0,
                }));
                scene.push(Primitive::Text(TextLabel {
                    position: [xf - YARD_NUMBER_TOP_NUDGE, FIELD_WIDTH - YARD_NUMBER_BOTTOM_Y],
                    content,
                    color: COLOR_WHITE,
                    font_size: YARD_NUMBER_FONT_SIZE,
                    align: HorizontalAlign::Center,
                    rotation_degrees: 180.0,
                }));
            }
        }

        // 5. Hash marks.
        let hash_range = if spec.show_end_zones { 11..110 } else { 1..120 };
        for x in hash_range {
            let xf = f64::from(x);
            for (y0, y1) in HASH_BANDS {
                scene.push(Primitive::Polyline(Polyline::segment(
                    [xf, y0],
                    [xf, y1],
                    COLOR_WHITE,
                )));
            }
        }

        // 6. Caller-positioned highlight.
        if spec.highlight_line && !spec.highlight_line_position.is_finite() {
            tracing::warn!(
                position = spec.highlight_line_position,
                "highlight line position is not a number; skipping highlight"
            );
        } else if spec.highlight_line {
            let position = spec.highlight_line_position;
            if !(0.0..=100.0).contains(&position) {
                tracing::warn!(
                    position,
                    "highlight line position outside 0..=100; drawing unclamped"
                );
            }
            let hl = position + END_ZONE_DEPTH;
            push_reference_line(
                &mut scene,
                hl,
                format!("<- {}", spec.highlight_label),
                COLOR_HIGHLIGHT,
            );
        }

        // 7. Fixed midfield line of scrimmage.
        if spec.treat_fifty_as_line_of_scrimmage {
            push_reference_line(&mut scene, MIDFIELD_X, MIDFIELD_CAPTION.to_owned(), COLOR_GOLD);
        }

        tracing::debug!(
            primitives = scene.len(),
            end_zones = spec.show_end_zones,
            yard_numbers = spec.show_yard_numbers,
            "rendered field diagram"
        );

        scene
    }
}

/// The single polyline tracing every yard line (`x = 10..=110`) as a
/// ladder, then closing the outer boundary including both end lines.
fn yard_line_ladder() -> Polyline {
    let mut points = Vec::with_capacity(27);
    for (i, x) in (10..=110).step_by(YARD_LINE_SPACING).enumerate() {
        let x = f64::from(x);
        if i % 2 == 0 {
            points.push([x, 0.0]);
            points.push([x, FIELD_WIDTH]);
        } else {
            points.push([x, FIELD_WIDTH]);
            points.push([x, 0.0]);
        }
    }
    // The ladder ends on the top sideline at x = 110.
    points.extend_from_slice(&[
        [FIELD_LENGTH, FIELD_WIDTH],
        [0.0, FIELD_WIDTH],
        [0.0, 0.0],
        [FIELD_LENGTH, 0.0],
        [FIELD_LENGTH, FIELD_WIDTH],
    ]);
    Polyline {
        points,
        color: COLOR_WHITE,
        width: 1.0,
    }
}

/// Full-height vertical line at `x` with a caption to its right.
fn push_reference_line(scene: &mut RenderedScene, x: f64, caption: String, color: Rgba) {
    scene.push(Primitive::Polyline(Polyline::segment(
        [x, 0.0],
        [x, FIELD_WIDTH],
        color,
    )));
    scene.push(Primitive::Text(TextLabel {
        position: [x + CAPTION_X_OFFSET, CAPTION_Y],
        content: caption,
        color,
        font_size: CAPTION_FONT_SIZE,
        align: HorizontalAlign::Left,
        rotation_degrees: 0.0,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_covers_every_yard_line_full_height() {
        let ladder = yard_line_ladder();
        for x in (0..=120).step_by(10) {
            assert!(
                ladder.has_vertical_segment(f64::from(x), 0.0, FIELD_WIDTH),
                "missing yard line at x={x}"
            );
        }
    }

    #[test]
    fn ladder_closes_both_sidelines() {
        let ladder = yard_line_ladder();
        let horizontal = |y: f64| {
            ladder.segments().any(|(a, b)| {
                a[1] == y && b[1] == y && a[0].min(b[0]) == 0.0 && a[0].max(b[0]) == 120.0
            })
        };
        assert!(horizontal(0.0));
        assert!(horizontal(FIELD_WIDTH));
    }

    #[test]
    fn yard_numbers_mirror_at_midfield() {
        let expected = [10, 20, 30, 40, 50, 40, 30, 20, 10];
        let got: Vec<i32> = (20..110).step_by(10).map(yard_number).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn hash_marks_span_playable_area_with_end_zones() {
        let scene = FieldRenderer::render(&FieldDiagramSpec::default());
        let hash_xs: Vec<f64> = scene
            .polylines()
            .filter(|l| l.points.len() == 2 && l.points[0][1] == 0.4)
            .map(|l| l.points[0][0])
            .collect();
        assert_eq!(hash_xs.len(), 99);
        assert_eq!(hash_xs.first(), Some(&11.0));
        assert_eq!(hash_xs.last(), Some(&109.0));
    }

    #[test]
    fn hash_marks_span_full_range_without_end_zones() {
        let spec = FieldDiagramSpec {
            show_end_zones: false,
            ..Default::default()
        };
        let scene = FieldRenderer::render(&spec);
        let hash_count = scene
            .polylines()
            .filter(|l| l.points.len() == 2 && l.color == COLOR_WHITE)
            .count();
        assert_eq!(hash_count, 119 * 4);
    }

    #[test]
    fn non_finite_highlight_is_skipped() {
        let baseline = FieldRenderer::render(&FieldDiagramSpec::default());
        for position in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let spec = FieldDiagramSpec {
                highlight_line: true,
                highlight_line_position: position,
                ..Default::default()
            };
            let scene = FieldRenderer::render(&spec);
            assert_eq!(scene, baseline);
            assert!(!scene.labels().any(|l| l.content.starts_with("<- ")));
        }
    }
}
