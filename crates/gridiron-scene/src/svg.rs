//! SVG backend for [`RenderedScene`]s.
//!
//! [`SvgWriter`] is one concrete drawing surface for scenes. It produces a
//! standalone SVG document as a `String`; writing it anywhere is up to the
//! caller.
//!
//! # Coordinate mapping
//!
//! The canvas is `canvas_size * dpi` pixels.
//!
//! - **Cartesian** scenes map the axis bounds onto the full canvas, with `y`
//!   flipped so larger data values are higher on the page.
//! - **Polar** scenes center a circle on the canvas and scale the radial
//!   axis `[0, radial_max]` to its radius. `theta = 0` points right and
//!   angles increase counter-clockwise.
//!
//! A scene title, when set, is drawn centered along the top edge.
//! [`SvgWriter::render_grid`] places several scenes side by side, each in a
//! nested `<svg>` cell with its own mapping.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::scene::{
    ArrowHead, ArrowStyle, AxisRange, Axes, HorizontalAlign, Marker, PanelGrid, Polyline,
    Primitive, Rect, RenderedScene, Rgba, TextLabel, COLOR_BLACK,
};

/// Pixels per canvas unit.
const DEFAULT_DPI: f64 = 100.0;

/// Fraction of the half-canvas used for the polar plot radius.
const POLAR_FILL: f64 = 0.9;

/// Arrow head stroke length in pixels.
const ARROW_HEAD_LEN: f64 = 8.0;

/// Half-angle of the arrow head.
const ARROW_HEAD_SPREAD: f64 = PI / 7.0;

const GRID_COLOR: &str = "#b0b0b0";

const TITLE_FONT_SIZE: f64 = 14.0;

const GRID_TITLE_FONT_SIZE: f64 = 18.0;

/// Height reserved above the cells for a grid title, in pixels.
const GRID_TITLE_BAND: f64 = 40.0;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Maps scene coordinates to SVG pixel coordinates.
#[derive(Debug, Clone, Copy)]
enum Viewport {
    Cartesian {
        x: AxisRange,
        y: AxisRange,
        width: f64,
        height: f64,
    },
    Polar {
        cx: f64,
        cy: f64,
        radius: f64,
        radial_max: f64,
    },
}

impl Viewport {
    fn new(axes: &Axes, width: f64, height: f64) -> Self {
        match *axes {
            Axes::Cartesian { x, y } => Viewport::Cartesian {
                x,
                y,
                width,
                height,
            },
            Axes::Polar { radial_max } => Viewport::Polar {
                cx: width / 2.0,
                cy: height / 2.0,
                radius: width.min(height) / 2.0 * POLAR_FILL,
                radial_max,
            },
        }
    }

    /// Project a scene point to pixels.
    fn project(&self, p: [f64; 2]) -> (f64, f64) {
        match *self {
            Viewport::Cartesian {
                x,
                y,
                width,
                height,
            } => {
                let px = scale(p[0], x) * width;
                let py = height - scale(p[1], y) * height;
                (px, py)
            }
            Viewport::Polar {
                cx,
                cy,
                radius,
                radial_max,
            } => {
                let (theta, r) = (p[0], p[1]);
                let rs = if radial_max > 0.0 {
                    r / radial_max * radius
                } else {
                    0.0
                };
                (cx + rs * theta.cos(), cy - rs * theta.sin())
            }
        }
    }

    /// Pixels per data unit along each axis (Cartesian only).
    fn pixel_scale(&self) -> (f64, f64) {
        match *self {
            Viewport::Cartesian {
                x,
                y,
                width,
                height,
            } => (
                if x.span() != 0.0 { width / x.span() } else { 0.0 },
                if y.span() != 0.0 { height / y.span() } else { 0.0 },
            ),
            Viewport::Polar { .. } => (1.0, 1.0),
        }
    }
}

/// Position of `v` within `range` as a fraction (0 at `min`, 1 at `max`).
fn scale(v: f64, range: AxisRange) -> f64 {
    let span = range.span();
    if span == 0.0 {
        0.0
    } else {
        (v - range.min) / span
    }
}

// ---------------------------------------------------------------------------
// SvgWriter
// ---------------------------------------------------------------------------

/// Serializes scenes to SVG documents.
#[derive(Debug, Clone, Copy)]
pub struct SvgWriter {
    /// Pixels per canvas unit.
    pub dpi: f64,
    /// Optional solid page background.
    pub background: Option<Rgba>,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            background: Some([1.0, 1.0, 1.0, 1.0]),
        }
    }
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `scene` as a complete SVG document.
    pub fn render(&self, scene: &RenderedScene) -> String {
        let (width, height) = self.pixel_size(scene);

        let mut out = String::new();
        open_document(&mut out, width, height);
        self.write_background(&mut out, width, height);
        write_scene(&mut out, scene, width, height);
        out.push_str("</svg>\n");
        out
    }

    /// Render every panel of `grid` into one document.
    ///
    /// Each panel keeps its own coordinate system inside a nested `<svg>`
    /// cell; cells are sized to the largest panel.
    pub fn render_grid(&self, grid: &PanelGrid) -> String {
        let (cell_width, cell_height) = grid
            .panels
            .iter()
            .map(|p| self.pixel_size(p))
            .fold((0.0, 0.0), |(w, h): (f64, f64), (pw, ph)| (w.max(pw), h.max(ph)));
        let band = if grid.title.is_some() {
            GRID_TITLE_BAND
        } else {
            0.0
        };
        let width = cell_width * grid.columns.max(1) as f64;
        let height = band + cell_height * grid.rows() as f64;

        let mut out = String::new();
        open_document(&mut out, width, height);
        self.write_background(&mut out, width, height);
        if let Some(title) = &grid.title {
            write_title(&mut out, title, width / 2.0, band * 0.7, GRID_TITLE_FONT_SIZE);
        }

        for (index, panel) in grid.panels.iter().enumerate() {
            let (row, column) = grid.cell(index);
            let (panel_width, panel_height) = self.pixel_size(panel);
            let _ = writeln!(
                out,
                r#"<svg x="{}" y="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
                num(column as f64 * cell_width),
                num(band + row as f64 * cell_height),
                num(panel_width),
                num(panel_height),
                num(panel_width),
                num(panel_height)
            );
            write_scene(&mut out, panel, panel_width, panel_height);
            out.push_str("</svg>\n");
        }

        out.push_str("</svg>\n");
        tracing::debug!(panels = grid.len(), rows = grid.rows(), "rendered panel grid");
        out
    }

    fn pixel_size(&self, scene: &RenderedScene) -> (f64, f64) {
        (
            scene.canvas_size.width * self.dpi,
            scene.canvas_size.height * self.dpi,
        )
    }

    fn write_background(&self, out: &mut String, width: f64, height: f64) {
        if let Some(bg) = self.background {
            let _ = writeln!(
                out,
                r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
                num(width),
                num(height),
                rgb(bg),
                num(f64::from(bg[3]))
            );
        }
    }
}

fn open_document(out: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        num(width),
        num(height),
        num(width),
        num(height)
    );
}

/// Axis, primitives and title of one scene on a `width` x `height` canvas.
fn write_scene(out: &mut String, scene: &RenderedScene, width: f64, height: f64) {
    let viewport = Viewport::new(&scene.axes, width, height);

    if scene.axis_visible {
        write_axis(out, &viewport);
    }

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Rect(r) => write_rect(out, &viewport, r),
            Primitive::Polyline(l) => write_polyline(out, &viewport, l),
            Primitive::Text(t) => write_text(out, &viewport, t),
            Primitive::Marker(m) => write_marker(out, &viewport, m),
            Primitive::Arrow(a) => write_arrow(out, &viewport, a.origin, a.target, &a.style),
        }
    }

    if let Some(title) = &scene.title {
        write_title(out, title, width / 2.0, TITLE_FONT_SIZE * 1.2, TITLE_FONT_SIZE);
    }
}

// ---------------------------------------------------------------------------
// Element writers
// ---------------------------------------------------------------------------

fn write_axis(out: &mut String, viewport: &Viewport) {
    match *viewport {
        Viewport::Cartesian { width, height, .. } => {
            let _ = writeln!(
                out,
                r#"<rect x="0" y="0" width="{}" height="{}" fill="none" stroke="{GRID_COLOR}"/>"#,
                num(width),
                num(height)
            );
        }
        Viewport::Polar {
            cx,
            cy,
            radius,
            radial_max,
        } => {
            for ring in 1..=4 {
                let r = radius * f64::from(ring) / 4.0;
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{GRID_COLOR}" stroke-width="0.5"/>"#,
                    num(cx),
                    num(cy),
                    num(r)
                );
            }
            for spoke in 0..8 {
                let theta = f64::from(spoke) * PI / 4.0;
                let (x, y) = viewport.project([theta, radial_max]);
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{GRID_COLOR}" stroke-width="0.5"/>"#,
                    num(cx),
                    num(cy),
                    num(x),
                    num(y)
                );
            }
        }
    }
}

fn write_rect(out: &mut String, viewport: &Viewport, r: &Rect) {
    let (sx, sy) = viewport.pixel_scale();
    let (x, y) = viewport.project([r.origin[0], r.origin[1] + r.height]);
    let _ = writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
        num(x),
        num(y),
        num(r.width * sx),
        num(r.height * sy),
        rgb(r.fill),
        num(r.opacity * f64::from(r.fill[3])),
        rgb(r.edge),
        num(r.edge_width)
    );
}

fn write_polyline(out: &mut String, viewport: &Viewport, l: &Polyline) {
    let mut points = String::new();
    for (i, p) in l.points.iter().enumerate() {
        let (x, y) = viewport.project(*p);
        if i > 0 {
            points.push(' ');
        }
        let _ = write!(points, "{},{}", num(x), num(y));
    }
    let _ = writeln!(
        out,
        r#"<polyline points="{points}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
        rgb(l.color),
        num(f64::from(l.color[3])),
        num(l.width)
    );
}

fn write_text(out: &mut String, viewport: &Viewport, t: &TextLabel) {
    let (x, y) = viewport.project(t.position);
    let anchor = match t.align {
        HorizontalAlign::Left => "start",
        HorizontalAlign::Center => "middle",
        HorizontalAlign::Right => "end",
    };
    let mut transform = String::new();
    if t.rotation_degrees != 0.0 {
        // SVG rotates clockwise in its y-down space.
        transform = format!(
            r#" transform="rotate({} {} {})""#,
            num(-t.rotation_degrees),
            num(x),
            num(y)
        );
    }
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}"{transform}>{}</text>"#,
        num(x),
        num(y),
        num(t.font_size),
        rgb(t.color),
        escape(&t.content)
    );
}

fn write_title(out: &mut String, title: &str, x: f64, y: f64, font_size: f64) {
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle">{}</text>"#,
        num(x),
        num(y),
        num(font_size),
        rgb(COLOR_BLACK),
        escape(title)
    );
}

fn write_marker(out: &mut String, viewport: &Viewport, m: &Marker) {
    let (x, y) = viewport.project(m.position);
    let _ = writeln!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
        num(x),
        num(y),
        num(m.size / 2.0),
        rgb(m.color),
        num(m.opacity * f64::from(m.color[3]))
    );
}

fn write_arrow(
    out: &mut String,
    viewport: &Viewport,
    origin: [f64; 2],
    target: [f64; 2],
    style: &ArrowStyle,
) {
    let (x0, y0) = viewport.project(origin);
    let (x1, y1) = viewport.project(target);
    let color = rgb(style.color);
    let opacity = num(style.opacity * f64::from(style.color[3]));
    let width = num(style.line_width);

    let _ = writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-opacity="{opacity}" stroke-width="{width}"/>"#,
        num(x0),
        num(y0),
        num(x1),
        num(y1)
    );

    let (dx, dy) = (x1 - x0, y1 - y0);
    if style.head == ArrowHead::Line || (dx == 0.0 && dy == 0.0) {
        return;
    }
    let back = dy.atan2(dx) + PI;
    let wing = |spread: f64| {
        (
            x1 + ARROW_HEAD_LEN * (back + spread).cos(),
            y1 + ARROW_HEAD_LEN * (back + spread).sin(),
        )
    };
    let (lx, ly) = wing(ARROW_HEAD_SPREAD);
    let (rx, ry) = wing(-ARROW_HEAD_SPREAD);

    match style.head {
        ArrowHead::Simple => {
            let _ = writeln!(
                out,
                r#"<polyline points="{},{} {},{} {},{}" fill="none" stroke="{color}" stroke-opacity="{opacity}" stroke-width="{width}"/>"#,
                num(lx),
                num(ly),
                num(x1),
                num(y1),
                num(rx),
                num(ry)
            );
        }
        ArrowHead::Filled => {
            let _ = writeln!(
                out,
                r#"<polygon points="{},{} {},{} {},{}" fill="{color}" fill-opacity="{opacity}"/>"#,
                num(lx),
                num(ly),
                num(x1),
                num(y1),
                num(rx),
                num(ry)
            );
        }
        ArrowHead::Line => {}
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Fixed two-decimal number with trailing zeros trimmed.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

fn rgb(c: Rgba) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(c[0]),
        channel(c[1]),
        channel(c[2])
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
