//! Player tracking samples and their conversion into scene input.
//!
//! Tracking data is recorded at 10 Hz. Each sample carries the player's
//! field position in yards, a compass bearing `dir` in degrees, and the
//! distance `dis` covered since the previous sample, also in yards. The
//! renderers know none of these units, so this module does the conversion:
//!
//! - bearing: degrees to radians
//! - speed: yards per tick to meters per second
//!   (`dis / 1.0936 / 0.1`)
//!
//! Loading the samples (CSV, database, ...) is left to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compass::CompassInputPoint;
use crate::scene::{Marker, Primitive, RenderedScene, Rgba, COLOR_ORANGE};

/// Yards in one meter.
pub const YARDS_PER_METER: f64 = 1.0936;

/// Seconds between consecutive tracking samples (10 Hz).
pub const SAMPLE_INTERVAL_SECS: f64 = 0.1;

// ---------------------------------------------------------------------------
// TrackingSample
// ---------------------------------------------------------------------------

/// One row of player tracking data.
///
/// Field names deserialize from the tracking table's column headers
/// (`PlayKey, time, event, x, y, dir, dis, o, s`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSample {
    #[serde(rename = "PlayKey")]
    pub play_key: String,
    /// Seconds since the start of the play.
    pub time: f64,
    /// Play event tag (`"ball_snap"`, `"tackle"`, ...); usually empty.
    #[serde(default)]
    pub event: Option<String>,
    /// Position along the long axis, in yards.
    pub x: f64,
    /// Position along the short axis, in yards.
    pub y: f64,
    /// Direction of motion, compass degrees.
    pub dir: f64,
    /// Distance travelled since the previous sample, yards.
    pub dis: f64,
    /// Orientation, compass degrees.
    pub o: f64,
    /// Estimated speed, yards per second.
    pub s: f64,
}

impl TrackingSample {
    /// Direction in radians and speed in meters per second.
    pub fn to_compass_point(&self) -> CompassInputPoint {
        CompassInputPoint::new(direction_radians(self.dir), velocity_mps(self.dis))
    }
}

/// Convert a compass bearing in degrees to radians.
pub fn direction_radians(dir_degrees: f64) -> f64 {
    dir_degrees.to_radians()
}

/// Convert a per-tick displacement in yards to a speed in meters per second.
pub fn velocity_mps(dis_yards: f64) -> f64 {
    dis_yards / YARDS_PER_METER / SAMPLE_INTERVAL_SECS
}

/// Compass input for every sample with a finite direction and displacement.
///
/// Samples missing either value are dropped (and counted in a warning)
/// rather than failing the whole play.
pub fn compass_points<'a, I>(samples: I) -> Vec<CompassInputPoint>
where
    I: IntoIterator<Item = &'a TrackingSample>,
{
    let mut skipped = 0usize;
    let points: Vec<CompassInputPoint> = samples
        .into_iter()
        .filter_map(|s| {
            if s.dir.is_finite() && s.dis.is_finite() {
                Some(s.to_compass_point())
            } else {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        tracing::warn!(skipped, "dropped tracking samples without direction or distance");
    }
    points
}

/// Group samples by play key. Keys iterate in sorted order; samples keep
/// their input order within a play.
pub fn group_by_play(samples: &[TrackingSample]) -> BTreeMap<&str, Vec<&TrackingSample>> {
    let mut plays: BTreeMap<&str, Vec<&TrackingSample>> = BTreeMap::new();
    for sample in samples {
        plays.entry(sample.play_key.as_str()).or_default().push(sample);
    }
    plays
}

// ---------------------------------------------------------------------------
// Path overlays
// ---------------------------------------------------------------------------

/// Appearance of path markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: Rgba,
    pub opacity: f64,
    pub size: f64,
}

impl Default for MarkerStyle {
    /// Opaque orange, 4pt.
    fn default() -> Self {
        Self {
            color: COLOR_ORANGE,
            opacity: 1.0,
            size: 4.0,
        }
    }
}

impl MarkerStyle {
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Draw one marker per sample at its `(x, y)` on top of `scene`.
///
/// Intended for field scenes, whose coordinates match tracking positions.
/// Returns the number of markers added.
pub fn overlay_path<'a, I>(scene: &mut RenderedScene, samples: I, style: MarkerStyle) -> usize
where
    I: IntoIterator<Item = &'a TrackingSample>,
{
    let before = scene.len();
    for sample in samples {
        scene.push(Primitive::Marker(Marker {
            position: [sample.x, sample.y],
            color: style.color,
            opacity: style.opacity,
            size: style.size,
        }));
    }
    scene.len() - before
}
