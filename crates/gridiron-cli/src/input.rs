//! CSV loaders for the tracking and injury tables.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use gridiron_scene::tracking::TrackingSample;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

const PLAY_KEY_COLUMN: &str = "PlayKey";

/// Raw tracking row. Motion columns are occasionally blank in the source
/// data; those load as NaN and are dropped later by `compass_points`.
#[derive(Debug, Deserialize)]
struct TrackingRow {
    #[serde(rename = "PlayKey")]
    play_key: String,
    time: f64,
    #[serde(default)]
    event: Option<String>,
    x: f64,
    y: f64,
    dir: Option<f64>,
    dis: Option<f64>,
    o: Option<f64>,
    s: Option<f64>,
}

impl From<TrackingRow> for TrackingSample {
    fn from(row: TrackingRow) -> Self {
        TrackingSample {
            play_key: row.play_key,
            time: row.time,
            event: row.event.filter(|e| !e.is_empty()),
            x: row.x,
            y: row.y,
            dir: row.dir.unwrap_or(f64::NAN),
            dis: row.dis.unwrap_or(f64::NAN),
            o: row.o.unwrap_or(f64::NAN),
            s: row.s.unwrap_or(f64::NAN),
        }
    }
}

fn open_tracking(path: &Path) -> Result<(csv::Reader<File>, csv::StringRecord, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open tracking CSV: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read tracking header: {}", path.display()))?
        .clone();
    let key_column = headers
        .iter()
        .position(|h| h == PLAY_KEY_COLUMN)
        .with_context(|| format!("No {PLAY_KEY_COLUMN} column in {}", path.display()))?;
    Ok((reader, headers, key_column))
}

/// Stream a player tracking CSV, keeping only rows whose play key passes
/// `keep`.
///
/// Rejected rows are never deserialized, so memory is bounded by the plays
/// kept rather than by the size of the table.
pub fn load_tracking<F>(path: &Path, keep: F) -> Result<Vec<TrackingSample>>
where
    F: Fn(&str) -> bool,
{
    let (mut reader, headers, key_column) = open_tracking(path)?;

    let mut samples = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut line = 0usize;
    let mut skipped = 0usize;
    loop {
        line += 1;
        let more = reader.read_record(&mut record).with_context(|| {
            format!("Malformed tracking row {line} in {}", path.display())
        })?;
        if !more {
            break;
        }
        if !keep(record.get(key_column).unwrap_or_default()) {
            skipped += 1;
            continue;
        }
        let row: TrackingRow = record.deserialize(Some(&headers)).with_context(|| {
            format!("Malformed tracking row {line} in {}", path.display())
        })?;
        samples.push(TrackingSample::from(row));
    }

    tracing::info!(
        kept = samples.len(),
        skipped,
        path = %path.display(),
        "loaded tracking data"
    );
    Ok(samples)
}

/// Every distinct play key in a tracking CSV, without loading any samples.
pub fn tracking_play_keys(path: &Path) -> Result<BTreeSet<String>> {
    let (mut reader, _, key_column) = open_tracking(path)?;

    let mut keys = BTreeSet::new();
    let mut record = csv::StringRecord::new();
    let mut line = 0usize;
    loop {
        line += 1;
        let more = reader.read_record(&mut record).with_context(|| {
            format!("Malformed tracking row {line} in {}", path.display())
        })?;
        if !more {
            break;
        }
        if let Some(key) = record.get(key_column) {
            if !keys.contains(key) {
                keys.insert(key.to_owned());
            }
        }
    }

    tracing::debug!(plays = keys.len(), path = %path.display(), "indexed tracking plays");
    Ok(keys)
}

// ---------------------------------------------------------------------------
// Injuries
// ---------------------------------------------------------------------------

/// One row of the injury record table.
///
/// `DM_M*` are cumulative "days missed" flags: 1 if the player missed at
/// least 1, 7, 28, or 42 days.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InjuryRecord {
    #[serde(rename = "PlayerKey")]
    pub player_key: String,
    #[serde(rename = "GameID")]
    pub game_id: String,
    #[serde(rename = "PlayKey")]
    pub play_key: Option<String>,
    #[serde(rename = "BodyPart")]
    pub body_part: String,
    #[serde(rename = "Surface")]
    pub surface: String,
    #[serde(rename = "DM_M1")]
    pub dm_m1: u8,
    #[serde(rename = "DM_M7")]
    pub dm_m7: u8,
    #[serde(rename = "DM_M28")]
    pub dm_m28: u8,
    #[serde(rename = "DM_M42")]
    pub dm_m42: u8,
}

/// Load injury records that can be linked to a play.
///
/// Rows with a blank `PlayKey` cannot be matched against tracking data and
/// are skipped.
pub fn load_injuries(path: &Path) -> Result<Vec<InjuryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open injury CSV: {}", path.display()))?;

    let mut records = Vec::new();
    let mut unlinked = 0usize;
    for (i, row) in reader.deserialize::<InjuryRecord>().enumerate() {
        let record = row.with_context(|| {
            format!("Malformed injury row {} in {}", i + 1, path.display())
        })?;
        match record.play_key.as_deref() {
            Some(key) if !key.is_empty() => records.push(record),
            _ => unlinked += 1,
        }
    }

    if unlinked > 0 {
        tracing::warn!(unlinked, "skipped injury records without a PlayKey");
    }
    tracing::info!(records = records.len(), path = %path.display(), "loaded injury records");
    Ok(records)
}
