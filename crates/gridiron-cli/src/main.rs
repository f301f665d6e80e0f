//! `gridiron` -- render field diagrams and compass plots from tracking data.
//!
//! ```text
//! gridiron field --tracking trk.csv --injuries inj.csv --sample 100 --out field.svg
//! gridiron compass --tracking trk.csv --play 26624-1-1 --format json
//! gridiron compass --tracking trk.csv --injuries inj.csv --limit 6 --out injuries.svg
//! ```

mod input;
mod plays;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridiron_scene::prelude::*;
use gridiron_scene::scene::COLOR_RED;
use tracing_subscriber::EnvFilter;

/// Opacity used when many plays are drawn on top of each other.
const OVERLAY_OPACITY: f64 = 0.2;

#[derive(Parser, Debug)]
#[command(name = "gridiron", author, version, about = "Football field and compass plot renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = Format::Svg)]
    format: Format,

    /// Output file; stdout if omitted.
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw a field diagram, optionally with player paths on top
    Field {
        /// JSON field spec; omitted keys take their defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Player tracking CSV
        #[arg(long)]
        tracking: Option<PathBuf>,

        /// Play keys whose paths are drawn opaque orange
        #[arg(long = "play")]
        plays: Vec<String>,

        /// Injury record CSV; every injury play is drawn translucent orange
        #[arg(long)]
        injuries: Option<PathBuf>,

        /// Number of random non-injury plays to draw in translucent red
        #[arg(long, default_value_t = 0)]
        sample: usize,

        /// Seed for --sample
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Heading drawn above the field
        #[arg(long)]
        title: Option<String>,
    },

    /// Draw direction/speed compasses, one titled panel per play
    Compass {
        /// Player tracking CSV
        #[arg(long)]
        tracking: PathBuf,

        /// Play keys to plot, in panel order
        #[arg(long = "play")]
        plays: Vec<String>,

        /// Injury record CSV; its first --limit plays follow any --play keys
        #[arg(long)]
        injuries: Option<PathBuf>,

        /// Number of injury plays taken from --injuries
        #[arg(long, default_value_t = 6)]
        limit: usize,

        /// Panels per row when more than one play is drawn
        #[arg(long, default_value_t = 3)]
        columns: usize,

        /// Arrow opacity
        #[arg(long, default_value_t = 0.3)]
        opacity: f64,

        /// Heading for the whole figure; replaces the panel title for one play
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::trace!(?cli, "parsed arguments");

    let figure = match &cli.command {
        Commands::Field {
            config,
            tracking,
            plays,
            injuries,
            sample,
            seed,
            title,
        } => Figure::Scene(field_scene(&FieldArgs {
            config: config.as_deref(),
            tracking: tracking.as_deref(),
            plays,
            injuries: injuries.as_deref(),
            sample: *sample,
            seed: *seed,
            title: title.as_deref(),
        })?),
        Commands::Compass {
            tracking,
            plays,
            injuries,
            limit,
            columns,
            opacity,
            title,
        } => compass_figure(&CompassArgs {
            tracking,
            plays,
            injuries: injuries.as_deref(),
            limit: *limit,
            columns: *columns,
            opacity: *opacity,
            title: title.as_deref(),
        })?,
    };

    write_figure(&figure, cli.format, cli.out.as_deref())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

struct FieldArgs<'a> {
    config: Option<&'a Path>,
    tracking: Option<&'a Path>,
    plays: &'a [String],
    injuries: Option<&'a Path>,
    sample: usize,
    seed: u64,
    title: Option<&'a str>,
}

fn field_scene(args: &FieldArgs<'_>) -> Result<RenderedScene> {
    let spec = match args.config {
        Some(path) => load_field_spec(path)?,
        None => FieldDiagramSpec::default(),
    };
    let mut scene = FieldRenderer::render(&spec);
    scene.title = args.title.map(str::to_owned);

    let wants_paths = !args.plays.is_empty() || args.injuries.is_some() || args.sample > 0;
    let tracking_path = match (args.tracking, wants_paths) {
        (Some(path), _) => path,
        (None, false) => return Ok(scene),
        (None, true) => bail!("--play, --injuries and --sample need --tracking"),
    };

    let injured: BTreeSet<String> = match args.injuries {
        Some(path) => injury_play_keys(path)?.into_iter().collect(),
        None => BTreeSet::new(),
    };
    let sampled = if args.sample > 0 {
        let candidates = input::tracking_play_keys(tracking_path)?;
        plays::sample_plays(&candidates, &injured, args.sample, args.seed)
    } else {
        Vec::new()
    };

    let wanted: BTreeSet<&str> = args
        .plays
        .iter()
        .chain(&injured)
        .chain(&sampled)
        .map(String::as_str)
        .collect();
    let samples = input::load_tracking(tracking_path, |key| wanted.contains(key))?;
    let by_play = group_by_play(&samples);

    // Draw order: random sample, injury plays, then explicitly requested plays.
    let mut markers = 0;
    let sample_style = MarkerStyle::default()
        .with_color(COLOR_RED)
        .with_opacity(OVERLAY_OPACITY);
    for key in &sampled {
        markers += overlay_path(
            &mut scene,
            plays::samples_for(&by_play, key).iter().copied(),
            sample_style,
        );
    }
    let injury_style = MarkerStyle::default().with_opacity(OVERLAY_OPACITY);
    for key in &injured {
        markers += overlay_path(
            &mut scene,
            plays::samples_for(&by_play, key).iter().copied(),
            injury_style,
        );
    }
    for key in args.plays {
        markers += overlay_path(
            &mut scene,
            plays::samples_for(&by_play, key).iter().copied(),
            MarkerStyle::default(),
        );
    }

    tracing::info!(markers, "overlaid player paths");
    Ok(scene)
}

struct CompassArgs<'a> {
    tracking: &'a Path,
    plays: &'a [String],
    injuries: Option<&'a Path>,
    limit: usize,
    columns: usize,
    opacity: f64,
    title: Option<&'a str>,
}

/// Requested plays first, then up to `limit` injury plays in file order,
/// without repeats.
fn compass_play_keys(args: &CompassArgs<'_>) -> Result<Vec<String>> {
    let mut keys: Vec<String> = Vec::new();
    let mut push = |key: String| {
        if !keys.contains(&key) {
            keys.push(key);
        }
    };
    for key in args.plays {
        push(key.clone());
    }
    if let Some(path) = args.injuries {
        for key in injury_play_keys(path)?.into_iter().take(args.limit) {
            push(key);
        }
    }
    Ok(keys)
}

fn compass_figure(args: &CompassArgs<'_>) -> Result<Figure> {
    let keys = compass_play_keys(args)?;
    if keys.is_empty() {
        bail!("compass needs at least one --play or an --injuries file with linked plays");
    }

    let wanted: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    let samples = input::load_tracking(args.tracking, |key| wanted.contains(key))?;
    let by_play = group_by_play(&samples);

    let overrides = ArrowStyleOverride {
        opacity: Some(args.opacity),
        ..Default::default()
    };
    let mut panels = Vec::with_capacity(keys.len());
    for key in &keys {
        let points = compass_points(plays::samples_for(&by_play, key).iter().copied());
        if points.is_empty() {
            bail!("no usable tracking samples for play {key}");
        }
        let panel = CompassRenderer::new()
            .render(&points, Some(&overrides))
            .with_context(|| format!("Failed to render compass for play {key}"))?
            .with_title(format!("PlayKey: {key}"));
        panels.push(panel);
    }

    let panels = match <[RenderedScene; 1]>::try_from(panels) {
        Ok([mut scene]) => {
            if let Some(title) = args.title {
                scene.title = Some(title.to_owned());
            }
            return Ok(Figure::Scene(scene));
        }
        Err(panels) => panels,
    };

    let mut grid = PanelGrid::new(args.columns);
    if let Some(title) = args.title {
        grid = grid.with_title(title);
    }
    for panel in panels {
        grid.push(panel);
    }
    tracing::info!(panels = grid.len(), rows = grid.rows(), "laid out compass grid");
    Ok(Figure::Grid(grid))
}

/// Play keys of linked injuries, in file order, without repeats.
fn injury_play_keys(path: &Path) -> Result<Vec<String>> {
    let mut keys: Vec<String> = Vec::new();
    for key in input::load_injuries(path)?
        .into_iter()
        .filter_map(|record| record.play_key)
    {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

// ---------------------------------------------------------------------------
// I/O
// ---------------------------------------------------------------------------

fn load_field_spec(path: &Path) -> Result<FieldDiagramSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read field config: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid field config: {}", path.display()))
}

/// What a command produces: one scene, or several laid out on a grid.
#[derive(Debug)]
enum Figure {
    Scene(RenderedScene),
    Grid(PanelGrid),
}

impl Figure {
    fn encode(&self, format: Format) -> Result<String> {
        let writer = SvgWriter::new();
        Ok(match (self, format) {
            (Figure::Scene(scene), Format::Svg) => writer.render(scene),
            (Figure::Grid(grid), Format::Svg) => writer.render_grid(grid),
            (Figure::Scene(scene), Format::Json) => scene.to_json()?,
            (Figure::Grid(grid), Format::Json) => grid.to_json()?,
        })
    }

    fn primitives(&self) -> usize {
        match self {
            Figure::Scene(scene) => scene.len(),
            Figure::Grid(grid) => grid.panels.iter().map(RenderedScene::len).sum(),
        }
    }
}

fn write_figure(figure: &Figure, format: Format, out: Option<&Path>) -> Result<()> {
    let body = figure.encode(format)?;
    match out {
        Some(path) => {
            fs::write(path, body)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            match figure {
                Figure::Scene(scene) => tracing::info!(
                    path = %path.display(),
                    primitives = figure.primitives(),
                    fingerprint = %scene.fingerprint(),
                    "wrote scene"
                ),
                Figure::Grid(grid) => tracing::info!(
                    path = %path.display(),
                    panels = grid.len(),
                    primitives = figure.primitives(),
                    "wrote panel grid"
                ),
            }
        }
        None => print!("{body}"),
    }
    Ok(())
}
