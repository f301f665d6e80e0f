//! Integration tests for compass plots, including the tracking-sample path
//! from raw bearings/displacements to arrows.

use std::f64::consts::{FRAC_PI_2, PI};

use gridiron_scene::prelude::*;

fn sample(play_key: &str, dir: f64, dis: f64) -> TrackingSample {
    TrackingSample {
        play_key: play_key.to_owned(),
        time: 0.0,
        event: None,
        x: 50.0,
        y: 26.0,
        dir,
        dis,
        o: 0.0,
        s: 0.0,
    }
}

#[test]
fn two_point_example() {
    let scene = render_compass(
        &[
            CompassInputPoint::new(0.0, 5.0),
            CompassInputPoint::new(FRAC_PI_2, 3.0),
        ],
        None,
    )
    .unwrap();

    assert_eq!(scene.axes, Axes::Polar { radial_max: 5.0 });
    let arrows: Vec<&Arrow> = scene.arrows().collect();
    assert_eq!(arrows.len(), 2);
    assert_eq!(arrows[0].origin, [0.0, 0.0]);
    assert_eq!(arrows[0].target, [0.0, 5.0]);
    assert_eq!(arrows[1].origin, [0.0, 0.0]);
    assert_eq!(arrows[1].target, [FRAC_PI_2, 3.0]);
}

#[test]
fn empty_input_is_an_error() {
    let err = render_compass(&[], None).unwrap_err();
    assert!(matches!(err, SceneError::EmptyInput));
    assert!(err.to_string().contains("empty"));
}

#[test]
fn invalid_radial_floor_is_an_error() {
    let points = [CompassInputPoint::new(0.0, 1.0)];
    for floor in [-0.5, f64::NAN, f64::INFINITY] {
        let renderer = CompassRenderer::new().with_radial_floor(floor);
        assert!(matches!(
            renderer.render(&[], None),
            Err(SceneError::InvalidRadialFloor { .. })
        ));
        assert!(matches!(
            renderer.render(&points, None),
            Err(SceneError::InvalidRadialFloor { .. })
        ));
    }
}

#[test]
fn zero_floor_with_no_data_is_an_empty_plot() {
    let scene = CompassRenderer::new()
        .with_radial_floor(0.0)
        .render(&[], None)
        .unwrap();
    assert!(scene.is_empty());
    assert_eq!(scene.axes.radial_max(), Some(0.0));
}

#[test]
fn negative_zero_angle_maps_below_full_turn() {
    let points = [
        CompassInputPoint::new(-1e-20, 1.0),
        CompassInputPoint::new(-f64::EPSILON, 1.0),
        CompassInputPoint::new(-2.0 * PI, 1.0),
    ];
    let scene = render_compass(&points, None).unwrap();
    for arrow in scene.arrows() {
        assert!((0.0..2.0 * PI).contains(&arrow.target[0]), "{}", arrow.target[0]);
    }
}

#[test]
fn default_style_is_simple_black() {
    let scene = render_compass(&[CompassInputPoint::new(1.0, 1.0)], None).unwrap();
    let style = scene.arrows().next().unwrap().style;
    assert_eq!(style, ArrowStyle::default());
    assert_eq!(style.head, ArrowHead::Simple);
    assert_eq!(style.color, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn every_arrow_shares_the_merged_style() {
    let overrides = ArrowStyleOverride {
        color: Some([0.0, 0.0, 1.0, 1.0]),
        ..Default::default()
    };
    let points: Vec<CompassInputPoint> = (0..10)
        .map(|i| CompassInputPoint::new(f64::from(i) * 0.3, f64::from(i)))
        .collect();
    let scene = render_compass(&points, Some(&overrides)).unwrap();
    assert_eq!(scene.arrows().count(), 10);
    for arrow in scene.arrows() {
        assert_eq!(arrow.style.color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(arrow.style.head, ArrowHead::Simple);
    }
    assert_eq!(scene.axes.radial_max(), Some(9.0));
}

#[test]
fn all_zero_magnitudes_give_zero_bound() {
    let scene = render_compass(
        &[
            CompassInputPoint::new(0.0, 0.0),
            CompassInputPoint::new(PI, 0.0),
        ],
        None,
    )
    .unwrap();
    assert_eq!(scene.axes.radial_max(), Some(0.0));
    assert_eq!(scene.arrows().count(), 2);
}

#[test]
fn compass_scene_survives_json() {
    let scene = render_compass(&[CompassInputPoint::new(PI, 2.0)], None).unwrap();
    let json = scene.to_json().unwrap();
    assert!(json.contains("\"kind\": \"polar\""));
    assert!(json.contains("\"kind\": \"arrow\""));
    assert_eq!(RenderedScene::from_json(&json).unwrap(), scene);
}

// ---------------------------------------------------------------------------
// Tracking samples to compass
// ---------------------------------------------------------------------------

#[test]
fn tracking_play_to_compass() {
    let samples = vec![
        sample("26624-1-1", 0.0, 0.0),
        sample("26624-1-1", 90.0, 1.0936),
        sample("26624-1-1", 180.0, 0.54680),
    ];
    let points = compass_points(&samples);
    let scene = render_compass(&points, None).unwrap();

    let arrows: Vec<&Arrow> = scene.arrows().collect();
    assert_eq!(arrows.len(), 3);
    assert!((arrows[1].target[0] - FRAC_PI_2).abs() < 1e-12);
    assert!((arrows[1].target[1] - 10.0).abs() < 1e-9);
    assert!((arrows[2].target[0] - PI).abs() < 1e-12);
    assert!((arrows[2].target[1] - 5.0).abs() < 1e-9);
    assert!((scene.axes.radial_max().unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn path_overlay_adds_one_marker_per_sample() {
    let samples = vec![sample("a", 0.0, 0.0), sample("a", 0.0, 0.0)];
    let mut scene = FieldRenderer::render(&FieldDiagramSpec::default());
    let before = scene.len();

    let added = overlay_path(
        &mut scene,
        &samples,
        MarkerStyle::default().with_opacity(0.2),
    );

    assert_eq!(added, 2);
    assert_eq!(scene.len(), before + 2);
    let markers: Vec<&Marker> = scene.markers().collect();
    assert_eq!(markers[0].position, [50.0, 26.0]);
    assert_eq!(markers[0].opacity, 0.2);
    // Markers are drawn on top of the field.
    assert!(matches!(scene.primitives.last(), Some(Primitive::Marker(_))));
}

#[test]
fn injury_compasses_fill_a_titled_grid() {
    let mut grid = PanelGrid::new(3).with_title("Injury plays");
    for (i, key) in ["a-1-1", "b-1-1", "c-1-1", "d-1-1", "e-1-1", "f-1-1"].iter().enumerate() {
        let samples = [sample(key, 90.0 * i as f64, 0.5 + i as f64)];
        let panel = render_compass(&compass_points(&samples), None)
            .unwrap()
            .with_title(format!("PlayKey: {key}"));
        grid.push(panel);
    }
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cell(4), (1, 1));

    let svg = SvgWriter::new().render_grid(&grid);
    assert_eq!(svg.matches("<svg").count(), 1 + 6);
    assert!(svg.contains(">PlayKey: f-1-1</text>"));
}

#[test]
fn rendering_twice_is_identical() {
    let points: Vec<CompassInputPoint> = (0..50)
        .map(|i| CompassInputPoint::new(f64::from(i) * 0.7, f64::from(i % 7)))
        .collect();
    let a = render_compass(&points, None).unwrap();
    let b = render_compass(&points, None).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
}
