//! Property tests for scene construction.
//!
//! Random compass inputs and field specs are rendered and the structural
//! guarantees of the resulting scenes are checked.

use std::f64::consts::TAU;

use gridiron_scene::prelude::*;
use proptest::prelude::*;

/// Finite angles, including negative and multi-turn values.
fn finite_angle() -> impl Strategy<Value = f64> {
    (-10_000i32..10_000i32).prop_map(|v| f64::from(v) * 0.01)
}

/// Non-negative magnitudes.
fn magnitude() -> impl Strategy<Value = f64> {
    (0u32..100_000u32).prop_map(|v| f64::from(v) * 0.001)
}

fn compass_point() -> impl Strategy<Value = CompassInputPoint> {
    (finite_angle(), magnitude()).prop_map(|(a, m)| CompassInputPoint::new(a, m))
}

fn field_spec() -> impl Strategy<Value = FieldDiagramSpec> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        (-50i32..150i32).prop_map(f64::from),
    )
        .prop_map(|(numbers, zones, highlight, fifty, position)| FieldDiagramSpec {
            show_yard_numbers: numbers,
            show_end_zones: zones,
            highlight_line: highlight,
            highlight_line_position: position,
            treat_fifty_as_line_of_scrimmage: fifty,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn compass_arrow_per_point_and_bound_is_max(
        points in prop::collection::vec(compass_point(), 1..200)
    ) {
        let scene = render_compass(&points, None).unwrap();

        prop_assert_eq!(scene.arrows().count(), points.len());
        prop_assert_eq!(scene.len(), points.len());

        let max = points.iter().map(|p| p.magnitude).fold(0.0, f64::max);
        prop_assert_eq!(scene.axes.radial_max(), Some(max));

        for (arrow, point) in scene.arrows().zip(&points) {
            prop_assert_eq!(arrow.origin, [0.0, 0.0]);
            prop_assert!(arrow.target[0] >= 0.0 && arrow.target[0] < TAU);
            prop_assert_eq!(arrow.target[1], point.magnitude);
            prop_assert!(arrow.target[1] <= max);
        }
    }

    #[test]
    fn compass_rendering_is_deterministic(
        points in prop::collection::vec(compass_point(), 1..50)
    ) {
        let a = render_compass(&points, None).unwrap();
        let b = render_compass(&points, None).unwrap();
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn field_always_has_one_surface_and_full_ladder(spec in field_spec()) {
        let scene = FieldRenderer::render(&spec);

        let surfaces = scene
            .rects()
            .filter(|r| r.origin == [0.0, 0.0] && r.width == 120.0 && r.height == 53.3)
            .count();
        prop_assert_eq!(surfaces, 1);

        for x in (0..=120).step_by(10) {
            let x = f64::from(x);
            prop_assert!(scene.polylines().any(|l| l.has_vertical_segment(x, 0.0, 53.3)));
        }

        let expected_labels = if spec.show_yard_numbers { 18 } else { 0 }
            + usize::from(spec.highlight_line)
            + usize::from(spec.treat_fifty_as_line_of_scrimmage);
        prop_assert_eq!(scene.labels().count(), expected_labels);
        prop_assert_eq!(scene.rects().count(), if spec.show_end_zones { 3 } else { 1 });
        prop_assert!(!scene.axis_visible);
    }

    #[test]
    fn yard_numbers_never_exceed_fifty(x in (2i32..=10).prop_map(|t| t * 10)) {
        let n = yard_number(x);
        prop_assert!((10..=50).contains(&n));
        prop_assert_eq!(n, yard_number(120 - x));
    }
}
