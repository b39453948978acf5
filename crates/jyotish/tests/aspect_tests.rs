use jyotish::aspects::{AspectCalculator, AspectKind, AspectOrbs, AspectSettings};
use jyotish::vedic::positions::BodyPosition;
use jyotish::Body;

fn position(body: Body, longitude: f64, speed: f64) -> BodyPosition {
    BodyPosition::classify(body, longitude, 0.0, speed, 0)
}

#[test]
fn test_each_aspect_at_exact_angle() {
    let calculator = AspectCalculator::new();
    let settings = AspectSettings::default();
    for kind in AspectKind::PRIORITY {
        let aspect = calculator
            .calculate_aspect(15.0, 15.0 + kind.exact_angle(), 1.0, 0.5, &settings)
            .unwrap();
        assert_eq!(aspect.aspect_type, kind);
        assert_eq!(aspect.exact_angle, kind.exact_angle());
        assert!(aspect.orb < 1e-9);
    }
}

#[test]
fn test_orb_limits_are_inclusive() {
    let calculator = AspectCalculator::new();
    let settings = AspectSettings::default();

    let at_limit = calculator.calculate_aspect(0.0, 128.0, 1.0, 0.5, &settings);
    assert_eq!(at_limit.unwrap().aspect_type, AspectKind::Trine);

    assert!(calculator
        .calculate_aspect(0.0, 128.5, 1.0, 0.5, &settings)
        .is_none());
}

#[test]
fn test_wraparound_conjunction() {
    let calculator = AspectCalculator::new();
    let aspect = calculator
        .calculate_aspect(358.0, 3.0, 1.0, 0.5, &AspectSettings::default())
        .unwrap();
    assert_eq!(aspect.aspect_type, AspectKind::Conjunction);
    assert!((aspect.orb - 5.0).abs() < 1e-9);
}

#[test]
fn test_custom_orbs() {
    let calculator = AspectCalculator::new();
    let settings = AspectSettings {
        orbs: AspectOrbs {
            conjunction: 1.0,
            ..AspectOrbs::default()
        },
    };
    assert!(calculator
        .calculate_aspect(10.0, 13.0, 1.0, 0.5, &settings)
        .is_none());
}

#[test]
fn test_retrograde_flag() {
    let calculator = AspectCalculator::new();
    let aspect = calculator
        .calculate_aspect(10.0, 100.0, 1.0, -0.2, &AspectSettings::default())
        .unwrap();
    assert!(aspect.is_retrograde);
}

#[test]
fn test_compute_and_annotate() {
    let calculator = AspectCalculator::new();
    let mut positions = vec![
        position(Body::Sun, 10.0, 1.0),
        position(Body::Moon, 190.5, 13.0),
        position(Body::Mars, 45.0, 0.6),
    ];
    let pairs = calculator.compute_aspects(&positions, &AspectSettings::default());

    // Sun-Moon opposition only; Mars is 35 degrees from the Sun
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].from, Body::Sun);
    assert_eq!(pairs[0].to, Body::Moon);
    assert_eq!(pairs[0].aspect.aspect_type, AspectKind::Opposition);

    calculator.annotate_positions(&mut positions, &pairs);
    assert_eq!(positions[0].aspects.len(), 1);
    assert_eq!(positions[0].aspects[0].with, Body::Moon);
    assert_eq!(positions[1].aspects[0].with, Body::Sun);
    assert!(positions[2].aspects.is_empty());
}
