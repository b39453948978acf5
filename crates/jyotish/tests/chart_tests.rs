mod common;

use common::{instant_of, j2000_record, ScriptedProvider};
use jyotish::aspects::AspectKind;
use jyotish::{Body, ChartEngine, ChartError, ChartSettings, ZodiacSign};

fn engine(provider: ScriptedProvider) -> ChartEngine<ScriptedProvider> {
    ChartEngine::new(provider, ChartSettings::default())
}

#[test]
fn test_compute_chart_full_sky() {
    let record = j2000_record();
    let chart = engine(ScriptedProvider::sample(&record))
        .compute_chart(&record)
        .unwrap();

    assert_eq!(chart.instant, instant_of(&record));
    assert_eq!(chart.utc.to_rfc3339(), "2000-01-01T12:00:00+00:00");
    assert!((chart.ayanamsa.degrees - 23.853).abs() < 1e-9);

    assert_eq!(chart.ascendant.sign, ZodiacSign::Cancer);
    assert_eq!(chart.houses.len(), 12);
    assert_eq!(chart.houses[0].sign, ZodiacSign::Cancer);
    assert_eq!(chart.planets.len(), 9);
    assert!(chart.skipped.is_empty());

    let expected_houses = [
        (Body::Sun, 10),
        (Body::Moon, 12),
        (Body::Mercury, 1),
        (Body::Venus, 2),
        (Body::Mars, 4),
        (Body::Jupiter, 6),
        (Body::Saturn, 8),
        (Body::Rahu, 11),
        (Body::Ketu, 5),
    ];
    for (body, house) in expected_houses {
        assert_eq!(chart.planet(body).unwrap().house, house, "house of {}", body);
    }

    let mars = chart.planet(Body::Mars).unwrap();
    assert_eq!(mars.sign, ZodiacSign::Libra);
    assert_eq!(mars.nakshatra.nakshatra_id, "vishakha");
    assert!(mars.retrograde);

    assert_eq!(chart.dashas.current.lord, Body::Rahu);
    assert_eq!(chart.dashas.sequence.len(), 9);
}

#[test]
fn test_ketu_is_derived_not_queried() {
    let record = j2000_record();
    let engine = engine(ScriptedProvider::sample(&record));
    let chart = engine.compute_chart(&record).unwrap();

    assert!(!engine.provider().queried.borrow().contains(&Body::Ketu));

    let rahu = chart.planet(Body::Rahu).unwrap();
    let ketu = chart.planet(Body::Ketu).unwrap();
    let diff = (ketu.longitude - rahu.longitude).rem_euclid(360.0);
    assert!((diff - 180.0).abs() < 1e-9);
    assert_eq!(ketu.speed, -rahu.speed);
    assert!(rahu.retrograde);
    assert!(!ketu.retrograde);
}

#[test]
fn test_aspects_are_annotated_on_both_bodies() {
    let record = j2000_record();
    let chart = engine(ScriptedProvider::sample(&record))
        .compute_chart(&record)
        .unwrap();

    let sun_mercury = chart
        .aspects
        .iter()
        .find(|a| a.from == Body::Sun && a.to == Body::Mercury)
        .unwrap();
    assert_eq!(sun_mercury.aspect.aspect_type, AspectKind::Square);
    assert!(sun_mercury.aspect.orb < 1e-9);
    assert!(sun_mercury.aspect.is_exact);

    let nodes = chart
        .aspects
        .iter()
        .find(|a| a.from == Body::Rahu && a.to == Body::Ketu)
        .unwrap();
    assert_eq!(nodes.aspect.aspect_type, AspectKind::Opposition);

    // Sun and Rahu are 30 degrees apart
    assert!(!chart
        .aspects
        .iter()
        .any(|a| a.from == Body::Sun && a.to == Body::Rahu));

    let mercury = chart.planet(Body::Mercury).unwrap();
    assert!(mercury
        .aspects
        .iter()
        .any(|a| a.with == Body::Sun && a.aspect == AspectKind::Square));
    for pair in &chart.aspects {
        assert_ne!(pair.from, pair.to);
    }
}

#[test]
fn test_aspects_can_be_disabled() {
    let record = j2000_record();
    let settings = ChartSettings {
        include_aspects: false,
        ..ChartSettings::default()
    };
    let chart = ChartEngine::new(ScriptedProvider::sample(&record), settings)
        .compute_chart(&record)
        .unwrap();
    assert!(chart.aspects.is_empty());
    assert!(chart.planets.iter().all(|p| p.aspects.is_empty()));
}

#[test]
fn test_single_body_failure_is_skipped() {
    let record = j2000_record();
    let chart = engine(ScriptedProvider::sample(&record).without(Body::Mars))
        .compute_chart(&record)
        .unwrap();

    assert_eq!(chart.planets.len(), 8);
    assert!(chart.planet(Body::Mars).is_none());
    assert_eq!(chart.skipped.len(), 1);
    assert_eq!(chart.skipped[0].body, Body::Mars);
}

#[test]
fn test_missing_rahu_also_skips_ketu() {
    let record = j2000_record();
    let chart = engine(ScriptedProvider::sample(&record).without(Body::Rahu))
        .compute_chart(&record)
        .unwrap();

    assert_eq!(chart.planets.len(), 7);
    let skipped: Vec<Body> = chart.skipped.iter().map(|s| s.body).collect();
    assert_eq!(skipped, vec![Body::Rahu, Body::Ketu]);
}

#[test]
fn test_all_bodies_failing_is_fatal() {
    let record = j2000_record();
    let provider = ScriptedProvider::new(&record).with_ascendant(95.0);
    let err = engine(provider).compute_chart(&record).unwrap_err();
    assert!(matches!(err, ChartError::NoPositionsCalculated));
    assert_eq!(err.stage(), "positions");
}

#[test]
fn test_missing_moon_fails_dasha_stage() {
    let record = j2000_record();
    let err = engine(ScriptedProvider::sample(&record).without(Body::Moon))
        .compute_chart(&record)
        .unwrap_err();
    assert!(matches!(err, ChartError::DashaCalculation { .. }));
}

#[test]
fn test_house_failure_is_fatal() {
    let record = j2000_record();
    let provider = ScriptedProvider::new(&record).with_body(Body::Sun, 10.0, 1.0);
    let err = engine(provider).compute_chart(&record).unwrap_err();
    assert!(matches!(err, ChartError::HouseCalculation { .. }));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let record = j2000_record();

    let mut bad_time = record.clone();
    bad_time.time = "25:61".to_string();
    let err = engine(ScriptedProvider::sample(&record))
        .compute_chart(&bad_time)
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidTimeInput { .. }));

    let mut bad_zone = record.clone();
    bad_zone.timezone = "Mars/Olympus_Mons".to_string();
    let err = engine(ScriptedProvider::sample(&record))
        .compute_chart(&bad_zone)
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidTimeInput { .. }));

    let mut bad_lat = record.clone();
    bad_lat.latitude = 91.0;
    let err = engine(ScriptedProvider::sample(&record))
        .compute_chart(&bad_lat)
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidLocation { .. }));
}

#[test]
fn test_narrow_views_agree_with_full_chart() {
    let record = j2000_record();
    let engine = engine(ScriptedProvider::sample(&record));
    let chart = engine.compute_chart(&record).unwrap();

    assert_eq!(engine.ascendant(&record).unwrap(), chart.ascendant);
    assert_eq!(engine.houses(&record).unwrap(), chart.houses);
    assert_eq!(engine.dasha_schedule(&record).unwrap(), chart.dashas);

    let positions = engine.positions(&record).unwrap();
    assert_eq!(positions.positions.len(), chart.planets.len());
    for position in &positions.positions {
        let full = chart.planet(position.body).unwrap();
        assert_eq!(position.longitude, full.longitude);
        assert_eq!(position.house, full.house);
    }
}

#[test]
fn test_dasha_view_only_queries_moon() {
    let record = j2000_record();
    let engine = engine(ScriptedProvider::sample(&record));
    engine.dasha_schedule(&record).unwrap();
    assert_eq!(*engine.provider().queried.borrow(), vec![Body::Moon]);
}

#[test]
fn test_nakshatra_of() {
    let record = j2000_record();
    let engine = engine(ScriptedProvider::sample(&record));

    let moon = engine.nakshatra_of(&record, "MOON").unwrap().unwrap();
    assert_eq!(moon.body, Body::Moon);
    assert_eq!(moon.placement.nakshatra_name, "Ardra");
    assert_eq!(moon.placement.lord, Body::Rahu);
    assert_eq!(moon.placement.pada, 2);

    let ketu = engine.nakshatra_of(&record, "south_node").unwrap().unwrap();
    let chart = engine.compute_chart(&record).unwrap();
    assert_eq!(ketu.placement, chart.planet(Body::Ketu).unwrap().nakshatra);

    let err = engine.nakshatra_of(&record, "pluto").unwrap_err();
    match err {
        ChartError::UnknownBody { name, valid } => {
            assert_eq!(name, "pluto");
            assert_eq!(valid.len(), 9);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_nakshatra_of_skipped_body_is_none() {
    let record = j2000_record();
    let engine = engine(ScriptedProvider::sample(&record).without(Body::Saturn));
    assert!(engine.nakshatra_of(&record, "saturn").unwrap().is_none());
}

#[test]
fn test_chart_serializes_with_stable_field_names() {
    let record = j2000_record();
    let chart = engine(ScriptedProvider::sample(&record))
        .compute_chart(&record)
        .unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    assert!(json["julianDay"].is_number());
    assert_eq!(json["ascendant"]["sign"], "Cancer");
    assert_eq!(json["planets"][0]["body"], "sun");
    assert_eq!(json["planets"][0]["nakshatra"]["nakshatraName"], "Ashwini");
    assert!(json["dashas"]["sequence"][0]["startDate"].is_string());
    assert!(json.get("skipped").is_none());
}
