use chrono::{TimeZone, Utc};

use urania::aspects::AspectKind;
use urania::ephemeris::{FixedEphemeris, HouseFrame};
use urania::geo::{FixedLocation, GeoTimeContext};
use urania::types::normalize_degrees;
use urania::{BirthQuery, Body, ChartBuilder, Sign, ZodiacMode};

fn jamshedpur() -> FixedLocation {
    FixedLocation(GeoTimeContext {
        latitude: 22.80,
        longitude: 86.18,
        timezone: "Asia/Kolkata".to_string(),
    })
}

fn jamshedpur_query() -> BirthQuery {
    BirthQuery {
        year: 1994,
        month: 3,
        day: 24,
        hour: 0,
        minute: 40,
        place: "Jamshedpur, Jharkhand, India".to_string(),
    }
}

fn quadrant_frame() -> HouseFrame {
    HouseFrame {
        cusps: [
            350.0, 22.0, 55.0, 80.0, 110.0, 140.0, 170.0, 202.0, 235.0, 260.0, 290.0, 320.0,
        ],
        ascendant: 350.0,
        midheaven: 260.0,
    }
}

fn tropical_gateway() -> FixedEphemeris {
    FixedEphemeris::new(quadrant_frame())
        .with_body(Body::Sun, 10.0, 0.98)
        .with_body(Body::Moon, 100.0, 13.1)
        .with_body(Body::Mercury, 25.0, 1.2)
        .with_body(Body::Venus, 55.0, 1.1)
        .with_body(Body::Mars, 170.0, 0.7)
        .with_body(Body::Jupiter, 218.0, -0.05)
        .with_body(Body::Saturn, 321.0, 0.1)
        .with_body(Body::Uranus, 295.0, 0.05)
        .with_body(Body::Neptune, 292.0, 0.04)
        .with_body(Body::Pluto, 235.0, 0.03)
        .with_body(Body::MeanNode, 120.0, -0.05)
}

fn sidereal_gateway() -> FixedEphemeris {
    // Tropical longitudes; the builder applies the ayanamsa itself.
    FixedEphemeris::new(HouseFrame {
        cusps: [
            255.0, 285.0, 315.0, 345.0, 15.0, 45.0, 75.0, 105.0, 135.0, 165.0, 195.0, 225.0,
        ],
        ascendant: 255.0,
        midheaven: 170.0,
    })
    .with_ayanamsa(23.65)
    .with_body(Body::Sun, 3.5, 0.98)
    .with_body(Body::Moon, 320.0, 13.1)
    .with_body(Body::Mercury, 10.0, 1.2)
    .with_body(Body::Venus, 330.0, 1.1)
    .with_body(Body::Mars, 352.0, 0.7)
    .with_body(Body::Jupiter, 218.0, -0.05)
    .with_body(Body::Saturn, 335.0, 0.1)
    .with_body(Body::Rahu, 232.0, -0.05)
}

#[test]
fn tropical_chart_places_every_body() {
    let gateway = tropical_gateway();
    let geocoder = jamshedpur();
    let builder = ChartBuilder::new(&gateway, &geocoder);
    let chart = builder
        .build(&jamshedpur_query(), ZodiacMode::Tropical)
        .unwrap();

    assert_eq!(chart.bodies.len(), 11);
    assert_eq!(chart.houses.len(), 12);
    for body in &chart.bodies {
        assert!((1..=12).contains(&body.house), "{} has no house", body.body);
        assert!(body.nakshatra.is_none());
    }

    // A body sitting exactly on a cusp belongs to the house it opens.
    assert_eq!(chart.house_of(Body::Venus), Some(3));
    // Wrap-around interval [350°, 22°).
    assert_eq!(chart.house_of(Body::Sun), Some(1));
    assert_eq!(chart.house_of(Body::Saturn), Some(12));
    assert_eq!(chart.sign_of(Body::Ascendant), Some(Sign::Pisces));
    assert!(chart.body(Body::Jupiter).unwrap().retrograde);
}

#[test]
fn tropical_aspects_are_unique_per_pair() {
    let gateway = tropical_gateway();
    let geocoder = jamshedpur();
    let builder = ChartBuilder::new(&gateway, &geocoder);
    let chart = builder
        .build(&jamshedpur_query(), ZodiacMode::Tropical)
        .unwrap();

    assert!(!chart.aspects.is_empty());
    let mut pairs: Vec<(Body, Body)> = chart
        .aspects
        .iter()
        .map(|a| {
            if a.body_a <= a.body_b {
                (a.body_a, a.body_b)
            } else {
                (a.body_b, a.body_a)
            }
        })
        .collect();
    let total = pairs.len();
    pairs.sort();
    pairs.dedup();
    assert_eq!(pairs.len(), total, "duplicate unordered aspect pair");

    // Sun 10° / Moon 100° is an exact square.
    let square = chart
        .aspects
        .iter()
        .find(|a| a.connects(Body::Sun, Body::Moon))
        .unwrap();
    assert_eq!(square.kind, AspectKind::Square);
    assert_eq!(square.orb, Some(0.0));
}

#[test]
fn sidereal_chart_matches_the_reference_birth() {
    let gateway = sidereal_gateway();
    let geocoder = jamshedpur();
    let builder = ChartBuilder::new(&gateway, &geocoder);
    let chart = builder
        .build(&jamshedpur_query(), ZodiacMode::Sidereal)
        .unwrap();

    // Local 00:40 in Asia/Kolkata is 19:10 UTC the previous day.
    assert_eq!(
        chart.instant.utc,
        Utc.with_ymd_and_hms(1994, 3, 23, 19, 10, 0).unwrap()
    );

    // Tropical Sun near 3.5° shifts into Pisces once the ayanamsa applies.
    let sun = chart.body(Body::Sun).unwrap();
    assert_eq!(sun.position.sign, Sign::Pisces);
    assert_eq!(sun.nakshatra, Some("Uttara Bhadrapada"));

    // Ketu is the exact opposite of Rahu.
    let rahu = chart.body(Body::Rahu).unwrap();
    let ketu = chart.body(Body::Ketu).unwrap();
    let diff = normalize_degrees(ketu.longitude - rahu.longitude);
    assert!((diff - 180.0).abs() < 1e-9);

    // Whole-sign houses: the first cusp is the start of the ascendant's
    // sign, and every cusp is a sign boundary.
    assert_eq!(chart.sign_of(Body::Ascendant), Some(Sign::Scorpio));
    assert_eq!(chart.houses[0].longitude, 210.0);
    for cusp in &chart.houses {
        assert_eq!(cusp.longitude % 30.0, 0.0);
    }

    // Sun in Pisces against a Scorpio ascendant sits in the 5th house.
    assert_eq!(chart.house_of(Body::Sun), Some(5));
}

#[test]
fn sidereal_casts_are_directional() {
    let gateway = sidereal_gateway();
    let geocoder = jamshedpur();
    let builder = ChartBuilder::new(&gateway, &geocoder);
    let chart = builder
        .build(&jamshedpur_query(), ZodiacMode::Sidereal)
        .unwrap();

    // Saturn lands in Aquarius and casts its 3rd onto Ketu in Aries.
    assert!(chart.aspects.iter().any(|a| a.body_a == Body::Saturn
        && a.body_b == Body::Ketu
        && a.kind == AspectKind::SignDistance(3)));
    // Ketu casts only its 7th (Libra) and never answers back.
    assert!(!chart
        .aspects
        .iter()
        .any(|a| a.body_a == Body::Ketu && a.body_b == Body::Saturn));
    // No orbs in sidereal mode.
    assert!(chart.aspects.iter().all(|a| a.orb.is_none()));
}

#[test]
fn missing_ephemeris_body_propagates_as_upstream_error() {
    let gateway = FixedEphemeris::new(quadrant_frame()).with_body(Body::Sun, 10.0, 1.0);
    let geocoder = jamshedpur();
    let builder = ChartBuilder::new(&gateway, &geocoder);
    let err = builder
        .build(&jamshedpur_query(), ZodiacMode::Tropical)
        .unwrap_err();
    assert!(matches!(err, urania::ChartError::Ephemeris { .. }));
}

#[test]
fn chart_serializes_with_every_section() {
    let gateway = tropical_gateway();
    let geocoder = jamshedpur();
    let builder = ChartBuilder::new(&gateway, &geocoder);
    let chart = builder
        .build(&jamshedpur_query(), ZodiacMode::Tropical)
        .unwrap();

    let value = serde_json::to_value(&chart).unwrap();
    for key in ["mode", "query", "context", "instant", "bodies", "houses", "ascendant", "midheaven", "aspects"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(value["houses"].as_array().unwrap().len(), 12);
}
