//! Orb-based aspect detection for tropical charts.

use std::collections::HashSet;

use crate::types::{angular_separation, Body};

use super::orbs;
use super::types::{Aspect, AspectKind};

/// A chart point entering aspect detection. Angles carry no speed, which
/// leaves applying/separating undetermined for their pairs.
#[derive(Debug, Clone, Copy)]
pub struct AspectPoint {
    pub body: Body,
    pub longitude: f64,
    pub speed: Option<f64>,
}

/// Detect classical aspects across every unordered pair of points.
///
/// Kinds are tried in [`AspectKind::ANGULAR`] order and the first within
/// orb wins; a recorded pair is never examined again.
pub fn detect_angular_aspects(points: &[AspectPoint]) -> Vec<Aspect> {
    let mut seen: HashSet<(Body, Body)> = HashSet::new();
    let mut aspects = Vec::new();

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let (a, b) = (&points[i], &points[j]);
            let key = if a.body <= b.body {
                (a.body, b.body)
            } else {
                (b.body, a.body)
            };
            if seen.contains(&key) {
                continue;
            }

            let separation = angular_separation(a.longitude, b.longitude);
            for kind in AspectKind::ANGULAR {
                let angle = kind.angle().unwrap_or(0.0);
                let orb = (separation - angle).abs();
                if orb <= orbs::orb_limit(a.body, b.body, kind) {
                    let applying = match (a.speed, b.speed) {
                        (Some(sa), Some(sb)) => {
                            Some(is_applying(a.longitude, b.longitude, sa, sb, angle, separation))
                        }
                        _ => None,
                    };
                    aspects.push(Aspect {
                        body_a: a.body,
                        body_b: b.body,
                        kind,
                        orb: Some((orb * 100.0).round() / 100.0),
                        applying,
                    });
                    seen.insert(key);
                    break;
                }
            }
        }
    }

    aspects
}

/// Project the pair a small step forward and compare distances to the
/// exact angle; closing in means applying.
fn is_applying(
    lon1: f64,
    lon2: f64,
    speed1: f64,
    speed2: f64,
    aspect_angle: f64,
    separation: f64,
) -> bool {
    let relative_speed = speed1 - speed2;
    if relative_speed.abs() < 0.01 {
        // Near-identical speeds: the separation barely changes, call it
        // applying only when already hugging the exact angle.
        return separation < aspect_angle + 0.5;
    }

    let mut signed_diff = lon1 - lon2;
    if signed_diff > 180.0 {
        signed_diff -= 360.0;
    } else if signed_diff < -180.0 {
        signed_diff += 360.0;
    }

    let current_distance = (separation - aspect_angle).abs();

    let step_days = 0.1;
    let mut future = signed_diff + relative_speed * step_days;
    if future > 180.0 {
        future -= 360.0;
    } else if future < -180.0 {
        future += 360.0;
    }
    let future_distance = (future.abs() - aspect_angle).abs();

    future_distance < current_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(body: Body, longitude: f64, speed: f64) -> AspectPoint {
        AspectPoint {
            body,
            longitude,
            speed: Some(speed),
        }
    }

    #[test]
    fn conjunction_within_orb() {
        let points = [planet(Body::Sun, 100.0, 1.0), planet(Body::Moon, 102.0, 13.0)];
        let aspects = detect_angular_aspects(&points);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].kind, AspectKind::Conjunction);
        assert_eq!(aspects[0].orb, Some(2.0));
    }

    #[test]
    fn opposition_across_the_wrap() {
        let points = [planet(Body::Sun, 10.0, 1.0), planet(Body::Moon, 188.0, 13.0)];
        let aspects = detect_angular_aspects(&points);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].kind, AspectKind::Opposition);
    }

    #[test]
    fn one_aspect_per_pair() {
        // 0° separation also sits within the sextile/square orbs of
        // nothing, but a wide conjunction orb must not double-report.
        let points = [
            planet(Body::Sun, 0.0, 1.0),
            planet(Body::Moon, 6.0, 13.0),
            planet(Body::Venus, 120.0, 1.2),
        ];
        let aspects = detect_angular_aspects(&points);
        let mut pairs: Vec<(Body, Body)> = aspects
            .iter()
            .map(|a| {
                if a.body_a <= a.body_b {
                    (a.body_a, a.body_b)
                } else {
                    (a.body_b, a.body_a)
                }
            })
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), before);
    }

    #[test]
    fn wide_separation_still_resolves_to_one_kind() {
        // 55° apart: within the Sun's 6° sextile orb and nothing else.
        let points = [planet(Body::Sun, 0.0, 1.0), planet(Body::Moon, 55.0, 13.0)];
        let aspects = detect_angular_aspects(&points);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].kind, AspectKind::Sextile);
    }

    #[test]
    fn angle_pairs_leave_applying_undetermined() {
        let points = [
            planet(Body::Sun, 100.0, 1.0),
            AspectPoint {
                body: Body::Ascendant,
                longitude: 103.0,
                speed: None,
            },
        ];
        let aspects = detect_angular_aspects(&points);
        assert_eq!(aspects.len(), 1);
        assert!(aspects[0].applying.is_none());
    }

    #[test]
    fn faster_planet_closing_is_applying() {
        // Moon at 95° moving 13°/day toward Sun at 100°.
        let points = [planet(Body::Moon, 95.0, 13.0), planet(Body::Sun, 100.0, 1.0)];
        let aspects = detect_angular_aspects(&points);
        assert_eq!(aspects[0].kind, AspectKind::Conjunction);
        assert_eq!(aspects[0].applying, Some(true));
    }
}
