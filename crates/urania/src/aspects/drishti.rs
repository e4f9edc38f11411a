//! Sign-distance aspect casting for sidereal charts.
//!
//! Every body casts onto the 7th sign from its own; Mars, Jupiter and
//! Saturn each cast two additional distances. The relation is directional
//! and exact-sign: no orb, no symmetry.

use crate::types::{Body, Sign};

use super::types::{Aspect, AspectKind};

/// A point participating in sign-distance aspects.
#[derive(Debug, Clone, Copy)]
pub struct CastPoint {
    pub body: Body,
    pub sign: Sign,
}

/// Forward sign distances a body casts.
pub fn cast_distances(body: Body) -> &'static [u8] {
    match body {
        Body::Mars => &[4, 7, 8],
        Body::Jupiter => &[5, 7, 9],
        Body::Saturn => &[3, 7, 10],
        _ => &[7],
    }
}

/// Detect every cast from `casters` that lands on a `targets` sign.
///
/// Angles belong in `targets` only; they receive casts but never emit
/// them. A cast of distance `d` from sign `s` lands on the sign `d - 1`
/// steps forward of `s`.
pub fn detect_sign_aspects(casters: &[CastPoint], targets: &[CastPoint]) -> Vec<Aspect> {
    let mut aspects = Vec::new();
    for caster in casters {
        for &distance in cast_distances(caster.body) {
            let landing = caster.sign.advanced(usize::from(distance) - 1);
            for target in targets {
                if target.body == caster.body {
                    continue;
                }
                if target.sign == landing {
                    aspects.push(Aspect {
                        body_a: caster.body,
                        body_b: target.body,
                        kind: AspectKind::SignDistance(distance),
                        orb: None,
                        applying: None,
                    });
                }
            }
        }
    }
    aspects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(body: Body, sign: Sign) -> CastPoint {
        CastPoint { body, sign }
    }

    #[test]
    fn everyone_casts_the_seventh() {
        let casters = [point(Body::Sun, Sign::Aries), point(Body::Moon, Sign::Libra)];
        let aspects = detect_sign_aspects(&casters, &casters);
        // Aries + 6 = Libra and Libra + 6 = Aries: mutual 7th casts.
        assert_eq!(aspects.len(), 2);
        assert!(aspects
            .iter()
            .all(|a| a.kind == AspectKind::SignDistance(7)));
    }

    #[test]
    fn casting_is_directional() {
        // Saturn in Aries casts its 3rd onto Gemini; the Sun in Gemini
        // casts only its 7th (Sagittarius) and cannot answer.
        let casters = [
            point(Body::Saturn, Sign::Aries),
            point(Body::Sun, Sign::Gemini),
        ];
        let aspects = detect_sign_aspects(&casters, &casters);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].body_a, Body::Saturn);
        assert_eq!(aspects[0].body_b, Body::Sun);
        assert_eq!(aspects[0].kind, AspectKind::SignDistance(3));
    }

    #[test]
    fn mars_special_casts() {
        assert_eq!(cast_distances(Body::Mars), &[4, 7, 8]);
        let casters = [point(Body::Mars, Sign::Cancer)];
        let targets = [
            point(Body::Venus, Sign::Libra),      // 4th from Cancer
            point(Body::Mercury, Sign::Aquarius), // 8th from Cancer
            point(Body::Moon, Sign::Leo),         // 2nd, not cast
        ];
        let aspects = detect_sign_aspects(&casters, &targets);
        assert_eq!(aspects.len(), 2);
    }

    #[test]
    fn angles_receive_but_never_emit() {
        let casters = [point(Body::Jupiter, Sign::Aries)];
        let targets = [
            point(Body::Jupiter, Sign::Aries),
            point(Body::Ascendant, Sign::Leo), // 5th from Aries
        ];
        let aspects = detect_sign_aspects(&casters, &targets);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].body_b, Body::Ascendant);
        assert_eq!(aspects[0].kind, AspectKind::SignDistance(5));
    }
}
