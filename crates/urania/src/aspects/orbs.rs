//! Per-body orb allowances for the classical aspects.

use crate::types::Body;

use super::types::AspectKind;

/// Orb rows are [conjunction, sextile, square, trine, opposition].
fn body_orbs(body: Body) -> Option<[f64; 5]> {
    match body {
        // Luminaries
        Body::Sun | Body::Moon => Some([10.0, 6.0, 8.0, 8.0, 10.0]),
        // Inner planets
        Body::Mercury | Body::Venus => Some([7.0, 4.0, 6.0, 6.0, 7.0]),
        Body::Mars => Some([8.0, 5.0, 7.0, 7.0, 8.0]),
        // Outer planets
        Body::Jupiter => Some([9.0, 5.0, 7.0, 7.0, 9.0]),
        Body::Saturn => Some([8.0, 4.0, 6.0, 6.0, 8.0]),
        Body::Uranus | Body::Neptune => Some([5.0, 3.0, 5.0, 5.0, 5.0]),
        Body::Pluto => Some([5.0, 2.0, 4.0, 4.0, 5.0]),
        // Lunar node
        Body::MeanNode => Some([3.0, 2.0, 3.0, 3.0, 3.0]),
        // Angles
        Body::Ascendant | Body::Midheaven => Some([6.0, 3.0, 5.0, 5.0, 6.0]),
        // Sidereal-only names never enter orb-based detection
        Body::Rahu | Body::Ketu => None,
    }
}

fn slot(kind: AspectKind) -> Option<usize> {
    match kind {
        AspectKind::Conjunction => Some(0),
        AspectKind::Sextile => Some(1),
        AspectKind::Square => Some(2),
        AspectKind::Trine => Some(3),
        AspectKind::Opposition => Some(4),
        AspectKind::SignDistance(_) => None,
    }
}

fn default_orb(kind: AspectKind) -> f64 {
    match kind {
        AspectKind::Sextile => 2.0,
        _ => 3.0,
    }
}

/// Orb allowance for a pair: the first body's table takes precedence, then
/// the second body's, then the default. The precedence is a fixed tie-break,
/// not an astrological rule.
pub fn orb_limit(body_a: Body, body_b: Body, kind: AspectKind) -> f64 {
    let Some(index) = slot(kind) else {
        return 0.0;
    };
    body_orbs(body_a)
        .or_else(|| body_orbs(body_b))
        .map(|row| row[index])
        .unwrap_or_else(|| default_orb(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_body_table_wins() {
        // Sun allows 10° on conjunctions, Pluto only 5°.
        assert_eq!(orb_limit(Body::Sun, Body::Pluto, AspectKind::Conjunction), 10.0);
        assert_eq!(orb_limit(Body::Pluto, Body::Sun, AspectKind::Conjunction), 5.0);
    }

    #[test]
    fn falls_back_to_second_body_then_default() {
        assert_eq!(orb_limit(Body::Rahu, Body::Moon, AspectKind::Trine), 8.0);
        assert_eq!(orb_limit(Body::Rahu, Body::Ketu, AspectKind::Trine), 3.0);
        assert_eq!(orb_limit(Body::Rahu, Body::Ketu, AspectKind::Sextile), 2.0);
    }

    #[test]
    fn sign_casts_carry_no_orb() {
        assert_eq!(orb_limit(Body::Mars, Body::Moon, AspectKind::SignDistance(4)), 0.0);
    }
}
