//! Nakshatra lookup: the 27 sidereal lunar mansions.

use crate::types::normalize_degrees;

const THIRD: f64 = 20.0 / 60.0;

/// (name, start, end) bounds over [0, 360). Bounds are explicit rather than
/// computed so the table reads as the traditional 13°20' ladder.
pub const NAKSHATRA_BOUNDS: [(&str, f64, f64); 27] = [
    ("Ashwini", 0.0, 13.0 + THIRD),
    ("Bharani", 13.0 + THIRD, 26.0 + 2.0 * THIRD),
    ("Krittika", 26.0 + 2.0 * THIRD, 40.0),
    ("Rohini", 40.0, 53.0 + THIRD),
    ("Mrigashira", 53.0 + THIRD, 66.0 + 2.0 * THIRD),
    ("Ardra", 66.0 + 2.0 * THIRD, 80.0),
    ("Punarvasu", 80.0, 93.0 + THIRD),
    ("Pushya", 93.0 + THIRD, 106.0 + 2.0 * THIRD),
    ("Ashlesha", 106.0 + 2.0 * THIRD, 120.0),
    ("Magha", 120.0, 133.0 + THIRD),
    ("Purva Phalguni", 133.0 + THIRD, 146.0 + 2.0 * THIRD),
    ("Uttara Phalguni", 146.0 + 2.0 * THIRD, 160.0),
    ("Hasta", 160.0, 173.0 + THIRD),
    ("Chitra", 173.0 + THIRD, 186.0 + 2.0 * THIRD),
    ("Swati", 186.0 + 2.0 * THIRD, 200.0),
    ("Vishakha", 200.0, 213.0 + THIRD),
    ("Anuradha", 213.0 + THIRD, 226.0 + 2.0 * THIRD),
    ("Jyeshtha", 226.0 + 2.0 * THIRD, 240.0),
    ("Mula", 240.0, 253.0 + THIRD),
    ("Purva Ashadha", 253.0 + THIRD, 266.0 + 2.0 * THIRD),
    ("Uttara Ashadha", 266.0 + 2.0 * THIRD, 280.0),
    ("Shravana", 280.0, 293.0 + THIRD),
    ("Dhanishta", 293.0 + THIRD, 306.0 + 2.0 * THIRD),
    ("Shatabhisha", 306.0 + 2.0 * THIRD, 320.0),
    ("Purva Bhadrapada", 320.0, 333.0 + THIRD),
    ("Uttara Bhadrapada", 333.0 + THIRD, 346.0 + 2.0 * THIRD),
    ("Revati", 346.0 + 2.0 * THIRD, 360.0),
];

/// Nakshatra containing the given sidereal longitude.
///
/// Longitudes are wrapped into [0, 360) first; a boundary value belongs to
/// the bin whose start it equals. The trailing return covers the one value
/// the scan cannot reach, an exact 360 that survived wrapping.
pub fn nakshatra_at(longitude: f64) -> &'static str {
    let lon = normalize_degrees(longitude);
    for (name, start, end) in NAKSHATRA_BOUNDS {
        if start <= lon && lon < end {
            return name;
        }
    }
    NAKSHATRA_BOUNDS[26].0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let name = nakshatra_at(lon);
            let hits = NAKSHATRA_BOUNDS
                .iter()
                .filter(|(_, start, end)| *start <= lon && lon < *end)
                .count();
            assert_eq!(hits, 1, "longitude {} matched {} bins", lon, hits);
            assert!(!name.is_empty());
            lon += 0.25;
        }
    }

    #[test]
    fn boundaries_belong_to_the_starting_bin() {
        assert_eq!(nakshatra_at(0.0), "Ashwini");
        assert_eq!(nakshatra_at(13.0 + 20.0 / 60.0), "Bharani");
        assert_eq!(nakshatra_at(40.0), "Rohini");
        assert_eq!(nakshatra_at(346.0 + 40.0 / 60.0), "Revati");
    }

    #[test]
    fn the_360_edge_wraps_to_ashwini() {
        assert_eq!(nakshatra_at(360.0), "Ashwini");
        assert_eq!(nakshatra_at(359.9999), "Revati");
    }

    #[test]
    fn table_covers_the_circle_contiguously() {
        assert_eq!(NAKSHATRA_BOUNDS[0].1, 0.0);
        assert_eq!(NAKSHATRA_BOUNDS[26].2, 360.0);
        for pair in NAKSHATRA_BOUNDS.windows(2) {
            assert_eq!(pair[0].2, pair[1].1, "gap after {}", pair[0].0);
        }
    }
}
