//! Resolution of civil birth time to an astronomical instant.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::{OffsetComponents, Tz};
use log::warn;
use serde::Serialize;

use crate::error::{ChartError, Result};
use crate::geo::GeoTimeContext;

/// A single unambiguous astronomical instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Instant {
    pub utc: DateTime<Utc>,
    pub julian_day_ut: f64,
}

/// Resolve a local civil date and time to an [`Instant`].
///
/// Impossible calendar dates and unknown timezone identifiers fail with
/// [`ChartError::Input`]. DST does not fail: an ambiguous local time (the
/// fall-back overlap) and a non-existent one (the spring-forward gap) are
/// both resolved to the standard-time reading, deterministically, with a
/// warning logged.
pub fn resolve(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    context: &GeoTimeContext,
) -> Result<Instant> {
    let tz: Tz = context
        .timezone
        .parse()
        .map_err(|_| ChartError::input(format!("unknown timezone {:?}", context.timezone)))?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| {
            ChartError::input(format!(
                "invalid calendar date {:04}-{:02}-{:02}",
                year, month, day
            ))
        })?
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| ChartError::input(format!("invalid time {:02}:{:02}", hour, minute)))?;

    let utc = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, latest) => {
            // Fall-back overlap: the reading whose DST component is zero is
            // the standard-time instant.
            let standard = if earliest.offset().dst_offset().is_zero() {
                earliest
            } else {
                latest
            };
            warn!(
                "ambiguous local time {} in {}; using the standard-time reading",
                naive, tz
            );
            standard.with_timezone(&Utc)
        }
        LocalResult::None => {
            // Spring-forward gap: read the wall clock against the zone's
            // base (standard) offset, which is stable across transitions.
            let base = tz.offset_from_utc_datetime(&naive).base_utc_offset();
            warn!(
                "non-existent local time {} in {}; using the standard-time reading",
                naive, tz
            );
            Utc.from_utc_datetime(&(naive - base))
        }
    };

    Ok(Instant {
        utc,
        julian_day_ut: julian_day(&utc),
    })
}

/// Julian Day (UT) of a UTC timestamp, standard Gregorian formula.
pub fn julian_day(utc: &DateTime<Utc>) -> f64 {
    let y = i64::from(utc.year());
    let m = i64::from(utc.month());
    let d = i64::from(utc.day());
    let a = (14 - m) / 12;
    let y2 = y + 4800 - a;
    let m2 = m + 12 * a - 3;
    let jdn = d + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 32045;
    let day_fraction = (f64::from(utc.hour()) - 12.0) / 24.0
        + f64::from(utc.minute()) / 1440.0
        + f64::from(utc.second()) / 86400.0;
    jdn as f64 + day_fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn julian_day_at_j2000() {
        let utc = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(julian_day(&utc), 2_451_545.0);
    }

    #[test]
    fn julian_day_before_noon() {
        let utc = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_relative_eq!(julian_day(&utc), 2_451_544.5);
    }
}
