//! Orchestration of time, location, ephemeris and aspects into a chart.

use crate::aspects::{detect_angular_aspects, detect_sign_aspects, AspectPoint, CastPoint};
use crate::ephemeris::{EclipticState, EphemerisGateway, HouseSystem, Observer};
use crate::error::Result;
use crate::geo::{GeoResolver, GeoTimeContext};
use crate::time::{self, Instant};
use crate::types::{decompose, normalize_degrees, Body, Sign, ZodiacMode};
use crate::vedic::nakshatra_at;

use super::types::{AnglePoint, BirthQuery, BodyPosition, Chart, HouseCusp};

/// Builds charts from birth details using injected collaborators.
pub struct ChartBuilder<'a> {
    gateway: &'a dyn EphemerisGateway,
    geocoder: &'a dyn GeoResolver,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(gateway: &'a dyn EphemerisGateway, geocoder: &'a dyn GeoResolver) -> Self {
        Self { gateway, geocoder }
    }

    /// Compute the full chart for one birth query.
    pub fn build(&self, query: &BirthQuery, mode: ZodiacMode) -> Result<Chart> {
        let context = self.geocoder.resolve_place(&query.place)?;
        let instant = time::resolve(
            query.year,
            query.month,
            query.day,
            query.hour,
            query.minute,
            &context,
        )?;
        match mode {
            ZodiacMode::Tropical => self.build_tropical(query, context, instant),
            ZodiacMode::Sidereal => self.build_sidereal(query, context, instant),
        }
    }

    fn build_tropical(
        &self,
        query: &BirthQuery,
        context: GeoTimeContext,
        instant: Instant,
    ) -> Result<Chart> {
        let observer = observer_for(&context);
        let jd = instant.julian_day_ut;

        let mut raw: Vec<(Body, EclipticState)> = Vec::with_capacity(Body::TROPICAL.len());
        for body in Body::TROPICAL {
            raw.push((body, self.gateway.body_position(jd, body, &observer)?));
        }

        let jd_et = jd + self.gateway.delta_t(jd)? / 86_400.0;
        let frame = self
            .gateway
            .houses(jd_et, context.latitude, context.longitude, HouseSystem::Placidus)?;

        let houses: Vec<HouseCusp> = frame
            .cusps
            .iter()
            .enumerate()
            .map(|(i, &lon)| HouseCusp {
                number: (i + 1) as u8,
                longitude: lon,
                position: decompose(lon),
            })
            .collect();

        let bodies: Vec<BodyPosition> = raw
            .iter()
            .map(|&(body, state)| BodyPosition {
                body,
                longitude: state.longitude,
                position: decompose(state.longitude),
                speed: state.speed,
                retrograde: state.speed < 0.0,
                house: house_of_longitude(&frame.cusps, state.longitude),
                nakshatra: None,
            })
            .collect();

        let ascendant = angle(Body::Ascendant, frame.ascendant);
        let midheaven = angle(Body::Midheaven, frame.midheaven);

        let mut points: Vec<AspectPoint> = bodies
            .iter()
            .map(|b| AspectPoint {
                body: b.body,
                longitude: b.longitude,
                speed: Some(b.speed),
            })
            .collect();
        points.push(AspectPoint {
            body: Body::Ascendant,
            longitude: ascendant.longitude,
            speed: None,
        });
        points.push(AspectPoint {
            body: Body::Midheaven,
            longitude: midheaven.longitude,
            speed: None,
        });
        let aspects = detect_angular_aspects(&points);

        Ok(Chart {
            mode: ZodiacMode::Tropical,
            query: query.clone(),
            context,
            instant,
            bodies,
            houses,
            ascendant,
            midheaven,
            aspects,
        })
    }

    fn build_sidereal(
        &self,
        query: &BirthQuery,
        context: GeoTimeContext,
        instant: Instant,
    ) -> Result<Chart> {
        let observer = observer_for(&context);
        let jd = instant.julian_day_ut;
        let ayanamsa = self.gateway.ayanamsa(jd)?;

        // Rahu is queried; Ketu is always its exact opposite point.
        let mut raw: Vec<(Body, f64, f64)> = Vec::with_capacity(Body::SIDEREAL.len());
        for body in Body::SIDEREAL {
            if body == Body::Ketu {
                continue;
            }
            let state = self.gateway.body_position(jd, body, &observer)?;
            let sidereal_lon = normalize_degrees(state.longitude - ayanamsa);
            raw.push((body, sidereal_lon, state.speed));
            if body == Body::Rahu {
                raw.push((
                    Body::Ketu,
                    normalize_degrees(sidereal_lon + 180.0),
                    state.speed,
                ));
            }
        }

        let jd_et = jd + self.gateway.delta_t(jd)? / 86_400.0;
        let frame = self
            .gateway
            .houses(jd_et, context.latitude, context.longitude, HouseSystem::Placidus)?;
        let asc_lon = normalize_degrees(frame.ascendant - ayanamsa);
        let mc_lon = normalize_degrees(frame.midheaven - ayanamsa);
        let ascendant = angle(Body::Ascendant, asc_lon);
        let midheaven = angle(Body::Midheaven, mc_lon);
        let asc_sign = ascendant.position.sign;

        // Whole-sign houses: one house per sign, starting from the
        // ascendant's sign.
        let houses: Vec<HouseCusp> = (0..12)
            .map(|i| {
                let start = ((asc_sign.index() + i) % 12) as f64 * 30.0;
                HouseCusp {
                    number: (i + 1) as u8,
                    longitude: start,
                    position: decompose(start),
                }
            })
            .collect();

        let bodies: Vec<BodyPosition> = raw
            .iter()
            .map(|&(body, lon, speed)| {
                let position = decompose(lon);
                BodyPosition {
                    body,
                    longitude: lon,
                    position,
                    speed,
                    retrograde: speed < 0.0,
                    house: whole_sign_house(position.sign, asc_sign),
                    nakshatra: Some(nakshatra_at(lon)),
                }
            })
            .collect();

        let casters: Vec<CastPoint> = bodies
            .iter()
            .map(|b| CastPoint {
                body: b.body,
                sign: b.position.sign,
            })
            .collect();
        let mut targets = casters.clone();
        targets.push(CastPoint {
            body: Body::Ascendant,
            sign: asc_sign,
        });
        targets.push(CastPoint {
            body: Body::Midheaven,
            sign: midheaven.position.sign,
        });
        let aspects = detect_sign_aspects(&casters, &targets);

        Ok(Chart {
            mode: ZodiacMode::Sidereal,
            query: query.clone(),
            context,
            instant,
            bodies,
            houses,
            ascendant,
            midheaven,
            aspects,
        })
    }
}

fn observer_for(context: &GeoTimeContext) -> Observer {
    Observer {
        latitude: context.latitude,
        longitude: context.longitude,
        altitude: 0.0,
    }
}

fn angle(name: Body, longitude: f64) -> AnglePoint {
    AnglePoint {
        name,
        longitude,
        position: decompose(longitude),
    }
}

/// House containing a longitude under quadrant cusps: the circular
/// interval [cusp[i], cusp[i+1]) with wrap-around at 360°.
pub fn house_of_longitude(cusps: &[f64; 12], longitude: f64) -> u8 {
    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start <= end {
            start <= lon && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return (i + 1) as u8;
        }
    }
    // A well-formed cusp ring covers the circle; this is only reachable
    // with degenerate gateway output.
    12
}

/// Whole-sign house number by sign index distance from the ascendant.
pub fn whole_sign_house(body_sign: Sign, asc_sign: Sign) -> u8 {
    ((body_sign.index() + 12 - asc_sign.index()) % 12 + 1) as u8
}
