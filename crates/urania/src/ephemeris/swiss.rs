//! Swiss Ephemeris gateway binding.

use std::path::PathBuf;

use swisseph::swe::{calc_ut, deltat, get_ayanamsa_ut, houses_ex, set_sid_mode, set_topo};
use swisseph::{AscMc, Cusp};

use crate::error::{ChartError, Result};
use crate::types::{normalize_degrees, Body};

use super::gateway::{EclipticState, EphemerisGateway, HouseFrame, HouseSystem, Observer};

const FLG_SWIEPH: u32 = 2;
const FLG_SPEED: u32 = 256;
const FLG_TOPOCTR: u32 = 32768;
const SIDM_LAHIRI: i32 = 1;

/// Configuration handed to the adapter at construction; never mutated
/// afterwards. The underlying library keeps process-wide state, so two
/// adapters with different configurations must not be used concurrently.
#[derive(Debug, Clone, Default)]
pub struct SwissConfig {
    pub ephemeris_path: Option<PathBuf>,
}

pub struct SwissEphemeris {
    _config: SwissConfig,
}

impl SwissEphemeris {
    pub fn new(config: SwissConfig) -> Result<Self> {
        if let Some(path) = &config.ephemeris_path {
            if !path.exists() {
                return Err(ChartError::ephemeris(
                    "initialization",
                    format!("ephemeris path does not exist: {}", path.display()),
                ));
            }
        }
        // Lahiri is the only ayanamsa this engine is asked for; set it once
        // here, before any calculation runs.
        set_sid_mode(SIDM_LAHIRI, 0.0, 0.0);
        Ok(Self { _config: config })
    }

    fn planet_code(body: Body) -> Result<u32> {
        // SE planet numbers; the mean node is 10 under either of its names.
        let code = match body {
            Body::Sun => 0,
            Body::Moon => 1,
            Body::Mercury => 2,
            Body::Venus => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::MeanNode | Body::Rahu => 10,
            Body::Ketu | Body::Ascendant | Body::Midheaven => {
                return Err(ChartError::ephemeris(
                    format!("body {}", body),
                    "derived point, not queryable",
                ))
            }
        };
        Ok(code)
    }
}

impl EphemerisGateway for SwissEphemeris {
    fn body_position(&self, jd_ut: f64, body: Body, observer: &Observer) -> Result<EclipticState> {
        let code = Self::planet_code(body)?;
        set_topo(observer.longitude, observer.latitude, observer.altitude);
        let flags = FLG_SWIEPH | FLG_SPEED | FLG_TOPOCTR;
        let result = calc_ut(jd_ut, code, flags).map_err(|e| {
            ChartError::ephemeris(format!("body {} at jd {}", body, jd_ut), e.to_string())
        })?;
        let out = result.out;
        Ok(EclipticState {
            longitude: normalize_degrees(out[0]),
            latitude: out[1],
            speed: out[3],
        })
    }

    fn houses(
        &self,
        jd_et: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame> {
        let flags = FLG_SWIEPH;
        let (c, a) = houses_ex(jd_et, flags as i32, latitude, longitude, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);
        Ok(HouseFrame {
            cusps: [
                normalize_degrees(cusps.first),
                normalize_degrees(cusps.second),
                normalize_degrees(cusps.third),
                normalize_degrees(cusps.fourth),
                normalize_degrees(cusps.fifth),
                normalize_degrees(cusps.sixth),
                normalize_degrees(cusps.seventh),
                normalize_degrees(cusps.eighth),
                normalize_degrees(cusps.ninth),
                normalize_degrees(cusps.tenth),
                normalize_degrees(cusps.eleventh),
                normalize_degrees(cusps.twelfth),
            ],
            ascendant: normalize_degrees(ascmc.ascendant),
            midheaven: normalize_degrees(ascmc.mc),
        })
    }

    fn delta_t(&self, jd_ut: f64) -> Result<f64> {
        // The engine reports ΔT in days.
        Ok(deltat(jd_ut) * 86_400.0)
    }

    fn ayanamsa(&self, jd_ut: f64) -> Result<f64> {
        Ok(get_ayanamsa_ut(jd_ut))
    }
}
