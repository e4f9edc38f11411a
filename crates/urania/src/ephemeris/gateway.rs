//! Collaborator contract for the ephemeris engine.
//!
//! The engine itself is a black box: it is handed an instant (and, for
//! houses, a location) and returns plain tropical degrees. All zodiac-mode
//! handling happens in the chart builder, so a gateway carries no mutable
//! mode flag and every call is self-describing.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Body;

/// Observer coordinates for topocentric correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    pub altitude: f64,
}

/// Raw ecliptic state of one body: tropical longitude and latitude in
/// degrees, longitudinal speed in degrees per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticState {
    pub longitude: f64,
    pub latitude: f64,
    pub speed: f64,
}

/// House cusps and angles for one instant and location, tropical degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseFrame {
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseSystem {
    Placidus,
    WholeSign,
}

impl HouseSystem {
    /// Single-letter system code used by ephemeris engines.
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::WholeSign => b'W',
        }
    }
}

/// Ephemeris collaborator interface.
pub trait EphemerisGateway {
    /// Topocentric ecliptic position of `body` at `jd_ut`.
    fn body_position(&self, jd_ut: f64, body: Body, observer: &Observer) -> Result<EclipticState>;

    /// Cusps and angles at `jd_et` (ephemeris time, UT + ΔT) for the
    /// given location and house system.
    fn houses(&self, jd_et: f64, latitude: f64, longitude: f64, system: HouseSystem)
        -> Result<HouseFrame>;

    /// ΔT at `jd_ut`, in seconds.
    fn delta_t(&self, jd_ut: f64) -> Result<f64>;

    /// Lahiri ayanamsa at `jd_ut`, in degrees.
    fn ayanamsa(&self, jd_ut: f64) -> Result<f64>;
}
