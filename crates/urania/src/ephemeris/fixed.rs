//! Deterministic in-memory gateway for tests, demos, and offline use.

use std::collections::HashMap;

use crate::error::{ChartError, Result};
use crate::types::Body;

use super::gateway::{EclipticState, EphemerisGateway, HouseFrame, HouseSystem, Observer};

/// An [`EphemerisGateway`] that serves pre-seeded positions.
///
/// Unknown bodies fail the same way a real engine would, so orchestration
/// error paths can be exercised without a native library.
#[derive(Debug, Clone)]
pub struct FixedEphemeris {
    bodies: HashMap<Body, EclipticState>,
    frame: HouseFrame,
    delta_t_seconds: f64,
    ayanamsa_degrees: f64,
}

impl FixedEphemeris {
    pub fn new(frame: HouseFrame) -> Self {
        Self {
            bodies: HashMap::new(),
            frame,
            delta_t_seconds: 60.0,
            ayanamsa_degrees: 23.65,
        }
    }

    pub fn with_body(mut self, body: Body, longitude: f64, speed: f64) -> Self {
        self.bodies.insert(
            body,
            EclipticState {
                longitude,
                latitude: 0.0,
                speed,
            },
        );
        self
    }

    pub fn with_delta_t(mut self, seconds: f64) -> Self {
        self.delta_t_seconds = seconds;
        self
    }

    pub fn with_ayanamsa(mut self, degrees: f64) -> Self {
        self.ayanamsa_degrees = degrees;
        self
    }
}

impl EphemerisGateway for FixedEphemeris {
    fn body_position(&self, jd_ut: f64, body: Body, _observer: &Observer) -> Result<EclipticState> {
        self.bodies.get(&body).copied().ok_or_else(|| {
            ChartError::ephemeris(
                format!("body {} at jd {}", body, jd_ut),
                "no position seeded",
            )
        })
    }

    fn houses(
        &self,
        _jd_et: f64,
        _latitude: f64,
        _longitude: f64,
        _system: HouseSystem,
    ) -> Result<HouseFrame> {
        Ok(self.frame.clone())
    }

    fn delta_t(&self, _jd_ut: f64) -> Result<f64> {
        Ok(self.delta_t_seconds)
    }

    fn ayanamsa(&self, _jd_ut: f64) -> Result<f64> {
        Ok(self.ayanamsa_degrees)
    }
}
