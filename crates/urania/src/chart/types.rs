//! The chart aggregate and its parts.

use serde::Serialize;

use crate::aspects::Aspect;
use crate::geo::GeoTimeContext;
use crate::time::Instant;
use crate::types::{Body, Sign, SignPosition, ZodiacMode};

/// Birth details as supplied by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct BirthQuery {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub place: String,
}

/// One placed body.
#[derive(Debug, Clone, Serialize)]
pub struct BodyPosition {
    pub body: Body,
    pub longitude: f64,
    pub position: SignPosition,
    pub speed: f64,
    pub retrograde: bool,
    pub house: u8,
    /// Sidereal charts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<&'static str>,
}

/// One of the twelve house cusps.
#[derive(Debug, Clone, Serialize)]
pub struct HouseCusp {
    pub number: u8,
    pub longitude: f64,
    pub position: SignPosition,
}

/// Ascendant or Midheaven.
#[derive(Debug, Clone, Serialize)]
pub struct AnglePoint {
    pub name: Body,
    pub longitude: f64,
    pub position: SignPosition,
}

/// A fully computed natal chart. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub mode: ZodiacMode,
    pub query: BirthQuery,
    pub context: GeoTimeContext,
    pub instant: Instant,
    pub bodies: Vec<BodyPosition>,
    pub houses: Vec<HouseCusp>,
    pub ascendant: AnglePoint,
    pub midheaven: AnglePoint,
    pub aspects: Vec<Aspect>,
}

impl Chart {
    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|b| b.body == body)
    }

    /// Sign of a body or angle, if it is part of this chart.
    pub fn sign_of(&self, body: Body) -> Option<Sign> {
        match body {
            Body::Ascendant => Some(self.ascendant.position.sign),
            Body::Midheaven => Some(self.midheaven.position.sign),
            _ => self.body(body).map(|b| b.position.sign),
        }
    }

    /// House of a placed body. Angles mark cusps rather than occupying a
    /// house, so they resolve to `None`.
    pub fn house_of(&self, body: Body) -> Option<u8> {
        if body.is_angle() {
            return None;
        }
        self.body(body).map(|b| b.house)
    }

    pub fn house_cusp(&self, number: u8) -> Option<&HouseCusp> {
        self.houses.iter().find(|h| h.number == number)
    }

    pub fn bodies_in_house(&self, number: u8) -> Vec<&BodyPosition> {
        self.bodies.iter().filter(|b| b.house == number).collect()
    }
}
