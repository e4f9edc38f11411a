//! Place-name resolution: geocoding plus offline timezone lookup.

use lazy_static::lazy_static;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tzf_rs::DefaultFinder;

use crate::error::{ChartError, Result};

lazy_static! {
    static ref TZ_FINDER: DefaultFinder = DefaultFinder::new();
}

/// Coordinates and timezone of a birth place, valid for one chart
/// computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTimeContext {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. "Asia/Kolkata".
    pub timezone: String,
}

/// Resolves a free-text place name to a [`GeoTimeContext`].
pub trait GeoResolver {
    fn resolve_place(&self, place: &str) -> Result<GeoTimeContext>;
}

/// Configuration for the geocode.maps.co client. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://geocode.maps.co/search".to_string(),
            api_key: env::var("GEOCODE_API_KEY").ok(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Geocoding client backed by the maps.co search endpoint.
///
/// The timezone is derived locally from the returned coordinates; the
/// service is only asked for latitude and longitude.
pub struct MapsCoGeocoder {
    client: reqwest::blocking::Client,
    config: GeocoderConfig,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

impl MapsCoGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChartError::Geocoding {
                place: String::new(),
                message: format!("could not build HTTP client: {}", e),
            })?;
        Ok(Self { client, config })
    }

    fn upstream(place: &str, message: impl Into<String>) -> ChartError {
        ChartError::Geocoding {
            place: place.to_string(),
            message: message.into(),
        }
    }
}

impl GeoResolver for MapsCoGeocoder {
    fn resolve_place(&self, place: &str) -> Result<GeoTimeContext> {
        let place = place.trim();
        if place.is_empty() {
            return Err(ChartError::input("birth place must not be empty"));
        }

        let mut request = self.client.get(&self.config.base_url).query(&[("q", place)]);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request
            .send()
            .map_err(|e| Self::upstream(place, e.to_string()))?
            .error_for_status()
            .map_err(|e| Self::upstream(place, e.to_string()))?;

        let hits: Vec<GeocodeHit> = response
            .json()
            .map_err(|e| Self::upstream(place, format!("unparseable response: {}", e)))?;
        let first = hits
            .first()
            .ok_or_else(|| Self::upstream(place, "no results"))?;

        let latitude = first
            .lat
            .parse::<f64>()
            .map_err(|e| Self::upstream(place, format!("bad latitude {:?}: {}", first.lat, e)))?;
        let longitude = first
            .lon
            .parse::<f64>()
            .map_err(|e| Self::upstream(place, format!("bad longitude {:?}: {}", first.lon, e)))?;

        Ok(GeoTimeContext {
            latitude,
            longitude,
            timezone: timezone_at(latitude, longitude),
        })
    }
}

/// Timezone identifier for a coordinate pair.
///
/// Uses the offline polygon index; when that yields nothing (open ocean),
/// falls back to the Etc/GMT zone for the longitude-derived whole-hour
/// offset. Etc/GMT zones use the POSIX sign convention, so east of
/// Greenwich maps to `Etc/GMT-N`.
pub fn timezone_at(latitude: f64, longitude: f64) -> String {
    let name = TZ_FINDER.get_tz_name(longitude, latitude);
    if !name.is_empty() {
        return name.to_string();
    }
    let offset_hours = (longitude / 15.0) as i32;
    let fallback = format!("Etc/GMT{:+}", -offset_hours);
    warn!(
        "no timezone found at ({:.3}, {:.3}); estimating {}",
        latitude, longitude, fallback
    );
    fallback
}

/// A resolver for callers that already know the coordinates and timezone.
/// Bypasses the network entirely.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub GeoTimeContext);

impl GeoResolver for FixedLocation {
    fn resolve_place(&self, place: &str) -> Result<GeoTimeContext> {
        if place.trim().is_empty() {
            return Err(ChartError::input("birth place must not be empty"));
        }
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_zone_uses_posix_sign() {
        // 86°E is UTC+5-ish; the Etc alias for that is GMT-5.
        let offset_hours = (86.18_f64 / 15.0) as i32;
        assert_eq!(offset_hours, 5);
        assert_eq!(format!("Etc/GMT{:+}", -offset_hours), "Etc/GMT-5");
    }

    #[test]
    fn fixed_location_rejects_empty_place() {
        let resolver = FixedLocation(GeoTimeContext {
            latitude: 0.0,
            longitude: 0.0,
            timezone: "UTC".to_string(),
        });
        assert!(resolver.resolve_place("  ").is_err());
        assert!(resolver.resolve_place("Somewhere").is_ok());
    }
}
