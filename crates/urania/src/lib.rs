pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod time;
pub mod types;
pub mod vedic;

pub use chart::{AnglePoint, BirthQuery, BodyPosition, Chart, ChartBuilder, HouseCusp};
pub use error::{ChartError, Result};
pub use geo::{GeoResolver, GeoTimeContext};
pub use time::Instant;
pub use types::{Body, Sign, ZodiacMode};
