pub mod fixed;
pub mod gateway;
#[cfg(feature = "swisseph")]
pub mod swiss;

pub use fixed::FixedEphemeris;
pub use gateway::{EclipticState, EphemerisGateway, HouseFrame, HouseSystem, Observer};
#[cfg(feature = "swisseph")]
pub use swiss::{SwissConfig, SwissEphemeris};
