pub mod builder;
pub mod types;

pub use builder::ChartBuilder;
pub use types::{AnglePoint, BirthQuery, BodyPosition, Chart, HouseCusp};
